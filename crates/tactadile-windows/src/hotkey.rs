use std::sync::mpsc::Sender;

use tactadile_core::hotkey::Binding;
use tactadile_core::input::InputEvent;
use tactadile_core::{ModifierFlags, log_debug};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MOD_NOREPEAT, RegisterHotKey, UnregisterHotKey,
};

/// A registered global hotkey.
struct Hotkey {
    id: i32,
    binding: Binding,
}

/// Manages native global hotkey registrations.
///
/// Hotkeys are registered on the current thread's message queue.
/// `WM_HOTKEY` messages arrive via the Win32 message pump running
/// on the same thread.
pub struct HotkeyManager {
    hotkeys: Vec<Hotkey>,
    next_id: i32,
    sender: Sender<InputEvent>,
}

impl HotkeyManager {
    /// Creates a new hotkey manager.
    ///
    /// Requests triggered by hotkeys are sent through `sender`.
    pub fn new(sender: Sender<InputEvent>) -> Self {
        Self {
            hotkeys: Vec::new(),
            next_id: 1,
            sender,
        }
    }

    /// Revokes every current registration, then registers `bindings`.
    ///
    /// Returns the bindings the OS refused (the chord is owned by another
    /// application or the shell).
    pub fn register_all(&mut self, bindings: &[Binding]) -> Vec<Binding> {
        self.unregister_all();

        let mut failed = Vec::new();
        for binding in bindings {
            if !self.register(binding) {
                failed.push(binding.clone());
            }
        }
        failed
    }

    /// Revokes every registration made by this manager.
    pub fn unregister_all(&mut self) {
        for hotkey in self.hotkeys.drain(..) {
            // SAFETY: UnregisterHotKey removes a registration made on this thread.
            unsafe {
                let _ = UnregisterHotKey(None, hotkey.id);
            }
        }
    }

    /// Dispatches a `WM_HOTKEY` message.
    ///
    /// `lparam` carries the pressed modifiers in its low word and the
    /// virtual key in its high word.
    pub fn dispatch(&self, hotkey_id: i32, lparam: isize) {
        let Some(hotkey) = self.hotkeys.iter().find(|h| h.id == hotkey_id) else {
            return;
        };
        let modifiers = ModifierFlags::from_bits((lparam & 0xFFFF) as u32);
        let vk = ((lparam >> 16) & 0xFFFF) as u32;
        let request = hotkey.binding.request(modifiers, vk);
        let _ = self.sender.send(InputEvent::Hotkey(request));
    }

    /// Registers a single binding under a fresh id.
    fn register(&mut self, binding: &Binding) -> bool {
        let id = self.next_id;
        self.next_id += 1;

        let modifiers = HOT_KEY_MODIFIERS(binding.chord.modifiers.bits()) | MOD_NOREPEAT;
        // SAFETY: RegisterHotKey registers a system-wide hotkey on the
        // current thread's message queue under a unique id.
        let result = unsafe { RegisterHotKey(None, id, modifiers, binding.chord.vk) };

        if result.is_err() {
            log_debug!("Hotkey {} for {} is taken", binding.chord, binding.action);
            return false;
        }

        self.hotkeys.push(Hotkey {
            id,
            binding: binding.clone(),
        });
        true
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        self.unregister_all();
    }
}
