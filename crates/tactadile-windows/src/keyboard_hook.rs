//! The global low-level keyboard hook.
//!
//! Installed on the event-loop thread, whose message pump keeps it alive.
//! The callback feeds every event through a [`KeyInterceptor`] and
//! republishes transitions to subscribers; it never logs, blocks or does
//! window work itself.

use std::cell::RefCell;
use std::sync::mpsc::Sender;

use tactadile_core::WindowResult;
use tactadile_core::input::{
    InputEvent, KeyInterceptor, KeyTransition, OverrideTable, RawKeyEvent, Verdict,
};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT, SetWindowsHookExW, UnhookWindowsHookEx,
    WH_KEYBOARD_LL, WM_KEYDOWN, WM_KEYUP, WM_SYSKEYDOWN, WM_SYSKEYUP,
};

use crate::keystroke;

struct HookState {
    interceptor: KeyInterceptor,
    subscribers: Vec<Sender<InputEvent>>,
}

thread_local! {
    static HOOK_STATE: RefCell<Option<HookState>> = const { RefCell::new(None) };
}

/// An installed keyboard hook. Dropping it removes the hook.
pub struct KeyboardHook {
    hook: HHOOK,
}

impl KeyboardHook {
    /// Installs the hook on the current thread.
    ///
    /// `overrides` is shared with whoever updates the suppression set;
    /// every subscriber receives each published transition.
    pub fn install(
        overrides: OverrideTable,
        subscribers: Vec<Sender<InputEvent>>,
    ) -> WindowResult<Self> {
        HOOK_STATE.with(|cell| {
            *cell.borrow_mut() = Some(HookState {
                interceptor: KeyInterceptor::new(overrides),
                subscribers,
            });
        });

        // SAFETY: the module handle of our own executable is always valid.
        let module = unsafe { GetModuleHandleW(None)? };
        // SAFETY: keyboard_proc matches HOOKPROC; LL hooks run on this
        // thread's message loop.
        let hook =
            unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_proc), Some(module.into()), 0) };

        match hook {
            Ok(hook) => Ok(Self { hook }),
            Err(e) => {
                HOOK_STATE.with(|cell| cell.borrow_mut().take());
                Err(e.into())
            }
        }
    }
}

impl Drop for KeyboardHook {
    fn drop(&mut self) {
        // SAFETY: the hook was installed by this guard and is removed once.
        unsafe {
            let _ = UnhookWindowsHookEx(self.hook);
        }
        HOOK_STATE.with(|cell| cell.borrow_mut().take());
    }
}

unsafe extern "system" fn keyboard_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        let is_down = match wparam.0 as u32 {
            WM_KEYDOWN | WM_SYSKEYDOWN => Some(true),
            WM_KEYUP | WM_SYSKEYUP => Some(false),
            _ => None,
        };

        if let Some(is_down) = is_down {
            // SAFETY: for HC_ACTION, lparam points to a KBDLLHOOKSTRUCT.
            let info = unsafe { &*(lparam.0 as *const KBDLLHOOKSTRUCT) };
            let event = RawKeyEvent {
                vk: info.vkCode,
                is_down,
                extra_info: info.dwExtraInfo,
            };
            if handle(event) {
                return LRESULT(1);
            }
        }
    }
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}

/// Runs one event through the interceptor. Returns `true` to swallow it.
fn handle(event: RawKeyEvent) -> bool {
    HOOK_STATE.with(|cell| {
        // A re-entrant call (from our own SendInput) finds the state
        // borrowed; those events carry the marker and pass through anyway.
        let Ok(mut slot) = cell.try_borrow_mut() else {
            return false;
        };
        let Some(state) = slot.as_mut() else {
            return false;
        };

        match state.interceptor.process(event) {
            Verdict::PassSynthetic => false,
            Verdict::Forward(transition) => {
                publish(&mut state.subscribers, transition);
                false
            }
            Verdict::Swallow {
                transition,
                mask_win,
            } => {
                publish(&mut state.subscribers, transition);
                if mask_win {
                    keystroke::send_mask_key();
                }
                true
            }
        }
    })
}

/// Sends to every subscriber, dropping those whose receiver is gone.
fn publish(subscribers: &mut Vec<Sender<InputEvent>>, transition: KeyTransition) {
    subscribers.retain(|tx| tx.send(InputEvent::Key(transition)).is_ok());
}
