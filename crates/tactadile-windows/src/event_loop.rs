use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tactadile_core::hotkey::Binding;
use tactadile_core::input::{InputEvent, OverrideTable};
use tactadile_core::{WindowResult, log_error, log_info};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::Accessibility::{SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_OBJECT_SHOW, PostThreadMessageW, WINEVENT_OUTOFCONTEXT, WINEVENT_SKIPOWNPROCESS, WM_APP,
    WM_QUIT,
};

use crate::hotkey::HotkeyManager;
use crate::keyboard_hook::KeyboardHook;

#[path = "event_loop_message_pump.rs"]
mod message_pump;
#[path = "event_loop_win_event.rs"]
mod win_event;

/// Thread message asking the loop to re-register hotkeys.
const REGISTER_MSG: u32 = WM_APP + 1;

/// How long `register_all` waits for the loop thread to answer.
const REGISTER_TIMEOUT: Duration = Duration::from_secs(2);

// Thread-local sender for the WinEvent callback.
thread_local! {
    static SHOWN_SENDER: std::cell::RefCell<Option<Sender<usize>>> =
        const { std::cell::RefCell::new(None) };
}

/// Where the event loop publishes what it observes.
pub struct EventLoopChannels {
    /// Key transitions and native hotkey requests, in OS order.
    pub input: Sender<InputEvent>,
    /// Handles of newly shown application windows.
    pub shown: Sender<usize>,
}

/// A hotkey re-registration handed to the loop thread.
struct Registration {
    bindings: Vec<Binding>,
    reply: Sender<Vec<Binding>>,
}

type RegistrationSlot = Arc<Mutex<Option<Registration>>>;

/// Starts the Win32 event loop on a new thread.
///
/// The thread owns the keyboard hook, the "window shown" hook and all
/// native hotkey registrations; each is released when the loop exits.
pub fn start(channels: EventLoopChannels, overrides: OverrideTable) -> WindowResult<EventLoopHandle> {
    let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, String>>();
    let pending: RegistrationSlot = Arc::new(Mutex::new(None));
    let loop_pending = pending.clone();

    let handle = thread::spawn(move || {
        let EventLoopChannels { input, shown } = channels;

        SHOWN_SENDER.with(|cell| {
            *cell.borrow_mut() = Some(shown);
        });

        let thread_id = unsafe { windows::Win32::System::Threading::GetCurrentThreadId() };

        // SAFETY: SetWinEventHook registers our callback for system-wide
        // window events. WINEVENT_OUTOFCONTEXT means the callback runs in
        // our process. WINEVENT_SKIPOWNPROCESS ignores our own windows.
        let win_event_hook = unsafe {
            SetWinEventHook(
                EVENT_OBJECT_SHOW,
                EVENT_OBJECT_SHOW,
                None,
                Some(win_event::win_event_proc),
                0,
                0,
                WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS,
            )
        };

        if win_event_hook.is_invalid() {
            let _ = ready_tx.send(Err("Failed to set WinEvent hook".to_string()));
            return;
        }

        let keyboard_hook = match KeyboardHook::install(overrides, vec![input.clone()]) {
            Ok(hook) => Some(hook),
            Err(e) => {
                log_error!("Keyboard hook not installed, overrides and drags disabled: {e}");
                None
            }
        };

        let mut hotkeys = HotkeyManager::new(input);

        let _ = ready_tx.send(Ok(thread_id));

        message_pump::run_message_pump(&mut hotkeys, &loop_pending);

        drop(hotkeys);
        drop(keyboard_hook);
        unsafe {
            let _ = UnhookWinEvent(win_event_hook);
        }
        log_info!("Event loop stopped, hooks removed");
    });

    let thread_id: u32 = ready_rx
        .recv()
        .map_err(|_| -> Box<dyn std::error::Error> {
            "event loop thread exited unexpectedly".into()
        })?
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;

    Ok(EventLoopHandle {
        thread_id,
        handle,
        pending,
    })
}

/// Handle for controlling the event loop from the daemon.
pub struct EventLoopHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
    pending: RegistrationSlot,
}

impl EventLoopHandle {
    /// Replaces the native hotkey registrations with `bindings`.
    ///
    /// Blocks until the loop thread has registered them and returns the
    /// bindings the OS refused.
    pub fn register_all(&self, bindings: Vec<Binding>) -> WindowResult<Vec<Binding>> {
        let (reply, reply_rx) = mpsc::channel();
        {
            let mut slot = self.pending.lock().map_err(|_| "registration slot poisoned")?;
            *slot = Some(Registration { bindings, reply });
        }

        // SAFETY: posting to a thread we own; the payload travels in the slot.
        unsafe { PostThreadMessageW(self.thread_id, REGISTER_MSG, WPARAM(0), LPARAM(0))? };

        reply_rx
            .recv_timeout(REGISTER_TIMEOUT)
            .map_err(|e| format!("hotkey registration did not complete: {e}").into())
    }

    /// Signals the event loop to stop and waits for the thread to finish.
    pub fn stop(self) {
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}
