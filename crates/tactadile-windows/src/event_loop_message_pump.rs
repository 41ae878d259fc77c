use std::sync::Mutex;

use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, TranslateMessage, WM_HOTKEY,
};

use crate::hotkey::HotkeyManager;

use super::{REGISTER_MSG, Registration};

/// The Win32 message pump. Dispatches hotkey and registration messages
/// and blocks until WM_QUIT is received.
///
/// The low-level keyboard hook is serviced from inside `GetMessageW`.
pub(crate) fn run_message_pump(hotkeys: &mut HotkeyManager, pending: &Mutex<Option<Registration>>) {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        if msg.message == WM_HOTKEY {
            hotkeys.dispatch(msg.wParam.0 as i32, msg.lParam.0);
            continue;
        }

        if msg.message == REGISTER_MSG {
            let request = pending.lock().ok().and_then(|mut slot| slot.take());
            if let Some(Registration { bindings, reply }) = request {
                let failed = hotkeys.register_all(&bindings);
                let _ = reply.send(failed);
            }
            continue;
        }

        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}
