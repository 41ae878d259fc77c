use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Accessibility::HWINEVENTHOOK;
use windows::Win32::UI::WindowsAndMessaging::{CHILDID_SELF, GA_ROOT, GetAncestor, OBJID_WINDOW};

use crate::desktop;

use super::SHOWN_SENDER;

/// The WinEvent callback for `EVENT_OBJECT_SHOW`.
///
/// Publishes top-level, unowned, caption-bearing windows; child objects,
/// owned popups and tool windows are ignored.
pub(crate) unsafe extern "system" fn win_event_proc(
    _hook: HWINEVENTHOOK,
    _event: u32,
    hwnd: HWND,
    id_object: i32,
    id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    if id_object != OBJID_WINDOW.0 || id_child != CHILDID_SELF as i32 || hwnd.is_invalid() {
        return;
    }
    // SAFETY: GetAncestor is a read-only query.
    if unsafe { GetAncestor(hwnd, GA_ROOT) } != hwnd || !desktop::is_app_window(hwnd) {
        return;
    }

    SHOWN_SENDER.with(|cell| {
        if let Some(sender) = cell.borrow().as_ref() {
            let _ = sender.send(hwnd.0 as usize);
        }
    });
}
