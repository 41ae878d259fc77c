use tactadile_core::monitor::Monitor;
use tactadile_core::window::{Desktop, ShowState};
use tactadile_core::{Point, Rect, WindowResult};

use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, POINT, RECT};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GA_ROOT, GW_OWNER, GWL_EXSTYLE, GWL_STYLE, GetAncestor, GetCursorPos,
    GetDesktopWindow, GetLayeredWindowAttributes, GetShellWindow, GetWindow, GetWindowLongPtrW,
    GetWindowRect, GetWindowTextLengthW, IsIconic, IsWindow, IsWindowVisible, IsZoomed, LAYERED_WINDOW_ATTRIBUTES_FLAGS,
    LWA_ALPHA, RealGetWindowClassW, SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE, SWP_NOACTIVATE,
    SWP_NOSIZE, SWP_NOZORDER, SetLayeredWindowAttributes, SetWindowLongPtrW, SetWindowPos,
    ShowWindow, WS_CAPTION, WS_CHILD, WS_EX_LAYERED, WS_EX_TOOLWINDOW, WindowFromPoint,
};
use windows::core::BOOL;

use crate::monitor;

/// Shell surfaces that never count as an action target.
const SHELL_CLASSES: [&str; 4] = ["Progman", "WorkerW", "Shell_TrayWnd", "Shell_SecondaryTrayWnd"];

/// The live Windows desktop.
///
/// Stateless: every call goes straight to Win32, so a closed window shows
/// up as an error (or `false`) on the next call that touches it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Desktop;

impl Win32Desktop {
    pub fn new() -> Self {
        Self
    }
}

fn hwnd(handle: usize) -> HWND {
    HWND(handle as *mut _)
}

fn ex_style(h: HWND) -> u32 {
    // SAFETY: GetWindowLongPtrW reads a style word; 0 for invalid handles.
    unsafe { GetWindowLongPtrW(h, GWL_EXSTYLE) as u32 }
}

fn class_name(h: HWND) -> String {
    // SAFETY: 256 is the maximum class name length in Win32.
    unsafe {
        let mut buffer = [0u16; 256];
        let length = RealGetWindowClassW(h, &mut buffer);
        String::from_utf16_lossy(&buffer[..length as usize])
    }
}

/// Whether a top-level window is a regular application window: visible,
/// not minimized, unowned, with a caption and not a tool window.
pub fn is_app_window(h: HWND) -> bool {
    // SAFETY: read-only queries on a window handle.
    unsafe {
        if !IsWindowVisible(h).as_bool() || IsIconic(h).as_bool() {
            return false;
        }
        if GetWindow(h, GW_OWNER).is_ok_and(|owner| !owner.is_invalid()) {
            return false;
        }
        let style = GetWindowLongPtrW(h, GWL_STYLE) as u32;
        let has_caption = style & WS_CAPTION.0 == WS_CAPTION.0;
        let is_tool = ex_style(h) & WS_EX_TOOLWINDOW.0 != 0;
        has_caption && !is_tool
    }
}

/// The window properties cascade eligibility depends on.
#[derive(Debug, Clone, Copy, Default)]
struct WindowTraits {
    visible: bool,
    minimized: bool,
    owned: bool,
    style: u32,
    ex_style: u32,
    title_len: i32,
}

impl WindowTraits {
    fn read(h: HWND) -> Self {
        // SAFETY: read-only queries on a window handle.
        unsafe {
            Self {
                visible: IsWindowVisible(h).as_bool(),
                minimized: IsIconic(h).as_bool(),
                owned: GetWindow(h, GW_OWNER).is_ok_and(|owner| !owner.is_invalid()),
                style: GetWindowLongPtrW(h, GWL_STYLE) as u32,
                ex_style: ex_style(h),
                title_len: GetWindowTextLengthW(h),
            }
        }
    }

    /// Visible, not minimized, unowned, not a child, titled, and not a
    /// tool window.
    fn is_cascadable(&self) -> bool {
        self.visible
            && !self.minimized
            && !self.owned
            && self.style & WS_CHILD.0 == 0
            && self.title_len > 0
            && self.ex_style & WS_EX_TOOLWINDOW.0 == 0
    }
}

impl Desktop for Win32Desktop {
    fn is_window(&self, handle: usize) -> bool {
        // SAFETY: IsWindow accepts any handle value.
        unsafe { IsWindow(Some(hwnd(handle))).as_bool() }
    }

    fn is_visible(&self, handle: usize) -> bool {
        unsafe { IsWindowVisible(hwnd(handle)).as_bool() }
    }

    fn is_maximized(&self, handle: usize) -> bool {
        unsafe { IsZoomed(hwnd(handle)).as_bool() }
    }

    fn is_minimized(&self, handle: usize) -> bool {
        unsafe { IsIconic(hwnd(handle)).as_bool() }
    }

    fn window_rect(&self, handle: usize) -> WindowResult<Rect> {
        let mut rc = RECT::default();
        // SAFETY: GetWindowRect fills the RECT for a valid handle.
        unsafe { GetWindowRect(hwnd(handle), &mut rc)? };
        Ok(monitor::to_rect(&rc))
    }

    fn normal_rect(&self, handle: usize) -> WindowResult<Rect> {
        if self.is_maximized(handle) || self.is_minimized(handle) {
            return Err(format!("window 0x{handle:X} is not in normal state").into());
        }
        self.window_rect(handle)
    }

    fn restore_to(&self, handle: usize, rect: &Rect) -> WindowResult<()> {
        if self.is_maximized(handle) || self.is_minimized(handle) {
            self.show(handle, ShowState::Restore)?;
        }
        self.set_rect(handle, rect)
    }

    fn show(&self, handle: usize, state: ShowState) -> WindowResult<()> {
        if !self.is_window(handle) {
            return Err(format!("invalid window handle 0x{handle:X}").into());
        }
        let cmd = match state {
            ShowState::Minimize => SW_MINIMIZE,
            ShowState::Maximize => SW_MAXIMIZE,
            ShowState::Restore => SW_RESTORE,
        };
        // ShowWindow returns the previous visibility, not success.
        unsafe {
            let _ = ShowWindow(hwnd(handle), cmd);
        }
        Ok(())
    }

    fn set_rect(&self, handle: usize, rect: &Rect) -> WindowResult<()> {
        // SAFETY: SetWindowPos with a valid HWND is safe.
        unsafe {
            SetWindowPos(
                hwnd(handle),
                None,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )?
        };
        Ok(())
    }

    fn set_position(&self, handle: usize, x: i32, y: i32) -> WindowResult<()> {
        unsafe {
            SetWindowPos(
                hwnd(handle),
                None,
                x,
                y,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            )?
        };
        Ok(())
    }

    fn opacity(&self, handle: usize) -> WindowResult<Option<u8>> {
        let h = hwnd(handle);
        if ex_style(h) & WS_EX_LAYERED.0 == 0 {
            return Ok(None);
        }

        let mut alpha = 0u8;
        let mut flags = LAYERED_WINDOW_ATTRIBUTES_FLAGS::default();
        // SAFETY: out-parameters point to live locals; the color key is not needed.
        unsafe { GetLayeredWindowAttributes(h, None, Some(&mut alpha), Some(&mut flags))? };
        Ok((flags.0 & LWA_ALPHA.0 != 0).then_some(alpha))
    }

    fn set_opacity(&self, handle: usize, alpha: Option<u8>) -> WindowResult<()> {
        let h = hwnd(handle);
        let style = ex_style(h);
        // SAFETY: style updates and layered attributes on a window handle.
        unsafe {
            match alpha {
                Some(alpha) => {
                    if style & WS_EX_LAYERED.0 == 0 {
                        SetWindowLongPtrW(h, GWL_EXSTYLE, (style | WS_EX_LAYERED.0) as isize);
                    }
                    SetLayeredWindowAttributes(h, COLORREF(0), alpha, LWA_ALPHA)?;
                }
                None => {
                    SetWindowLongPtrW(h, GWL_EXSTYLE, (style & !WS_EX_LAYERED.0) as isize);
                }
            }
        }
        Ok(())
    }

    fn cursor_pos(&self) -> WindowResult<Point> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point)? };
        Ok(Point::new(point.x, point.y))
    }

    fn window_at(&self, point: Point) -> Option<usize> {
        // SAFETY: read-only hit testing and ancestry queries.
        let root = unsafe {
            let hit = WindowFromPoint(POINT {
                x: point.x,
                y: point.y,
            });
            if hit.is_invalid() {
                return None;
            }
            GetAncestor(hit, GA_ROOT)
        };
        if root.is_invalid() {
            return None;
        }

        let (desktop, shell) = unsafe { (GetDesktopWindow(), GetShellWindow()) };
        if root == desktop || root == shell {
            return None;
        }
        if SHELL_CLASSES.contains(&class_name(root).as_str()) {
            return None;
        }
        Some(root.0 as usize)
    }

    fn monitors(&self) -> WindowResult<Vec<Monitor>> {
        monitor::enumerate_monitors()
    }

    fn monitor_for_window(&self, handle: usize) -> WindowResult<Monitor> {
        if !self.is_window(handle) {
            return Err(format!("invalid window handle 0x{handle:X}").into());
        }
        monitor::monitor_for_window(hwnd(handle))
    }

    fn top_level_windows(&self) -> WindowResult<Vec<usize>> {
        let mut windows: Vec<usize> = Vec::new();

        // SAFETY: EnumWindows runs synchronously; the Vec passed as LPARAM
        // outlives the call.
        unsafe {
            EnumWindows(
                Some(enum_window_callback),
                LPARAM(&mut windows as *mut _ as isize),
            )?;
        }
        Ok(windows)
    }
}

/// Collects cascadable windows in z-order. Returns `TRUE` to continue.
unsafe extern "system" fn enum_window_callback(h: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the Vec<usize> pointer from top_level_windows().
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<usize>) };

    if WindowTraits::read(h).is_cascadable() && !SHELL_CLASSES.contains(&class_name(h).as_str()) {
        windows.push(h.0 as usize);
    }
    BOOL(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled_window() -> WindowTraits {
        WindowTraits {
            visible: true,
            style: WS_CAPTION.0,
            title_len: 7,
            ..Default::default()
        }
    }

    #[test]
    fn titled_top_level_window_is_cascadable() {
        assert!(titled_window().is_cascadable());
    }

    #[test]
    fn titled_window_without_caption_style_is_cascadable() {
        let traits = WindowTraits {
            style: 0,
            ..titled_window()
        };
        assert!(traits.is_cascadable());
    }

    #[test]
    fn untitled_window_is_skipped_even_with_a_caption() {
        let traits = WindowTraits {
            title_len: 0,
            ..titled_window()
        };
        assert!(!traits.is_cascadable());
    }

    #[test]
    fn child_owned_tool_and_hidden_windows_are_skipped() {
        let child = WindowTraits {
            style: WS_CAPTION.0 | WS_CHILD.0,
            ..titled_window()
        };
        let owned = WindowTraits {
            owned: true,
            ..titled_window()
        };
        let tool = WindowTraits {
            ex_style: WS_EX_TOOLWINDOW.0,
            ..titled_window()
        };
        let hidden = WindowTraits {
            visible: false,
            ..titled_window()
        };
        let minimized = WindowTraits {
            minimized: true,
            ..titled_window()
        };

        for traits in [child, owned, tool, hidden, minimized] {
            assert!(!traits.is_cascadable(), "{traits:?}");
        }
    }
}
