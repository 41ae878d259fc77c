use crate::monitor::Monitor;
use crate::{Point, Rect};

/// A boxed error type for window operations.
///
/// Any error type that implements the `Error` trait can be boxed into this.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Show-state changes a window can be asked to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowState {
    Minimize,
    Maximize,
    /// OS-generic restore from minimized or maximized.
    Restore,
}

/// Platform-agnostic access to top-level windows, the cursor, and displays.
///
/// Window handles are opaque `usize` values. A handle can become invalid
/// at any moment (the window was closed); implementations report that as
/// an error or a `false` query result, never a panic.
///
/// Each platform crate (e.g. `tactadile-windows`) provides its own
/// implementation.
pub trait Desktop {
    /// Returns whether the handle still identifies a window.
    fn is_window(&self, hwnd: usize) -> bool;

    /// Returns whether the window is currently visible.
    fn is_visible(&self, hwnd: usize) -> bool;

    fn is_maximized(&self, hwnd: usize) -> bool;

    fn is_minimized(&self, hwnd: usize) -> bool;

    /// Current outer rectangle of the window.
    fn window_rect(&self, hwnd: usize) -> WindowResult<Rect>;

    /// The rectangle the OS would restore the window to.
    fn normal_rect(&self, hwnd: usize) -> WindowResult<Rect>;

    /// Shows the window in normal state at exactly `rect`.
    fn restore_to(&self, hwnd: usize, rect: &Rect) -> WindowResult<()>;

    fn show(&self, hwnd: usize, state: ShowState) -> WindowResult<()>;

    /// Moves and resizes without activating or changing z-order.
    fn set_rect(&self, hwnd: usize, rect: &Rect) -> WindowResult<()>;

    /// Moves without resizing.
    fn set_position(&self, hwnd: usize, x: i32, y: i32) -> WindowResult<()>;

    /// Current alpha, or `None` when the window has no transparency.
    fn opacity(&self, hwnd: usize) -> WindowResult<Option<u8>>;

    /// Sets the alpha; `None` removes transparency entirely.
    fn set_opacity(&self, hwnd: usize, alpha: Option<u8>) -> WindowResult<()>;

    fn cursor_pos(&self) -> WindowResult<Point>;

    /// The top-level window under a screen point, or `None` for the
    /// desktop, the shell and empty space.
    fn window_at(&self, point: Point) -> Option<usize>;

    /// All displays, sorted with [`crate::monitor::sort_monitors`].
    fn monitors(&self) -> WindowResult<Vec<Monitor>>;

    /// The display nearest to the window.
    fn monitor_for_window(&self, hwnd: usize) -> WindowResult<Monitor>;

    /// Visible, non-minimized, unowned, titled top-level windows in
    /// z-order (topmost first).
    fn top_level_windows(&self) -> WindowResult<Vec<usize>>;
}
