//! Monitor descriptors and the ordering/cycling rules applied to them.
//!
//! Descriptors are value types recomputed on every query; displays can be
//! hot-plugged, so nothing here caches across calls.

use crate::Rect;

/// A physical display as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monitor {
    /// Opaque OS monitor handle.
    pub id: usize,
    /// Full display bounds.
    pub bounds: Rect,
    /// Usable region excluding taskbars and docked toolbars.
    pub work_area: Rect,
    pub dpi_x: u32,
    pub dpi_y: u32,
    /// Whether the OS reports this as the primary display.
    pub primary: bool,
}

/// Sorts monitors left-to-right, then top-to-bottom.
///
/// Gives stable indices across enumerations as long as the physical
/// layout does not change.
pub fn sort_monitors(monitors: &mut [Monitor]) {
    monitors.sort_by_key(|m| (m.bounds.x, m.bounds.y));
}

/// Returns the index of the monitor with the given handle.
pub fn index_of(monitors: &[Monitor], id: usize) -> Option<usize> {
    monitors.iter().position(|m| m.id == id)
}

/// Returns the monitor after (or before) `current_id` in sorted order,
/// wrapping around at either end.
///
/// Returns `None` when there is only one monitor or `current_id` is not
/// in the list.
pub fn adjacent_monitor(monitors: &[Monitor], current_id: usize, forward: bool) -> Option<&Monitor> {
    if monitors.len() <= 1 {
        return None;
    }
    let current = index_of(monitors, current_id)?;
    let len = monitors.len();
    let next = if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    };
    monitors.get(next)
}

/// Picks the monitor for a configured index, falling back to the first
/// monitor when the index is out of range.
pub fn monitor_at_or_first(monitors: &[Monitor], index: i32) -> Option<&Monitor> {
    usize::try_from(index)
        .ok()
        .and_then(|i| monitors.get(i))
        .or_else(|| monitors.first())
}

/// The primary monitor, or the first one if none is flagged.
pub fn primary(monitors: &[Monitor]) -> Option<&Monitor> {
    monitors
        .iter()
        .find(|m| m.primary)
        .or_else(|| monitors.first())
}

/// Translates `window` from one work area to another, keeping its offset
/// from the top-left corner and shrinking it to fit the destination.
pub fn translate_between(window: &Rect, from: &Rect, to: &Rect) -> Rect {
    let width = window.width.min(to.width);
    let height = window.height.min(to.height);

    let mut x = to.x + (window.x - from.x);
    let mut y = to.y + (window.y - from.y);
    x = x.clamp(to.x, to.right() - width);
    y = y.clamp(to.y, to.bottom() - height);

    Rect::new(x, y, width, height)
}
