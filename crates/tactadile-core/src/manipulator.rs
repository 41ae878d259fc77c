//! Geometry changes applied to top-level windows.
//!
//! The manipulator remembers one "normal" rectangle per window, captured
//! lazily before the first geometry change, so `restore` can undo a snap,
//! cascade or drag exactly.

use std::collections::HashMap;

use crate::monitor;
use crate::window::{Desktop, ShowState, WindowResult};
use crate::zone::Zone;
use crate::{Point, Rect};

/// Alpha change per opacity step (about 10% of the full range).
pub const OPACITY_STEP: u8 = 25;
/// Lowest alpha reachable by stepping down.
pub const OPACITY_MIN: u8 = 25;
/// Fully opaque.
pub const OPACITY_MAX: u8 = 255;

/// Diagonal offset between cascaded windows.
pub const CASCADE_STEP: i32 = 30;
/// Cascaded window size as a percentage of the primary work area.
pub const CASCADE_PERCENT: i32 = 70;

/// Default size used by `center` when no parameters are given.
pub const DEFAULT_CENTER_PERCENT: f64 = 66.67;

/// Applies geometry changes to windows through a [`Desktop`].
pub struct WindowManipulator<D> {
    desktop: D,
    saved: HashMap<usize, Rect>,
}

impl<D: Desktop> WindowManipulator<D> {
    pub fn new(desktop: D) -> Self {
        Self {
            desktop,
            saved: HashMap::new(),
        }
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    /// The saved normal rectangle for a window, if one is tracked.
    pub fn saved_rect(&self, hwnd: usize) -> Option<Rect> {
        self.saved.get(&hwnd).copied()
    }

    /// Drops saved rectangles for windows that no longer exist.
    pub fn prune_closed(&mut self) {
        let desktop = &self.desktop;
        self.saved.retain(|&hwnd, _| desktop.is_window(hwnd));
    }

    pub fn minimize(&mut self, hwnd: usize) -> WindowResult<()> {
        self.snapshot(hwnd);
        self.desktop.show(hwnd, ShowState::Minimize)
    }

    /// Maximizes the window, or restores it if it is already maximized.
    pub fn maximize(&mut self, hwnd: usize) -> WindowResult<()> {
        if self.desktop.is_maximized(hwnd) {
            return self.restore(hwnd);
        }
        self.snapshot(hwnd);
        self.desktop.show(hwnd, ShowState::Maximize)
    }

    /// Returns the window to its saved normal rectangle and forgets it.
    ///
    /// Falls back to the OS restore when nothing was saved.
    pub fn restore(&mut self, hwnd: usize) -> WindowResult<()> {
        match self.saved.remove(&hwnd) {
            Some(rect) => self.desktop.restore_to(hwnd, &rect),
            None => self.desktop.show(hwnd, ShowState::Restore),
        }
    }

    pub fn toggle_minimize(&mut self, hwnd: usize) -> WindowResult<()> {
        if self.desktop.is_minimized(hwnd) {
            self.restore(hwnd)
        } else {
            self.minimize(hwnd)
        }
    }

    pub fn move_window(&mut self, hwnd: usize, rect: &Rect) -> WindowResult<()> {
        self.restore_if_maximized(hwnd)?;
        self.snapshot(hwnd);
        self.desktop.set_rect(hwnd, rect)
    }

    /// Gives a newly shown window its first geometry.
    ///
    /// Nothing is saved: the placed rectangle becomes the window's
    /// baseline instead of the temporary position it was shown at.
    pub fn place_new(&mut self, hwnd: usize, rect: &Rect) -> WindowResult<()> {
        self.restore_if_maximized(hwnd)?;
        self.saved.remove(&hwnd);
        self.desktop.set_rect(hwnd, rect)
    }

    /// Moves without resizing. Used on every drag tick.
    pub fn set_position(&mut self, hwnd: usize, x: i32, y: i32) -> WindowResult<()> {
        self.snapshot(hwnd);
        self.desktop.set_position(hwnd, x, y)
    }

    /// Resizes in place, keeping the top-left corner.
    pub fn resize_window(&mut self, hwnd: usize, width: i32, height: i32) -> WindowResult<()> {
        self.restore_if_maximized(hwnd)?;
        let current = self.desktop.window_rect(hwnd)?;
        self.snapshot(hwnd);
        self.desktop
            .set_rect(hwnd, &Rect::new(current.x, current.y, width, height))
    }

    pub fn nudge(&mut self, hwnd: usize, dx: i32, dy: i32) -> WindowResult<()> {
        self.restore_if_maximized(hwnd)?;
        let current = self.desktop.window_rect(hwnd)?;
        self.snapshot(hwnd);
        self.desktop
            .set_position(hwnd, current.x + dx, current.y + dy)
    }

    /// Centers the window on its monitor, sized as a percentage of the
    /// work area in each dimension.
    pub fn center_window(
        &mut self,
        hwnd: usize,
        width_percent: f64,
        height_percent: f64,
    ) -> WindowResult<()> {
        self.restore_if_maximized(hwnd)?;
        let work = self.desktop.monitor_for_window(hwnd)?.work_area;
        let rect = centered_rect(&work, width_percent, height_percent);
        self.snapshot(hwnd);
        self.desktop.set_rect(hwnd, &rect)
    }

    /// Places the window in a zone of the monitor it is on.
    pub fn snap(&mut self, hwnd: usize, zone: Zone) -> WindowResult<()> {
        let work = self.desktop.monitor_for_window(hwnd)?.work_area;
        self.move_window(hwnd, &zone.rect(&work))
    }

    /// Moves the window to the next (or previous) monitor in sorted order.
    ///
    /// Does nothing with a single monitor.
    pub fn move_to_adjacent_monitor(&mut self, hwnd: usize, forward: bool) -> WindowResult<()> {
        self.restore_if_maximized(hwnd)?;
        let monitors = self.desktop.monitors()?;
        let current = self.desktop.monitor_for_window(hwnd)?;
        let Some(target) = monitor::adjacent_monitor(&monitors, current.id, forward) else {
            return Ok(());
        };
        let window = self.desktop.window_rect(hwnd)?;
        let rect = monitor::translate_between(&window, &current.work_area, &target.work_area);
        self.move_window(hwnd, &rect)
    }

    /// Steps transparency up or down by [`OPACITY_STEP`].
    ///
    /// Reaching full opacity removes transparency from the window.
    pub fn adjust_opacity(&mut self, hwnd: usize, increase: bool) -> WindowResult<()> {
        let current = self.desktop.opacity(hwnd)?.unwrap_or(OPACITY_MAX);
        let next = step_opacity(current, increase);
        if next == OPACITY_MAX {
            self.desktop.set_opacity(hwnd, None)
        } else {
            self.desktop.set_opacity(hwnd, Some(next))
        }
    }

    /// Cascades every eligible top-level window diagonally across the
    /// primary monitor's work area.
    ///
    /// Windows that fail to move are skipped.
    pub fn cascade(&mut self, from_right: bool) -> WindowResult<usize> {
        let monitors = self.desktop.monitors()?;
        let Some(primary) = monitor::primary(&monitors) else {
            return Ok(0);
        };
        let work = primary.work_area;
        let windows = self.desktop.top_level_windows()?;

        let mut moved = 0;
        for (i, hwnd) in windows.into_iter().enumerate() {
            let rect = cascade_slot(&work, i, from_right);
            if self.move_window(hwnd, &rect).is_ok() {
                moved += 1;
            }
        }
        Ok(moved)
    }

    /// Restores the window with the OS restore if it is maximized.
    pub fn restore_if_maximized(&mut self, hwnd: usize) -> WindowResult<()> {
        if self.desktop.is_maximized(hwnd) {
            self.desktop.show(hwnd, ShowState::Restore)?;
        }
        Ok(())
    }

    pub fn cursor_pos(&self) -> WindowResult<Point> {
        self.desktop.cursor_pos()
    }

    /// Records the window's normal rectangle if not already tracked and
    /// the window is neither maximized nor minimized.
    fn snapshot(&mut self, hwnd: usize) {
        if self.saved.contains_key(&hwnd) {
            return;
        }
        if self.desktop.is_maximized(hwnd) || self.desktop.is_minimized(hwnd) {
            return;
        }
        if let Ok(rect) = self.desktop.normal_rect(hwnd) {
            self.saved.insert(hwnd, rect);
        }
    }
}

/// Next alpha after one step, clamped to the opacity range.
pub fn step_opacity(current: u8, increase: bool) -> u8 {
    if increase {
        current.saturating_add(OPACITY_STEP)
    } else {
        current.saturating_sub(OPACITY_STEP).max(OPACITY_MIN)
    }
}

/// A rectangle centered in `work`, sized by percentage of each dimension.
pub fn centered_rect(work: &Rect, width_percent: f64, height_percent: f64) -> Rect {
    let wp = width_percent.clamp(1.0, 100.0) / 100.0;
    let hp = height_percent.clamp(1.0, 100.0) / 100.0;
    let width = (f64::from(work.width) * wp) as i32;
    let height = (f64::from(work.height) * hp) as i32;
    let x = work.x + (work.width - width) / 2;
    let y = work.y + (work.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Rectangle for the `index`-th window of a cascade.
///
/// The offset wraps back to the corner once the next step would push the
/// window past the bottom of the work area.
pub fn cascade_slot(work: &Rect, index: usize, from_right: bool) -> Rect {
    let width = work.width * CASCADE_PERCENT / 100;
    let height = work.height * CASCADE_PERCENT / 100;
    let steps = ((work.height - height) / CASCADE_STEP).max(0) as usize + 1;
    let offset = (index % steps) as i32 * CASCADE_STEP;

    let y = work.y + offset;
    let x = if from_right {
        (work.right() - width - offset).max(work.x)
    } else {
        work.x + offset
    };
    let width = width.min(work.right() - x);
    let height = height.min(work.bottom() - y);
    Rect::new(x, y, width, height)
}

#[cfg(test)]
#[path = "manipulator_tests.rs"]
mod tests;
