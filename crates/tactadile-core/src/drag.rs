//! Keyboard-driven move and resize drags.
//!
//! A drag starts when a move-drag or resize-drag action fires, follows
//! the cursor on every poll tick, and ends as soon as any key is
//! released. All methods must run on the same serial context as the
//! action dispatcher and the poll timer.

use crate::manipulator::WindowManipulator;
use crate::window::{Desktop, WindowResult};
use crate::{Point, Rect};

/// Poll interval while a drag is active (about 60 Hz).
pub const DRAG_TICK_MS: u64 = 16;

/// Smallest width or height a resize drag can produce.
pub const MIN_WINDOW_SIZE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Moving,
    Resizing,
}

/// The active drag. Exists only between start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub mode: DragMode,
    pub target: usize,
    pub origin_cursor: Point,
    pub origin_rect: Rect,
}

/// Result of clamping one resize step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeStep {
    pub width: i32,
    pub height: i32,
    /// Amount to shift the origin cursor so the next delta starts from
    /// the clamped edge.
    pub rebase: Point,
}

/// The drag state machine. At most one session exists at a time.
#[derive(Debug, Default)]
pub struct DragMachine {
    session: Option<DragSession>,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        match self.session.map(|s| s.mode) {
            None => DragState::Idle,
            Some(DragMode::Move) => DragState::Moving,
            Some(DragMode::Resize) => DragState::Resizing,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Starts a drag on `hwnd`, or switches the active drag to `mode`.
    ///
    /// A second dispatch of the same mode while dragging is ignored. A
    /// dispatch of the other mode keeps the current target and captures
    /// a fresh origin so the window does not jump. Returns `true` when
    /// the caller should make sure the poll timer is running.
    pub fn start<D: Desktop>(
        &mut self,
        mode: DragMode,
        hwnd: usize,
        manipulator: &mut WindowManipulator<D>,
    ) -> WindowResult<bool> {
        if let Some(session) = self.session {
            if session.mode == mode {
                return Ok(false);
            }
            let origin_cursor = manipulator.cursor_pos()?;
            let origin_rect = manipulator.desktop().window_rect(session.target)?;
            self.session = Some(DragSession {
                mode,
                origin_cursor,
                origin_rect,
                ..session
            });
            return Ok(false);
        }

        manipulator.restore_if_maximized(hwnd)?;
        let origin_cursor = manipulator.cursor_pos()?;
        let origin_rect = manipulator.desktop().window_rect(hwnd)?;
        self.session = Some(DragSession {
            mode,
            target: hwnd,
            origin_cursor,
            origin_rect,
        });
        Ok(true)
    }

    /// Ends the drag when any key is released. Returns `true` if a drag
    /// was ended.
    pub fn on_key(&mut self, is_down: bool) -> bool {
        if is_down || self.session.is_none() {
            return false;
        }
        self.end();
        true
    }

    pub fn end(&mut self) {
        self.session = None;
    }

    /// Applies one poll step. Ends the drag if the target window is gone.
    pub fn tick<D: Desktop>(&mut self, manipulator: &mut WindowManipulator<D>) -> WindowResult<()> {
        let Some(session) = self.session else {
            return Ok(());
        };
        if !manipulator.desktop().is_window(session.target) {
            self.end();
            return Ok(());
        }

        let cursor = manipulator.cursor_pos()?;
        let delta = Point::new(
            cursor.x - session.origin_cursor.x,
            cursor.y - session.origin_cursor.y,
        );
        let origin = session.origin_rect;

        match session.mode {
            DragMode::Move => {
                manipulator.set_position(session.target, origin.x + delta.x, origin.y + delta.y)
            }
            DragMode::Resize => {
                let work = manipulator.desktop().monitor_for_window(session.target)?.work_area;
                let step = clamp_resize(&origin, delta, &work);
                if let Some(s) = self.session.as_mut() {
                    s.origin_cursor.x += step.rebase.x;
                    s.origin_cursor.y += step.rebase.y;
                }
                manipulator.move_window(
                    session.target,
                    &Rect::new(origin.x, origin.y, step.width, step.height),
                )
            }
        }
    }
}

/// Computes the clamped size for a resize delta and how far the origin
/// cursor must shift so that reversing direction responds immediately.
///
/// Each dimension is floored at [`MIN_WINDOW_SIZE`] and then capped so
/// the right/bottom edge stays inside `work`.
pub fn clamp_resize(origin: &Rect, delta: Point, work: &Rect) -> ResizeStep {
    let (width, rebase_x) = clamp_axis(origin.x, origin.width, delta.x, work.right());
    let (height, rebase_y) = clamp_axis(origin.y, origin.height, delta.y, work.bottom());
    ResizeStep {
        width,
        height,
        rebase: Point::new(rebase_x, rebase_y),
    }
}

fn clamp_axis(start: i32, size: i32, delta: i32, limit: i32) -> (i32, i32) {
    let requested = size + delta;
    let mut actual = requested.max(MIN_WINDOW_SIZE);
    actual = actual.min((limit - start).max(MIN_WINDOW_SIZE));
    let applied = actual - size;
    (actual, delta - applied)
}

#[cfg(test)]
#[path = "drag_tests.rs"]
mod tests;
