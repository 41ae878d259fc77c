//! Resolves which window an action applies to.

use crate::Point;
use crate::window::{Desktop, WindowResult};

/// Cursor movement (in pixels) within which the last target is reused.
pub const STICKY_RADIUS: i64 = 5;

/// Finds the top-level window under the cursor.
///
/// Remembers the last answer: while the cursor stays within
/// [`STICKY_RADIUS`] of where it was resolved, the same window is
/// returned even if it has moved out from under the cursor (e.g. after a
/// snap).
#[derive(Debug, Default)]
pub struct TargetResolver {
    last: Option<(Point, usize)>,
}

impl TargetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve<D: Desktop>(&mut self, desktop: &D) -> WindowResult<Option<usize>> {
        let cursor = desktop.cursor_pos()?;
        if let Some((at, hwnd)) = self.last
            && at.distance_squared(cursor) <= STICKY_RADIUS * STICKY_RADIUS
            && desktop.is_window(hwnd)
        {
            return Ok(Some(hwnd));
        }

        let hwnd = desktop.window_at(cursor);
        self.last = hwnd.map(|h| (cursor, h));
        Ok(hwnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use crate::testing::FakeDesktop;

    #[test]
    fn resolves_window_under_cursor() {
        // Arrange
        let desktop = FakeDesktop::new();
        desktop.add_window(1, Rect::new(0, 0, 500, 500));
        desktop.add_window(2, Rect::new(600, 0, 500, 500));
        desktop.set_cursor(700, 100);
        let mut resolver = TargetResolver::new();

        // Act / Assert
        assert_eq!(resolver.resolve(&desktop).unwrap(), Some(2));
    }

    #[test]
    fn empty_space_has_no_target() {
        // Arrange
        let desktop = FakeDesktop::new();
        desktop.set_cursor(10, 10);
        let mut resolver = TargetResolver::new();

        // Act / Assert
        assert_eq!(resolver.resolve(&desktop).unwrap(), None);
    }

    #[test]
    fn target_sticks_after_window_moves_away() {
        // Arrange
        let desktop = FakeDesktop::new();
        desktop.add_window(1, Rect::new(0, 0, 500, 500));
        desktop.set_cursor(250, 250);
        let mut resolver = TargetResolver::new();
        resolver.resolve(&desktop).unwrap();

        // Act
        desktop.windows.borrow_mut().get_mut(&1).unwrap().rect = Rect::new(1000, 0, 500, 500);
        desktop.set_cursor(253, 254);
        let sticky = resolver.resolve(&desktop).unwrap();
        desktop.set_cursor(260, 250);
        let moved_on = resolver.resolve(&desktop).unwrap();

        // Assert
        assert_eq!(sticky, Some(1));
        assert_eq!(moved_on, None);
    }

    #[test]
    fn closed_window_is_not_reused() {
        // Arrange
        let desktop = FakeDesktop::new();
        desktop.add_window(1, Rect::new(0, 0, 500, 500));
        desktop.set_cursor(100, 100);
        let mut resolver = TargetResolver::new();
        resolver.resolve(&desktop).unwrap();
        desktop.close(1);

        // Act / Assert
        assert_eq!(resolver.resolve(&desktop).unwrap(), None);
    }
}
