//! In-memory [`Desktop`] used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::monitor::Monitor;
use crate::window::{Desktop, ShowState, WindowResult};
use crate::{Point, Rect};

#[derive(Debug, Clone)]
pub(crate) struct FakeWindow {
    pub rect: Rect,
    pub normal: Rect,
    pub maximized: bool,
    pub minimized: bool,
    pub visible: bool,
    pub alpha: Option<u8>,
}

/// A desktop whose windows live in a map. Handles missing from the map
/// behave like closed windows.
pub(crate) struct FakeDesktop {
    pub windows: RefCell<BTreeMap<usize, FakeWindow>>,
    pub monitors: Vec<Monitor>,
    pub cursor: Cell<Point>,
}

pub(crate) fn monitor(id: usize, work_area: Rect) -> Monitor {
    Monitor {
        id,
        bounds: work_area,
        work_area,
        dpi_x: 96,
        dpi_y: 96,
        primary: id == 1,
    }
}

impl FakeDesktop {
    /// One 1920x1040 work area at the origin.
    pub fn new() -> Self {
        Self::with_monitors(vec![monitor(1, Rect::new(0, 0, 1920, 1040))])
    }

    pub fn with_monitors(monitors: Vec<Monitor>) -> Self {
        Self {
            windows: RefCell::new(BTreeMap::new()),
            monitors,
            cursor: Cell::new(Point::default()),
        }
    }

    pub fn add_window(&self, hwnd: usize, rect: Rect) {
        self.windows.borrow_mut().insert(
            hwnd,
            FakeWindow {
                rect,
                normal: rect,
                maximized: false,
                minimized: false,
                visible: true,
                alpha: None,
            },
        );
    }

    pub fn close(&self, hwnd: usize) {
        self.windows.borrow_mut().remove(&hwnd);
    }

    pub fn rect(&self, hwnd: usize) -> Rect {
        self.windows.borrow()[&hwnd].rect
    }

    pub fn window(&self, hwnd: usize) -> FakeWindow {
        self.windows.borrow()[&hwnd].clone()
    }

    pub fn set_cursor(&self, x: i32, y: i32) {
        self.cursor.set(Point::new(x, y));
    }

    fn with<T>(&self, hwnd: usize, f: impl FnOnce(&mut FakeWindow) -> T) -> WindowResult<T> {
        let mut windows = self.windows.borrow_mut();
        let window = windows
            .get_mut(&hwnd)
            .ok_or_else(|| format!("invalid window handle {hwnd:#x}"))?;
        Ok(f(window))
    }

    fn monitor_at(&self, rect: &Rect) -> WindowResult<Monitor> {
        let (cx, cy) = (rect.center_x(), rect.center_y());
        self.monitors
            .iter()
            .find(|m| {
                let w = &m.work_area;
                cx >= w.x && cx < w.right() && cy >= w.y && cy < w.bottom()
            })
            .or_else(|| self.monitors.first())
            .copied()
            .ok_or_else(|| "no monitors".into())
    }
}

impl Desktop for FakeDesktop {
    fn is_window(&self, hwnd: usize) -> bool {
        self.windows.borrow().contains_key(&hwnd)
    }

    fn is_visible(&self, hwnd: usize) -> bool {
        self.windows.borrow().get(&hwnd).is_some_and(|w| w.visible)
    }

    fn is_maximized(&self, hwnd: usize) -> bool {
        self.windows.borrow().get(&hwnd).is_some_and(|w| w.maximized)
    }

    fn is_minimized(&self, hwnd: usize) -> bool {
        self.windows.borrow().get(&hwnd).is_some_and(|w| w.minimized)
    }

    fn window_rect(&self, hwnd: usize) -> WindowResult<Rect> {
        self.with(hwnd, |w| w.rect)
    }

    fn normal_rect(&self, hwnd: usize) -> WindowResult<Rect> {
        self.with(hwnd, |w| w.normal)
    }

    fn restore_to(&self, hwnd: usize, rect: &Rect) -> WindowResult<()> {
        self.with(hwnd, |w| {
            w.maximized = false;
            w.minimized = false;
            w.rect = *rect;
            w.normal = *rect;
        })
    }

    fn show(&self, hwnd: usize, state: ShowState) -> WindowResult<()> {
        let rect = self.window_rect(hwnd)?;
        let work = self.monitor_at(&rect)?.work_area;
        self.with(hwnd, |w| match state {
            ShowState::Minimize => w.minimized = true,
            ShowState::Maximize => {
                w.minimized = false;
                w.maximized = true;
                w.rect = work;
            }
            ShowState::Restore => {
                if w.minimized {
                    w.minimized = false;
                } else if w.maximized {
                    w.maximized = false;
                    w.rect = w.normal;
                }
            }
        })
    }

    fn set_rect(&self, hwnd: usize, rect: &Rect) -> WindowResult<()> {
        self.with(hwnd, |w| {
            w.rect = *rect;
            if !w.maximized && !w.minimized {
                w.normal = *rect;
            }
        })
    }

    fn set_position(&self, hwnd: usize, x: i32, y: i32) -> WindowResult<()> {
        self.with(hwnd, |w| {
            w.rect.x = x;
            w.rect.y = y;
            if !w.maximized && !w.minimized {
                w.normal = w.rect;
            }
        })
    }

    fn opacity(&self, hwnd: usize) -> WindowResult<Option<u8>> {
        self.with(hwnd, |w| w.alpha)
    }

    fn set_opacity(&self, hwnd: usize, alpha: Option<u8>) -> WindowResult<()> {
        self.with(hwnd, |w| w.alpha = alpha)
    }

    fn cursor_pos(&self) -> WindowResult<Point> {
        Ok(self.cursor.get())
    }

    fn window_at(&self, point: Point) -> Option<usize> {
        self.windows
            .borrow()
            .iter()
            .find(|(_, w)| {
                let r = &w.rect;
                w.visible
                    && !w.minimized
                    && point.x >= r.x
                    && point.x < r.right()
                    && point.y >= r.y
                    && point.y < r.bottom()
            })
            .map(|(&hwnd, _)| hwnd)
    }

    fn monitors(&self) -> WindowResult<Vec<Monitor>> {
        let mut monitors = self.monitors.clone();
        crate::monitor::sort_monitors(&mut monitors);
        Ok(monitors)
    }

    fn monitor_for_window(&self, hwnd: usize) -> WindowResult<Monitor> {
        let rect = self.window_rect(hwnd)?;
        self.monitor_at(&rect)
    }

    fn top_level_windows(&self) -> WindowResult<Vec<usize>> {
        Ok(self
            .windows
            .borrow()
            .iter()
            .filter(|(_, w)| w.visible && !w.minimized)
            .map(|(&hwnd, _)| hwnd)
            .collect())
    }
}
