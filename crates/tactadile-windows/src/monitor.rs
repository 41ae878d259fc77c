use std::mem;

use tactadile_core::monitor::{Monitor, sort_monitors};
use tactadile_core::{Rect, WindowResult};
use windows::Win32::Foundation::{HWND, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITOR_DEFAULTTONEAREST, MONITORINFO,
    MonitorFromWindow,
};
use windows::Win32::UI::HiDpi::{GetDpiForMonitor, MDT_EFFECTIVE_DPI};
use windows::core::BOOL;

/// `MONITORINFO::dwFlags` bit set on the primary display.
const MONITORINFOF_PRIMARY: u32 = 0x1;

/// DPI reported when the per-monitor query fails.
const DEFAULT_DPI: u32 = 96;

/// Enumerates all active displays, sorted left-to-right then
/// top-to-bottom.
pub fn enumerate_monitors() -> WindowResult<Vec<Monitor>> {
    let mut handles: Vec<HMONITOR> = Vec::new();

    // SAFETY: EnumDisplayMonitors runs synchronously; the Vec passed as
    // LPARAM outlives the call and is only touched by the callback.
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(enum_monitor_callback),
            LPARAM(&mut handles as *mut _ as isize),
        )
    };
    if !ok.as_bool() {
        return Err("EnumDisplayMonitors failed".into());
    }

    let mut monitors = handles
        .into_iter()
        .map(monitor_info)
        .collect::<WindowResult<Vec<_>>>()?;
    if monitors.is_empty() {
        return Err("no monitors found".into());
    }
    sort_monitors(&mut monitors);
    Ok(monitors)
}

/// Returns the display nearest to the window.
pub fn monitor_for_window(hwnd: HWND) -> WindowResult<Monitor> {
    // SAFETY: MONITOR_DEFAULTTONEAREST always yields a valid monitor.
    let handle = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
    monitor_info(handle)
}

unsafe extern "system" fn enum_monitor_callback(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is the Vec<HMONITOR> pointer from enumerate_monitors().
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<HMONITOR>) };
    handles.push(hmonitor);
    BOOL(1)
}

fn monitor_info(handle: HMONITOR) -> WindowResult<Monitor> {
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: cbSize is set as the API requires.
    if !unsafe { GetMonitorInfoW(handle, &mut info) }.as_bool() {
        return Err("failed to get monitor info".into());
    }

    let (mut dpi_x, mut dpi_y) = (DEFAULT_DPI, DEFAULT_DPI);
    // SAFETY: both out-parameters point to live locals.
    if unsafe { GetDpiForMonitor(handle, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y) }.is_err() {
        (dpi_x, dpi_y) = (DEFAULT_DPI, DEFAULT_DPI);
    }

    Ok(Monitor {
        id: handle.0 as usize,
        bounds: to_rect(&info.rcMonitor),
        work_area: to_rect(&info.rcWork),
        dpi_x,
        dpi_y,
        primary: info.dwFlags & MONITORINFOF_PRIMARY != 0,
    })
}

pub(crate) fn to_rect(rc: &RECT) -> Rect {
    Rect::new(rc.left, rc.top, rc.right - rc.left, rc.bottom - rc.top)
}
