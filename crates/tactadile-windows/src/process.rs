use windows::Win32::Foundation::{CloseHandle, HWND};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_NAME_WIN32, PROCESS_QUERY_LIMITED_INFORMATION,
    QueryFullProcessImageNameW,
};
use windows::Win32::UI::WindowsAndMessaging::GetWindowThreadProcessId;
use windows::core::PWSTR;

/// Longest image path we read; long-path aware processes can exceed MAX_PATH.
const MAX_IMAGE_PATH: usize = 1024;

/// Returns the full executable path of the process owning a window.
///
/// Returns `None` when the window is gone or the process cannot be opened
/// (e.g. an elevated process seen from a non-elevated daemon).
pub fn exe_path_for_window(hwnd: usize) -> Option<String> {
    let mut pid = 0u32;
    // SAFETY: GetWindowThreadProcessId only writes the PID out-parameter.
    unsafe { GetWindowThreadProcessId(HWND(hwnd as *mut _), Some(&mut pid)) };
    if pid == 0 {
        return None;
    }
    exe_path_for_pid(pid)
}

/// Returns the full executable path of a process.
pub fn exe_path_for_pid(pid: u32) -> Option<String> {
    // SAFETY: PROCESS_QUERY_LIMITED_INFORMATION is the least-privilege
    // right that allows reading the image name. The handle is closed below.
    let handle = unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) }.ok()?;

    let mut buffer = vec![0u16; MAX_IMAGE_PATH];
    let mut len = buffer.len() as u32;
    // SAFETY: `len` holds the buffer capacity on input and the written
    // length on output.
    let result = unsafe {
        QueryFullProcessImageNameW(
            handle,
            PROCESS_NAME_WIN32,
            PWSTR(buffer.as_mut_ptr()),
            &mut len,
        )
    };
    unsafe {
        let _ = CloseHandle(handle);
    }

    result
        .ok()
        .map(|()| String::from_utf16_lossy(&buffer[..len as usize]))
}
