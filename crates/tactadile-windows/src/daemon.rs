use tactadile_core::WindowResult;

use crate::dpi;

#[path = "daemon_loop.rs"]
mod daemon_loop;
#[path = "daemon_loop_handlers.rs"]
mod daemon_loop_handlers;
#[path = "daemon_threads.rs"]
mod daemon_threads;
#[path = "daemon_types.rs"]
mod daemon_types;

/// Runs the Tactadile daemon in the foreground until Ctrl+C.
///
/// Background threads host the Win32 event loop (keyboard hook, native
/// hotkeys, "window shown" hook) and the config watcher. The calling
/// thread owns all window state and applies every action.
pub fn run() -> WindowResult<()> {
    dpi::enable_dpi_awareness();
    eprintln!("Tactadile daemon started. Press Ctrl+C to stop.");

    let result = daemon_loop::daemon_loop();

    eprintln!("Tactadile daemon stopped.");
    result
}
