/// Ctrl+C handling for the foreground daemon.
pub mod ctrl_c;

/// Daemon main loop.
pub mod daemon;

/// `Desktop` implementation backed by Win32 calls.
pub mod desktop;

/// Per-monitor DPI awareness.
pub mod dpi;

/// Display enumeration.
pub mod monitor;

/// Process image lookup for window owners.
pub mod process;

mod config_watcher;
mod event_loop;
mod hotkey;
mod keyboard_hook;
mod keystroke;

pub use desktop::Win32Desktop;
