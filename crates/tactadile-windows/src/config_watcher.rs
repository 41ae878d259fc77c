//! Watches the config directory and sends validated reloads.
//!
//! `FindFirstChangeNotificationW` wakes the watcher on writes and renames
//! in the directory; file mtimes then tell which file changed. A file that
//! fails to parse is logged and skipped, so the running daemon keeps its
//! last good settings.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::time::SystemTime;

use windows::Win32::Foundation::WAIT_OBJECT_0;
use windows::Win32::Storage::FileSystem::{
    FILE_NOTIFY_CHANGE_FILE_NAME, FILE_NOTIFY_CHANGE_LAST_WRITE, FindCloseChangeNotification,
    FindFirstChangeNotificationW, FindNextChangeNotification,
};
use windows::Win32::System::Threading::WaitForSingleObject;
use windows::core::HSTRING;

use tactadile_core::config::{self, Config, Keybinding, LaunchRule};
use tactadile_core::{log_info, log_warn};

/// Timeout between stop-flag checks when no changes occur (ms).
const WAIT_TIMEOUT_MS: u32 = 5000;

/// A validated config reload ready to be applied.
#[derive(Debug)]
pub enum ConfigReload {
    Config(Config),
    Keybindings(Vec<Keybinding>),
    Rules(Vec<LaunchRule>),
}

/// One watched file and the mtime it had when last read.
struct WatchedFile {
    name: &'static str,
    path: Option<PathBuf>,
    mtime: Option<SystemTime>,
    load: fn() -> Result<ConfigReload, String>,
}

impl WatchedFile {
    fn new(
        name: &'static str,
        path: Option<PathBuf>,
        load: fn() -> Result<ConfigReload, String>,
    ) -> Self {
        let mtime = mtime(path.as_ref());
        Self {
            name,
            path,
            mtime,
            load,
        }
    }

    /// Returns the parsed file if its mtime moved since the last check.
    fn poll(&mut self) -> Option<ConfigReload> {
        let current = mtime(self.path.as_ref());
        if current == self.mtime {
            return None;
        }
        self.mtime = current;

        match (self.load)() {
            Ok(reload) => {
                log_info!("{} changed, reloading", self.name);
                Some(reload)
            }
            Err(e) => {
                log_warn!("{} invalid, skipping: {e}", self.name);
                None
            }
        }
    }
}

/// Runs the watcher loop. Blocks until the stop flag is set or the
/// receiver is dropped.
pub fn watch(tx: Sender<ConfigReload>, stop: Arc<AtomicBool>) {
    let Some(dir) = config::config_dir() else {
        log_info!("config dir not found, watcher exiting");
        return;
    };

    let mut files = [
        WatchedFile::new("config.toml", config::config_path(), || {
            config::try_load().map(ConfigReload::Config)
        }),
        WatchedFile::new("keybindings.toml", config::keybindings_path(), || {
            config::try_load_keybindings().map(ConfigReload::Keybindings)
        }),
        WatchedFile::new("rules.toml", config::rules_path(), || {
            config::try_load_rules().map(ConfigReload::Rules)
        }),
    ];

    let dir_str = HSTRING::from(dir.as_os_str());
    let flags = FILE_NOTIFY_CHANGE_LAST_WRITE | FILE_NOTIFY_CHANGE_FILE_NAME;

    let handle = unsafe { FindFirstChangeNotificationW(&dir_str, false, flags) };
    let Ok(handle) = handle else {
        log_warn!("FindFirstChangeNotificationW failed, watcher exiting");
        return;
    };

    'watch: while !stop.load(Ordering::Relaxed) {
        let result = unsafe { WaitForSingleObject(handle, WAIT_TIMEOUT_MS) };
        if stop.load(Ordering::Relaxed) {
            break;
        }
        if result != WAIT_OBJECT_0 {
            continue;
        }

        for file in &mut files {
            if let Some(reload) = file.poll()
                && tx.send(reload).is_err()
            {
                break 'watch;
            }
        }

        let _ = unsafe { FindNextChangeNotification(handle) };
    }

    let _ = unsafe { FindCloseChangeNotification(handle) };
}

/// Returns the modification time for a path, or `None` if unavailable.
fn mtime(path: Option<&PathBuf>) -> Option<SystemTime> {
    path.and_then(|p| p.metadata().ok())
        .and_then(|m| m.modified().ok())
}
