use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tactadile_core::drag::DRAG_TICK_MS;
use tactadile_core::placement::PendingPlacement;

use crate::config_watcher::ConfigReload;

use super::daemon_types::DaemonMsg;

/// Forwards everything received on `rx` into the daemon channel.
pub(super) fn spawn_bridge<T: Send + 'static>(
    rx: mpsc::Receiver<T>,
    tx: mpsc::Sender<DaemonMsg>,
    wrap: fn(T) -> DaemonMsg,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for item in rx {
            if tx.send(wrap(item)).is_err() {
                break;
            }
        }
    })
}

/// Spawns the config watcher thread and a bridge into the daemon channel.
pub(super) fn spawn_config_watcher(
    tx: mpsc::Sender<DaemonMsg>,
) -> (
    Arc<AtomicBool>,
    thread::JoinHandle<()>,
    thread::JoinHandle<()>,
) {
    let (reload_tx, reload_rx) = mpsc::channel::<ConfigReload>();
    let watcher_stop = Arc::new(AtomicBool::new(false));
    let watcher_stop_flag = watcher_stop.clone();
    let watcher_thread =
        thread::spawn(move || crate::config_watcher::watch(reload_tx, watcher_stop_flag));

    let reload_bridge = spawn_bridge(reload_rx, tx, |reload| DaemonMsg::Reload(Box::new(reload)));

    (watcher_stop, watcher_thread, reload_bridge)
}

/// Sends `DragTick` at a fixed rate until stopped.
pub(super) struct DragTicker {
    stop: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
}

impl DragTicker {
    pub(super) fn start(tx: mpsc::Sender<DaemonMsg>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();
        let handle = thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_millis(DRAG_TICK_MS));
                if stop_flag.load(Ordering::Relaxed) || tx.send(DaemonMsg::DragTick).is_err() {
                    break;
                }
            }
        });
        Self { stop, handle }
    }

    /// Stops the ticker and waits for its thread. Ticks already queued
    /// are ignored by the idle drag machine.
    pub(super) fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.handle.join();
    }
}

/// Sends the placement back to the daemon once its delay has elapsed.
pub(super) fn schedule_placement(tx: mpsc::Sender<DaemonMsg>, pending: PendingPlacement) {
    thread::spawn(move || {
        thread::sleep(pending.delay());
        let _ = tx.send(DaemonMsg::ApplyPlacement(pending));
    });
}
