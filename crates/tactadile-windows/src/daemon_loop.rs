use std::sync::atomic::Ordering;
use std::sync::mpsc;

use tactadile_core::config;
use tactadile_core::drag::DragMachine;
use tactadile_core::hotkey::HotkeyTable;
use tactadile_core::input::{InputEvent, OverrideTable};
use tactadile_core::placement::PlacementEngine;
use tactadile_core::target::TargetResolver;
use tactadile_core::{WindowManipulator, WindowResult, log_info, log_warn};

use crate::ctrl_c;
use crate::desktop::Win32Desktop;
use crate::event_loop::{self, EventLoopChannels};

use super::daemon_loop_handlers;
use super::daemon_threads;
use super::daemon_types::{DaemonMsg, DaemonState};

/// The inner daemon loop, separated so cleanup always runs in `run()`.
pub(super) fn daemon_loop() -> WindowResult<()> {
    let config = config::load();
    tactadile_core::log::init(&config.logging);

    let keybindings = config::load_keybindings();
    let rules = config::load_rules();

    log_info!("Daemon started (PID: {})", std::process::id());
    log_info!(
        "Config: override_windows_keybinds={}, auto_position_enabled={}, log_level={}",
        config.override_windows_keybinds,
        config.auto_position_enabled,
        config.logging.level
    );

    let (tx, rx) = mpsc::channel::<DaemonMsg>();

    // Start the Win32 event loop (hooks + hotkeys) on its own thread.
    let overrides = OverrideTable::new();
    let (input_tx, input_rx) = mpsc::channel();
    let (shown_tx, shown_rx) = mpsc::channel();
    let event_loop = event_loop::start(
        EventLoopChannels {
            input: input_tx,
            shown: shown_tx,
        },
        overrides.clone(),
    )?;

    let input_bridge = daemon_threads::spawn_bridge(input_rx, tx.clone(), DaemonMsg::Input);
    let shown_bridge = daemon_threads::spawn_bridge(shown_rx, tx.clone(), DaemonMsg::WindowShown);

    let (ctrl_tx, ctrl_rx) = mpsc::channel::<()>();
    if let Err(e) = ctrl_c::set_handler(ctrl_tx) {
        log_warn!("Ctrl+C handler not installed: {e}");
    }
    let ctrl_bridge = daemon_threads::spawn_bridge(ctrl_rx, tx.clone(), |()| DaemonMsg::Shutdown);

    let (watcher_stop, watcher_thread, reload_bridge) =
        daemon_threads::spawn_config_watcher(tx.clone());

    let placement = PlacementEngine::new();
    placement.load_rules(rules.clone(), config.auto_position_enabled);
    placement.start();

    let mut state = DaemonState {
        config,
        keybindings,
        rules,
        manipulator: WindowManipulator::new(Win32Desktop::new()),
        drag: DragMachine::new(),
        ticker: None,
        target: TargetResolver::new(),
        placement,
        overrides,
        override_bindings: HotkeyTable::default(),
        event_loop,
        tx: tx.clone(),
    };
    daemon_loop_handlers::register_all(&mut state);

    // Main processing loop, blocks until a message arrives.
    while let Ok(msg) = rx.recv() {
        match msg {
            DaemonMsg::Input(InputEvent::Key(transition)) => {
                daemon_loop_handlers::handle_key(transition, &mut state);
            }
            DaemonMsg::Input(InputEvent::Hotkey(request)) => {
                daemon_loop_handlers::dispatch_action(&request, &mut state);
            }
            DaemonMsg::WindowShown(hwnd) => {
                daemon_loop_handlers::handle_window_shown(hwnd, &mut state);
            }
            DaemonMsg::DragTick => daemon_loop_handlers::handle_drag_tick(&mut state),
            DaemonMsg::ApplyPlacement(pending) => {
                daemon_loop_handlers::handle_placement(&pending, &mut state);
            }
            DaemonMsg::Reload(reload) => daemon_loop_handlers::handle_reload(*reload, &mut state),
            DaemonMsg::Shutdown => {
                log_info!("Shutdown requested");
                break;
            }
        }
    }

    let DaemonState {
        ticker,
        placement,
        event_loop,
        ..
    } = state;
    if let Some(ticker) = ticker {
        ticker.stop();
    }
    placement.stop();
    event_loop.stop();
    watcher_stop.store(true, Ordering::Relaxed);
    drop(tx);
    let _ = input_bridge.join();
    let _ = shown_bridge.join();
    let _ = watcher_thread.join();
    let _ = reload_bridge.join();
    // The Ctrl+C sender lives in a static, so that bridge never ends.
    drop(ctrl_bridge);

    log_info!("Daemon stopped");
    Ok(())
}
