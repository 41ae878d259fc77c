use std::time::Instant;

use tactadile_core::action::{Action, ActionRequest};
use tactadile_core::drag::DragMode;
use tactadile_core::hotkey::{HotkeyTable, resolve_bindings};
use tactadile_core::input::KeyTransition;
use tactadile_core::manipulator::DEFAULT_CENTER_PERCENT;
use tactadile_core::placement::PendingPlacement;
use tactadile_core::{Desktop, WindowResult, Zone, log_debug, log_info, log_warn};

use crate::config_watcher::ConfigReload;
use crate::{keystroke, process};

use super::daemon_threads::{self, DragTicker};
use super::daemon_types::DaemonState;

/// Re-materializes native hotkeys and interceptor overrides from the
/// current keybindings.
///
/// Chords the OS refuses become overrides when overriding is enabled;
/// otherwise they stay inert.
pub(super) fn register_all(state: &mut DaemonState) {
    let bindings = resolve_bindings(&state.keybindings);
    let total = bindings.len();

    let failed = match state.event_loop.register_all(bindings) {
        Ok(failed) => failed,
        Err(e) => {
            log_warn!("Hotkey registration failed: {e}");
            return;
        }
    };

    let enabled = state.config.override_windows_keybinds;
    for binding in &failed {
        if enabled {
            log_info!("{} on {} claimed by another app, overriding", binding.action, binding.chord);
        } else {
            log_info!("{} on {} claimed by another app, inactive", binding.action, binding.chord);
        }
    }

    state.override_bindings = if enabled {
        HotkeyTable::new(failed)
    } else {
        HotkeyTable::default()
    };
    state
        .overrides
        .replace(enabled, state.override_bindings.chords());

    log_info!(
        "Registered {} hotkey(s) natively, {} as override(s)",
        total - state.override_bindings.len().min(total),
        state.override_bindings.len()
    );
}

/// Ends a drag on key release and fires override-suppressed chords.
pub(super) fn handle_key(transition: KeyTransition, state: &mut DaemonState) {
    let target = state.drag.session().map(|session| session.target);
    if state.drag.on_key(transition.is_down) {
        stop_ticker(state);
        if let Some(hwnd) = target {
            log_drag_end(hwnd, state);
        }
    }

    if !transition.suppressed {
        return;
    }
    let request = state
        .override_bindings
        .get(&transition.chord())
        .map(|binding| binding.request(transition.modifiers, transition.vk));
    if let Some(request) = request {
        dispatch_action(&request, state);
    }
}

/// Maps an action request to window operations.
///
/// Failures against the target window are logged at debug level only: the
/// window may have closed between the key press and now.
pub(super) fn dispatch_action(request: &ActionRequest, state: &mut DaemonState) {
    let action = request.action;

    if let Some(chord) = action.keystroke() {
        if let Err(e) = keystroke::send_chord(chord) {
            log_warn!("{action}: {e}");
        }
        return;
    }

    let result = match action {
        Action::CascadeLeft | Action::CascadeRight => state
            .manipulator
            .cascade(action == Action::CascadeRight)
            .map(|moved| log_debug!("{action}: cascaded {moved} window(s)")),
        _ => match state.target.resolve(state.manipulator.desktop()) {
            Ok(Some(hwnd)) => apply_to_window(request, hwnd, state),
            Ok(None) => {
                log_debug!("{action}: no window under the cursor");
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        log_debug!("{action} failed: {e}");
    }
}

fn apply_to_window(request: &ActionRequest, hwnd: usize, state: &mut DaemonState) -> WindowResult<()> {
    let m = &mut state.manipulator;
    match request.action {
        Action::MoveDrag => start_drag(DragMode::Move, hwnd, state),
        Action::ResizeDrag => start_drag(DragMode::Resize, hwnd, state),
        Action::Minimize => m.minimize(hwnd),
        Action::Maximize => m.maximize(hwnd),
        Action::Restore => m.restore(hwnd),
        Action::ToggleMinimize => m.toggle_minimize(hwnd),
        Action::OpacityUp => m.adjust_opacity(hwnd, true),
        Action::OpacityDown => m.adjust_opacity(hwnd, false),
        Action::SnapLeft => m.snap(hwnd, Zone::LeftHalf),
        Action::SnapRight => m.snap(hwnd, Zone::RightHalf),
        Action::NextMonitor => m.move_to_adjacent_monitor(hwnd, true),
        Action::PrevMonitor => m.move_to_adjacent_monitor(hwnd, false),
        Action::Center => m.center_window(
            hwnd,
            request.param("width_percent", DEFAULT_CENTER_PERCENT),
            request.param("height_percent", DEFAULT_CENTER_PERCENT),
        ),
        Action::Nudge => m.nudge(
            hwnd,
            request.param("dx", 0.0) as i32,
            request.param("dy", 0.0) as i32,
        ),
        Action::ZoomIn
        | Action::ZoomOut
        | Action::TaskView
        | Action::MinimizeAll
        | Action::CascadeLeft
        | Action::CascadeRight => Ok(()),
    }
}

fn start_drag(mode: DragMode, hwnd: usize, state: &mut DaemonState) -> WindowResult<()> {
    if state.drag.start(mode, hwnd, &mut state.manipulator)? && state.ticker.is_none() {
        state.ticker = Some(DragTicker::start(state.tx.clone()));
        if let Some(session) = state.drag.session() {
            let r = session.origin_rect;
            log_debug!(
                "Drag started ({mode:?}) on 0x{hwnd:X} at ({},{} {}x{})",
                r.x,
                r.y,
                r.width,
                r.height
            );
        }
    }
    Ok(())
}

/// Logs where a finished drag left the window.
fn log_drag_end(hwnd: usize, state: &DaemonState) {
    match state.manipulator.desktop().window_rect(hwnd) {
        Ok(r) => log_debug!("Drag ended on 0x{hwnd:X} at ({},{} {}x{})", r.x, r.y, r.width, r.height),
        Err(_) => log_debug!("Drag ended on 0x{hwnd:X}"),
    }
}

pub(super) fn handle_drag_tick(state: &mut DaemonState) {
    if let Err(e) = state.drag.tick(&mut state.manipulator) {
        log_debug!("Drag tick failed: {e}");
    }
    if !state.drag.is_active() {
        stop_ticker(state);
    }
}

fn stop_ticker(state: &mut DaemonState) {
    if let Some(ticker) = state.ticker.take() {
        ticker.stop();
    }
}

/// Parks a matching new window off-screen and schedules its placement.
pub(super) fn handle_window_shown(hwnd: usize, state: &mut DaemonState) {
    state.manipulator.prune_closed();

    if !state.placement.is_active() {
        return;
    }
    let Some(exe_path) = process::exe_path_for_window(hwnd) else {
        return;
    };

    let desktop = state.manipulator.desktop();
    if let Some(pending) = state
        .placement
        .on_window_shown(hwnd, &exe_path, desktop, Instant::now())
    {
        daemon_threads::schedule_placement(state.tx.clone(), pending);
    }
}

pub(super) fn handle_placement(pending: &PendingPlacement, state: &mut DaemonState) {
    match state.placement.apply(pending, &mut state.manipulator) {
        Ok(true) => log_info!(
            "Placed 0x{:X} in {} by rule {}",
            pending.hwnd,
            pending.rule.zone,
            pending.rule.label()
        ),
        Ok(false) => log_debug!("Placement of 0x{:X} abandoned", pending.hwnd),
        Err(e) => log_debug!("Placement of 0x{:X} failed: {e}", pending.hwnd),
    }
}

pub(super) fn handle_reload(reload: ConfigReload, state: &mut DaemonState) {
    match reload {
        ConfigReload::Config(config) => {
            state.config = config;
            register_all(state);
            state
                .placement
                .load_rules(state.rules.clone(), state.config.auto_position_enabled);
        }
        ConfigReload::Keybindings(keybindings) => {
            state.keybindings = keybindings;
            register_all(state);
        }
        ConfigReload::Rules(rules) => {
            state.rules = rules;
            state
                .placement
                .load_rules(state.rules.clone(), state.config.auto_position_enabled);
        }
    }
}
