use std::sync::mpsc::Sender;

use tactadile_core::config::{Config, Keybinding, LaunchRule};
use tactadile_core::drag::DragMachine;
use tactadile_core::hotkey::HotkeyTable;
use tactadile_core::input::{InputEvent, OverrideTable};
use tactadile_core::placement::{PendingPlacement, PlacementEngine};
use tactadile_core::target::TargetResolver;
use tactadile_core::WindowManipulator;

use crate::config_watcher::ConfigReload;
use crate::desktop::Win32Desktop;
use crate::event_loop::EventLoopHandle;

use super::daemon_threads::DragTicker;

/// Internal message type for the main daemon thread.
pub(super) enum DaemonMsg {
    /// Keyboard hook transitions and native hotkeys, in OS order.
    Input(InputEvent),
    /// An application window became visible.
    WindowShown(usize),
    /// Drag polling tick (~60 Hz while a drag is active).
    DragTick,
    /// A launch-rule placement whose delay has elapsed.
    ApplyPlacement(PendingPlacement),
    /// A validated config reload from the file watcher.
    Reload(Box<ConfigReload>),
    /// Ctrl+C or console close.
    Shutdown,
}

/// Everything the daemon thread mutates while handling messages.
pub(super) struct DaemonState {
    pub config: Config,
    pub keybindings: Vec<Keybinding>,
    pub rules: Vec<LaunchRule>,
    pub manipulator: WindowManipulator<Win32Desktop>,
    pub drag: DragMachine,
    pub ticker: Option<DragTicker>,
    pub target: TargetResolver,
    pub placement: PlacementEngine,
    /// Shared with the keyboard hook.
    pub overrides: OverrideTable,
    /// Bindings that fire through override suppression.
    pub override_bindings: HotkeyTable,
    pub event_loop: EventLoopHandle,
    pub tx: Sender<DaemonMsg>,
}
