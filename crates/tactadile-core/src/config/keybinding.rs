use serde::{Deserialize, Serialize};

use crate::action::{Action, Parameters};

/// A user-configured keybinding that maps a key combination to an action.
///
/// Every field is kept as text so that one malformed entry can be skipped
/// at registration time without rejecting the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keybinding {
    /// Action name (e.g. "snap-left", "MoveDrag").
    pub action: String,
    /// Key name (e.g. "Left", "Z", "F1").
    pub key: String,
    /// Modifier names (e.g. ["win", "alt"]).
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Named numeric arguments for the action (e.g. `dx`, `width_percent`).
    #[serde(default, skip_serializing_if = "Parameters::is_empty")]
    pub parameters: Parameters,
}

fn enabled_by_default() -> bool {
    true
}

/// Returns the default keybindings.
///
/// Everything sits on Win+Alt so it does not collide with the shell's
/// own Win+arrow shortcuts.
///
/// Drag: Win+Alt + Z (move) / X (resize), held while moving the mouse
/// Snap: Win+Alt + Left/Right
/// Show state: Win+Alt + Up (maximize), Down (minimize), R (restore), M (toggle)
/// Opacity: Win+Alt + PageUp/PageDown
/// Monitors: Win+Alt + N/P
pub fn defaults() -> Vec<Keybinding> {
    const WA: &[&str] = &["win", "alt"];

    vec![
        bind(Action::MoveDrag, "Z", WA),
        bind(Action::ResizeDrag, "X", WA),
        bind(Action::SnapLeft, "Left", WA),
        bind(Action::SnapRight, "Right", WA),
        bind(Action::Maximize, "Up", WA),
        bind(Action::Minimize, "Down", WA),
        bind(Action::Restore, "R", WA),
        bind(Action::ToggleMinimize, "M", WA),
        bind(Action::OpacityUp, "PageUp", WA),
        bind(Action::OpacityDown, "PageDown", WA),
        bind(Action::NextMonitor, "N", WA),
        bind(Action::PrevMonitor, "P", WA),
        bind(Action::Center, "C", WA),
    ]
}

fn bind(action: Action, key: &str, modifiers: &[&str]) -> Keybinding {
    Keybinding {
        action: action.name().into(),
        key: key.into(),
        modifiers: modifiers.iter().map(|m| (*m).into()).collect(),
        enabled: true,
        parameters: Parameters::new(),
    }
}
