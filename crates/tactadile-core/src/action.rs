use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::input::{Chord, ModifierFlags};
use crate::keys::{VK_M, VK_OEM_MINUS, VK_OEM_PLUS, VK_TAB};

/// A command that can be triggered by a hotkey or an override chord.
///
/// Actions are fixed at configuration time and never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move the window under the cursor while the chord is held.
    MoveDrag,
    /// Resize the window under the cursor while the chord is held.
    ResizeDrag,
    Minimize,
    /// Maximize, or restore if already maximized.
    Maximize,
    Restore,
    OpacityUp,
    OpacityDown,
    SnapLeft,
    SnapRight,
    ToggleMinimize,
    ZoomIn,
    ZoomOut,
    TaskView,
    NextMonitor,
    PrevMonitor,
    MinimizeAll,
    /// Center the window at a percentage of its monitor's work area.
    Center,
    /// Offset the window by a fixed amount.
    Nudge,
    CascadeLeft,
    CascadeRight,
}

impl Action {
    pub const ALL: [Action; 20] = [
        Action::MoveDrag,
        Action::ResizeDrag,
        Action::Minimize,
        Action::Maximize,
        Action::Restore,
        Action::OpacityUp,
        Action::OpacityDown,
        Action::SnapLeft,
        Action::SnapRight,
        Action::ToggleMinimize,
        Action::ZoomIn,
        Action::ZoomOut,
        Action::TaskView,
        Action::NextMonitor,
        Action::PrevMonitor,
        Action::MinimizeAll,
        Action::Center,
        Action::Nudge,
        Action::CascadeLeft,
        Action::CascadeRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::MoveDrag => "MoveDrag",
            Self::ResizeDrag => "ResizeDrag",
            Self::Minimize => "Minimize",
            Self::Maximize => "Maximize",
            Self::Restore => "Restore",
            Self::OpacityUp => "OpacityUp",
            Self::OpacityDown => "OpacityDown",
            Self::SnapLeft => "SnapLeft",
            Self::SnapRight => "SnapRight",
            Self::ToggleMinimize => "ToggleMinimize",
            Self::ZoomIn => "ZoomIn",
            Self::ZoomOut => "ZoomOut",
            Self::TaskView => "TaskView",
            Self::NextMonitor => "NextMonitor",
            Self::PrevMonitor => "PrevMonitor",
            Self::MinimizeAll => "MinimizeAll",
            Self::Center => "Center",
            Self::Nudge => "Nudge",
            Self::CascadeLeft => "CascadeLeft",
            Self::CascadeRight => "CascadeRight",
        }
    }

    /// Whether the action targets the window under the cursor.
    ///
    /// Keystroke and cascade actions work without one.
    pub fn needs_target(self) -> bool {
        !matches!(
            self,
            Self::ZoomIn
                | Self::ZoomOut
                | Self::TaskView
                | Self::MinimizeAll
                | Self::CascadeLeft
                | Self::CascadeRight
        )
    }

    /// The shell shortcut replayed for actions delivered as keystrokes.
    pub fn keystroke(self) -> Option<Chord> {
        let vk = match self {
            Self::ZoomIn => VK_OEM_PLUS,
            Self::ZoomOut => VK_OEM_MINUS,
            Self::TaskView => VK_TAB,
            Self::MinimizeAll => VK_M,
            _ => return None,
        };
        Some(Chord::new(ModifierFlags::WIN, vk))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = String;

    /// Parses an action name case-insensitively, ignoring `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| !matches!(c, '-' | '_')).collect();
        Action::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown action: {s:?}"))
    }
}

/// Named numeric parameters attached to a binding.
pub type Parameters = BTreeMap<String, f64>;

/// An action ready to be dispatched, with the chord that fired it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub action: Action,
    pub modifiers: ModifierFlags,
    pub vk: u32,
    pub parameters: Parameters,
}

impl ActionRequest {
    /// Reads a parameter, falling back to `default` when missing or not finite.
    pub fn param(&self, name: &str, default: f64) -> f64 {
        self.parameters
            .get(name)
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_parses_from_its_name() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn action_names_are_loose() {
        assert_eq!("move-drag".parse::<Action>(), Ok(Action::MoveDrag));
        assert_eq!("SNAP_LEFT".parse::<Action>(), Ok(Action::SnapLeft));
        assert!("Teleport".parse::<Action>().is_err());
    }

    #[test]
    fn param_falls_back_to_default() {
        // Arrange
        let mut parameters = Parameters::new();
        parameters.insert("dx".into(), 25.0);
        parameters.insert("dy".into(), f64::NAN);
        let request = ActionRequest {
            action: Action::Nudge,
            modifiers: ModifierFlags::NONE,
            vk: 0,
            parameters,
        };

        // Act / Assert
        assert_eq!(request.param("dx", 0.0), 25.0);
        assert_eq!(request.param("dy", 3.0), 3.0);
        assert_eq!(request.param("missing", 7.0), 7.0);
    }

    #[test]
    fn only_shell_shortcuts_have_keystrokes() {
        assert_eq!(
            Action::TaskView.keystroke(),
            Some(Chord::new(ModifierFlags::WIN, VK_TAB))
        );
        assert_eq!(
            Action::ZoomIn.keystroke(),
            Some(Chord::new(ModifierFlags::WIN, VK_OEM_PLUS))
        );
        assert!(Action::Center.keystroke().is_none());
        assert!(Action::CascadeLeft.keystroke().is_none());
    }

    #[test]
    fn keystroke_actions_need_no_target() {
        assert!(!Action::TaskView.needs_target());
        assert!(!Action::CascadeLeft.needs_target());
        assert!(Action::SnapLeft.needs_target());
        assert!(Action::MoveDrag.needs_target());
    }
}
