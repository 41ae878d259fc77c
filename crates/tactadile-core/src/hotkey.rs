//! Turning configured keybindings into chords and back into actions.
//!
//! Bindings arrive as text. Each one is parsed on its own; a malformed
//! entry is logged and skipped so the rest still load.

use std::collections::{HashMap, HashSet};

use crate::action::{Action, ActionRequest, Parameters};
use crate::config::Keybinding;
use crate::input::{Chord, ModifierFlags, parse_modifiers};
use crate::keys::vk_from_name;
use crate::log_warn;

/// A keybinding that parsed successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub action: Action,
    pub chord: Chord,
    pub parameters: Parameters,
}

impl Binding {
    /// Builds the request dispatched when this binding fires.
    pub fn request(&self, modifiers: ModifierFlags, vk: u32) -> ActionRequest {
        ActionRequest {
            action: self.action,
            modifiers,
            vk,
            parameters: self.parameters.clone(),
        }
    }
}

/// Why a keybinding was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    UnknownAction(String),
    UnknownKey(String),
    UnknownModifier(Vec<String>),
}

impl std::fmt::Display for BindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAction(a) => write!(f, "unknown action '{a}'"),
            Self::UnknownKey(k) => write!(f, "unknown key '{k}'"),
            Self::UnknownModifier(m) => write!(f, "unknown modifier in {m:?}"),
        }
    }
}

impl std::error::Error for BindingError {}

/// Parses one keybinding.
pub fn parse_binding(entry: &Keybinding) -> Result<Binding, BindingError> {
    let action = entry
        .action
        .parse::<Action>()
        .map_err(|_| BindingError::UnknownAction(entry.action.clone()))?;
    let modifiers = parse_modifiers(&entry.modifiers)
        .ok_or_else(|| BindingError::UnknownModifier(entry.modifiers.clone()))?;
    let vk = vk_from_name(&entry.key).ok_or_else(|| BindingError::UnknownKey(entry.key.clone()))?;

    Ok(Binding {
        action,
        chord: Chord::new(modifiers, vk),
        parameters: entry.parameters.clone(),
    })
}

/// Parses every enabled keybinding, skipping malformed entries and
/// later duplicates of the same chord.
pub fn resolve_bindings(entries: &[Keybinding]) -> Vec<Binding> {
    let mut seen = HashSet::new();
    let mut bindings = Vec::new();

    for entry in entries.iter().filter(|e| e.enabled) {
        match parse_binding(entry) {
            Ok(binding) if !seen.insert(binding.chord) => {
                log_warn!(
                    "Skipping {} on {}: chord already bound",
                    binding.action,
                    binding.chord
                );
            }
            Ok(binding) => bindings.push(binding),
            Err(e) => log_warn!("Skipping keybinding '{}': {e}", entry.action),
        }
    }
    bindings
}

/// Chord lookup for override-suppressed bindings.
///
/// Holds only the bindings that failed native registration; those are the
/// ones the keyboard hook swallows and reports back.
#[derive(Debug, Clone, Default)]
pub struct HotkeyTable {
    by_chord: HashMap<Chord, Binding>,
}

impl HotkeyTable {
    pub fn new(bindings: impl IntoIterator<Item = Binding>) -> Self {
        Self {
            by_chord: bindings.into_iter().map(|b| (b.chord, b)).collect(),
        }
    }

    pub fn get(&self, chord: &Chord) -> Option<&Binding> {
        self.by_chord.get(chord)
    }

    /// The chord set handed to the keyboard hook.
    pub fn chords(&self) -> HashSet<Chord> {
        self.by_chord.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.by_chord.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_chord.is_empty()
    }
}
