pub mod keybinding;
mod loader;
pub mod rules;
pub mod template;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::log::LogConfig;
use crate::log_warn;

pub use keybinding::Keybinding;
pub use loader::{
    config_dir, config_path, keybindings_path, load, load_keybindings, load_rules, rules_path,
    try_load, try_load_keybindings, try_load_rules,
};
pub use rules::LaunchRule;

/// Top-level configuration for Tactadile.
///
/// Loaded from `~/.config/tactadile/config.toml`. Missing keys fall back
/// to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Swallow bound chords that another application (or the shell)
    /// already owns, so they still reach Tactadile.
    pub override_windows_keybinds: bool,
    /// Move new windows according to `rules.toml`.
    pub auto_position_enabled: bool,
    /// File logging settings.
    pub logging: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            override_windows_keybinds: true,
            auto_position_enabled: false,
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    /// Clamps values to safe ranges.
    pub fn validate(&mut self) {
        self.logging.max_file_mb = self.logging.max_file_mb.clamp(1, 1024);
    }
}

/// Wrapper for deserializing the keybindings file.
///
/// The file contains a top-level `[[keybinding]]` array of tables. Entries
/// stay raw so each one is converted on its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct KeybindingsFile {
    keybinding: Option<Vec<toml::Value>>,
}

impl KeybindingsFile {
    /// The well-formed entries, or the defaults when the array is absent.
    pub(crate) fn into_keybindings(self) -> Vec<Keybinding> {
        match self.keybinding {
            Some(entries) => convert_entries(entries, "keybinding"),
            None => keybinding::defaults(),
        }
    }
}

/// Wrapper for deserializing the rules file.
///
/// The file contains a top-level `[[rule]]` array of tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RulesFile {
    #[serde(default)]
    rule: Vec<toml::Value>,
}

impl RulesFile {
    /// The well-formed rules.
    pub(crate) fn into_rules(self) -> Vec<LaunchRule> {
        convert_entries(self.rule, "rule")
    }
}

/// Converts each table on its own, logging and skipping malformed ones.
fn convert_entries<T: DeserializeOwned>(entries: Vec<toml::Value>, kind: &str) -> Vec<T> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match value.try_into::<T>() {
            Ok(entry) => Some(entry),
            Err(e) => {
                log_warn!("Skipping {kind} #{}: {e}", i + 1);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests;
