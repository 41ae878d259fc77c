use std::path::{Path, PathBuf};

use super::keybinding;
use super::{Config, Keybinding, KeybindingsFile, LaunchRule, RulesFile};

/// Returns the config directory: `~/.config/tactadile/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("tactadile"))
}

/// Returns the config file path: `~/.config/tactadile/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Returns the keybindings file path: `~/.config/tactadile/keybindings.toml`.
pub fn keybindings_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("keybindings.toml"))
}

/// Returns the rules file path: `~/.config/tactadile/rules.toml`.
pub fn rules_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("rules.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(Config)` on success, or an error string describing
/// what went wrong (IO error, parse error, etc.).
pub fn try_load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let mut config: Config = parse_file(&path)?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// Non-existent files silently return defaults; other errors are printed.
pub fn load() -> Config {
    load_or_default(try_load, Config::default)
}

/// Tries to load and parse `keybindings.toml`.
pub fn try_load_keybindings() -> Result<Vec<Keybinding>, String> {
    let path = keybindings_path().ok_or("could not determine keybindings path")?;
    let file: KeybindingsFile = parse_file(&path)?;
    Ok(file.into_keybindings())
}

/// Loads keybindings from `~/.config/tactadile/keybindings.toml`.
///
/// Falls back to the built-in defaults if the file is missing or invalid.
pub fn load_keybindings() -> Vec<Keybinding> {
    load_or_default(try_load_keybindings, keybinding::defaults)
}

/// Tries to load and parse `rules.toml`.
pub fn try_load_rules() -> Result<Vec<LaunchRule>, String> {
    let path = rules_path().ok_or("could not determine rules path")?;
    let file: RulesFile = parse_file(&path)?;
    Ok(file.into_rules())
}

/// Loads launch rules from `~/.config/tactadile/rules.toml`.
///
/// Falls back to no rules if the file is missing or invalid.
pub fn load_rules() -> Vec<LaunchRule> {
    load_or_default(try_load_rules, Vec::new)
}

fn parse_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads a config value from disk, falling back to defaults.
///
/// Non-existent files silently return defaults; other IO errors are printed.
fn load_or_default<T>(try_load: impl FnOnce() -> Result<T, String>, default: impl Fn() -> T) -> T {
    match try_load() {
        Ok(val) => val,
        Err(e) if is_file_not_found(&e) => default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            default()
        }
    }
}

/// Returns true if the error message indicates a missing file.
fn is_file_not_found(e: &str) -> bool {
    e.contains("cannot find the path")
        || e.contains("The system cannot find")
        || e.contains("No such file")
}
