//! Launch rules: where newly shown application windows are placed.

use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::zone::find_closest_zone;

/// Shortest placement delay, in milliseconds.
pub const MIN_DELAY_MS: u64 = 50;
/// Longest placement delay, in milliseconds.
pub const MAX_DELAY_MS: u64 = 2000;

/// Places windows of one application in a zone on a monitor.
///
/// A rule matches by `executable_path` or `process_name`, both compared
/// case-insensitively. Empty fields never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchRule {
    pub id: String,
    /// Display name only.
    pub app_name: String,
    pub executable_path: String,
    /// Executable file stem, e.g. "notepad".
    pub process_name: String,
    /// Index into the sorted monitor list; out of range means the first.
    pub monitor_index: i32,
    /// Zone name (e.g. "LeftHalf").
    pub zone: String,
    pub enabled: bool,
    /// Only place the first window the application shows.
    pub first_window_only: bool,
    /// Wait before placing, clamped to 50..=2000 ms.
    pub delay_ms: i64,
}

impl Default for LaunchRule {
    fn default() -> Self {
        Self {
            id: String::new(),
            app_name: String::new(),
            executable_path: String::new(),
            process_name: String::new(),
            monitor_index: 0,
            zone: "LeftHalf".into(),
            enabled: true,
            first_window_only: false,
            delay_ms: 150,
        }
    }
}

impl LaunchRule {
    /// The placement delay clamped to its allowed range.
    pub fn delay(&self) -> std::time::Duration {
        let ms = u64::try_from(self.delay_ms).unwrap_or(0);
        std::time::Duration::from_millis(ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS))
    }

    /// A rule that places windows of `exe_path` in the zone closest to
    /// where `window` currently sits on the monitor at `monitor_index`.
    pub fn capture(exe_path: &str, monitor_index: i32, window: &Rect, work_area: &Rect) -> Self {
        let process = process_name_from_path(exe_path);
        let zone = find_closest_zone(window, work_area);
        Self {
            id: format!("{}-{}", process.to_lowercase(), zone.name().to_lowercase()),
            app_name: process.to_string(),
            executable_path: exe_path.to_string(),
            process_name: process.to_string(),
            monitor_index,
            zone: zone.name().to_string(),
            ..Default::default()
        }
    }

    /// A short label for logs.
    pub fn label(&self) -> &str {
        [&self.app_name, &self.id, &self.process_name, &self.executable_path]
            .into_iter()
            .find(|s| !s.is_empty())
            .map_or("<unnamed rule>", String::as_str)
    }
}

/// Returns the executable file stem of a path, e.g. `notepad` for
/// `C:\Windows\notepad.exe`. Both `\` and `/` separate components.
pub fn process_name_from_path(path: &str) -> &str {
    let file = path.rsplit(['\\', '/']).next().unwrap_or(path);
    match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    }
}

/// Renders rules as `[[rule]]` tables ready to paste into `rules.toml`.
pub fn rules_to_toml(rules: &[LaunchRule]) -> Result<String, String> {
    #[derive(Serialize)]
    struct Rules<'a> {
        rule: &'a [LaunchRule],
    }

    toml::to_string(&Rules { rule: rules }).map_err(|e| e.to_string())
}

/// Validates a TOML string as a rules file.
///
/// Returns the well-formed rules, or an error if the file itself is not
/// valid TOML. Malformed entries are skipped.
pub fn validate_rules(content: &str) -> Result<Vec<LaunchRule>, String> {
    let file: super::RulesFile = toml::from_str(content).map_err(|e| e.to_string())?;
    Ok(file.into_rules())
}
