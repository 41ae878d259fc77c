//! Automatic placement of newly shown windows by launch rule.
//!
//! When a window appears, its process is matched against the rules. A
//! matching window is parked off-screen at once so it never flashes at its
//! default position, then moved into the rule's zone after a short delay.
//!
//! The rule list and both tracking sets sit behind one lock: they are read
//! when windows appear and replaced on configuration reloads.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::config::LaunchRule;
use crate::config::rules::process_name_from_path;
use crate::manipulator::WindowManipulator;
use crate::monitor;
use crate::window::{Desktop, WindowResult};
use crate::zone::Zone;
use crate::{log_debug, log_info, log_warn};

/// Where windows wait for their delayed placement.
pub const OFFSCREEN: i32 = -32000;

/// How long a window is ignored after it was picked up.
pub const RECENT_WINDOW: Duration = Duration::from_secs(5);

/// A placement waiting for its delay to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPlacement {
    pub hwnd: usize,
    pub rule: LaunchRule,
}

impl PendingPlacement {
    pub fn delay(&self) -> Duration {
        self.rule.delay()
    }
}

#[derive(Debug, Default)]
struct PlacementState {
    rules: Vec<LaunchRule>,
    /// Windows already picked up, with the time they were seen.
    recent: HashMap<usize, Instant>,
    /// Lowercased executable paths whose first window was placed.
    first_applied: HashSet<String>,
}

impl PlacementState {
    fn expire(&mut self, now: Instant) {
        self.recent
            .retain(|_, seen| now.saturating_duration_since(*seen) < RECENT_WINDOW);
    }
}

/// Matches new windows against launch rules and positions them.
#[derive(Debug, Default)]
pub struct PlacementEngine {
    enabled: AtomicBool,
    started: AtomicBool,
    state: Mutex<PlacementState>,
}

impl PlacementEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the rule set. Disabled rules are dropped here.
    ///
    /// `enabled` gates the whole engine (auto-positioning switched off
    /// in configuration).
    pub fn load_rules(&self, rules: Vec<LaunchRule>, enabled: bool) {
        let rules: Vec<_> = rules.into_iter().filter(|r| r.enabled).collect();
        log_info!(
            "Loaded {} launch rule(s), auto-positioning {}",
            rules.len(),
            if enabled { "on" } else { "off" }
        );
        self.lock().rules = rules;
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Starts handling window-shown events.
    ///
    /// The engine does not own the OS "window shown" subscription: the
    /// platform event loop holds it for its whole lifetime (closed-window
    /// pruning uses the same events) and feeds every event to
    /// [`on_window_shown`](Self::on_window_shown).
    pub fn start(&self) {
        self.started.store(true, Ordering::SeqCst);
    }

    /// Stops handling window-shown events. Events that still arrive are
    /// ignored, and placements already pending are left to finish.
    /// Tracking state is kept, so a later `start` resumes where it left off.
    pub fn stop(&self) {
        self.started.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.started.load(Ordering::SeqCst) && self.enabled.load(Ordering::SeqCst)
    }

    /// Returns the rule that would apply to a process, ignoring the
    /// first-window and recent-window tracking.
    pub fn match_rule(&self, exe_path: &str) -> Option<LaunchRule> {
        find_rule(&self.lock().rules, exe_path).cloned()
    }

    /// Handles a newly shown window owned by the process at `exe_path`.
    ///
    /// On a match the window is moved off-screen and the placement to
    /// schedule is returned. Returns `None` when the engine is inactive,
    /// the window was already picked up in the last few seconds, no rule
    /// matches, or a first-window-only rule already fired for the app.
    pub fn on_window_shown<D: Desktop>(
        &self,
        hwnd: usize,
        exe_path: &str,
        desktop: &D,
        now: Instant,
    ) -> Option<PendingPlacement> {
        if !self.is_active() {
            return None;
        }

        let rule = {
            let mut state = self.lock();
            state.expire(now);
            if state.recent.contains_key(&hwnd) {
                return None;
            }
            let rule = find_rule(&state.rules, exe_path)?.clone();
            if rule.first_window_only && !state.first_applied.insert(exe_path.to_lowercase()) {
                log_debug!("Launch rule {} already placed a window of {exe_path}", rule.label());
                return None;
            }
            state.recent.insert(hwnd, now);
            rule
        };

        if let Err(e) = desktop.set_position(hwnd, OFFSCREEN, OFFSCREEN) {
            log_debug!("Could not park 0x{hwnd:X} off-screen: {e}");
        }
        log_debug!(
            "Launch rule {} matched 0x{hwnd:X} ({exe_path}), placing in {}ms",
            rule.label(),
            rule.delay().as_millis()
        );
        Some(PendingPlacement { hwnd, rule })
    }

    /// Moves a pending window into its rule's zone.
    ///
    /// Returns `Ok(false)` without touching the window if it is no longer
    /// visible, no monitor is attached, or the zone name is unknown.
    pub fn apply<D: Desktop>(
        &self,
        pending: &PendingPlacement,
        manipulator: &mut WindowManipulator<D>,
    ) -> WindowResult<bool> {
        let hwnd = pending.hwnd;
        if !manipulator.desktop().is_visible(hwnd) {
            return Ok(false);
        }

        let monitors = manipulator.desktop().monitors()?;
        let Some(target) = monitor::monitor_at_or_first(&monitors, pending.rule.monitor_index)
        else {
            return Ok(false);
        };

        let Ok(zone) = pending.rule.zone.parse::<Zone>() else {
            log_warn!(
                "Launch rule {}: unknown zone '{}'",
                pending.rule.label(),
                pending.rule.zone
            );
            return Ok(false);
        };

        manipulator.place_new(hwnd, &zone.rect(&target.work_area))?;
        Ok(true)
    }

    fn lock(&self) -> MutexGuard<'_, PlacementState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Finds the rule for a process.
///
/// Every rule is first tried by executable path, then every rule by
/// process name; the first match in list order wins within each pass.
/// Comparisons ignore case and empty rule fields never match.
pub fn find_rule<'a>(rules: &'a [LaunchRule], exe_path: &str) -> Option<&'a LaunchRule> {
    let process_name = process_name_from_path(exe_path);
    let enabled = || rules.iter().filter(|r| r.enabled);
    enabled()
        .find(|r| same_text(&r.executable_path, exe_path))
        .or_else(|| enabled().find(|r| same_text(&r.process_name, process_name)))
}

fn same_text(rule_field: &str, value: &str) -> bool {
    !rule_field.is_empty() && rule_field.to_lowercase() == value.to_lowercase()
}

#[cfg(test)]
#[path = "placement_tests.rs"]
mod tests;
