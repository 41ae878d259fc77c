//! Keyboard input model: modifier tracking, chords, and the decision
//! logic of the global key interceptor.
//!
//! The platform hook feeds every raw key transition through
//! [`KeyInterceptor::process`] and acts on the returned [`Verdict`].
//! Nothing in here blocks, allocates per event, or logs.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::action::ActionRequest;
use crate::keys::{
    self, VK_LCONTROL, VK_LMENU, VK_LSHIFT, VK_LWIN, VK_RCONTROL, VK_RMENU, VK_RSHIFT, VK_RWIN,
};

/// Marker carried in the extra-info field of every input event this
/// process injects. The interceptor passes such events through untouched.
pub const SYNTHETIC_MARKER: usize = 0x5441_4354; // "TACT"

/// Bitmask over {alt, control, shift, win}.
///
/// Bit values match the Win32 `MOD_*` hotkey flags so `WM_HOTKEY`
/// parameters convert without translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierFlags(u32);

impl ModifierFlags {
    pub const NONE: Self = Self(0);
    pub const ALT: Self = Self(0x1);
    pub const CONTROL: Self = Self(0x2);
    pub const SHIFT: Self = Self(0x4);
    pub const WIN: Self = Self(0x8);

    /// Builds flags from raw bits, dropping anything outside the four
    /// modifier bits (e.g. `MOD_NOREPEAT`).
    pub fn from_bits(bits: u32) -> Self {
        Self(bits & 0xF)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ModifierFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ModifierFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ModifierFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.contains(Self::WIN) {
            parts.push("Win");
        }
        if self.contains(Self::CONTROL) {
            parts.push("Ctrl");
        }
        if self.contains(Self::ALT) {
            parts.push("Alt");
        }
        if self.contains(Self::SHIFT) {
            parts.push("Shift");
        }
        f.write_str(&parts.join("+"))
    }
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Win,
}

impl Modifier {
    /// Parses a modifier name case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "alt" => Some(Self::Alt),
            "shift" => Some(Self::Shift),
            "ctrl" | "control" => Some(Self::Ctrl),
            "win" | "super" | "windows" => Some(Self::Win),
            _ => None,
        }
    }

    pub fn flag(self) -> ModifierFlags {
        match self {
            Self::Alt => ModifierFlags::ALT,
            Self::Shift => ModifierFlags::SHIFT,
            Self::Ctrl => ModifierFlags::CONTROL,
            Self::Win => ModifierFlags::WIN,
        }
    }
}

/// Parses a list of modifier names into flags. Any unknown name
/// invalidates the whole list.
pub fn parse_modifiers<S: AsRef<str>>(names: &[S]) -> Option<ModifierFlags> {
    names.iter().try_fold(ModifierFlags::NONE, |acc, name| {
        Modifier::parse(name.as_ref()).map(|m| acc | m.flag())
    })
}

/// A modifier set plus a primary key: the unit of hotkey matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub modifiers: ModifierFlags,
    pub vk: u32,
}

impl Chord {
    pub fn new(modifiers: ModifierFlags, vk: u32) -> Self {
        Self { modifiers, vk }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "vk=0x{:02X}", self.vk)
        } else {
            write!(f, "{}+vk=0x{:02X}", self.modifiers, self.vk)
        }
    }
}

/// Live ref-counts of held modifier keys.
///
/// Left and right variants share one counter. Counts never go below zero,
/// even when a key-up arrives without its key-down (the down may have
/// been consumed before the hook saw it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    win: u32,
    shift: u32,
    ctrl: u32,
    alt: u32,
}

impl ModifierState {
    /// Adjusts the counter for `vk`. Non-modifier keys are ignored.
    pub fn update(&mut self, vk: u32, is_down: bool) {
        let counter = match vk {
            VK_LWIN | VK_RWIN => &mut self.win,
            VK_LSHIFT | VK_RSHIFT => &mut self.shift,
            VK_LCONTROL | VK_RCONTROL => &mut self.ctrl,
            VK_LMENU | VK_RMENU => &mut self.alt,
            _ => return,
        };
        *counter = if is_down {
            counter.saturating_add(1)
        } else {
            counter.saturating_sub(1)
        };
    }

    /// Flags for every modifier whose count is above zero.
    pub fn flags(&self) -> ModifierFlags {
        let mut flags = ModifierFlags::NONE;
        if self.win > 0 {
            flags |= ModifierFlags::WIN;
        }
        if self.shift > 0 {
            flags |= ModifierFlags::SHIFT;
        }
        if self.ctrl > 0 {
            flags |= ModifierFlags::CONTROL;
        }
        if self.alt > 0 {
            flags |= ModifierFlags::ALT;
        }
        flags
    }

    /// Current count for one modifier.
    pub fn count(&self, modifier: Modifier) -> u32 {
        match modifier {
            Modifier::Win => self.win,
            Modifier::Shift => self.shift,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
        }
    }
}

/// A raw key event as delivered by the OS hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub vk: u32,
    pub is_down: bool,
    /// Opaque extra-info value attached by whoever generated the event.
    pub extra_info: usize,
}

/// A key transition republished to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    pub vk: u32,
    pub is_down: bool,
    /// Modifiers held when the transition happened (after applying it).
    pub modifiers: ModifierFlags,
    /// Whether the interceptor swallowed this event as an override.
    pub suppressed: bool,
}

impl KeyTransition {
    pub fn chord(&self) -> Chord {
        Chord::new(self.modifiers, self.vk)
    }
}

/// Input from the event-loop thread.
///
/// Hook transitions and native hotkey requests share one channel so the
/// consumer sees them in the order the OS delivered them.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A transition seen by the keyboard hook.
    Key(KeyTransition),
    /// A native hotkey fired.
    Hotkey(ActionRequest),
}

/// What the platform hook must do with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Our own injected input: pass it on without telling anyone.
    PassSynthetic,
    /// Publish the transition and let the event propagate.
    Forward(KeyTransition),
    /// Publish the transition and swallow the event. When `mask_win` is
    /// set, inject a harmless keystroke so the shell does not treat the
    /// eventual Win release as a Start-menu tap.
    Swallow {
        transition: KeyTransition,
        mask_win: bool,
    },
}

/// The active suppression set.
#[derive(Debug, Default)]
pub struct Overrides {
    pub enabled: bool,
    pub chords: HashSet<Chord>,
}

/// Shared handle to the suppression set.
///
/// Writers replace the whole set at once; readers take a snapshot, so an
/// in-flight hook callback never sees a half-updated set.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    inner: Arc<RwLock<Arc<Overrides>>>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the suppression set.
    pub fn replace(&self, enabled: bool, chords: HashSet<Chord>) {
        let next = Arc::new(Overrides { enabled, chords });
        match self.inner.write() {
            Ok(mut slot) => *slot = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Returns the current set.
    pub fn snapshot(&self) -> Arc<Overrides> {
        match self.inner.read() {
            Ok(slot) => (*slot).clone(),
            Err(poisoned) => (*poisoned.into_inner()).clone(),
        }
    }
}

/// Per-hook interceptor state: modifier counts plus the shared override set.
#[derive(Debug)]
pub struct KeyInterceptor {
    modifiers: ModifierState,
    overrides: OverrideTable,
    marker: usize,
}

impl KeyInterceptor {
    pub fn new(overrides: OverrideTable) -> Self {
        Self {
            modifiers: ModifierState::default(),
            overrides,
            marker: SYNTHETIC_MARKER,
        }
    }

    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    /// Decides what to do with one key event.
    pub fn process(&mut self, event: RawKeyEvent) -> Verdict {
        if event.extra_info == self.marker {
            return Verdict::PassSynthetic;
        }

        let is_modifier = keys::is_modifier_vk(event.vk);
        if is_modifier {
            self.modifiers.update(event.vk, event.is_down);
        }

        let flags = self.modifiers.flags();
        let mut transition = KeyTransition {
            vk: event.vk,
            is_down: event.is_down,
            modifiers: flags,
            suppressed: false,
        };

        if event.is_down && !is_modifier {
            let overrides = self.overrides.snapshot();
            if overrides.enabled && overrides.chords.contains(&Chord::new(flags, event.vk)) {
                transition.suppressed = true;
                return Verdict::Swallow {
                    transition,
                    mask_win: flags.contains(ModifierFlags::WIN),
                };
            }
        }

        Verdict::Forward(transition)
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
