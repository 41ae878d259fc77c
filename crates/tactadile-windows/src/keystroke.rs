//! Synthetic keystroke injection.
//!
//! Every injected event carries [`SYNTHETIC_MARKER`] so the keyboard hook
//! lets it through without treating it as user input.

use std::mem;

use tactadile_core::input::SYNTHETIC_MARKER;
use tactadile_core::keys::{
    VK_LCONTROL, VK_LMENU, VK_LSHIFT, VK_LWIN, VK_MENU_MASK, VK_RCONTROL, VK_RMENU, VK_RSHIFT,
    VK_RWIN,
};
use tactadile_core::{Chord, ModifierFlags, WindowResult};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBD_EVENT_FLAGS, KEYBDINPUT,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, SendInput, VIRTUAL_KEY,
};

/// Physical modifier keys paired with the flag they contribute.
const MODIFIER_KEYS: [(u32, ModifierFlags); 8] = [
    (VK_LWIN, ModifierFlags::WIN),
    (VK_RWIN, ModifierFlags::WIN),
    (VK_LCONTROL, ModifierFlags::CONTROL),
    (VK_RCONTROL, ModifierFlags::CONTROL),
    (VK_LMENU, ModifierFlags::ALT),
    (VK_RMENU, ModifierFlags::ALT),
    (VK_LSHIFT, ModifierFlags::SHIFT),
    (VK_RSHIFT, ModifierFlags::SHIFT),
];

/// Keys that need `KEYEVENTF_EXTENDEDKEY` to be told apart from their
/// numeric-keypad twins.
fn is_extended(vk: u32) -> bool {
    matches!(
        vk,
        0x21..=0x28 // PageUp, PageDown, End, Home, arrows
            | 0x2D | 0x2E // Insert, Delete
            | 0x5B | 0x5C // Win keys
            | 0xA3 | 0xA5 // right Ctrl / Alt
    )
}

fn key_input(vk: u32, up: bool) -> INPUT {
    let mut flags = KEYBD_EVENT_FLAGS(0);
    if is_extended(vk) {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }
    if up {
        flags |= KEYEVENTF_KEYUP;
    }
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(vk as u16),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: SYNTHETIC_MARKER,
            },
        },
    }
}

fn send(inputs: &[INPUT]) -> WindowResult<()> {
    // SAFETY: every INPUT is a fully initialized keyboard event.
    let sent = unsafe { SendInput(inputs, mem::size_of::<INPUT>() as i32) };
    if sent as usize != inputs.len() {
        return Err(format!("SendInput injected {sent} of {} events", inputs.len()).into());
    }
    Ok(())
}

fn is_held(vk: u32) -> bool {
    // SAFETY: GetAsyncKeyState is a read-only query; the high bit means "down".
    unsafe { GetAsyncKeyState(vk as i32) < 0 }
}

/// Sends the key sequence for `chord`: modifiers down, key down, key up,
/// modifiers up.
///
/// Modifiers the user is physically holding that are not part of the chord
/// are released first so they do not leak into the combination.
pub fn send_chord(chord: Chord) -> WindowResult<()> {
    let mut inputs = Vec::with_capacity(16);

    for (vk, flag) in MODIFIER_KEYS {
        if !chord.modifiers.contains(flag) && is_held(vk) {
            inputs.push(key_input(vk, true));
        }
    }

    let wanted = chord_modifier_keys(chord.modifiers);
    inputs.extend(wanted.iter().map(|&vk| key_input(vk, false)));
    inputs.push(key_input(chord.vk, false));
    inputs.push(key_input(chord.vk, true));
    inputs.extend(wanted.iter().rev().map(|&vk| key_input(vk, true)));

    send(&inputs)
}

/// Taps the unassigned mask key.
///
/// Sent while Win is held so the shell does not read the eventual Win
/// release as a lone tap that opens the Start menu.
pub fn send_mask_key() {
    let _ = send(&[key_input(VK_MENU_MASK, false), key_input(VK_MENU_MASK, true)]);
}

/// Left-hand virtual keys for each flag in the set, in press order.
fn chord_modifier_keys(flags: ModifierFlags) -> Vec<u32> {
    [
        (ModifierFlags::WIN, VK_LWIN),
        (ModifierFlags::CONTROL, VK_LCONTROL),
        (ModifierFlags::ALT, VK_LMENU),
        (ModifierFlags::SHIFT, VK_LSHIFT),
    ]
    .into_iter()
    .filter(|(flag, _)| flags.contains(*flag))
    .map(|(_, vk)| vk)
    .collect()
}
