//! Virtual key codes and key-name parsing.
//!
//! Codes follow the Win32 virtual-key table. They are plain `u32`s so
//! the chord model and the interceptor logic stay testable off-Windows.

pub const VK_TAB: u32 = 0x09;
pub const VK_SHIFT: u32 = 0x10;
pub const VK_CONTROL: u32 = 0x11;
pub const VK_MENU: u32 = 0x12;
pub const VK_LWIN: u32 = 0x5B;
pub const VK_RWIN: u32 = 0x5C;
pub const VK_LSHIFT: u32 = 0xA0;
pub const VK_RSHIFT: u32 = 0xA1;
pub const VK_LCONTROL: u32 = 0xA2;
pub const VK_RCONTROL: u32 = 0xA3;
pub const VK_LMENU: u32 = 0xA4;
pub const VK_RMENU: u32 = 0xA5;
pub const VK_OEM_PLUS: u32 = 0xBB;
pub const VK_OEM_MINUS: u32 = 0xBD;
pub const VK_M: u32 = 0x4D;

/// Unassigned code injected to keep the shell from treating a lone
/// Win release as a Start-menu activation.
pub const VK_MENU_MASK: u32 = 0xE8;

/// Converts a key name string to a Windows virtual key code.
///
/// Supports letters (A–Z), digits (0–9), function keys (F1–F24),
/// and common named keys (Enter, Space, Tab, etc.).
/// Matching is case-insensitive.
pub fn vk_from_name(name: &str) -> Option<u32> {
    let upper = name.trim().to_ascii_uppercase();

    if upper.len() == 1 {
        let ch = upper.as_bytes()[0];
        if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            return Some(u32::from(ch));
        }
    }

    // Function keys F1–F24
    if let Some(rest) = upper.strip_prefix('F')
        && let Ok(n) = rest.parse::<u32>()
        && (1..=24).contains(&n)
    {
        return Some(0x70 + n - 1); // VK_F1 = 0x70
    }

    match upper.as_str() {
        // Navigation
        "ENTER" | "RETURN" => Some(0x0D),
        "TAB" => Some(VK_TAB),
        "ESCAPE" | "ESC" => Some(0x1B),
        "SPACE" => Some(0x20),
        "BACKSPACE" => Some(0x08),
        "DELETE" | "DEL" => Some(0x2E),
        "INSERT" | "INS" => Some(0x2D),
        "HOME" => Some(0x24),
        "END" => Some(0x23),
        "PAGEUP" | "PGUP" => Some(0x21),
        "PAGEDOWN" | "PGDN" => Some(0x22),

        // Arrow keys
        "LEFT" => Some(0x25),
        "UP" => Some(0x26),
        "RIGHT" => Some(0x27),
        "DOWN" => Some(0x28),

        // Punctuation / OEM keys
        "MINUS" => Some(VK_OEM_MINUS),
        "PLUS" | "EQUALS" => Some(VK_OEM_PLUS),
        "COMMA" => Some(0xBC),
        "PERIOD" | "DOT" => Some(0xBE),
        "SLASH" => Some(0xBF),
        "SEMICOLON" => Some(0xBA),
        "BACKSLASH" => Some(0xDC),
        "LBRACKET" => Some(0xDB),
        "RBRACKET" => Some(0xDD),
        "QUOTE" => Some(0xDE),
        "BACKTICK" | "GRAVE" => Some(0xC0),

        _ => None,
    }
}

/// Returns whether `vk` is one of the sided modifier keys reported by the
/// low-level keyboard hook.
pub fn is_modifier_vk(vk: u32) -> bool {
    matches!(
        vk,
        VK_LSHIFT | VK_RSHIFT | VK_LCONTROL | VK_RCONTROL | VK_LMENU | VK_RMENU | VK_LWIN | VK_RWIN
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_case_insensitive() {
        // Assert
        assert_eq!(vk_from_name("j"), Some(0x4A));
        assert_eq!(vk_from_name("J"), Some(0x4A));
        assert_eq!(vk_from_name("a"), Some(0x41));
        assert_eq!(vk_from_name("Z"), Some(0x5A));
    }

    #[test]
    fn digits_return_vk_codes() {
        // Assert
        assert_eq!(vk_from_name("0"), Some(0x30));
        assert_eq!(vk_from_name("9"), Some(0x39));
    }

    #[test]
    fn named_keys() {
        // Assert
        assert_eq!(vk_from_name("Enter"), Some(0x0D));
        assert_eq!(vk_from_name("SPACE"), Some(0x20));
        assert_eq!(vk_from_name("esc"), Some(0x1B));
        assert_eq!(vk_from_name("Plus"), Some(VK_OEM_PLUS));
    }

    #[test]
    fn function_keys() {
        // Assert
        assert_eq!(vk_from_name("F1"), Some(0x70));
        assert_eq!(vk_from_name("f12"), Some(0x7B));
        assert_eq!(vk_from_name("F24"), Some(0x87));
        assert_eq!(vk_from_name("F25"), None);
    }

    #[test]
    fn unknown_returns_none() {
        // Assert
        assert_eq!(vk_from_name("INVALID"), None);
        assert_eq!(vk_from_name(""), None);
    }

    #[test]
    fn sided_modifiers_are_recognised() {
        assert!(is_modifier_vk(VK_LSHIFT));
        assert!(is_modifier_vk(VK_RWIN));
        assert!(!is_modifier_vk(VK_SHIFT));
        assert!(!is_modifier_vk(0x41));
    }
}
