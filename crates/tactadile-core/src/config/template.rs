/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `tactadile init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# Tactadile configuration
# Location: ~/.config/tactadile/config.toml

# Let bound shortcuts win over ones Windows or other apps already own.
# When a combination cannot be registered normally, Tactadile swallows it
# at the keyboard hook instead.
override_windows_keybinds = true

# Move new windows according to rules.toml.
auto_position_enabled = false

[logging]
# Enable file logging to ~/.config/tactadile/logs/tactadile.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}

/// Generates the default `keybindings.toml` contents from the built-in
/// defaults, with a header describing the format.
pub fn generate_keybindings() -> String {
    let mut out = String::from(
        r#"# Tactadile keybindings
# Location: ~/.config/tactadile/keybindings.toml
#
# Modifiers: win, alt, ctrl, shift
# Keys: A-Z, 0-9, F1-F24, Left, Right, Up, Down, PageUp, PageDown, Home, End,
#       Enter, Space, Tab, Escape, Minus, Plus, ...
#
# Actions: move-drag, resize-drag, minimize, maximize, restore, opacity-up,
#          opacity-down, snap-left, snap-right, toggle-minimize, zoom-in,
#          zoom-out, task-view, next-monitor, prev-monitor, minimize-all,
#          center, nudge, cascade-left, cascade-right
#
# Drag actions run while the key is held: hold the chord and move the mouse.
#
# Optional parameters:
#   center: width_percent, height_percent (default 66.67)
#   nudge:  dx, dy (pixels)
#
# [[keybinding]]
# action = "nudge"
# key = "L"
# modifiers = ["win", "alt", "shift"]
# parameters = { dx = 20, dy = 0 }
"#,
    );

    for binding in super::keybinding::defaults() {
        let modifiers = binding
            .modifiers
            .iter()
            .map(|m| format!("\"{m}\""))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "\n[[keybinding]]\naction = \"{}\"\nkey = \"{}\"\nmodifiers = [{modifiers}]\n",
            binding.action, binding.key
        ));
    }
    out
}

/// Generates the default `rules.toml` contents with explanatory comments.
pub fn generate_rules() -> String {
    r#"# Tactadile launch rules
# Location: ~/.config/tactadile/rules.toml
#
# Each rule places new windows of one application in a zone when they
# first appear. Requires auto_position_enabled = true in config.toml.
#
# Rules matching by executable_path are tried before rules matching by
# process_name; within each, the first rule in this file wins.
#
# Zones: Centered, LeftHalf, RightHalf, TopHalf, BottomHalf, TopLeft,
#        TopRight, BottomLeft, BottomRight, LeftThird, CenterThird,
#        RightThird, LeftTwoThirds, RightTwoThirds
#
# [[rule]]
# id = "notepad"
# app_name = "Notepad"
# executable_path = "C:\\Windows\\notepad.exe"
# process_name = "notepad"
# monitor_index = 0        # 0 = leftmost monitor
# zone = "LeftHalf"
# enabled = true
# first_window_only = false
# delay_ms = 150           # 50 to 2000
"#
    .to_string()
}
