use super::rules::{process_name_from_path, rules_to_toml, validate_rules};
use super::template::{generate_config, generate_keybindings, generate_rules};
use super::*;
use crate::action::Action;
use crate::Rect;
use crate::zone::Zone;

#[test]
fn default_config_has_expected_values() {
    // Arrange / Act
    let config = Config::default();

    // Assert
    assert!(config.override_windows_keybinds);
    assert!(!config.auto_position_enabled);
    assert!(!config.logging.enabled);
}

#[test]
fn partial_toml_uses_defaults_for_missing_keys() {
    // Arrange
    let toml_str = "auto_position_enabled = true\n";

    // Act
    let config: Config = toml::from_str(toml_str).unwrap();

    // Assert
    assert!(config.auto_position_enabled);
    assert!(config.override_windows_keybinds);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn validate_clamps_log_size() {
    // Arrange
    let mut config = Config::default();
    config.logging.max_file_mb = 0;

    // Act
    config.validate();

    // Assert
    assert_eq!(config.logging.max_file_mb, 1);
}

#[test]
fn config_template_matches_default_values() {
    // Arrange
    let toml_str = generate_config();

    // Act
    let mut config: Config = toml::from_str(&toml_str).unwrap();
    config.validate();

    // Assert
    let mut defaults = Config::default();
    defaults.validate();
    assert_eq!(config, defaults);
}

#[test]
fn keybindings_template_round_trips_defaults() {
    // Arrange
    let toml_str = generate_keybindings();

    // Act
    let file: KeybindingsFile = toml::from_str(&toml_str).unwrap();

    // Assert
    assert_eq!(file.into_keybindings(), keybinding::defaults());
}

#[test]
fn default_keybindings_name_real_actions() {
    for binding in keybinding::defaults() {
        assert!(binding.action.parse::<Action>().is_ok(), "{}", binding.action);
        assert!(crate::keys::vk_from_name(&binding.key).is_some(), "{}", binding.key);
        assert!(crate::input::parse_modifiers(&binding.modifiers).is_some());
    }
}

#[test]
fn keybinding_entry_defaults_enabled_without_parameters() {
    // Arrange
    let toml_str = r#"
[[keybinding]]
action = "nudge"
key = "L"
modifiers = ["win", "alt"]
parameters = { dx = 20, dy = -5.5 }

[[keybinding]]
action = "center"
key = "C"
enabled = false
"#;

    // Act
    let file: KeybindingsFile = toml::from_str(toml_str).unwrap();
    let bindings = file.into_keybindings();

    // Assert
    assert_eq!(bindings.len(), 2);
    assert!(bindings[0].enabled);
    assert_eq!(bindings[0].parameters.get("dx"), Some(&20.0));
    assert_eq!(bindings[0].parameters.get("dy"), Some(&-5.5));
    assert!(!bindings[1].enabled);
    assert!(bindings[1].modifiers.is_empty());
}

#[test]
fn unknown_action_names_still_parse_as_entries() {
    // Arrange
    let toml_str = r#"
[[keybinding]]
action = "teleport"
key = "T"
modifiers = ["hyper"]
"#;

    // Act
    let file: KeybindingsFile = toml::from_str(toml_str).unwrap();

    // Assert
    assert_eq!(file.into_keybindings()[0].action, "teleport");
}

#[test]
fn empty_keybindings_file_uses_defaults() {
    // Act
    let file: KeybindingsFile = toml::from_str("").unwrap();

    // Assert
    assert_eq!(file.into_keybindings(), keybinding::defaults());
}

#[test]
fn rules_template_parses_to_no_rules() {
    // Act
    let rules = validate_rules(&generate_rules()).unwrap();

    // Assert
    assert!(rules.is_empty());
}

#[test]
fn rule_fields_default_sensibly() {
    // Arrange
    let toml_str = r#"
[[rule]]
process_name = "notepad"
"#;

    // Act
    let rules = validate_rules(toml_str).unwrap();

    // Assert
    let rule = &rules[0];
    assert_eq!(rule.zone, "LeftHalf");
    assert_eq!(rule.zone.parse::<Zone>(), Ok(Zone::LeftHalf));
    assert!(rule.enabled);
    assert!(!rule.first_window_only);
    assert_eq!(rule.delay_ms, 150);
    assert_eq!(rule.monitor_index, 0);
}

#[test]
fn rule_delay_is_clamped() {
    // Arrange
    let mut rule = LaunchRule {
        delay_ms: 5,
        ..Default::default()
    };

    // Act / Assert
    assert_eq!(rule.delay().as_millis(), 50);
    rule.delay_ms = -100;
    assert_eq!(rule.delay().as_millis(), 50);
    rule.delay_ms = 60_000;
    assert_eq!(rule.delay().as_millis(), 2000);
    rule.delay_ms = 400;
    assert_eq!(rule.delay().as_millis(), 400);
}

#[test]
fn rule_label_prefers_app_name() {
    // Arrange
    let rule = LaunchRule {
        id: "r1".into(),
        app_name: "Editor".into(),
        ..Default::default()
    };

    // Act / Assert
    assert_eq!(rule.label(), "Editor");
    assert_eq!(LaunchRule::default().label(), "<unnamed rule>");
}

#[test]
fn invalid_rules_file_reports_error() {
    assert!(validate_rules("[[rule]\nzone = ").is_err());
}

#[test]
fn malformed_keybinding_entries_are_skipped() {
    // Arrange
    let toml_str = r#"
[[keybinding]]
action = "snap-left"
key = "Left"
modifiers = ["win", "alt"]

[[keybinding]]
action = "snap-right"
key = 5

[[keybinding]]
action = "maximize"

[[keybinding]]
action = "minimize"
key = "Down"
modifiers = "win"

[[keybinding]]
action = "restore"
key = "R"
"#;

    // Act
    let file: KeybindingsFile = toml::from_str(toml_str).unwrap();
    let bindings = file.into_keybindings();

    // Assert
    let actions: Vec<&str> = bindings.iter().map(|b| b.action.as_str()).collect();
    assert_eq!(actions, ["snap-left", "restore"]);
}

#[test]
fn empty_keybinding_array_is_not_replaced_by_defaults() {
    // Arrange
    let toml_str = r#"
[[keybinding]]
key = 5
"#;

    // Act
    let file: KeybindingsFile = toml::from_str(toml_str).unwrap();

    // Assert
    assert!(file.into_keybindings().is_empty());
}

#[test]
fn malformed_rule_entries_are_skipped() {
    // Arrange
    let toml_str = r#"
[[rule]]
process_name = "notepad"
zone = "RightHalf"

[[rule]]
process_name = "calc"
monitor_index = "left"

[[rule]]
process_name = "code"
delay_ms = 300
"#;

    // Act
    let rules = validate_rules(toml_str).unwrap();

    // Assert
    let names: Vec<&str> = rules.iter().map(|r| r.process_name.as_str()).collect();
    assert_eq!(names, ["notepad", "code"]);
    assert_eq!(rules[1].delay_ms, 300);
}

#[test]
fn process_name_handles_both_separators() {
    assert_eq!(process_name_from_path(r"C:\Windows\notepad.exe"), "notepad");
    assert_eq!(process_name_from_path("C:/Tools/my.app.exe"), "my.app");
    assert_eq!(process_name_from_path("code"), "code");
    assert_eq!(process_name_from_path(r"C:\dir\.hidden"), ".hidden");
}

#[test]
fn captured_rule_uses_the_closest_zone() {
    // Arrange
    let work = Rect::new(0, 0, 1920, 1040);
    let window = Rect::new(12, 8, 1270, 1020);

    // Act
    let rule = LaunchRule::capture(r"C:\Tools\Code.exe", 1, &window, &work);

    // Assert
    assert_eq!(rule.zone, "LeftTwoThirds");
    assert_eq!(rule.process_name, "Code");
    assert_eq!(rule.executable_path, r"C:\Tools\Code.exe");
    assert_eq!(rule.monitor_index, 1);
    assert_eq!(rule.id, "code-lefttwothirds");
    assert!(rule.enabled);
}

#[test]
fn captured_rule_renders_as_a_loadable_rules_file() {
    // Arrange
    let work = Rect::new(0, 0, 1920, 1040);
    let rule = LaunchRule::capture(r"C:\Windows\notepad.exe", 0, &Rect::new(960, 0, 960, 1040), &work);

    // Act
    let toml_str = rules_to_toml(std::slice::from_ref(&rule)).unwrap();

    // Assert
    assert!(toml_str.contains("[[rule]]"));
    assert_eq!(validate_rules(&toml_str).unwrap(), vec![rule]);
}
