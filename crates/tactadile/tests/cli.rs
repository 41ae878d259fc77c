use std::process::Command;

fn tactadile() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tactadile"))
}

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = tactadile();
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute tactadile");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("window dragging"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("init"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = tactadile();
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute tactadile");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tactadile"));
}

#[test]
fn debug_help_lists_inspection_tools() {
    // Arrange
    let mut cmd = tactadile();
    cmd.args(["debug", "--help"]);

    // Act
    let output = cmd.output().expect("failed to execute tactadile");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("monitors"));
    assert!(stdout.contains("zones"));
    assert!(stdout.contains("match"));
    assert!(stdout.contains("capture"));
}

#[test]
fn debug_capture_accepts_a_delay() {
    // Arrange
    let mut cmd = tactadile();
    cmd.args(["debug", "capture", "--help"]);

    // Act
    let output = cmd.output().expect("failed to execute tactadile");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--delay"));
}

#[test]
fn debug_capture_prints_a_rule_or_explains_why_not() {
    // Arrange
    let mut cmd = tactadile();
    cmd.args(["debug", "capture", "--delay", "0"]);

    // Act
    let output = cmd.output().expect("failed to execute tactadile");

    // Assert: without a window under the cursor (headless sessions) the
    // command fails with a message instead of a rule.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if output.status.success() {
        assert!(stdout.contains("Closest zone:"));
        assert!(stdout.contains("[[rule]]"));
    } else {
        assert!(stderr.contains("Error:"), "{stderr}");
    }
}

#[test]
fn debug_match_reports_process_name() {
    // Arrange
    let mut cmd = tactadile();
    cmd.args(["debug", "match", r"C:\Tools\no-such-app-4f2c.exe"]);

    // Act
    let output = cmd.output().expect("failed to execute tactadile");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Process name: no-such-app-4f2c"));
    assert!(stdout.contains(r"No launch rule matches C:\Tools\no-such-app-4f2c.exe"));
}

#[test]
fn debug_match_requires_a_path() {
    // Arrange
    let mut cmd = tactadile();
    cmd.args(["debug", "match"]);

    // Act
    let output = cmd.output().expect("failed to execute tactadile");

    // Assert
    assert!(!output.status.success());
}

#[test]
fn debug_zones_lists_every_zone() {
    // Arrange
    let mut cmd = tactadile();
    cmd.args(["debug", "zones", "--monitor", "99"]);

    // Act
    let output = cmd.output().expect("failed to execute tactadile");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("LeftHalf"));
    assert!(stdout.contains("Right 2/3"));
    assert!(stdout.contains("13 zones"));
}

#[test]
fn unknown_subcommand_fails() {
    // Arrange
    let mut cmd = tactadile();
    cmd.arg("teleport");

    // Act
    let output = cmd.output().expect("failed to execute tactadile");

    // Assert
    assert!(!output.status.success());
}
