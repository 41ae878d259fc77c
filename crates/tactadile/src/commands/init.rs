use std::path::Path;

use tactadile_core::config;

/// Creates the default configuration files at `~/.config/tactadile/`.
///
/// Generates `config.toml`, `keybindings.toml` and `rules.toml` with
/// comments explaining every option. Existing files are not overwritten.
pub fn execute() {
    let Some(dir) = config::config_dir() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Error: could not create {}: {e}", dir.display());
        std::process::exit(1);
    }

    let files = [
        ("config.toml", config::template::generate_config()),
        ("keybindings.toml", config::template::generate_keybindings()),
        ("rules.toml", config::template::generate_rules()),
    ];
    for (name, content) in &files {
        write_if_missing(&dir.join(name), content);
    }

    println!("\nEdit these files to change keybindings and launch rules.");
    println!("A running daemon picks up changes automatically.");
}

/// Writes content to a file only if it doesn't already exist.
fn write_if_missing(path: &Path, content: &str) {
    if path.exists() {
        println!("Already exists: {}", path.display());
        return;
    }

    match std::fs::write(path, content) {
        Ok(()) => println!("Created {}", path.display()),
        Err(e) => eprintln!("Error: could not write {}: {e}", path.display()),
    }
}
