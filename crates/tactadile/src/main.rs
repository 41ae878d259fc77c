mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tactadile",
    version,
    about = "Keyboard-driven window dragging, snapping and launch placement"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration files
    Init,
    /// Run the daemon in the foreground (Ctrl+C to stop)
    Run,
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
}

#[derive(Subcommand)]
enum DebugCommands {
    /// List monitors in the order launch rules index them
    Monitors,
    /// Show zone rectangles for a monitor
    Zones(commands::debug::zones::ZonesArgs),
    /// Show which launch rule would apply to an executable
    Match(commands::debug::rule_match::MatchArgs),
    /// Build a launch rule from the window under the cursor
    Capture(commands::debug::capture::CaptureArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Run => commands::run::execute(),
        Commands::Debug { command } => match command {
            DebugCommands::Monitors => commands::debug::monitors::execute(),
            DebugCommands::Zones(args) => commands::debug::zones::execute(&args),
            DebugCommands::Match(args) => commands::debug::rule_match::execute(&args),
            DebugCommands::Capture(args) => commands::debug::capture::execute(&args),
        },
    }
}
