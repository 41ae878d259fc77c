use std::thread;
use std::time::Duration;

use tactadile_core::config::LaunchRule;
use tactadile_core::config::rules::rules_to_toml;
use tactadile_core::monitor::index_of;
use tactadile_core::target::TargetResolver;
use tactadile_core::{Desktop, WindowResult};
use tactadile_windows::{Win32Desktop, process};

use super::monitors::describe;

#[derive(clap::Args)]
pub struct CaptureArgs {
    /// Seconds to wait before reading the window under the cursor
    #[arg(long, default_value_t = 3)]
    pub delay: u64,
}

pub fn execute(args: &CaptureArgs) {
    tactadile_windows::dpi::enable_dpi_awareness();

    if args.delay > 0 {
        println!("Hover over the window to capture ({}s)...", args.delay);
        thread::sleep(Duration::from_secs(args.delay));
    }

    if let Err(e) = capture(&Win32Desktop::new()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn capture(desktop: &Win32Desktop) -> WindowResult<()> {
    let hwnd = TargetResolver::new()
        .resolve(desktop)?
        .ok_or("no window under the cursor")?;
    let exe_path = process::exe_path_for_window(hwnd)
        .ok_or_else(|| format!("could not read the executable of window 0x{hwnd:X}"))?;

    let monitors = desktop.monitors()?;
    let current = desktop.monitor_for_window(hwnd)?;
    let monitor_index = index_of(&monitors, current.id).unwrap_or(0);
    let window = desktop.window_rect(hwnd)?;

    let rule = LaunchRule::capture(&exe_path, monitor_index as i32, &window, &current.work_area);

    println!("Window:        0x{hwnd:X} {}", describe(&window));
    println!("Executable:    {exe_path}");
    println!("Process name:  {}", rule.process_name);
    println!("Monitor index: {monitor_index}");
    println!("Closest zone:  {}", rule.zone);
    println!("\nAdd this to rules.toml:\n");
    print!("{}", rules_to_toml(std::slice::from_ref(&rule))?);
    Ok(())
}
