use tactadile_core::config::{self, rules::process_name_from_path};
use tactadile_core::placement::find_rule;

#[derive(clap::Args)]
pub struct MatchArgs {
    /// Full path of the executable, e.g. C:\Windows\System32\notepad.exe
    pub exe_path: String,
}

pub fn execute(args: &MatchArgs) {
    let rules = config::load_rules();
    let process = process_name_from_path(&args.exe_path);

    println!("Process name: {process}");
    match find_rule(&rules, &args.exe_path) {
        Some(rule) => {
            println!("Matched rule: {}", rule.label());
            println!("  zone:              {}", rule.zone);
            println!("  monitor_index:     {}", rule.monitor_index);
            println!("  delay:             {}ms", rule.delay().as_millis());
            println!("  first_window_only: {}", rule.first_window_only);
        }
        None => println!("No launch rule matches {}", args.exe_path),
    }
}
