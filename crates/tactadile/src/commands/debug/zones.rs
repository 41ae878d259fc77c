use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use tactadile_core::Zone;
use tactadile_core::monitor::monitor_at_or_first;

use super::monitors::describe;

#[derive(clap::Args)]
pub struct ZonesArgs {
    /// Monitor index as listed by `debug monitors` (out of range uses the first)
    #[arg(long, default_value_t = 0)]
    pub monitor: i32,
}

pub fn execute(args: &ZonesArgs) {
    tactadile_windows::dpi::enable_dpi_awareness();
    let monitors = tactadile_windows::monitor::enumerate_monitors().unwrap_or_default();
    let Some(monitor) = monitor_at_or_first(&monitors, args.monitor) else {
        eprintln!("Error: no monitors found");
        std::process::exit(1);
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Zone"),
            Cell::new("Name"),
            Cell::new("Rectangle"),
        ]);

    for zone in Zone::ALL {
        table.add_row(vec![
            Cell::new(zone.name()),
            Cell::new(zone.friendly_name()),
            Cell::new(describe(&zone.rect(&monitor.work_area))),
        ]);
    }

    println!("Work area {}", describe(&monitor.work_area));
    println!("{table}");
    println!("\n{} zones", Zone::ALL.len());
}
