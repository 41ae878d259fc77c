use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use tactadile_core::Rect;

pub fn execute() {
    tactadile_windows::dpi::enable_dpi_awareness();
    let monitors = match tactadile_windows::monitor::enumerate_monitors() {
        Ok(monitors) => monitors,
        Err(e) => {
            eprintln!("Error: could not enumerate monitors: {e}");
            std::process::exit(1);
        }
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Index").set_alignment(CellAlignment::Right),
            Cell::new("Bounds"),
            Cell::new("Work area"),
            Cell::new("DPI").set_alignment(CellAlignment::Right),
            Cell::new("Primary"),
        ]);

    for (index, monitor) in monitors.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index).set_alignment(CellAlignment::Right),
            Cell::new(describe(&monitor.bounds)),
            Cell::new(describe(&monitor.work_area)),
            Cell::new(format!("{}x{}", monitor.dpi_x, monitor.dpi_y))
                .set_alignment(CellAlignment::Right),
            Cell::new(if monitor.primary { "yes" } else { "" }),
        ]);
    }

    println!("{table}");
    println!("\n{} monitor(s) found", monitors.len());
}

pub(super) fn describe(rect: &Rect) -> String {
    format!("({}, {}) {}x{}", rect.x, rect.y, rect.width, rect.height)
}
