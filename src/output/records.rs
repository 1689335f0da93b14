//! Record listings: table, JSON and CSV

use std::fmt::Write;

use comfy_table::{Cell, Color};
use serde_json::json;

use crate::core::TripRecord;
use crate::output::format::{
    DisplayOptions, create_styled_table, format_money, format_number, header_cell, right_cell,
    styled_cell, to_json_string,
};

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

pub(crate) fn print_records_table(records: &[TripRecord], options: DisplayOptions) {
    let use_color = options.use_color;
    let nf = options.number_format;
    let green = if use_color { Some(Color::Green) } else { None };
    let cyan = if use_color { Some(Color::Cyan) } else { None };

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Date", use_color),
        header_cell("Route", use_color),
        header_cell("Plate", use_color),
        header_cell("Driver", use_color),
        header_cell("Cost", use_color),
        header_cell("Source", use_color),
    ]);

    let mut total = 0.0;
    for r in records {
        total += r.cost;
        table.add_row(vec![
            Cell::new(r.date_label()),
            Cell::new(&r.route),
            Cell::new(&r.plate),
            Cell::new(r.driver_label()),
            right_cell(&format_money(r.cost, nf), green, false),
            Cell::new(&r.source),
        ]);
    }
    table.add_row(vec![
        styled_cell("TOTAL", cyan, true),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        right_cell(&format_money(total, nf), green, true),
        Cell::new(""),
    ]);

    println!("{table}");
    println!("\n  {} trips\n", format_number(records.len(), nf));
}

/// Records with placeholders for missing date and driver, as reports show them
pub(crate) fn records_json(records: &[TripRecord]) -> String {
    let rows: Vec<_> = records
        .iter()
        .map(|r| {
            json!({
                "date": r.date_label(),
                "route": r.route,
                "cost": r.cost,
                "plate": r.plate,
                "driver": r.driver_label(),
                "source": r.source,
            })
        })
        .collect();
    to_json_string(&json!(rows))
}

pub(crate) fn records_csv(records: &[TripRecord]) -> String {
    let mut out = String::from("date,route,cost,plate,driver,source\n");
    for r in records {
        let _ = writeln!(
            out,
            "{},{},{:.2},{},{},{}",
            csv_escape(r.date_label()),
            csv_escape(&r.route),
            r.cost,
            csv_escape(&r.plate),
            csv_escape(r.driver_label()),
            csv_escape(&r.source),
        );
    }
    out
}
