//! Overall statistics: `stats` command and filtered lookups

use comfy_table::{Cell, Color};
use serde_json::{Value, json};

use crate::consts::DRIVER_NOT_FOUND;
use crate::core::{Field, Summary};
use crate::output::format::{
    DisplayOptions, create_styled_table, format_money, format_number, header_cell, right_cell,
    styled_cell, to_json_string,
};

fn driver_name(driver: &Option<String>) -> &str {
    driver.as_deref().unwrap_or(DRIVER_NOT_FOUND)
}

fn overview_rows(summary: &Summary, options: DisplayOptions) -> Vec<(&'static str, String)> {
    let nf = options.number_format;
    vec![
        ("Files processed", format_number(summary.distinct_sources(), nf)),
        ("Trips", format_number(summary.trips, nf)),
        ("Total earnings", format_money(summary.total_cost, nf)),
        ("Unique plates", format_number(summary.distinct_plates(), nf)),
        ("Unique drivers", format_number(summary.distinct_drivers(), nf)),
    ]
}

pub(crate) fn print_summary(summary: &Summary, session: &str, options: DisplayOptions) {
    let use_color = options.use_color;
    let nf = options.number_format;
    let green = if use_color { Some(Color::Green) } else { None };

    let mut overview = create_styled_table();
    overview.set_header(vec![
        header_cell("Statistic", use_color),
        header_cell("Value", use_color),
    ]);
    for (label, value) in overview_rows(summary, options) {
        let color = if label == "Total earnings" { green } else { None };
        overview.add_row(vec![Cell::new(label), right_cell(&value, color, false)]);
    }

    let mut plates = create_styled_table();
    plates.set_header(vec![
        header_cell("Plate", use_color),
        header_cell("Trips", use_color),
        header_cell("Earnings", use_color),
        header_cell("Drivers", use_color),
        header_cell("Files", use_color),
    ]);
    for (plate, stats) in summary.top_plates(summary.plates.len()) {
        let drivers: Vec<&str> = stats.related.iter().map(driver_name).collect();
        plates.add_row(vec![
            Cell::new(plate),
            right_cell(&format_number(stats.trips, nf), None, false),
            right_cell(&format_money(stats.cost, nf), green, false),
            Cell::new(drivers.join(", ")),
            right_cell(&format_number(stats.sources.len(), nf), None, false),
        ]);
    }

    println!("\n  Trip statistics ({session})\n");
    println!("{overview}");
    println!();
    println!("{plates}");
    println!();
}

fn plates_json(summary: &Summary) -> Vec<Value> {
    summary
        .top_plates(summary.plates.len())
        .into_iter()
        .map(|(plate, stats)| {
            let drivers: Vec<&str> = stats.related.iter().map(driver_name).collect();
            json!({
                "plate": plate,
                "trips": stats.trips,
                "cost": stats.cost,
                "drivers": drivers,
                "sources": stats.sources,
            })
        })
        .collect()
}

fn drivers_json(summary: &Summary) -> Vec<Value> {
    summary
        .top_drivers(summary.drivers.len())
        .into_iter()
        .map(|(driver, stats)| {
            json!({
                "driver": driver_name(driver),
                "trips": stats.trips,
                "cost": stats.cost,
                "plates": stats.related,
                "sources": stats.sources,
            })
        })
        .collect()
}

pub(crate) fn summary_json(summary: &Summary, session: &str) -> String {
    to_json_string(&json!({
        "session": session,
        "files": summary.distinct_sources(),
        "trips": summary.trips,
        "total_cost": summary.total_cost,
        "distinct_plates": summary.distinct_plates(),
        "distinct_drivers": summary.distinct_drivers(),
        "plates": plates_json(summary),
        "drivers": drivers_json(summary),
    }))
}

/// Statistics for the records matching a plate or driver query
pub(crate) fn print_lookup(field: Field, query: &str, summary: &Summary, options: DisplayOptions) {
    let use_color = options.use_color;
    let nf = options.number_format;
    let cyan = if use_color { Some(Color::Cyan) } else { None };
    let green = if use_color { Some(Color::Green) } else { None };

    let (title, related_label, related) = match field {
        Field::Plate => {
            let drivers: Vec<&str> = summary.drivers.keys().map(driver_name).collect();
            ("Plate", "Drivers", drivers.join(", "))
        }
        Field::Driver => {
            let plates: Vec<&str> = summary.plates.keys().map(String::as_str).collect();
            ("Driver", "Plates", plates.join(", "))
        }
    };

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Statistic", use_color),
        header_cell("Value", use_color),
    ]);
    table.add_row(vec![
        Cell::new("Trips"),
        right_cell(&format_number(summary.trips, nf), None, false),
    ]);
    table.add_row(vec![
        Cell::new("Earnings"),
        right_cell(&format_money(summary.total_cost, nf), green, false),
    ]);
    table.add_row(vec![Cell::new(related_label), styled_cell(&related, cyan, false)]);

    println!("\n  {title} \"{query}\"\n");
    println!("{table}");
    println!();
}

pub(crate) fn lookup_json(field: Field, query: &str, summary: &Summary) -> String {
    let mut obj = json!({
        "field": field.label(),
        "query": query,
        "trips": summary.trips,
        "total_cost": summary.total_cost,
    });
    match field {
        Field::Plate => {
            let drivers: Vec<&str> = summary.drivers.keys().map(driver_name).collect();
            obj["drivers"] = json!(drivers);
        }
        Field::Driver => {
            obj["plates"] = json!(summary.plates.keys().collect::<Vec<_>>());
        }
    }
    to_json_string(&obj)
}
