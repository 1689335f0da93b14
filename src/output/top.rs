//! Top-N earnings rankings

use comfy_table::{Cell, Color};
use serde_json::{Value, json};

use crate::consts::DRIVER_NOT_FOUND;
use crate::core::Summary;
use crate::output::format::{
    DisplayOptions, create_styled_table, format_money, format_number, header_cell, right_cell,
    to_json_string,
};

/// One ranking row: group name, trips, summed cost
type RankRow = (String, usize, f64);

/// Driver and plate rankings, already ordered
fn ranking_rows(summary: &Summary, n: usize) -> (Vec<RankRow>, Vec<RankRow>) {
    let drivers = summary
        .top_drivers(n)
        .into_iter()
        .map(|(driver, stats)| {
            let name = driver.as_deref().unwrap_or(DRIVER_NOT_FOUND).to_string();
            (name, stats.trips, stats.cost)
        })
        .collect();
    let plates = summary
        .top_plates(n)
        .into_iter()
        .map(|(plate, stats)| (plate.clone(), stats.trips, stats.cost))
        .collect();
    (drivers, plates)
}

fn print_ranking(title: &str, key_label: &str, rows: &[RankRow], options: DisplayOptions) {
    let use_color = options.use_color;
    let nf = options.number_format;
    let green = if use_color { Some(Color::Green) } else { None };

    println!("\n  {title}\n");
    if rows.is_empty() {
        println!("  No data");
        return;
    }

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("#", use_color),
        header_cell(key_label, use_color),
        header_cell("Trips", use_color),
        header_cell("Earnings", use_color),
    ]);
    for (rank, (name, trips, cost)) in rows.iter().enumerate() {
        table.add_row(vec![
            right_cell(&(rank + 1).to_string(), None, false),
            Cell::new(name),
            right_cell(&format_number(*trips, nf), None, false),
            right_cell(&format_money(*cost, nf), green, false),
        ]);
    }
    println!("{table}");
}

pub(crate) fn print_top(summary: &Summary, n: usize, options: DisplayOptions) {
    let (drivers, plates) = ranking_rows(summary, n);
    print_ranking(&format!("Top {n} drivers by earnings"), "Driver", &drivers, options);
    print_ranking(&format!("Top {n} plates by earnings"), "Plate", &plates, options);
    println!();
}

fn ranking_json(key: &str, rows: &[RankRow]) -> Vec<Value> {
    rows.iter()
        .enumerate()
        .map(|(i, (name, trips, cost))| {
            let mut obj = json!({ "rank": i + 1, "trips": trips, "cost": cost });
            obj[key] = json!(name);
            obj
        })
        .collect()
}

pub(crate) fn top_json(summary: &Summary, n: usize) -> String {
    let (drivers, plates) = ranking_rows(summary, n);
    to_json_string(&json!({
        "drivers": ranking_json("driver", &drivers),
        "plates": ranking_json("plate", &plates),
    }))
}
