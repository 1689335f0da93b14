//! Row walker
//!
//! Reads data rows below the located header until a run of blank description
//! cells (or the hard row cap) marks the end of the table.

use crate::consts::PLATE_UNKNOWN;
use crate::core::TripRecord;
use crate::utils::parse_debug_enabled;

use super::ExtractOptions;
use super::description::parse_description;
use super::grid::{CellValue, Grid};
use super::locator::TableLayout;

/// Description text of footer and subtotal rows
const FOOTER_MARKERS: &[&str] = &["итого", "всего", "итог", "сумма"];

/// Per-table row counters, mostly useful with --debug
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WalkStats {
    pub(crate) rows: usize,
    pub(crate) footer_rows: usize,
    pub(crate) bad_amounts: usize,
    pub(crate) missing_plate: usize,
    pub(crate) non_positive: usize,
}

impl WalkStats {
    pub(crate) fn add(&mut self, other: &WalkStats) {
        self.rows += other.rows;
        self.footer_rows += other.footer_rows;
        self.bad_amounts += other.bad_amounts;
        self.missing_plate += other.missing_plate;
        self.non_positive += other.non_positive;
    }

    pub(crate) fn skipped(&self) -> usize {
        self.footer_rows + self.bad_amounts + self.missing_plate + self.non_positive
    }
}

fn is_footer(description: &str) -> bool {
    let lower = description.to_lowercase();
    FOOTER_MARKERS.iter().any(|m| lower.contains(m))
}

/// Parse an amount written as text: spaces dropped, decimal comma accepted.
/// Anything with letters in it ("н/д", "1e5") is not an amount.
pub(crate) fn parse_amount_text(text: &str) -> Option<f64> {
    let normalized: String = text
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if normalized.chars().any(char::is_alphabetic) {
        return None;
    }
    normalized.parse::<f64>().ok()
}

fn parse_amount(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => parse_amount_text(s),
        CellValue::Empty | CellValue::Other(_) => None,
    }
}

pub(crate) fn walk_rows(
    grid: &Grid,
    layout: &TableLayout,
    source: &str,
    options: &ExtractOptions,
) -> (Vec<TripRecord>, WalkStats) {
    let mut records = Vec::new();
    let mut stats = WalkStats::default();
    let last_row = layout.header_row + options.row_cap;
    let mut empty_run = 0usize;
    let mut row = layout.header_row + 1;
    let debug = parse_debug_enabled();

    while row <= last_row {
        let current = row;
        row += 1;

        let Some(description) = grid.get(current, layout.description_col).text() else {
            empty_run += 1;
            if empty_run >= options.max_empty_rows {
                break;
            }
            continue;
        };
        empty_run = 0;
        stats.rows += 1;

        if is_footer(&description) {
            stats.footer_rows += 1;
            continue;
        }

        let Some(cost) = parse_amount(grid.get(current, layout.amount_col)) else {
            stats.bad_amounts += 1;
            if debug {
                eprintln!("{source}: row {}: amount is not a number, skipped", current + 1);
            }
            continue;
        };

        let parsed = parse_description(&description, options.plate_mode);
        let Some(plate) = parsed.plate else {
            stats.missing_plate += 1;
            if debug {
                eprintln!("{source}: row {}: plate {PLATE_UNKNOWN}, skipped", current + 1);
            }
            continue;
        };
        if !(cost > 0.0 && cost.is_finite()) {
            stats.non_positive += 1;
            continue;
        }

        records.push(TripRecord {
            date: parsed.date,
            route: parsed.route,
            cost,
            plate,
            driver: parsed.driver,
            source: source.to_string(),
        });
    }

    (records, stats)
}
