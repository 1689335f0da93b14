//! Per-file report of a `load` run

use comfy_table::{Cell, Color};
use serde_json::json;

use crate::output::format::{
    DisplayOptions, create_styled_table, format_number, header_cell, right_cell, styled_cell,
    to_json_string,
};

/// What happened to one input file
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FileOutcome {
    pub(crate) source: String,
    pub(crate) added: usize,
    pub(crate) skipped: usize,
    pub(crate) error: Option<String>,
}

impl FileOutcome {
    fn status(&self) -> &str {
        match (&self.error, self.added) {
            (Some(_), _) => "error",
            (None, 0) => "no data",
            (None, _) => "ok",
        }
    }
}

pub(crate) fn print_load_report(outcomes: &[FileOutcome], total: usize, options: DisplayOptions) {
    let use_color = options.use_color;
    let nf = options.number_format;

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("File", use_color),
        header_cell("Added", use_color),
        header_cell("Skipped rows", use_color),
        header_cell("Status", use_color),
    ]);
    for outcome in outcomes {
        let color = match (use_color, outcome.status()) {
            (false, _) => None,
            (true, "ok") => Some(Color::Green),
            (true, "no data") => Some(Color::Yellow),
            (true, _) => Some(Color::Red),
        };
        table.add_row(vec![
            Cell::new(&outcome.source),
            right_cell(&format_number(outcome.added, nf), None, false),
            right_cell(&format_number(outcome.skipped, nf), None, false),
            styled_cell(outcome.status(), color, false),
        ]);
    }
    println!("{table}");

    let added: usize = outcomes.iter().map(|o| o.added).sum();
    println!(
        "\n  Added {} trips, session now holds {}\n",
        format_number(added, nf),
        format_number(total, nf)
    );
}

pub(crate) fn load_report_json(outcomes: &[FileOutcome], total: usize) -> String {
    let files: Vec<_> = outcomes
        .iter()
        .map(|o| {
            json!({
                "source": o.source,
                "added": o.added,
                "skipped": o.skipped,
                "error": o.error,
            })
        })
        .collect();
    to_json_string(&json!({
        "files": files,
        "added": outcomes.iter().map(|o| o.added).sum::<usize>(),
        "total": total,
    }))
}
