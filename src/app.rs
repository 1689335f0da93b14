use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use crate::cli::{Cli, Commands, resolve_top_n};
use crate::config::Config;
use crate::core::{DateFilter, Field, SessionStore, TripRecord, filter_records, summarize};
use crate::error::AppError;
use crate::extract::{ExtractOptions, PlateMode, extract_file, find_workbooks, source_label};
use crate::output::{
    DisplayOptions, FileOutcome, load_report_json, lookup_json, print_load_report, print_lookup,
    print_records_table, print_summary, print_top, records_csv, records_json, summary_json,
    top_json,
};

const NO_DATA: &str = "No trip data loaded.";

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) config: &'a Config,
    pub(crate) store_path: PathBuf,
    pub(crate) filter: DateFilter,
    pub(crate) display: DisplayOptions,
}

impl CommandContext<'_> {
    fn session(&self) -> &str {
        self.cli.session()
    }

    fn quiet(&self) -> bool {
        self.cli.is_quiet()
    }

    fn load_store(&self) -> Result<SessionStore, AppError> {
        SessionStore::load(&self.store_path)
    }

    /// Session records narrowed by --since/--until
    fn session_records(&self, store: &SessionStore) -> Vec<TripRecord> {
        self.filter.apply(store.records(self.session()))
    }
}

fn extract_all(
    files: &[PathBuf],
    options: &ExtractOptions,
) -> Vec<(FileOutcome, Vec<TripRecord>)> {
    files
        .par_iter()
        .map(|path| extract_one(path, options))
        .collect()
}

fn extract_one(path: &Path, options: &ExtractOptions) -> (FileOutcome, Vec<TripRecord>) {
    let source = source_label(path);
    match extract_file(path, options) {
        Ok(extraction) => {
            let outcome = FileOutcome {
                source,
                added: extraction.records.len(),
                skipped: extraction.stats.skipped(),
                error: None,
            };
            (outcome, extraction.records)
        }
        Err(e) => {
            let outcome = FileOutcome {
                source,
                added: 0,
                skipped: 0,
                error: Some(e.to_string()),
            };
            (outcome, Vec::new())
        }
    }
}

fn handle_load(
    ctx: &CommandContext<'_>,
    paths: &[PathBuf],
    all_sheets: bool,
    plate_mode: Option<PlateMode>,
) -> Result<(), AppError> {
    let mut options = ctx.config.extract_options();
    options.all_sheets |= all_sheets;
    if let Some(mode) = plate_mode {
        options.plate_mode = mode;
    }

    let quiet = ctx.quiet();
    let start = Instant::now();
    let files = find_workbooks(paths);
    if !quiet {
        eprintln!("Found {} workbook files", files.len());
    }
    if files.is_empty() {
        println!("No workbook files found.");
        return Ok(());
    }

    // An unreadable store fails the command before any extraction
    let mut store = ctx.load_store()?;

    // Extract in parallel, append in input order
    let results = extract_all(&files, &options);
    let mut outcomes = Vec::with_capacity(results.len());
    for (outcome, records) in results {
        if !quiet {
            match &outcome.error {
                Some(err) => eprintln!("Warning: {err}"),
                None if outcome.added == 0 => {
                    eprintln!("Warning: could not extract trip data from {}", outcome.source)
                }
                None => {}
            }
        }
        store.append(ctx.session(), records);
        outcomes.push(outcome);
    }
    let total = store.records(ctx.session()).len();

    if outcomes.iter().any(|o| o.added > 0) {
        store.save(&ctx.store_path)?;
    }
    if !quiet {
        eprintln!(
            "Processed {} files in {:.0}ms",
            files.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    if ctx.cli.json {
        println!("{}", load_report_json(&outcomes, total));
    } else {
        print_load_report(&outcomes, total, ctx.display);
    }
    Ok(())
}

fn handle_stats(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let store = ctx.load_store()?;
    let summary = summarize(&ctx.session_records(&store));
    if summary.is_empty() && !ctx.cli.json {
        println!("{NO_DATA}");
        return Ok(());
    }
    if ctx.cli.json {
        println!("{}", summary_json(&summary, ctx.session()));
    } else {
        print_summary(&summary, ctx.session(), ctx.display);
    }
    Ok(())
}

fn handle_lookup(ctx: &CommandContext<'_>, field: Field, query: &str) -> Result<(), AppError> {
    let store = ctx.load_store()?;
    let records = ctx.session_records(&store);
    if records.is_empty() && !ctx.cli.json {
        println!("{NO_DATA}");
        return Ok(());
    }
    let summary = summarize(&filter_records(&records, field, query));
    if ctx.cli.json {
        println!("{}", lookup_json(field, query, &summary));
    } else if summary.is_empty() {
        println!("No trips found for {} \"{}\".", field.label(), query);
    } else {
        print_lookup(field, query, &summary, ctx.display);
    }
    Ok(())
}

fn handle_top(ctx: &CommandContext<'_>, count: Option<usize>) -> Result<(), AppError> {
    let n = resolve_top_n(count, ctx.config);
    let store = ctx.load_store()?;
    let summary = summarize(&ctx.session_records(&store));
    if ctx.cli.json {
        println!("{}", top_json(&summary, n));
    } else if summary.is_empty() {
        println!("{NO_DATA}");
    } else {
        print_top(&summary, n, ctx.display);
    }
    Ok(())
}

fn handle_list(
    ctx: &CommandContext<'_>,
    plate: Option<&str>,
    driver: Option<&str>,
) -> Result<(), AppError> {
    let store = ctx.load_store()?;
    let mut records = ctx.session_records(&store);
    if let Some(q) = plate {
        records = filter_records(&records, Field::Plate, q);
    }
    if let Some(q) = driver {
        records = filter_records(&records, Field::Driver, q);
    }

    if ctx.cli.json {
        println!("{}", records_json(&records));
    } else if ctx.cli.csv {
        print!("{}", records_csv(&records));
    } else if records.is_empty() {
        println!("{NO_DATA}");
    } else {
        print_records_table(&records, ctx.display);
    }
    Ok(())
}

fn handle_clear(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let mut store = ctx.load_store()?;
    let removed = store.clear(ctx.session());
    if removed > 0 {
        store.save(&ctx.store_path)?;
    }
    if ctx.cli.json {
        println!(
            "{}",
            serde_json::json!({ "session": ctx.session(), "removed": removed })
        );
    } else if removed > 0 {
        println!("Cleared {} trips from session \"{}\".", removed, ctx.session());
    } else {
        println!("Session \"{}\" had no data.", ctx.session());
    }
    Ok(())
}

pub(crate) fn run(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    match &ctx.cli.command {
        Some(Commands::Load {
            paths,
            all_sheets,
            plate_mode,
        }) => handle_load(ctx, paths, *all_sheets, *plate_mode),
        Some(Commands::Stats) | None => handle_stats(ctx),
        Some(Commands::Plate { query }) => handle_lookup(ctx, Field::Plate, query),
        Some(Commands::Driver { query }) => handle_lookup(ctx, Field::Driver, query),
        Some(Commands::Top { count }) => handle_top(ctx, *count),
        Some(Commands::List { plate, driver }) => {
            handle_list(ctx, plate.as_deref(), driver.as_deref())
        }
        Some(Commands::Clear) => handle_clear(ctx),
    }
}
