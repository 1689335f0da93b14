//! Invoice table extraction
//!
//! workbook bytes → worksheet grid → located table → walked rows → trip records.

mod description;
mod discover;
mod grid;
mod locator;
mod walker;

use std::io::Cursor;
use std::path::Path;

use calamine::{Reader, open_workbook_auto_from_rs};

use crate::core::TripRecord;
use crate::error::ExtractError;
use crate::utils::parse_debug_enabled;

pub(crate) use description::PlateMode;
pub(crate) use discover::find_workbooks;
pub(crate) use grid::Grid;
pub(crate) use walker::WalkStats;

/// Consecutive blank description cells that end a table
pub(crate) const DEFAULT_MAX_EMPTY_ROWS: usize = 5;

/// Hard limit on rows read below the header, for runaway sheets
pub(crate) const DEFAULT_ROW_CAP: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExtractOptions {
    pub(crate) max_empty_rows: usize,
    pub(crate) row_cap: usize,
    pub(crate) plate_mode: PlateMode,
    /// Walk every worksheet instead of only the first one
    pub(crate) all_sheets: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_empty_rows: DEFAULT_MAX_EMPTY_ROWS,
            row_cap: DEFAULT_ROW_CAP,
            plate_mode: PlateMode::default(),
            all_sheets: false,
        }
    }
}

/// Result of extracting one workbook
#[derive(Debug, Default)]
pub(crate) struct Extraction {
    pub(crate) records: Vec<TripRecord>,
    pub(crate) sheets: usize,
    pub(crate) tables: usize,
    pub(crate) stats: WalkStats,
}

impl Extraction {
    fn add_sheet(&mut self, grid: &Grid, source: &str, options: &ExtractOptions) {
        self.sheets += 1;
        let Some(layout) = locator::locate_table(grid) else {
            return;
        };
        self.tables += 1;
        let (records, stats) = walker::walk_rows(grid, &layout, source, options);
        self.records.extend(records);
        self.stats.add(&stats);
    }
}

/// Extract trip records from a single worksheet grid
#[cfg(test)]
pub(crate) fn extract_grid(grid: &Grid, source: &str, options: &ExtractOptions) -> Extraction {
    let mut extraction = Extraction::default();
    extraction.add_sheet(grid, source, options);
    extraction
}

/// Extract trip records from workbook bytes (xlsx, xlsm, xlsb, xls or ods).
///
/// A workbook without an invoice table, or whose rows are all invalid, yields
/// an empty [`Extraction`]; only an unreadable workbook is an error.
pub(crate) fn extract(
    bytes: &[u8],
    source: &str,
    options: &ExtractOptions,
) -> Result<Extraction, ExtractError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|err| ExtractError::Workbook {
            file: source.to_string(),
            source: err,
        })?;
    let mut names = workbook.sheet_names();
    if !options.all_sheets {
        names.truncate(1);
    }

    let mut extraction = Extraction::default();
    for name in names {
        match workbook.worksheet_range(&name) {
            Ok(range) => extraction.add_sheet(&Grid::from(&range), source, options),
            Err(err) => {
                if parse_debug_enabled() {
                    eprintln!("{source}: cannot read sheet '{name}': {err}");
                }
            }
        }
    }

    if parse_debug_enabled() {
        eprintln!(
            "{source}: {} sheets, {} tables, {} rows, {} records, {} skipped",
            extraction.sheets,
            extraction.tables,
            extraction.stats.rows,
            extraction.records.len(),
            extraction.stats.skipped()
        );
    }
    Ok(extraction)
}

/// Read a workbook from disk; records are labelled with the file name
pub(crate) fn extract_file(
    path: &Path,
    options: &ExtractOptions,
) -> Result<Extraction, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    extract(&bytes, &source_label(path), options)
}

pub(crate) fn source_label(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::grid::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn extract_grid_without_table_is_empty() {
        let grid = Grid::new(vec![vec![text("Акт сверки"), text("Сумма")]]);
        let extraction = extract_grid(&grid, "a.xlsx", &ExtractOptions::default());
        assert_eq!(extraction.sheets, 1);
        assert_eq!(extraction.tables, 0);
        assert!(extraction.records.is_empty());
    }

    #[test]
    fn extract_grid_below_preamble() {
        let grid = Grid::new(vec![
            vec![text("Счет на оплату № 7 от 01.02.24")],
            vec![],
            vec![text("№"), text("Товары (работы, услуги)"), text("Кол-во"), text("Сумма")],
            vec![
                CellValue::Number(1.0),
                text("Тверь - Клин, от 02.02.24, 456, Петров П.П."),
                CellValue::Number(1.0),
                text("12 000,00"),
            ],
            vec![CellValue::Empty, text("Итого"), CellValue::Empty, CellValue::Number(12000.0)],
        ]);
        let extraction = extract_grid(&grid, "b.xlsx", &ExtractOptions::default());
        assert_eq!(extraction.tables, 1);
        assert_eq!(extraction.records.len(), 1);
        let r = &extraction.records[0];
        assert_eq!(r.plate, "456");
        assert_eq!(r.cost, 12000.0);
        assert_eq!(r.driver.as_deref(), Some("Петров"));
        assert_eq!(extraction.stats.footer_rows, 1);
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        let result = extract(
            b"definitely not a workbook",
            "junk.xlsx",
            &ExtractOptions::default(),
        );
        assert!(matches!(result, Err(ExtractError::Workbook { .. })));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("junk.xlsx"), "{message}");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = extract_file(
            Path::new("/nonexistent/dir/invoice.xlsx"),
            &ExtractOptions::default(),
        );
        assert!(matches!(result, Err(ExtractError::Read { .. })));
    }

    #[test]
    fn source_label_is_file_name() {
        assert_eq!(source_label(Path::new("/tmp/in/январь.xlsx")), "январь.xlsx");
    }
}
