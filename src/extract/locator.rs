//! Table locator
//!
//! Invoices carry no row/column metadata, so the table is found by scanning
//! every cell for header marker text.

use std::collections::BTreeMap;

use super::grid::Grid;

const DESCRIPTION_MARKER: &str = "Товары (работы, услуги)";
const AMOUNT_MARKER: &str = "Сумма";
const AMOUNT_WITH_VAT: &str = "Сумма с НДС";

/// Header cells recognized by exact (case-insensitive) text
const SECONDARY_MARKERS: &[(&str, Marker)] = &[
    ("№", Marker::RowNumber),
    ("№ п/п", Marker::RowNumber),
    ("кол-во", Marker::Quantity),
    ("количество", Marker::Quantity),
    ("ед.", Marker::Unit),
    ("ед. изм.", Marker::Unit),
    ("цена", Marker::Price),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Marker {
    Description,
    Amount,
    RowNumber,
    Quantity,
    Unit,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    pub(crate) row: usize,
    pub(crate) col: usize,
}

/// Marker cells found on a sheet; the first match in row-major order wins
#[derive(Debug, Clone, Default)]
pub(crate) struct Anchors {
    found: BTreeMap<Marker, Position>,
}

impl Anchors {
    pub(crate) fn get(&self, marker: Marker) -> Option<Position> {
        self.found.get(&marker).copied()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.found.len()
    }

    /// Lowest row below which data may start: the deepest anchor row
    fn header_row(&self) -> Option<usize> {
        self.found.values().map(|p| p.row).max()
    }

    /// Resolve into a table layout; `None` unless both mandatory anchors exist
    pub(crate) fn layout(&self) -> Option<TableLayout> {
        let description = self.get(Marker::Description)?;
        let amount = self.get(Marker::Amount)?;
        Some(TableLayout {
            header_row: self.header_row()?,
            description_col: description.col,
            amount_col: amount.col,
        })
    }
}

/// Where the data rows of an invoice table live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TableLayout {
    pub(crate) header_row: usize,
    pub(crate) description_col: usize,
    pub(crate) amount_col: usize,
}

fn classify(text: &str) -> Option<Marker> {
    if text.contains(DESCRIPTION_MARKER) {
        return Some(Marker::Description);
    }
    if text.contains(AMOUNT_MARKER) && text != AMOUNT_WITH_VAT {
        return Some(Marker::Amount);
    }
    let lower = text.to_lowercase();
    SECONDARY_MARKERS
        .iter()
        .find(|(label, _)| lower == *label)
        .map(|(_, marker)| *marker)
}

pub(crate) fn find_anchors(grid: &Grid) -> Anchors {
    let mut anchors = Anchors::default();
    for (row, col, cell) in grid.cells() {
        let Some(text) = cell.text() else {
            continue;
        };
        if let Some(marker) = classify(&text) {
            anchors.found.entry(marker).or_insert(Position { row, col });
        }
    }
    anchors
}

/// Locate the invoice table on a sheet, `None` when it has no table
pub(crate) fn locate_table(grid: &Grid) -> Option<TableLayout> {
    find_anchors(grid).layout()
}
