//! In-memory cell grid for one worksheet
//!
//! Positions are absolute (row 0 is the first sheet row) regardless of where
//! the used range of the worksheet starts.

use calamine::{Data, Range};

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    /// Booleans, dates, durations and error cells, kept as display text
    Other(String),
}

impl CellValue {
    /// Trimmed text of the cell, `None` when it is blank
    pub(crate) fn text(&self) -> Option<String> {
        let raw = match self {
            CellValue::Empty => return None,
            CellValue::Text(s) | CellValue::Other(s) => s.trim().to_string(),
            CellValue::Number(n) => n.to_string(),
        };
        if raw.is_empty() { None } else { Some(raw) }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            other => CellValue::Other(other.to_string()),
        }
    }
}

static EMPTY: CellValue = CellValue::Empty;

#[derive(Debug, Clone, Default)]
pub(crate) struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub(crate) fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    #[cfg(test)]
    pub(crate) fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell at an absolute position; out-of-range positions read as empty
    pub(crate) fn get(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Iterate over every non-empty cell as (row, col, value)
    pub(crate) fn cells(&self) -> impl Iterator<Item = (usize, usize, &CellValue)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| !matches!(cell, CellValue::Empty))
                .map(move |(c, cell)| (r, c, cell))
        })
    }
}

impl From<&Range<Data>> for Grid {
    fn from(range: &Range<Data>) -> Self {
        let Some((row0, col0)) = range.start() else {
            return Grid::default();
        };
        let (row0, col0) = (row0 as usize, col0 as usize);
        let (height, _) = range.get_size();

        let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row0 + height];
        for (r, c, cell) in range.used_cells() {
            let row = &mut rows[row0 + r];
            let col = col0 + c;
            if row.len() <= col {
                row.resize(col + 1, CellValue::Empty);
            }
            row[col] = CellValue::from(cell);
        }
        Grid { rows }
    }
}
