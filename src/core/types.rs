//! Core data types
//!
//! A trip record is one invoice row that survived extraction. Missing date and
//! driver are `None` here; the human-readable placeholders are only produced
//! when a record is displayed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::consts::{DATE_NOT_FOUND, DRIVER_NOT_FOUND, INVOICE_DATE_FORMAT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TripRecord {
    /// Date span from the description, e.g. "01.02.24"
    pub(crate) date: Option<String>,
    pub(crate) route: String,
    /// Always positive
    pub(crate) cost: f64,
    /// Three-digit plate code
    pub(crate) plate: String,
    /// Driver surname
    pub(crate) driver: Option<String>,
    /// Originating file name
    pub(crate) source: String,
}

impl TripRecord {
    pub(crate) fn date_label(&self) -> &str {
        self.date.as_deref().unwrap_or(DATE_NOT_FOUND)
    }

    pub(crate) fn driver_label(&self) -> &str {
        self.driver.as_deref().unwrap_or(DRIVER_NOT_FOUND)
    }

    pub(crate) fn trip_date(&self) -> Option<NaiveDate> {
        let date = self.date.as_deref()?;
        NaiveDate::parse_from_str(date, INVOICE_DATE_FORMAT).ok()
    }
}

/// Date filter for queries
#[derive(Debug, Clone, Default)]
pub(crate) struct DateFilter {
    pub(crate) since: Option<NaiveDate>,
    pub(crate) until: Option<NaiveDate>,
}

impl DateFilter {
    pub(crate) fn new(since: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        Self { since, until }
    }

    pub(crate) fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        if let Some(s) = self.since
            && date < s
        {
            return false;
        }
        if let Some(u) = self.until
            && date > u
        {
            return false;
        }
        true
    }

    /// Records inside the range. With any bound set, undated records are dropped.
    pub(crate) fn apply(&self, records: &[TripRecord]) -> Vec<TripRecord> {
        if self.is_unbounded() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|r| r.trip_date().is_some_and(|d| self.contains(d)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn record(plate: &str, cost: f64, driver: Option<&str>, source: &str) -> TripRecord {
    TripRecord {
        date: None,
        route: "Москва - Тверь".to_string(),
        cost,
        plate: plate.to_string(),
        driver: driver.map(str::to_string),
        source: source.to_string(),
    }
}
