//! Substring search over trip records

use crate::core::types::TripRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Plate,
    Driver,
}

impl Field {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Field::Plate => "plate",
            Field::Driver => "driver",
        }
    }

    fn value(self, record: &TripRecord) -> &str {
        match self {
            Field::Plate => &record.plate,
            // A missing surname is searchable by its placeholder text
            Field::Driver => record.driver_label(),
        }
    }
}

/// Records whose `field` contains `needle`, ignoring case. No match is an empty
/// result, not an error.
pub(crate) fn filter_records(
    records: &[TripRecord],
    field: Field,
    needle: &str,
) -> Vec<TripRecord> {
    let needle = needle.to_lowercase();
    records
        .iter()
        .filter(|r| field.value(r).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
