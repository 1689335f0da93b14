//! Aggregation over trip records
//!
//! One pass over any slice of records (a whole session, one file, a filtered
//! subset) builds totals plus per-plate and per-driver groups.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::types::TripRecord;

/// Accumulated cost and trips for one group key
#[derive(Debug, Clone)]
pub(crate) struct GroupStats<R: Ord> {
    pub(crate) cost: f64,
    pub(crate) trips: usize,
    /// The other dimension seen in this group: drivers of a plate, plates of a driver
    pub(crate) related: BTreeSet<R>,
    pub(crate) sources: BTreeSet<String>,
}

impl<R: Ord> Default for GroupStats<R> {
    fn default() -> Self {
        Self {
            cost: 0.0,
            trips: 0,
            related: BTreeSet::new(),
            sources: BTreeSet::new(),
        }
    }
}

impl<R: Ord> GroupStats<R> {
    fn add(&mut self, record: &TripRecord, related: R) {
        self.cost += record.cost;
        self.trips += 1;
        self.related.insert(related);
        if !self.sources.contains(&record.source) {
            self.sources.insert(record.source.clone());
        }
    }
}

/// Plate group: related values are driver surnames (`None` = not found)
pub(crate) type PlateStats = GroupStats<Option<String>>;

/// Driver group: related values are plates
pub(crate) type DriverStats = GroupStats<String>;

#[derive(Debug, Clone, Default)]
pub(crate) struct Summary {
    pub(crate) trips: usize,
    pub(crate) total_cost: f64,
    pub(crate) sources: BTreeSet<String>,
    pub(crate) plates: BTreeMap<String, PlateStats>,
    /// A missing surname is grouped as its own "driver"
    pub(crate) drivers: BTreeMap<Option<String>, DriverStats>,
}

impl Summary {
    pub(crate) fn is_empty(&self) -> bool {
        self.trips == 0
    }

    pub(crate) fn distinct_plates(&self) -> usize {
        self.plates.len()
    }

    pub(crate) fn distinct_drivers(&self) -> usize {
        self.drivers.len()
    }

    pub(crate) fn distinct_sources(&self) -> usize {
        self.sources.len()
    }

    pub(crate) fn top_plates(&self, n: usize) -> Vec<(&String, &PlateStats)> {
        top_n(&self.plates, n)
    }

    pub(crate) fn top_drivers(&self, n: usize) -> Vec<(&Option<String>, &DriverStats)> {
        top_n(&self.drivers, n)
    }
}

pub(crate) fn summarize(records: &[TripRecord]) -> Summary {
    let mut summary = Summary::default();

    for record in records {
        summary.trips += 1;
        summary.total_cost += record.cost;
        if !summary.sources.contains(&record.source) {
            summary.sources.insert(record.source.clone());
        }

        summary
            .plates
            .entry(record.plate.clone())
            .or_default()
            .add(record, record.driver.clone());
        summary
            .drivers
            .entry(record.driver.clone())
            .or_default()
            .add(record, record.plate.clone());
    }

    summary
}

/// The `n` groups with the largest summed cost, largest first.
///
/// Equal sums are ordered by ascending key so rankings are reproducible.
/// Fewer than `n` groups returns all of them.
pub(crate) fn top_n<K: Ord, R: Ord>(
    groups: &BTreeMap<K, GroupStats<R>>,
    n: usize,
) -> Vec<(&K, &GroupStats<R>)> {
    let mut ranked: Vec<_> = groups.iter().collect();
    ranked.sort_by(|a, b| b.1.cost.total_cmp(&a.1.cost).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked
}
