//! Core module - trip records, aggregation, search and the session store

mod aggregator;
mod filter;
mod store;
mod types;

pub(crate) use aggregator::{Summary, summarize};
pub(crate) use filter::{Field, filter_records};
pub(crate) use store::{SessionStore, default_store_path};
pub(crate) use types::{DateFilter, TripRecord};
