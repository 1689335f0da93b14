mod format;
mod load;
mod records;
mod summary;
mod top;

pub(crate) use format::{DisplayOptions, NumberFormat};
pub(crate) use load::{FileOutcome, load_report_json, print_load_report};
pub(crate) use records::{print_records_table, records_csv, records_json};
pub(crate) use summary::{lookup_json, print_lookup, print_summary, summary_json};
pub(crate) use top::{print_top, top_json};
