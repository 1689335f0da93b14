//! CLI subcommand definitions

use std::path::PathBuf;

use clap::Subcommand;

use crate::extract::PlateMode;

/// Main CLI commands
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Extract trips from invoice spreadsheets into the session
    Load {
        /// Workbook files or directories to search
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Read every worksheet, not only the first
        #[arg(long)]
        all_sheets: bool,
        /// How the plate number is picked from a description
        #[arg(long, value_enum)]
        plate_mode: Option<PlateMode>,
    },
    /// Show overall statistics (default)
    Stats,
    /// Show statistics for plates containing QUERY
    Plate { query: String },
    /// Show statistics for drivers whose surname contains QUERY
    Driver { query: String },
    /// Show top drivers and plates by earnings
    Top {
        /// Number of entries per ranking
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// List trip records
    List {
        /// Only plates containing this text
        #[arg(long)]
        plate: Option<String>,
        /// Only drivers containing this text
        #[arg(long)]
        driver: Option<String>,
    },
    /// Delete all records of the session
    Clear,
}
