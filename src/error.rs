use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("No store location available (set --store or a home directory)")]
    NoStorePath,

    #[error("Failed to read session store {}: {source}", path.display())]
    StoreRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Session store {} is unreadable ({reason}); fix or move it aside", path.display())]
    StoreCorrupt { path: PathBuf, reason: String },

    #[error("Failed to write session store {}: {source}", path.display())]
    StoreWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize session store: {0}")]
    StoreFormat(#[from] serde_json::Error),
}

/// Failure to read a workbook at all. Missing tables or bad rows are not errors.
#[derive(Debug, Error)]
pub(crate) enum ExtractError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot open workbook {file}: {source}")]
    Workbook {
        file: String,
        source: calamine::Error,
    },
}
