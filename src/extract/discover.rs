//! Input discovery: expand directories into the workbooks they contain

use std::path::{Path, PathBuf};

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

fn find_in_dir(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for ext in WORKBOOK_EXTENSIONS {
        if let Ok(entries) = glob::glob(&format!("{}/**/*.{ext}", dir.display())) {
            files.extend(entries.flatten());
        }
    }
    files.sort();
    files
}

/// Files are kept as given (even with an unknown extension); directories are
/// searched recursively for spreadsheet files. Order follows the arguments.
pub(crate) fn find_workbooks(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(find_in_dir(path));
        } else {
            files.push(path.clone());
        }
    }
    files
}
