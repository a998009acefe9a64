use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{QcError, Result};

pub const RESULT_EXTENSION: &str = "xqar";

/// Lists the result files directly inside `dir`, sorted by file name.
///
/// The extension match ignores case. A file whose name equals
/// `exclude_file_name` (also ignoring case) is skipped so a previous pooled
/// report in the same directory is not read back in.
///
/// # Errors
/// Returns an error if `dir` is not a readable directory.
pub fn find_result_files(dir: &Path, exclude_file_name: Option<&str>) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(QcError::Pooling(format!(
            "Directory '{}' does not exist",
            dir.display()
        )));
    }

    let excluded = exclude_file_name.map(str::to_lowercase);
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| QcError::Pooling(e.to_string()))?;
        if !entry.file_type().is_file() || !is_result_file(entry.path()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if excluded.as_deref() == Some(name.as_str()) {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

fn is_result_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RESULT_EXTENSION))
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
