//! Orphan detection for result log directories.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// List files under `log_dir` that no tracked reservation accounts for.
///
/// Useful as a teardown diagnostic: anything a test wrote next to its
/// reserved artifacts without going through the manager shows up here.
/// Directories themselves are not reported, and a missing `log_dir`
/// yields an empty list.
pub fn orphans(log_dir: &Path, tracked: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    if !log_dir.exists() {
        return Ok(Vec::new());
    }

    let tracked: HashSet<&Path> = tracked.iter().map(PathBuf::as_path).collect();
    let mut found = Vec::new();
    for entry in WalkDir::new(log_dir) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if !tracked.contains(path.as_path()) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}
