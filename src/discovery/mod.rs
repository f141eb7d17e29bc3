mod filter;

pub use filter::FileFilter;

use crate::error::DiscoveryError;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Find saved review payloads (`*.json`) under `dir`, sorted by path.
/// Report artifacts written by earlier runs are skipped.
pub fn find_payloads(dir: &Path, filter: &FileFilter) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !dir.is_dir() {
        return Err(DiscoveryError::MissingDir(dir.to_path_buf()));
    }

    let walker = WalkBuilder::new(dir)
        .hidden(true) // skip hidden files
        .git_ignore(true) // respect .gitignore
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if !name.ends_with(".json") || name.ends_with(".review.json") || name == "summary.json" {
            continue;
        }

        let rel_path = path.strip_prefix(dir).unwrap_or(path);
        if !filter.is_match(rel_path) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
