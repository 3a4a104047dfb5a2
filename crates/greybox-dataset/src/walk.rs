//! Recursive file discovery
//!
//! Thin iterators over directory trees. Unreadable entries are logged and
//! skipped rather than aborting a whole walk; dataset source dumps are
//! messy and one bad permission bit should not sink a batch run.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// All regular files under `dir`, recursively.
///
/// Directories and symlinks are skipped; symlinks are not followed.
pub fn find_all_files(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir).into_iter().filter_map(|entry| match entry {
        Ok(e) if e.file_type().is_file() => Some(e.into_path()),
        Ok(_) => None,
        Err(err) => {
            warn!(error = %err, "skipping unreadable entry");
            None
        }
    })
}

/// Files under `dir` whose name contains any of `keywords`,
/// case-insensitively.
pub fn find_files_with_keywords(dir: &Path, keywords: &[String]) -> impl Iterator<Item = PathBuf> {
    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    find_all_files(dir).filter(move |path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        lowered.iter().any(|k| name.contains(k.as_str()))
    })
}
