//! Media file scanning with archive recursion
//!
//! `MediaScanner` walks a directory tree collecting files whose extension
//! is on its whitelist, optionally unpacking archives it encounters and
//! descending into them up to a depth limit.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::archive::{extract_archive, is_supported_archive};
use crate::walk::find_all_files;

/// Image formats collected by default
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "svg", "webp", "tiff", "tif", "bmp", "psd",
];
/// Video formats collected by default
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "gif"];
/// Font formats collected by default (icon fonts)
pub const FONT_EXTENSIONS: &[&str] = &["otf"];

/// Recursive media file collector
#[derive(Debug, Clone)]
pub struct MediaScanner {
    extensions: Vec<String>,
    extract_archives: bool,
    staging_dir: PathBuf,
    unpack_counter: u32,
}

impl Default for MediaScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaScanner {
    /// Scanner collecting images, videos, and fonts, unpacking archives
    /// into the system temp directory.
    pub fn new() -> Self {
        let extensions = IMAGE_EXTENSIONS
            .iter()
            .chain(VIDEO_EXTENSIONS)
            .chain(FONT_EXTENSIONS)
            .map(|e| e.to_string())
            .collect();
        Self {
            extensions,
            extract_archives: true,
            staging_dir: std::env::temp_dir().join("greybox-unpack"),
            unpack_counter: 0,
        }
    }

    /// Replace the extension whitelist (lowercase, without dots).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable descending into archives.
    pub fn with_archive_extraction(mut self, enabled: bool) -> Self {
        self.extract_archives = enabled;
        self
    }

    /// Directory where archives are unpacked.
    pub fn with_staging_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.staging_dir = dir.into();
        self
    }

    /// Collect media files under `dir`.
    ///
    /// `depth` limits archive recursion: 0 never unpacks, 1 unpacks
    /// archives found in the tree but not archives found inside them, and
    /// so on. Per-entry failures (unreadable files, corrupt archives) are
    /// logged and skipped, so scanning itself never fails.
    pub fn scan(&mut self, dir: &Path, depth: u32) -> Vec<PathBuf> {
        let mut found = Vec::new();
        self.scan_into(dir, depth, &mut found);
        found
    }

    fn scan_into(&mut self, dir: &Path, depth: u32, found: &mut Vec<PathBuf>) {
        for file in find_all_files(dir) {
            if self.matches_extension(&file) {
                found.push(file);
            } else if self.extract_archives && is_supported_archive(&file) {
                if depth == 0 {
                    warn!(archive = %file.display(), "archive depth limit reached, skipping");
                    continue;
                }
                let dest = self.next_staging_dir(&file);
                match extract_archive(&file, &dest) {
                    Ok(unpacked) => self.scan_into(&unpacked, depth - 1, found),
                    Err(err) => {
                        warn!(archive = %file.display(), error = %err, "failed to unpack, skipping");
                    }
                }
            }
        }
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|e| *e == ext))
    }

    fn next_staging_dir(&mut self, archive: &Path) -> PathBuf {
        let stem = archive
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "archive".to_string());
        self.unpack_counter += 1;
        self.staging_dir
            .join(format!("{}-{}", stem, self.unpack_counter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    fn make_tar(tar_path: &Path, inner_name: &str, payload: &Path) {
        let mut builder = tar::Builder::new(File::create(tar_path).unwrap());
        builder.append_path_with_name(payload, inner_name).unwrap();
        builder.finish().unwrap();
    }

    #[test]
    fn test_collects_whitelisted_extensions_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.png"));
        touch(&dir.path().join("b.TXT"));
        touch(&dir.path().join("c.Mp4"));
        touch(&dir.path().join("d.otf"));

        let mut scanner = MediaScanner::new().with_archive_extraction(false);
        let mut found = scanner.scan(dir.path(), 0);
        found.sort();
        assert_eq!(
            found,
            vec![
                dir.path().join("a.png"),
                dir.path().join("c.Mp4"),
                dir.path().join("d.otf"),
            ]
        );
    }

    #[test]
    fn test_descends_into_archives_up_to_depth() {
        let dir = tempfile::tempdir().unwrap();
        let payload = dir.path().join("payload.jpg");
        touch(&payload);

        let tree = dir.path().join("tree");
        fs::create_dir_all(&tree).unwrap();
        touch(&tree.join("top.png"));
        make_tar(&tree.join("bundle.tar"), "inner.jpg", &payload);

        let staging = dir.path().join("staging");
        let mut scanner = MediaScanner::new().with_staging_dir(&staging);

        let found = scanner.scan(&tree, 1);
        assert_eq!(found.len(), 2);
        assert!(found.contains(&tree.join("top.png")));
        assert!(found.iter().any(|p| p.ends_with("inner.jpg")));

        // Depth 0 ignores the archive entirely
        let mut scanner = MediaScanner::new().with_staging_dir(&staging);
        let found = scanner.scan(&tree, 0);
        assert_eq!(found, vec![tree.join("top.png")]);
    }

    #[test]
    fn test_custom_extension_whitelist() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.png"));
        touch(&dir.path().join("b.svg"));

        let mut scanner = MediaScanner::new()
            .with_extensions(["svg"])
            .with_archive_extraction(false);
        let found = scanner.scan(dir.path(), 0);
        assert_eq!(found, vec![dir.path().join("b.svg")]);
    }
}
