//! Archive extraction for the tar/gzip family
//!
//! Source dumps arrive as `.tar`, `.tar.gz`/`.tgz`, or bare `.gz` files.
//! Anything else (zip, rar, ...) is a typed error the scanner logs and
//! skips.

use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::debug;

use crate::error::{DatasetError, DatasetResult};

enum ArchiveKind {
    Tar,
    TarGz,
    Gz,
}

fn classify(path: &Path) -> Option<ArchiveKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "tar" => Some(ArchiveKind::Tar),
        "tgz" => Some(ArchiveKind::TarGz),
        "gz" => {
            let stem_is_tar = path
                .file_stem()
                .and_then(|s| Path::new(s).extension())
                .is_some_and(|e| e.eq_ignore_ascii_case("tar"));
            if stem_is_tar {
                Some(ArchiveKind::TarGz)
            } else {
                Some(ArchiveKind::Gz)
            }
        }
        _ => None,
    }
}

/// Whether `path` looks like an archive this module can unpack.
pub fn is_supported_archive(path: &Path) -> bool {
    classify(path).is_some()
}

/// Unpack an archive underneath `out_dir`, creating it if needed.
///
/// Tarballs are unpacked entry by entry (entries escaping `out_dir` are
/// rejected by the tar reader). A bare `.gz` decompresses to a single
/// file named after the archive stem. Returns `out_dir`.
///
/// # Errors
///
/// Returns [`DatasetError::UnsupportedArchive`] for unrecognized formats
/// and I/O errors for unreadable or corrupt archives.
pub fn extract_archive(path: &Path, out_dir: &Path) -> DatasetResult<PathBuf> {
    let kind =
        classify(path).ok_or_else(|| DatasetError::UnsupportedArchive(path.to_path_buf()))?;

    std::fs::create_dir_all(out_dir)?;
    match kind {
        ArchiveKind::Tar => {
            Archive::new(File::open(path)?).unpack(out_dir)?;
        }
        ArchiveKind::TarGz => {
            Archive::new(GzDecoder::new(File::open(path)?)).unpack(out_dir)?;
        }
        ArchiveKind::Gz => {
            let stem = path.file_stem().unwrap_or(OsStr::new("unpacked"));
            let target = out_dir.join(stem);
            let mut decoder = GzDecoder::new(File::open(path)?);
            let mut out = File::create(&target)?;
            io::copy(&mut decoder, &mut out)?;
        }
    }

    debug!(archive = %path.display(), out = %out_dir.display(), "unpacked archive");
    Ok(out_dir.to_path_buf())
}
