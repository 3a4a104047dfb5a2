//! Batch pipelines over directory trees
//!
//! The two dataset-building passes: normalize a tree of images to PNG,
//! and slice sprite sheets into individual icon files. Per-file failures
//! are logged and counted, never fatal; a thousand-file run should not
//! die on one corrupt image.

use std::path::{Path, PathBuf};

use greybox_core::Raster;
use greybox_extract::{ExtractOptions, extract_regions};
use greybox_io::{convert_to_png, read_raster, save_regions};
use tracing::{info, warn};

use crate::error::DatasetResult;
use crate::pool::run_parallel;
use crate::walk::find_all_files;

/// Outcome counts of one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Inputs processed successfully
    pub succeeded: usize,
    /// Inputs that failed and were skipped
    pub failed: usize,
    /// Output files written
    pub outputs: usize,
}

impl BatchReport {
    fn absorb(&mut self, other: BatchReport) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.outputs += other.outputs;
    }
}

/// Re-encode every file under `input_dir` as PNG into `out_dir`.
///
/// Output files are named after the input stem; name collisions get a
/// `-N` suffix rather than overwriting. Undecodable files count as
/// failures and the run continues.
pub fn convert_tree(input_dir: &Path, out_dir: &Path, workers: usize) -> DatasetResult<BatchReport> {
    std::fs::create_dir_all(out_dir)?;
    let files: Vec<PathBuf> = find_all_files(input_dir).collect();

    let results = run_parallel(files, workers, |file| {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let target = out_dir.join(format!("{stem}.png"));
        match convert_to_png(&file, Some(&target)) {
            Ok(_) => BatchReport {
                succeeded: 1,
                outputs: 1,
                ..Default::default()
            },
            Err(err) => {
                warn!(input = %file.display(), error = %err, "failed to convert");
                BatchReport {
                    failed: 1,
                    ..Default::default()
                }
            }
        }
    });

    let mut report = BatchReport::default();
    for r in results {
        report.absorb(r);
    }
    info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "png conversion pass finished"
    );
    Ok(report)
}

/// Color-key options keyed to the image's most frequent color.
///
/// The usual preparation step for sheets with an unknown solid
/// background: sample it, then key it out.
pub fn auto_color_key(raster: &Raster) -> ExtractOptions {
    let color = raster.most_common_color().unwrap_or([255, 255, 255, 255]);
    ExtractOptions::color_key([color[0], color[1], color[2]])
}

/// Slice each sheet into icon files under `out_dir`.
///
/// `options_for` decides the extraction settings per sheet, so callers
/// can pass fixed options or sample the background per image (see
/// [`auto_color_key`]). Regions land as `SHEETSTEM_1.png`,
/// `SHEETSTEM_2.png`, ... Failed sheets are logged, counted, and skipped.
pub fn slice_sheets<F>(
    sheets: Vec<PathBuf>,
    out_dir: &Path,
    workers: usize,
    options_for: F,
) -> DatasetResult<BatchReport>
where
    F: Fn(&Raster) -> ExtractOptions + Sync,
{
    std::fs::create_dir_all(out_dir)?;

    let results = run_parallel(sheets, workers, |sheet| {
        match slice_one(&sheet, out_dir, &options_for) {
            Ok(written) => BatchReport {
                succeeded: 1,
                outputs: written,
                ..Default::default()
            },
            Err(err) => {
                warn!(sheet = %sheet.display(), error = %err, "failed to slice");
                BatchReport {
                    failed: 1,
                    ..Default::default()
                }
            }
        }
    });

    let mut report = BatchReport::default();
    for r in results {
        report.absorb(r);
    }
    info!(
        sheets = report.succeeded,
        regions = report.outputs,
        failed = report.failed,
        "sheet slicing pass finished"
    );
    Ok(report)
}

fn slice_one<F>(sheet: &Path, out_dir: &Path, options_for: &F) -> DatasetResult<usize>
where
    F: Fn(&Raster) -> ExtractOptions,
{
    let raster = read_raster(sheet)?;
    let options = options_for(&raster);
    let regions = extract_regions(&raster, &options)?;
    let prefix = sheet
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "region".to_string());
    let paths = save_regions(regions, out_dir, &prefix)?;
    Ok(paths.len())
}
