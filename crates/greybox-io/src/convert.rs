//! PNG conversion with collision-safe output naming
//!
//! Re-encodes arbitrary image files as PNG. Existing files are never
//! overwritten: a taken output name gets a `-1`, `-2`, ... stem suffix
//! instead.

use std::path::{Path, PathBuf};

use greybox_core::Raster;
use image::ImageFormat;
use tracing::debug;

use crate::codec::write_png;
use crate::error::IoResult;

/// Convert one image file to PNG.
///
/// With no explicit `output` the result lands next to the input with the
/// extension swapped, and an input that already has a `.png` extension is
/// returned untouched. With an explicit `output` the image is always
/// decoded and re-encoded there, PNG input included. The chosen path is
/// returned.
///
/// # Errors
///
/// Fails if the input cannot be decoded or the output cannot be written.
pub fn convert_to_png(input: &Path, output: Option<&Path>) -> IoResult<PathBuf> {
    let target = match output {
        Some(path) => path.to_path_buf(),
        None => {
            if has_png_extension(input) {
                return Ok(input.to_path_buf());
            }
            input.with_extension("png")
        }
    };
    let target = unique_path(target);

    let img = image::open(input)?;
    img.save_with_format(&target, ImageFormat::Png)?;
    debug!(input = %input.display(), output = %target.display(), "converted to png");
    Ok(target)
}

/// Write extracted regions as `PREFIX_1.png`, `PREFIX_2.png`, ... under
/// `out_dir`, creating the directory if needed. Returns the written paths
/// in order.
pub fn save_regions<I>(regions: I, out_dir: &Path, prefix: &str) -> IoResult<Vec<PathBuf>>
where
    I: IntoIterator<Item = Raster>,
{
    std::fs::create_dir_all(out_dir)?;
    let mut paths = Vec::new();
    for (i, region) in regions.into_iter().enumerate() {
        let path = out_dir.join(format!("{}_{}.png", prefix, i + 1));
        write_png(&region, &path)?;
        paths.push(path);
    }
    Ok(paths)
}

fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// First free variant of `path`: the path itself, then `stem-1.ext`,
/// `stem-2.ext`, ...
fn unique_path(path: PathBuf) -> PathBuf {
    if !path.exists() {
        return path;
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());

    let mut i = 1u32;
    loop {
        let candidate = path.with_file_name(format!("{stem}-{i}.{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greybox_core::Channels;
    use greybox_test::solid;

    #[test]
    fn test_existing_png_is_untouched() {
        let input = Path::new("/somewhere/icon.PNG");
        let out = convert_to_png(input, None).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_convert_bmp_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let bmp = dir.path().join("shot.bmp");

        let raster = solid(6, 6, Channels::Rgb, &[40, 50, 60]);
        crate::codec::to_dynamic(&raster)
            .unwrap()
            .save(&bmp)
            .unwrap();

        let out = convert_to_png(&bmp, None).unwrap();
        assert_eq!(out, dir.path().join("shot.png"));
        assert!(out.exists());

        let loaded = crate::codec::read_raster(&out).unwrap();
        assert_eq!(loaded, raster);
    }

    #[test]
    fn test_collision_gets_suffixed() {
        let dir = tempfile::tempdir().unwrap();
        let bmp = dir.path().join("shot.bmp");

        let raster = solid(4, 4, Channels::Rgb, &[1, 2, 3]);
        crate::codec::to_dynamic(&raster)
            .unwrap()
            .save(&bmp)
            .unwrap();

        let first = convert_to_png(&bmp, None).unwrap();
        // Second run must not clobber the first output
        let second = convert_to_png(&bmp, None).unwrap();
        assert_eq!(first, dir.path().join("shot.png"));
        assert_eq!(second, dir.path().join("shot-1.png"));
        let third = convert_to_png(&bmp, None).unwrap();
        assert_eq!(third, dir.path().join("shot-2.png"));
    }

    #[test]
    fn test_save_regions_naming() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("icons");
        let regions = vec![
            solid(2, 2, Channels::Rgba, &[1, 1, 1, 255]),
            solid(3, 3, Channels::Rgba, &[2, 2, 2, 255]),
        ];

        let paths = save_regions(regions, &out_dir, "UNKNOWN").unwrap();
        assert_eq!(
            paths,
            vec![out_dir.join("UNKNOWN_1.png"), out_dir.join("UNKNOWN_2.png")]
        );
        assert!(paths.iter().all(|p| p.exists()));
    }
}
