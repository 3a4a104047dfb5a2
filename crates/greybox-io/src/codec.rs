//! Decode and encode between on-disk images and rasters
//!
//! Thin bridge over the `image` crate. Decoded images keep their alpha
//! channel when they have one and land in RGB otherwise; greybox never
//! processes other layouts.

use std::path::Path;

use greybox_core::{Channels, Error as CoreError, Raster};
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};

use crate::error::IoResult;

/// Decode an image file into a raster.
///
/// Any format the `image` crate recognizes is accepted. Images carrying
/// an alpha channel decode to RGBA rasters, all others to RGB.
pub fn read_raster<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let img = image::open(path)?;
    to_raster(img)
}

/// Convert a decoded image into a raster.
pub fn to_raster(img: DynamicImage) -> IoResult<Raster> {
    if img.color().has_alpha() {
        let buf = img.to_rgba8();
        let (w, h) = buf.dimensions();
        Ok(Raster::from_raw(w, h, Channels::Rgba, buf.into_raw())?)
    } else {
        let buf = img.to_rgb8();
        let (w, h) = buf.dimensions();
        Ok(Raster::from_raw(w, h, Channels::Rgb, buf.into_raw())?)
    }
}

/// Convert a raster into a `DynamicImage` for encoding.
pub fn to_dynamic(raster: &Raster) -> IoResult<DynamicImage> {
    let (w, h) = (raster.width(), raster.height());
    let expected = w as usize * h as usize * raster.channels().count();
    let mismatch = CoreError::BufferSize {
        expected,
        actual: raster.data().len(),
    };
    match raster.channels() {
        Channels::Rgb => RgbImage::from_raw(w, h, raster.data().to_vec())
            .map(DynamicImage::ImageRgb8)
            .ok_or(mismatch.into()),
        Channels::Rgba => RgbaImage::from_raw(w, h, raster.data().to_vec())
            .map(DynamicImage::ImageRgba8)
            .ok_or(mismatch.into()),
    }
}

/// Encode a raster as PNG at `path`.
pub fn write_png<P: AsRef<Path>>(raster: &Raster, path: P) -> IoResult<()> {
    to_dynamic(raster)?.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use greybox_test::{sheet_rgba, solid};

    #[test]
    fn test_png_roundtrip_preserves_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");

        let sheet = sheet_rgba(8, 8, [0, 0, 0, 0], &[(1, 1, 3, [200, 10, 10, 255])]);
        write_png(&sheet, &path).unwrap();

        let loaded = read_raster(&path).unwrap();
        assert_eq!(loaded, sheet);
    }

    #[test]
    fn test_rgb_stays_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");

        let flat = solid(5, 4, Channels::Rgb, &[1, 2, 3]);
        write_png(&flat, &path).unwrap();

        let loaded = read_raster(&path).unwrap();
        assert_eq!(loaded.channels(), Channels::Rgb);
        assert_eq!(loaded, flat);
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        assert!(read_raster("/nonexistent/no.png").is_err());
    }
}
