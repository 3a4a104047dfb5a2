//! greybox-test - shared fixtures for workspace tests
//!
//! Synthesizes small sprite sheets with known layouts so extraction and
//! I/O tests can assert exact rectangles. Only meant to be used as a
//! dev-dependency inside this workspace; helpers panic on bad input
//! rather than returning errors.

use greybox_core::{Channels, Raster, Rect};

/// A raster filled with one pixel value.
pub fn solid(width: u32, height: u32, channels: Channels, pixel: &[u8]) -> Raster {
    Raster::from_pixel(width, height, channels, pixel).unwrap()
}

/// An RGB sheet on a solid background with square icons painted on top.
///
/// Each square is `(x, y, size, fill)`.
pub fn sheet_rgb(
    width: u32,
    height: u32,
    background: [u8; 3],
    squares: &[(u32, u32, u32, [u8; 3])],
) -> Raster {
    let mut sheet = solid(width, height, Channels::Rgb, &background);
    for &(x, y, size, fill) in squares {
        sheet.fill_rect(Rect::new(x, y, size, size), &fill).unwrap();
    }
    sheet
}

/// An RGBA sheet, typically with a fully transparent background.
pub fn sheet_rgba(
    width: u32,
    height: u32,
    background: [u8; 4],
    squares: &[(u32, u32, u32, [u8; 4])],
) -> Raster {
    let mut sheet = solid(width, height, Channels::Rgba, &background);
    for &(x, y, size, fill) in squares {
        sheet.fill_rect(Rect::new(x, y, size, size), &fill).unwrap();
    }
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_paints_squares() {
        let sheet = sheet_rgb(10, 10, [0, 0, 0], &[(2, 2, 3, [9, 9, 9])]);
        assert_eq!(sheet.rgb_at(0, 0), Some([0, 0, 0]));
        assert_eq!(sheet.rgb_at(2, 2), Some([9, 9, 9]));
        assert_eq!(sheet.rgb_at(4, 4), Some([9, 9, 9]));
        assert_eq!(sheet.rgb_at(5, 5), Some([0, 0, 0]));
    }
}
