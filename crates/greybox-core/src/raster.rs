//! Raster - dense interleaved pixel buffer
//!
//! The `Raster` structure is the image container shared by every greybox
//! crate: decoded sprite sheets come in as one, extracted icons go out as
//! one.
//!
//! # Pixel layout
//!
//! - Row-major, top-left origin
//! - Channels interleaved per pixel: `RGB` (3 bytes) or `RGBA` (4 bytes)
//! - No row padding
//!
//! Rasters are plain owned values; operations that read an image borrow
//! it and produce new buffers.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Channel layout of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channels {
    /// 3 channels, no transparency
    Rgb = 3,
    /// 4 channels, alpha last
    Rgba = 4,
}

impl Channels {
    /// Create `Channels` from a raw channel count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] if `count` is not 3 or 4.
    pub fn from_count(count: u8) -> Result<Self> {
        match count {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            _ => Err(Error::UnsupportedChannels(count)),
        }
    }

    /// Number of bytes per pixel
    #[inline]
    pub fn count(self) -> usize {
        self as usize
    }

    /// Whether the layout carries an alpha channel
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, Channels::Rgba)
    }
}

/// An owned RGB/RGBA image buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl Raster {
    /// Create a zero-filled raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let len = width as usize * height as usize * channels.count();
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0; len],
        })
    }

    /// Wrap an existing interleaved byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for zero dimensions and
    /// [`Error::BufferSize`] if `data` does not hold exactly
    /// `width * height * channels` bytes.
    pub fn from_raw(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * channels.count();
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Create a raster filled with a single pixel value.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or `pixel` does not
    /// match the channel count.
    pub fn from_pixel(width: u32, height: u32, channels: Channels, pixel: &[u8]) -> Result<Self> {
        let mut raster = Self::new(width, height, channels)?;
        raster.fill(pixel)?;
        Ok(raster)
    }

    /// Image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout
    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw interleaved bytes
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the raster and return its bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels.count()
    }

    /// Pixel bytes at `(x, y)`, `None` if out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = self.offset(x, y);
        Some(&self.data[start..start + self.channels.count()])
    }

    /// RGB components at `(x, y)`, `None` if out of bounds
    pub fn rgb_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixel(x, y).map(|p| [p[0], p[1], p[2]])
    }

    /// Alpha at `(x, y)`; RGB rasters report 255
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        self.pixel(x, y).map(|p| match self.channels {
            Channels::Rgb => 255,
            Channels::Rgba => p[3],
        })
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the image or `pixel`
    /// does not match the channel count.
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: &[u8]) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        if pixel.len() != self.channels.count() {
            return Err(Error::BufferSize {
                expected: self.channels.count(),
                actual: pixel.len(),
            });
        }
        let start = self.offset(x, y);
        self.data[start..start + pixel.len()].copy_from_slice(pixel);
        Ok(())
    }

    /// Fill the whole raster with one pixel value.
    pub fn fill(&mut self, pixel: &[u8]) -> Result<()> {
        if pixel.len() != self.channels.count() {
            return Err(Error::BufferSize {
                expected: self.channels.count(),
                actual: pixel.len(),
            });
        }
        for chunk in self.data.chunks_exact_mut(pixel.len()) {
            chunk.copy_from_slice(pixel);
        }
        Ok(())
    }

    /// Fill a rectangle with one pixel value; the rect is clipped to the
    /// image bounds.
    pub fn fill_rect(&mut self, rect: Rect, pixel: &[u8]) -> Result<()> {
        if pixel.len() != self.channels.count() {
            return Err(Error::BufferSize {
                expected: self.channels.count(),
                actual: pixel.len(),
            });
        }
        let Some(rect) = rect.clip(self.width, self.height) else {
            return Ok(());
        };
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                let start = self.offset(x, y);
                self.data[start..start + pixel.len()].copy_from_slice(pixel);
            }
        }
        Ok(())
    }

    /// Extract a rectangular sub-region as a new raster.
    ///
    /// If the rectangle extends beyond the image it is clipped to the
    /// valid part. Returns an error if the rectangle is empty or lies
    /// entirely outside the image.
    ///
    /// # Examples
    ///
    /// ```
    /// use greybox_core::{Channels, Raster, Rect};
    ///
    /// let raster = Raster::new(100, 80, Channels::Rgb).unwrap();
    /// let cropped = raster.crop(Rect::new(10, 20, 50, 40)).unwrap();
    /// assert_eq!(cropped.width(), 50);
    /// assert_eq!(cropped.height(), 40);
    ///
    /// // Rects reaching past the edge are clipped
    /// let cropped = raster.crop(Rect::new(80, 60, 50, 50)).unwrap();
    /// assert_eq!(cropped.width(), 20);
    /// assert_eq!(cropped.height(), 20);
    /// ```
    pub fn crop(&self, rect: Rect) -> Result<Raster> {
        if rect.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "crop rect has zero dimension: {}x{}",
                rect.w, rect.h
            )));
        }
        if rect.x >= self.width || rect.y >= self.height {
            return Err(Error::OutOfBounds {
                x: rect.x,
                y: rect.y,
                width: self.width,
                height: self.height,
            });
        }

        let w = rect.w.min(self.width - rect.x);
        let h = rect.h.min(self.height - rect.y);
        let bpp = self.channels.count();
        let row = w as usize * bpp;

        let mut data = Vec::with_capacity(row * h as usize);
        for dy in 0..h {
            let start = self.offset(rect.x, rect.y + dy);
            data.extend_from_slice(&self.data[start..start + row]);
        }

        Raster::from_raw(w, h, self.channels, data)
    }

    /// Most frequent pixel value in the image.
    ///
    /// Used to sample a sprite sheet's background color before color-key
    /// extraction. RGB rasters report an alpha of 255. Ties are broken by
    /// the smallest channel values so the result is deterministic.
    pub fn most_common_color(&self) -> Option<[u8; 4]> {
        let mut counts: HashMap<[u8; 4], u64> = HashMap::new();
        for chunk in self.data.chunks_exact(self.channels.count()) {
            let key = match self.channels {
                Channels::Rgb => [chunk[0], chunk[1], chunk[2], 255],
                Channels::Rgba => [chunk[0], chunk[1], chunk[2], chunk[3]],
            };
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .max_by(|(ca, na), (cb, nb)| na.cmp(nb).then_with(|| cb.cmp(ca)))
            .map(|(color, _)| color)
    }

    /// Render a color as a small RGB image.
    ///
    /// RGB colors produce a solid tile. RGBA colors are alpha-blended over
    /// a white/grey checkerboard with cells of `checker` pixels, so
    /// transparency stays visible in the output.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions, a color slice that is not 3
    /// or 4 bytes, or a zero `checker` size with an RGBA color.
    pub fn swatch(color: &[u8], width: u32, height: u32, checker: u32) -> Result<Raster> {
        let channels = Channels::from_count(color.len() as u8)?;
        let mut out = Raster::new(width, height, Channels::Rgb)?;

        match channels {
            Channels::Rgb => {
                out.fill(color)?;
            }
            Channels::Rgba => {
                if checker == 0 {
                    return Err(Error::InvalidParameter(
                        "checker size must be >= 1".to_string(),
                    ));
                }
                let alpha = color[3] as f32 / 255.0;
                for y in 0..height {
                    for x in 0..width {
                        let base = if (x / checker) % 2 == (y / checker) % 2 {
                            192u8
                        } else {
                            255u8
                        };
                        let mut px = [0u8; 3];
                        for c in 0..3 {
                            let v = base as f32 * (1.0 - alpha) + color[c] as f32 * alpha;
                            px[c] = v.round() as u8;
                        }
                        out.put_pixel(x, y, &px)?;
                    }
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_count_validation() {
        assert!(matches!(
            Channels::from_count(1),
            Err(Error::UnsupportedChannels(1))
        ));
        assert!(Channels::from_count(2).is_err());
        assert_eq!(Channels::from_count(3).unwrap(), Channels::Rgb);
        assert_eq!(Channels::from_count(4).unwrap(), Channels::Rgba);
        assert!(Channels::from_count(5).is_err());
    }

    #[test]
    fn test_new_zero_dimension() {
        assert!(Raster::new(0, 10, Channels::Rgb).is_err());
        assert!(Raster::new(10, 0, Channels::Rgba).is_err());
    }

    #[test]
    fn test_from_raw_size_check() {
        let err = Raster::from_raw(2, 2, Channels::Rgb, vec![0; 11]).unwrap_err();
        assert!(matches!(err, Error::BufferSize { expected: 12, actual: 11 }));
        assert!(Raster::from_raw(2, 2, Channels::Rgb, vec![0; 12]).is_ok());
    }

    #[test]
    fn test_pixel_roundtrip() {
        let mut raster = Raster::new(4, 3, Channels::Rgba).unwrap();
        raster.put_pixel(2, 1, &[10, 20, 30, 40]).unwrap();
        assert_eq!(raster.pixel(2, 1), Some(&[10, 20, 30, 40][..]));
        assert_eq!(raster.rgb_at(2, 1), Some([10, 20, 30]));
        assert_eq!(raster.alpha_at(2, 1), Some(40));
        assert_eq!(raster.pixel(4, 0), None);
    }

    #[test]
    fn test_alpha_of_rgb_is_opaque() {
        let raster = Raster::from_pixel(2, 2, Channels::Rgb, &[9, 9, 9]).unwrap();
        assert_eq!(raster.alpha_at(0, 0), Some(255));
    }

    #[test]
    fn test_crop_copies_pixels() {
        let mut raster = Raster::from_pixel(6, 6, Channels::Rgb, &[1, 1, 1]).unwrap();
        raster.fill_rect(Rect::new(2, 2, 2, 2), &[7, 8, 9]).unwrap();

        let cropped = raster.crop(Rect::new(2, 2, 2, 2)).unwrap();
        assert_eq!(cropped.width(), 2);
        assert_eq!(cropped.height(), 2);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(cropped.rgb_at(x, y), Some([7, 8, 9]));
            }
        }
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let raster = Raster::new(4, 4, Channels::Rgb).unwrap();
        assert!(raster.crop(Rect::new(4, 0, 1, 1)).is_err());
        assert!(raster.crop(Rect::new(0, 0, 0, 3)).is_err());
    }

    #[test]
    fn test_most_common_color() {
        let mut raster = Raster::from_pixel(4, 4, Channels::Rgba, &[5, 5, 5, 255]).unwrap();
        raster.put_pixel(0, 0, &[1, 2, 3, 4]).unwrap();
        assert_eq!(raster.most_common_color(), Some([5, 5, 5, 255]));
    }

    #[test]
    fn test_most_common_color_tie_is_deterministic() {
        let mut raster = Raster::new(2, 1, Channels::Rgb).unwrap();
        raster.put_pixel(0, 0, &[9, 0, 0]).unwrap();
        raster.put_pixel(1, 0, &[3, 0, 0]).unwrap();
        assert_eq!(raster.most_common_color(), Some([3, 0, 0, 255]));
    }

    #[test]
    fn test_swatch_solid() {
        let swatch = Raster::swatch(&[10, 20, 30], 4, 4, 2).unwrap();
        assert_eq!(swatch.channels(), Channels::Rgb);
        assert_eq!(swatch.rgb_at(3, 3), Some([10, 20, 30]));
    }

    #[test]
    fn test_swatch_opaque_alpha_hides_checkerboard() {
        let swatch = Raster::swatch(&[10, 20, 30, 255], 4, 4, 2).unwrap();
        assert_eq!(swatch.rgb_at(0, 0), Some([10, 20, 30]));
        assert_eq!(swatch.rgb_at(2, 0), Some([10, 20, 30]));
    }

    #[test]
    fn test_swatch_transparent_shows_checkerboard() {
        let swatch = Raster::swatch(&[0, 0, 0, 0], 4, 4, 2).unwrap();
        assert_eq!(swatch.rgb_at(0, 0), Some([192, 192, 192]));
        assert_eq!(swatch.rgb_at(2, 0), Some([255, 255, 255]));
    }

    #[test]
    fn test_swatch_bad_color() {
        assert!(Raster::swatch(&[1, 2], 4, 4, 2).is_err());
    }
}
