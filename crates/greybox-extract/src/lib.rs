//! greybox-extract - icon extraction from sprite sheets
//!
//! Given a decoded RGB/RGBA image, this crate detects connected
//! foreground regions and yields each one as a cropped image:
//!
//! 1. Build a foreground [`Mask`] from a background color key or from the
//!    image's alpha channel.
//! 2. Find connected components over the mask ([`find_components`]).
//! 3. Optionally merge components whose bounding rects are close
//!    ([`merge_nearby`]).
//! 4. Lazily crop each final rect from the source image.
//!
//! The crate performs no I/O and holds no shared state; independent
//! extractions can run concurrently without coordination.
//!
//! # Examples
//!
//! Extracting icons from a sheet with a known background color:
//!
//! ```
//! use greybox_core::{Channels, Raster, Rect};
//! use greybox_extract::{ExtractOptions, extract_regions};
//!
//! let white = [255u8, 255, 255];
//! let mut sheet = Raster::from_pixel(32, 32, Channels::Rgb, &white).unwrap();
//! sheet.fill_rect(Rect::new(4, 4, 6, 6), &[200, 0, 0]).unwrap();
//! sheet.fill_rect(Rect::new(20, 20, 6, 6), &[0, 200, 0]).unwrap();
//!
//! let options = ExtractOptions::color_key(white);
//! let icons: Vec<Raster> = extract_regions(&sheet, &options).unwrap().collect();
//! assert_eq!(icons.len(), 2);
//! ```

pub mod cluster;
pub mod conncomp;
pub mod error;
pub mod extract;
pub mod mask;

// Re-export core types
pub use greybox_core;

pub use cluster::merge_nearby;
pub use conncomp::{Component, Connectivity, find_components};
pub use error::{ExtractError, ExtractResult};
pub use extract::{
    Clustering, DEFAULT_PROXIMITY, ExtractOptions, ForegroundSpec, Regions, extract_regions,
};
pub use mask::Mask;
