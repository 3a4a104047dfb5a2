//! Greybox - dataset preparation tools for game art
//!
//! Utilities for building an image/game-metadata dataset: slicing sprite
//! sheets into individual icons, normalizing image trees to PNG, and
//! scanning messy source dumps (archives included) for media files.
//!
//! # Overview
//!
//! - Icon extraction: background-color keying or alpha masking,
//!   connected-component detection, proximity clustering, cropping
//! - Image I/O: decode anything the `image` crate knows, emit PNG
//! - Dataset assembly: directory walking, tar/gzip unpacking, bounded
//!   worker-pool batch passes
//!
//! # Example
//!
//! ```
//! use greybox::{Channels, Raster, Rect};
//! use greybox::extract::{ExtractOptions, extract_regions};
//!
//! let mut sheet = Raster::new(20, 20, Channels::Rgba).unwrap();
//! sheet.fill_rect(Rect::new(2, 2, 4, 4), &[255, 0, 0, 255]).unwrap();
//!
//! let icons: Vec<Raster> = extract_regions(&sheet, &ExtractOptions::alpha())
//!     .unwrap()
//!     .collect();
//! assert_eq!(icons.len(), 1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use greybox_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use greybox_dataset as dataset;
pub use greybox_extract as extract;
pub use greybox_io as io;
