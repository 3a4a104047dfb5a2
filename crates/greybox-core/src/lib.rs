//! Greybox Core - basic data structures for dataset preparation
//!
//! This crate provides the types shared by the greybox tools:
//!
//! - [`Raster`] - interleaved RGB/RGBA pixel buffer
//! - [`Rect`] - axis-aligned rectangle in image coordinates
//! - [`Error`] / [`Result`] - unified error handling
//!
//! Everything here is pure in-memory data; decoding, encoding, and any
//! filesystem access live in the sibling crates.

pub mod error;
pub mod geometry;
pub mod raster;

pub use error::{Error, Result};
pub use geometry::{Rect, envelope};
pub use raster::{Channels, Raster};
