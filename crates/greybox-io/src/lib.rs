//! greybox-io - image file I/O for the greybox tools
//!
//! Decodes image files into [`Raster`](greybox_core::Raster) buffers,
//! encodes rasters back to PNG, and performs the PNG normalization pass
//! used when assembling datasets. The extraction core never sees a file;
//! this crate is the only place where pixels touch disk.

pub mod codec;
pub mod convert;
pub mod error;

pub use codec::{read_raster, to_dynamic, to_raster, write_png};
pub use convert::{convert_to_png, save_regions};
pub use error::{IoError, IoResult};
