//! greybox-dataset - dataset assembly utilities
//!
//! The filesystem-facing half of the greybox tools: walk source dumps,
//! unpack the archives they contain, collect media files, and run the
//! batch passes (PNG normalization, sprite-sheet slicing) over a bounded
//! worker pool.
//!
//! Everything here is an explicit entry point invoked by the CLI or a
//! caller; nothing runs as a side effect of loading the crate.

pub mod archive;
pub mod batch;
pub mod error;
pub mod pool;
pub mod scan;
pub mod walk;

pub use archive::{extract_archive, is_supported_archive};
pub use batch::{BatchReport, auto_color_key, convert_tree, slice_sheets};
pub use error::{DatasetError, DatasetResult};
pub use pool::run_parallel;
pub use scan::{FONT_EXTENSIONS, IMAGE_EXTENSIONS, MediaScanner, VIDEO_EXTENSIONS};
pub use walk::{find_all_files, find_files_with_keywords};
