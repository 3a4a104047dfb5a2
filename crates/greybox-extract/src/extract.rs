//! Region extraction from sprite sheets
//!
//! Ties the pipeline together: build a foreground mask, find connected
//! components, optionally cluster their bounding rects, and hand back a
//! lazy iterator of cropped regions.

use greybox_core::{Raster, Rect};
use tracing::debug;

use crate::cluster::merge_nearby;
use crate::conncomp::{Connectivity, find_components};
use crate::error::ExtractResult;
use crate::mask::Mask;

/// Default corner-proximity threshold for color-key clustering, in pixels
pub const DEFAULT_PROXIMITY: u32 = 10;

/// How foreground pixels are identified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForegroundSpec {
    /// Foreground is everything that differs exactly from one background
    /// color. Accepts RGB and RGBA images.
    ColorKey {
        /// The background color to key out
        background: [u8; 3],
    },
    /// Foreground is every pixel with `alpha > threshold`. Requires an
    /// RGBA image.
    Alpha {
        /// Alpha values at or below this are background
        threshold: u8,
    },
}

/// Whether detected regions are merged by proximity
///
/// Kept separate from [`ForegroundSpec`] so either mode can opt in or out
/// of merging instead of inheriting it from the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clustering {
    /// One output region per connected component
    Disabled,
    /// Merge components whose bounding rects have top-left corners within
    /// `threshold` pixels, chained transitively
    Proximity {
        /// Corner distance, in pixels, on each axis
        threshold: u32,
    },
}

/// Configuration for one extraction call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Foreground detection mode
    pub foreground: ForegroundSpec,
    /// Region merging behavior
    pub clustering: Clustering,
    /// Pixel adjacency used for component analysis
    pub connectivity: Connectivity,
}

impl ExtractOptions {
    /// Color-key extraction against `background`, with clustering at the
    /// default proximity threshold.
    pub fn color_key(background: [u8; 3]) -> Self {
        Self {
            foreground: ForegroundSpec::ColorKey { background },
            clustering: Clustering::Proximity {
                threshold: DEFAULT_PROXIMITY,
            },
            connectivity: Connectivity::EightWay,
        }
    }

    /// Alpha-channel extraction with threshold 0 and no clustering, so
    /// every connected component comes out as its own region.
    pub fn alpha() -> Self {
        Self {
            foreground: ForegroundSpec::Alpha { threshold: 0 },
            clustering: Clustering::Disabled,
            connectivity: Connectivity::EightWay,
        }
    }

    /// Set the alpha threshold; no effect in color-key mode.
    pub fn with_alpha_threshold(mut self, threshold: u8) -> Self {
        if let ForegroundSpec::Alpha { threshold: t } = &mut self.foreground {
            *t = threshold;
        }
        self
    }

    /// Override the clustering behavior.
    pub fn with_clustering(mut self, clustering: Clustering) -> Self {
        self.clustering = clustering;
        self
    }

    /// Override the connectivity used for component analysis.
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }
}

/// Extract icon regions from a sprite sheet.
///
/// Builds the foreground mask per `options.foreground`, finds connected
/// components, merges their bounding rects if clustering is enabled, and
/// returns a lazy iterator that crops one region per step. The source
/// image is only read, never modified.
///
/// An image with no foreground pixels yields an empty iterator; that is a
/// valid result, not an error. Regions come out in component discovery
/// order (row-major by topmost pixel), which is not necessarily spatial
/// reading order after clustering.
///
/// # Errors
///
/// Fails before any processing with
/// [`ExtractError::UnsupportedLayout`](crate::error::ExtractError::UnsupportedLayout)
/// when alpha mode is requested on an image without an alpha channel.
///
/// # Examples
///
/// ```
/// use greybox_core::{Channels, Raster, Rect};
/// use greybox_extract::{ExtractOptions, extract_regions};
///
/// let mut sheet = Raster::new(20, 20, Channels::Rgba).unwrap();
/// sheet.fill_rect(Rect::new(2, 2, 4, 4), &[255, 0, 0, 255]).unwrap();
///
/// let regions: Vec<_> = extract_regions(&sheet, &ExtractOptions::alpha())
///     .unwrap()
///     .collect();
/// assert_eq!(regions.len(), 1);
/// assert_eq!(regions[0].width(), 4);
/// assert_eq!(regions[0].height(), 4);
/// ```
pub fn extract_regions<'a>(
    image: &'a Raster,
    options: &ExtractOptions,
) -> ExtractResult<Regions<'a>> {
    // Layout validation happens inside the mask constructors, before any
    // pixel is read; a bad image never yields partial results.
    let mask = match options.foreground {
        ForegroundSpec::ColorKey { background } => Mask::from_color_key(image, background),
        ForegroundSpec::Alpha { threshold } => Mask::from_alpha(image, threshold)?,
    };

    let components = find_components(&mask, options.connectivity);
    let component_count = components.len();

    let rects: Vec<Rect> = components.into_iter().map(|c| c.bounds).collect();
    let rects = match options.clustering {
        Clustering::Disabled => rects,
        Clustering::Proximity { threshold } => merge_nearby(rects, threshold),
    };

    debug!(
        components = component_count,
        regions = rects.len(),
        "region extraction complete"
    );

    Ok(Regions {
        image,
        rects: rects.into_iter(),
    })
}

/// Lazy iterator of cropped regions borrowed from one source image
///
/// Finite and non-restartable; each `next()` crops one region. Dropping
/// the iterator early skips the remaining crops.
#[derive(Debug)]
pub struct Regions<'a> {
    image: &'a Raster,
    rects: std::vec::IntoIter<Rect>,
}

impl Regions<'_> {
    /// Bounding rects of the regions not yet yielded
    pub fn bounds(&self) -> &[Rect] {
        self.rects.as_slice()
    }
}

impl Iterator for Regions<'_> {
    type Item = Raster;

    fn next(&mut self) -> Option<Raster> {
        let rect = self.rects.next()?;
        // Component bounds always lie inside the source image, so the
        // crop cannot fail.
        self.image.crop(rect).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rects.size_hint()
    }
}

impl ExactSizeIterator for Regions<'_> {}
