//! The atlas model: registered images, their placements, and atlas bounds.

use serde::{Deserialize, Serialize};

use super::image::{ImageEntry, ImageExtent, ImageIndex};
use super::rect::Subregion;

/// Error type for atlas model construction and image registration.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    /// Atlas dimensions must be non-zero powers of two.
    ///
    /// The column arithmetic and the flat occupancy arena assume
    /// power-of-two surfaces, so the constraint is enforced here rather
    /// than left implicit.
    #[error("atlas dimensions must be powers of two, got {width}x{height}")]
    DimensionsNotPowerOfTwo {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Images with a zero-sized extent cannot be packed.
    #[error("image {index} has an empty extent ({extent})")]
    EmptyImage {
        /// Index the image would have been registered under.
        index: ImageIndex,
        /// The rejected extent.
        extent: ImageExtent,
    },
}

/// Holds per-image dimensions and payloads, the placement rectangle of each
/// image, and the fixed atlas bounds.
///
/// The model is populated by the caller, exclusively mutated by a single
/// packing run, and then read back for texture upload. Placed subregions
/// never overlap and always lie within `[0, atlas_width) × [0, atlas_height)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasModel {
    atlas_width: u32,
    atlas_height: u32,
    entries: Vec<ImageEntry>,
    subregions: Vec<Subregion>,
}

impl AtlasModel {
    /// Create an empty model for an atlas surface.
    ///
    /// Both dimensions must be non-zero powers of two.
    pub fn new(atlas_width: u32, atlas_height: u32) -> Result<Self, AtlasError> {
        if !atlas_width.is_power_of_two() || !atlas_height.is_power_of_two() {
            return Err(AtlasError::DimensionsNotPowerOfTwo {
                width: atlas_width,
                height: atlas_height,
            });
        }

        Ok(Self {
            atlas_width,
            atlas_height,
            entries: Vec::new(),
            subregions: Vec::new(),
        })
    }

    /// Register an image with an opaque pixel payload.
    ///
    /// Returns the index the packer and the emission sink will refer to the
    /// image by. The extent must be non-zero in both dimensions; the caller
    /// is expected to supply extents that fit within the atlas bounds.
    pub fn add_image(
        &mut self,
        extent: ImageExtent,
        pixels: Vec<u8>,
    ) -> Result<ImageIndex, AtlasError> {
        let index = ImageIndex::new(self.entries.len());

        if extent.width == 0 || extent.height == 0 {
            return Err(AtlasError::EmptyImage { index, extent });
        }

        self.entries.push(ImageEntry::new(extent, pixels));
        self.subregions.push(Subregion::default());
        Ok(index)
    }

    /// Register an image without a payload (layout-only packing).
    pub fn add_extent(&mut self, extent: ImageExtent) -> Result<ImageIndex, AtlasError> {
        self.add_image(extent, Vec::new())
    }

    /// Atlas width in cells.
    pub fn atlas_width(&self) -> u32 {
        self.atlas_width
    }

    /// Atlas height in cells.
    pub fn atlas_height(&self) -> u32 {
        self.atlas_height
    }

    /// Number of registered images.
    pub fn num_images(&self) -> usize {
        self.entries.len()
    }

    /// Whether any images are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extent of a registered image.
    pub fn extent(&self, image: ImageIndex) -> ImageExtent {
        self.entries[image.as_usize()].extent
    }

    /// Opaque payload of a registered image.
    pub fn pixels(&self, image: ImageIndex) -> &[u8] {
        &self.entries[image.as_usize()].pixels
    }

    /// Current placement rectangle of an image.
    pub fn subregion(&self, image: ImageIndex) -> Subregion {
        self.subregions[image.as_usize()]
    }

    /// All placement rectangles, indexed by image position.
    pub fn subregions(&self) -> &[Subregion] {
        &self.subregions
    }

    pub(crate) fn subregion_mut(&mut self, image: ImageIndex) -> &mut Subregion {
        &mut self.subregions[image.as_usize()]
    }

    /// Number of images currently holding a placement.
    pub fn placed_count(&self) -> usize {
        self.subregions.iter().filter(|r| r.placed).count()
    }

    /// Whether the image fits horizontally when its left edge sits at `x`.
    pub fn fits_horizontally(&self, x: u32, image: ImageIndex) -> bool {
        x as u64 + self.extent(image).width as u64 <= self.atlas_width as u64
    }

    /// Whether the image fits vertically when its top edge sits at `y`.
    pub fn fits_vertically(&self, y: u32, image: ImageIndex) -> bool {
        y as u64 + self.extent(image).height as u64 <= self.atlas_height as u64
    }
}
