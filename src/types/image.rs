//! Image types for the atlas packer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an image within a packing run.
///
/// All relationships between the placement order, the atlas model, and the
/// placement rectangles are expressed through this index. Implements `Ord`
/// for deterministic tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImageIndex(usize);

impl ImageIndex {
    /// Create an index from a raw position.
    pub fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Get the raw position.
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ImageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ImageIndex {
    fn from(raw: usize) -> Self {
        Self(raw)
    }
}

/// Width and height of a source image, in atlas cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageExtent {
    /// Width in cells, always > 0.
    pub width: u32,
    /// Height in cells, always > 0.
    pub height: u32,
}

impl ImageExtent {
    /// Create a new extent.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Covered area in cells.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for ImageExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A registered image: its extent plus an opaque pixel payload.
///
/// The packer never interprets the payload. It is handed back verbatim to
/// the emission sink once the image has a final placement, and may be empty
/// when the caller only needs layout coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Image dimensions.
    pub extent: ImageExtent,
    /// Opaque pixel bytes, uninterpreted by the packer.
    pub pixels: Vec<u8>,
}

impl ImageEntry {
    /// Create an entry with a payload.
    pub fn new(extent: ImageExtent, pixels: Vec<u8>) -> Self {
        Self { extent, pixels }
    }

    /// Create a payload-less entry (layout-only packing).
    pub fn layout_only(extent: ImageExtent) -> Self {
        Self {
            extent,
            pixels: Vec::new(),
        }
    }
}
