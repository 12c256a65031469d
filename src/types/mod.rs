//! Core types for the atlas packer.

pub mod atlas;
pub mod image;
pub mod rect;

pub use atlas::{AtlasError, AtlasModel};
pub use image::{ImageEntry, ImageExtent, ImageIndex};
pub use rect::Subregion;
