//! # atlas-packer
//!
//! Deterministic column-based texture atlas packing.
//!
//! The packer answers one question:
//!
//! > Given a set of variable-sized images and one fixed-size atlas surface,
//! > where does each image go?
//!
//! ## Core Contract
//!
//! 1. Arrange images into the atlas without overlap, in columns grouped by
//!    width
//! 2. Evacuate the least-populated column and close the gap by sliding the
//!    columns to its right leftward
//! 3. Emit the surviving placements, a placed/total summary, and a
//!    **layout fingerprint** for downstream reproducibility checks
//!
//! ## Architecture
//!
//! ```text
//! AtlasModel → PlacementOrder → Packer (fill → evacuate → compact → emit)
//!                                  ↓
//!                            GridOccupancy            → AtlasSink
//! ```
//!
//! The packer consumes only image dimensions (plus opaque pixel payloads it
//! never interprets) and produces placement coordinates. Decoding, GPU
//! upload, and rendering belong to the caller behind the [`AtlasSink`]
//! seam.
//!
//! ## Determinism Guarantees
//!
//! - Same registered extents → identical placement order (ties broken by
//!   original image index)
//! - Same model contents → identical placements and layout fingerprint
//! - A run is single-threaded, synchronous, and free of global state

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canonical;
pub mod grid;
pub mod order;
pub mod packer;
pub mod sink;
pub mod types;

// Re-exports
pub use canonical::{canonical_hash, canonical_hash_hex, to_canonical_bytes};
pub use grid::GridOccupancy;
pub use order::PlacementOrder;
pub use packer::{LayoutEntry, LayoutExport, PackReport, Packer};
pub use sink::{AtlasSink, MemorySink, UploadRecord};
pub use types::{AtlasError, AtlasModel, ImageEntry, ImageExtent, ImageIndex, Subregion};

/// Schema version for exported layout types.
/// Increment on breaking changes to any exported schema type.
pub const LAYOUT_SCHEMA_VERSION: &str = "1.0.0";
