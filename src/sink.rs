//! Emission seam between the packer and the surrounding application.
//!
//! The packer never issues drawing or upload operations itself; the final
//! phase hands each placed image to an [`AtlasSink`]. A renderer would
//! implement the trait with a texture sub-upload, while [`MemorySink`]
//! records emissions for tests and layout-only consumers.

use serde::Serialize;

use crate::types::{ImageIndex, Subregion};

/// Receiver for final placements.
pub trait AtlasSink {
    /// Called once per placed image, in image-index order, with its final
    /// subregion and the opaque pixel payload supplied at registration.
    fn upload(&mut self, image: ImageIndex, region: &Subregion, pixels: &[u8]);
}

/// One recorded emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UploadRecord {
    /// Which image was emitted.
    pub image: ImageIndex,
    /// Its final placement.
    pub region: Subregion,
    /// Size of the opaque payload, in bytes.
    pub payload_len: usize,
}

/// In-memory sink that records every emission in order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    uploads: Vec<UploadRecord>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded emissions, in emission order.
    pub fn uploads(&self) -> &[UploadRecord] {
        &self.uploads
    }

    /// Number of recorded emissions.
    pub fn len(&self) -> usize {
        self.uploads.len()
    }

    /// Whether nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.uploads.is_empty()
    }
}

impl AtlasSink for MemorySink {
    fn upload(&mut self, image: ImageIndex, region: &Subregion, pixels: &[u8]) {
        self.uploads.push(UploadRecord {
            image,
            region: *region,
            payload_len: pixels.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let mut sink = MemorySink::new();
        let r0 = Subregion::from_origin(0, 0, 4, 4);
        let r1 = Subregion::from_origin(4, 0, 2, 2);

        sink.upload(ImageIndex::new(0), &r0, &[1, 2, 3]);
        sink.upload(ImageIndex::new(1), &r1, &[]);

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.uploads()[0].image, ImageIndex::new(0));
        assert_eq!(sink.uploads()[0].payload_len, 3);
        assert_eq!(sink.uploads()[1].region, r1);
        assert_eq!(sink.uploads()[1].payload_len, 0);
    }
}
