//! Deterministic placement ordering.
//!
//! Images are sorted by width ascending and, within a width group, by
//! height descending. Every width group becomes one or more columns of a
//! shared width during placement: the tallest image lands at the bottom of
//! its column, so the column's running height accumulates predictably and
//! the shortest image ends up at the top, minimizing per-column slack.

use crate::types::{AtlasModel, ImageIndex};

/// A fixed permutation of image indices, computed once per packing run.
///
/// Ordering: width ascending, then height descending, then original image
/// index ascending. The final tie-break guarantees identical permutations
/// across runs over identical input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOrder {
    indices: Vec<ImageIndex>,
}

impl PlacementOrder {
    /// Compute the placement order for a model's registered images.
    pub fn compute(model: &AtlasModel) -> Self {
        let mut indices: Vec<ImageIndex> = (0..model.num_images()).map(ImageIndex::new).collect();

        indices.sort_unstable_by(|a, b| {
            let ea = model.extent(*a);
            let eb = model.extent(*b);
            ea.width
                .cmp(&eb.width)
                .then_with(|| eb.height.cmp(&ea.height))
                .then_with(|| a.cmp(b))
        });

        Self { indices }
    }

    /// The ordered indices.
    pub fn as_slice(&self) -> &[ImageIndex] {
        &self.indices
    }

    /// First image in the order, if any.
    pub fn first(&self) -> Option<ImageIndex> {
        self.indices.first().copied()
    }

    /// Number of images in the order.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the order is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageExtent;

    fn model_with(extents: &[(u32, u32)]) -> AtlasModel {
        let mut model = AtlasModel::new(1024, 1024).unwrap();
        for &(w, h) in extents {
            model.add_extent(ImageExtent::new(w, h)).unwrap();
        }
        model
    }

    fn raw_order(model: &AtlasModel) -> Vec<usize> {
        PlacementOrder::compute(model)
            .as_slice()
            .iter()
            .map(|i| i.as_usize())
            .collect()
    }

    #[test]
    fn test_width_ascending() {
        let model = model_with(&[(8, 4), (2, 4), (4, 4)]);
        assert_eq!(raw_order(&model), vec![1, 2, 0]);
    }

    #[test]
    fn test_equal_width_height_descending() {
        let model = model_with(&[(4, 2), (4, 8), (4, 4)]);
        assert_eq!(raw_order(&model), vec![1, 2, 0]);
    }

    #[test]
    fn test_full_tie_original_index_ascending() {
        let model = model_with(&[(4, 4), (4, 4), (4, 4)]);
        assert_eq!(raw_order(&model), vec![0, 1, 2]);
    }

    #[test]
    fn test_determinism() {
        let model = model_with(&[(7, 3), (4, 9), (4, 9), (12, 1), (4, 2)]);
        let a = PlacementOrder::compute(&model);
        let b = PlacementOrder::compute(&model);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_model() {
        let model = model_with(&[]);
        let order = PlacementOrder::compute(&model);
        assert!(order.is_empty());
        assert_eq!(order.first(), None);
    }
}
