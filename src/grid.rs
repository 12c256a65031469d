//! Bit-per-cell occupancy tracking for the atlas surface.
//!
//! The grid is a flat bit-vector arena indexed by `y * width + x`, one bit
//! per atlas cell, `true` meaning occupied. Every mutation of a placement
//! rectangle during a packing run is paired with the matching grid update,
//! so the grid always agrees with the set of placed subregions.

use crate::types::Subregion;

const WORD_BITS: usize = 64;

/// Occupancy bitset over the atlas cells.
///
/// Regions are half-open, and callers guarantee that every queried region
/// lies within the grid bounds; violations are caught by debug assertions
/// in non-release builds.
#[derive(Debug, Clone)]
pub struct GridOccupancy {
    width: u32,
    height: u32,
    words: Vec<u64>,
}

impl GridOccupancy {
    /// Create a grid with every cell free.
    pub fn new(width: u32, height: u32) -> Self {
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            words: vec![0; (cells + WORD_BITS - 1) / WORD_BITS],
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    fn cell_index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "cell out of grid bounds");
        y as usize * self.width as usize + x as usize
    }

    /// Whether a single cell is occupied.
    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        let index = self.cell_index(x, y);
        self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    fn set(&mut self, x: u32, y: u32) {
        let index = self.cell_index(x, y);
        self.words[index / WORD_BITS] |= 1 << (index % WORD_BITS);
    }

    fn unset(&mut self, x: u32, y: u32) {
        let index = self.cell_index(x, y);
        self.words[index / WORD_BITS] &= !(1 << (index % WORD_BITS));
    }

    /// Whether every cell of the region is free.
    ///
    /// Returns `false` as soon as one occupied cell is found.
    pub fn is_region_free(&self, region: &Subregion) -> bool {
        debug_assert!(
            region.bx <= self.width && region.by <= self.height,
            "region out of grid bounds"
        );

        for y in region.ay..region.by {
            for x in region.ax..region.bx {
                if self.is_occupied(x, y) {
                    return false;
                }
            }
        }

        true
    }

    /// Mark every cell of the region occupied. Idempotent.
    pub fn fill(&mut self, region: &Subregion) {
        debug_assert!(
            region.bx <= self.width && region.by <= self.height,
            "region out of grid bounds"
        );

        for y in region.ay..region.by {
            for x in region.ax..region.bx {
                self.set(x, y);
            }
        }
    }

    /// Mark every cell of the region free.
    pub fn clear(&mut self, region: &Subregion) {
        debug_assert!(
            region.bx <= self.width && region.by <= self.height,
            "region out of grid bounds"
        );

        for y in region.ay..region.by {
            for x in region.ax..region.bx {
                self.unset(x, y);
            }
        }
    }

    /// Clear `src` and fill `dst` as one logical operation.
    ///
    /// No intermediate state is observable outside the packing run.
    pub fn move_region(&mut self, src: &Subregion, dst: &Subregion) {
        self.clear(src);
        self.fill(dst);
    }

    /// Total number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_free() {
        let grid = GridOccupancy::new(16, 8);
        let all = Subregion::from_origin(0, 0, 16, 8);
        assert!(grid.is_region_free(&all));
        assert_eq!(grid.occupied_cells(), 0);
    }

    #[test]
    fn test_fill_and_query() {
        let mut grid = GridOccupancy::new(16, 16);
        let region = Subregion::from_origin(2, 3, 4, 5);

        grid.fill(&region);

        assert!(grid.is_occupied(2, 3));
        assert!(grid.is_occupied(5, 7));
        assert!(!grid.is_occupied(6, 3));
        assert!(!grid.is_occupied(2, 8));
        assert_eq!(grid.occupied_cells(), 20);

        assert!(!grid.is_region_free(&region));
        // A single shared cell is enough to make the region non-free.
        assert!(!grid.is_region_free(&Subregion::from_origin(5, 7, 8, 8)));
        // Edge-adjacent regions stay free.
        assert!(grid.is_region_free(&Subregion::from_origin(6, 3, 4, 5)));
        assert!(grid.is_region_free(&Subregion::from_origin(2, 8, 4, 5)));
    }

    #[test]
    fn test_fill_is_idempotent() {
        let mut grid = GridOccupancy::new(8, 8);
        let region = Subregion::from_origin(0, 0, 4, 4);

        grid.fill(&region);
        grid.fill(&region);

        assert_eq!(grid.occupied_cells(), 16);
    }

    #[test]
    fn test_clear_restores_cells() {
        let mut grid = GridOccupancy::new(8, 8);
        let region = Subregion::from_origin(1, 1, 3, 3);

        grid.fill(&region);
        grid.clear(&region);

        assert!(grid.is_region_free(&region));
        assert_eq!(grid.occupied_cells(), 0);
    }

    #[test]
    fn test_move_region() {
        let mut grid = GridOccupancy::new(16, 8);
        let src = Subregion::from_origin(8, 0, 4, 4);
        let dst = Subregion::from_origin(4, 0, 4, 4);

        grid.fill(&src);
        grid.move_region(&src, &dst);

        assert!(grid.is_region_free(&src));
        assert!(!grid.is_region_free(&dst));
        assert_eq!(grid.occupied_cells(), 16);
    }

    #[test]
    fn test_move_overlapping_regions() {
        // Shifting a region by less than its own width must leave exactly
        // the destination occupied.
        let mut grid = GridOccupancy::new(16, 8);
        let src = Subregion::from_origin(4, 0, 4, 4);
        let dst = Subregion::from_origin(2, 0, 4, 4);

        grid.fill(&src);
        grid.move_region(&src, &dst);

        assert!(!grid.is_occupied(6, 0));
        assert!(grid.is_occupied(2, 0));
        assert_eq!(grid.occupied_cells(), 16);
    }

    #[test]
    fn test_word_boundary_cells() {
        // 16x16 = 256 cells spans four 64-bit words.
        let mut grid = GridOccupancy::new(16, 16);
        grid.fill(&Subregion::from_origin(15, 3, 1, 2));

        assert!(grid.is_occupied(15, 3));
        assert!(grid.is_occupied(15, 4));
        assert_eq!(grid.occupied_cells(), 2);
    }
}
