//! Placement rectangles within the atlas surface.

use serde::{Deserialize, Serialize};

/// An axis-aligned, half-open placement rectangle: `[ax, bx) × [ay, by)`.
///
/// `a` is the start origin and `b` the end origin, so `width = bx - ax` and
/// `height = by - ay`. The `placed` flag tells whether the subregion is
/// currently occupying atlas cells; the coordinates of an unplaced
/// subregion carry no meaning to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subregion {
    /// Whether this subregion currently occupies atlas cells.
    pub placed: bool,
    /// Start x (inclusive).
    pub ax: u32,
    /// Start y (inclusive).
    pub ay: u32,
    /// End x (exclusive).
    pub bx: u32,
    /// End y (exclusive).
    pub by: u32,
}

impl Subregion {
    /// Create a placed subregion from an origin and a size.
    pub fn from_origin(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            placed: true,
            ax: x,
            ay: y,
            bx: x + width,
            by: y + height,
        }
    }

    /// Width in atlas cells.
    pub fn width(&self) -> u32 {
        self.bx - self.ax
    }

    /// Height in atlas cells.
    pub fn height(&self) -> u32 {
        self.by - self.ay
    }

    /// Number of cells covered.
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Whether the given cell lies inside this subregion.
    pub fn contains_cell(&self, x: u32, y: u32) -> bool {
        self.ax <= x && x < self.bx && self.ay <= y && y < self.by
    }

    /// Whether two subregions cover at least one common cell.
    ///
    /// Half-open bounds mean edge-sharing subregions do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.ax < other.bx && other.ax < self.bx && self.ay < other.by && other.ay < self.by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_helpers() {
        let r = Subregion::from_origin(2, 3, 4, 5);
        assert!(r.placed);
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 5);
        assert_eq!(r.area(), 20);
        assert_eq!((r.ax, r.ay, r.bx, r.by), (2, 3, 6, 8));
    }

    #[test]
    fn test_edge_sharing_does_not_intersect() {
        let left = Subregion::from_origin(0, 0, 4, 4);
        let right = Subregion::from_origin(4, 0, 4, 4);
        let below = Subregion::from_origin(0, 4, 4, 4);

        assert!(!left.intersects(&right));
        assert!(!right.intersects(&left));
        assert!(!left.intersects(&below));
    }

    #[test]
    fn test_overlap_intersects() {
        let a = Subregion::from_origin(0, 0, 4, 4);
        let b = Subregion::from_origin(3, 3, 4, 4);
        let inner = Subregion::from_origin(1, 1, 2, 2);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(a.intersects(&inner));
    }

    #[test]
    fn test_contains_cell_half_open() {
        let r = Subregion::from_origin(1, 1, 2, 2);
        assert!(r.contains_cell(1, 1));
        assert!(r.contains_cell(2, 2));
        assert!(!r.contains_cell(3, 1));
        assert!(!r.contains_cell(1, 3));
        assert!(!r.contains_cell(0, 0));
    }
}
