//! Four-phase atlas placement.
//!
//! The packer is the orchestrator of a packing run:
//!
//! 1. **Column fill**: walk the placement order, laying images out in
//!    columns of a shared width.
//! 2. **Evacuation**: find the column with the fewest images and clear it.
//! 3. **Compaction**: slide every column right of the gap leftward by the
//!    evacuated column's width.
//! 4. **Emission**: hand every remaining placement to the sink.
//!
//! ## Core Contract
//!
//! A run is a pure, single-pass transformation: same model contents in,
//! same layout and fingerprint out. There are no recoverable error states;
//! the only "failure" outcome is partial placement, reported as a count.
//!
//! Images cleared during evacuation are never re-inserted elsewhere. This
//! is a deliberately preserved, known-incomplete compaction heuristic, not
//! an oversight to repair.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::canonical::canonical_hash_hex;
use crate::grid::GridOccupancy;
use crate::order::PlacementOrder;
use crate::sink::AtlasSink;
use crate::types::{AtlasModel, ImageIndex, Subregion};

/// Summary counts for one packing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackReport {
    /// Images registered in the model.
    pub images_total: usize,
    /// Images placed by the initial column fill.
    pub images_placed: usize,
    /// Images cleared when the sparsest column was evacuated.
    pub images_evicted: usize,
    /// Images handed to the sink with a final placement.
    pub images_emitted: usize,
}

impl PackReport {
    /// Whether the initial fill placed every registered image.
    pub fn all_placed(&self) -> bool {
        self.images_placed == self.images_total
    }
}

/// One emitted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    /// Which image.
    pub image: ImageIndex,
    /// Its final subregion in atlas coordinates.
    pub subregion: Subregion,
}

/// The result of a packing run: every emitted placement, the summary
/// counts, and a canonical fingerprint of the layout.
///
/// Same model contents produce the same fingerprint; golden tests pin
/// layouts through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutExport {
    /// Emitted placements in image-index order.
    pub entries: Vec<LayoutEntry>,
    /// Summary counts.
    pub report: PackReport,
    /// xxh64 hex fingerprint over the canonical bytes of `entries`.
    pub layout_fingerprint: String,
}

/// Orchestrates one packing run over an exclusively-borrowed model.
///
/// The packer owns the occupancy grid and the placement order for the
/// duration of the run; the model's subregions are its output.
pub struct Packer<'a> {
    model: &'a mut AtlasModel,
    order: PlacementOrder,
    grid: GridOccupancy,
    /// Representative image of the column evacuated in phase 2.
    evacuated: Option<ImageIndex>,
}

impl<'a> Packer<'a> {
    /// Prepare a run: compute the placement order and size the grid to the
    /// atlas surface.
    pub fn new(model: &'a mut AtlasModel) -> Self {
        let order = PlacementOrder::compute(model);
        let grid = GridOccupancy::new(model.atlas_width(), model.atlas_height());
        Self {
            model,
            order,
            grid,
            evacuated: None,
        }
    }

    /// Execute all four phases and emit the surviving placements.
    pub fn run<S: AtlasSink>(mut self, sink: &mut S) -> LayoutExport {
        let images_total = self.model.num_images();
        let images_placed = self.fill_columns();

        let images_evicted = if images_placed > 0 {
            let evicted = self.evacuate_sparsest_column();
            self.compact_columns();
            evicted
        } else {
            0
        };

        let entries = self.emit(sink);
        let images_emitted = entries.len();
        let layout_fingerprint = canonical_hash_hex(&entries);

        info!(
            images_placed,
            images_total,
            images_evicted,
            images_emitted,
            fingerprint = %layout_fingerprint,
            "packing run complete"
        );

        LayoutExport {
            entries,
            report: PackReport {
                images_total,
                images_placed,
                images_evicted,
                images_emitted,
            },
            layout_fingerprint,
        }
    }

    /// Phase 1: lay out as many images as possible in sorted order.
    ///
    /// The cursor walks columns left to right. A width change closes the
    /// current width group; a column whose running height would exceed the
    /// atlas wraps to an adjacent column of the same width group; an image
    /// that would cross the right edge stops placement entirely, leaving
    /// the rest of the order unplaced.
    fn fill_columns(&mut self) -> usize {
        let first = match self.order.first() {
            Some(image) => image,
            None => return 0,
        };

        let mut last_width = self.model.extent(first).width;
        let mut placed = 0usize;
        let mut i_x: u32 = 0;
        let mut i_y: u32 = 0;

        for &image in self.order.as_slice() {
            let extent = self.model.extent(image);

            if extent.width != last_width {
                i_y = 0;
                i_x += last_width;
                last_width = extent.width;
            }

            if !self.model.fits_vertically(i_y, image) {
                i_y = 0;
                i_x += last_width;
            }

            if !self.model.fits_horizontally(i_x, image) {
                break;
            }

            let region = Subregion::from_origin(i_x, i_y, extent.width, extent.height);
            self.grid.fill(&region);
            *self.model.subregion_mut(image) = region;
            placed += 1;

            if extent.width == last_width {
                i_y += extent.height;
            }
        }

        debug!(placed, total = self.order.len(), "initial column fill");
        placed
    }

    /// Phase 2: clear out every image in the least-populated column.
    ///
    /// Placed images are grouped by column origin as they appear in sorted
    /// order; the first column seen with the strictly minimal population
    /// wins, so later columns with an equal count never replace it.
    fn evacuate_sparsest_column(&mut self) -> usize {
        // (column x, population, last image seen in the column)
        let mut columns: Vec<(u32, usize, ImageIndex)> = Vec::new();

        for &image in self.order.as_slice() {
            let region = self.model.subregion(image);
            if !region.placed {
                continue;
            }

            match columns.last_mut() {
                Some((ax, population, last)) if *ax == region.ax => {
                    *population += 1;
                    *last = image;
                }
                _ => columns.push((region.ax, 1, image)),
            }
        }

        let mut sparsest: Option<(usize, ImageIndex)> = None;
        for &(_, population, last) in &columns {
            if sparsest.map_or(true, |(min, _)| population < min) {
                sparsest = Some((population, last));
            }
        }

        let (population, representative) = match sparsest {
            Some(found) => found,
            None => return 0,
        };

        let column_x = self.model.subregion(representative).ax;
        let mut evicted = 0usize;

        for &image in self.order.as_slice() {
            let region = self.model.subregion(image);
            if region.placed && region.ax == column_x {
                self.grid.clear(&region);
                self.model.subregion_mut(image).placed = false;
                evicted += 1;
            }
        }

        debug!(column_x, population, evicted, "evacuated sparsest column");
        self.evacuated = Some(representative);
        evicted
    }

    /// Phase 3: slide every column right of the gap leftward.
    ///
    /// Images are grouped by their current column origin in first-seen
    /// order and moved FIFO within each group. Vertical placement never
    /// changes; the first image of each group fixes where the next group
    /// lands.
    fn compact_columns(&mut self) {
        let representative = match self.evacuated {
            Some(image) => image,
            None => return,
        };
        let gap = self.model.subregion(representative);

        let mut columns: Vec<(u32, VecDeque<ImageIndex>)> = Vec::new();
        for &image in self.order.as_slice() {
            let region = self.model.subregion(image);
            if !region.placed || region.ax < gap.bx {
                continue;
            }

            match columns.iter_mut().find(|(ax, _)| *ax == region.ax) {
                Some((_, queue)) => queue.push_back(image),
                None => columns.push((region.ax, VecDeque::from([image]))),
            }
        }

        let mut dest_x = gap.ax;
        for (_, mut queue) in columns {
            let mut next_dest_x = dest_x;

            while let Some(image) = queue.pop_front() {
                let src = self.model.subregion(image);
                let dst = Subregion::from_origin(dest_x, src.ay, src.width(), src.height());

                self.grid.move_region(&src, &dst);
                *self.model.subregion_mut(image) = dst;

                if next_dest_x == dest_x {
                    next_dest_x = dst.bx;
                }
            }

            dest_x = next_dest_x;
        }
    }

    /// Phase 4: hand every still-placed image to the sink.
    fn emit<S: AtlasSink>(&mut self, sink: &mut S) -> Vec<LayoutEntry> {
        let mut entries = Vec::new();

        for raw in 0..self.model.num_images() {
            let image = ImageIndex::new(raw);
            let region = self.model.subregion(image);
            if !region.placed {
                continue;
            }

            sink.upload(image, &region, self.model.pixels(image));
            entries.push(LayoutEntry {
                image,
                subregion: region,
            });
        }

        entries
    }
}
