//! Tile geometry entry point
//!
//! Combines the resolution derivation and the grid partitioning into a
//! complete [`TilePlan`] for one image.

use crate::constants::OVERLAP_IN;
use crate::options::PosterOptions;
use crate::types::{GridSpec, Orientation, PaperFormat, Result};

use super::{TilePlan, block_layout, derive_resolution, partition_tiles};

/// Computes tile crop rectangles for a fixed grid, paper and orientation.
///
/// The calculator holds no state between calls; the same inputs always
/// produce the same plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGeometryCalculator {
    pub grid: GridSpec,
    pub paper: PaperFormat,
    pub orientation: Orientation,
    pub overlap_in: f64,
}

impl TileGeometryCalculator {
    /// Calculator using the standard overlap
    pub fn new(grid: GridSpec, paper: PaperFormat, orientation: Orientation) -> Self {
        Self {
            grid,
            paper,
            orientation,
            overlap_in: OVERLAP_IN,
        }
    }

    pub fn from_options(options: &PosterOptions) -> Self {
        Self {
            grid: options.grid,
            paper: options.paper,
            orientation: options.orientation,
            overlap_in: options.overlap_in,
        }
    }

    /// Build the full tile plan for an image of `image_width` × `image_height`.
    ///
    /// `image_name` is only used to derive the tile file names.
    pub fn plan(&self, image_name: &str, image_width: u32, image_height: u32) -> Result<TilePlan> {
        let resolution = derive_resolution(
            image_width,
            image_height,
            self.grid,
            self.paper,
            self.orientation,
            self.overlap_in,
        )?;

        let layout = block_layout(
            image_width,
            image_height,
            self.grid.columns,
            self.grid.rows,
            &resolution,
            self.overlap_in,
        )?;

        let tiles = partition_tiles(image_name, self.grid.columns, self.grid.rows, &layout);

        Ok(TilePlan {
            image_width,
            image_height,
            grid: self.grid,
            paper: self.paper,
            orientation: self.orientation,
            overlap_in: self.overlap_in,
            resolution,
            pixel_overlap: layout.pixel_overlap,
            block_width: layout.block_width,
            block_height: layout.block_height,
            shift_x: layout.shift_x,
            shift_y: layout.shift_y,
            last_width: layout.last_width,
            last_height: layout.last_height,
            tiles,
        })
    }
}
