//! Tile grid partitioning
//!
//! This module turns a print resolution into pixel crop rectangles, one per
//! sheet, including the differently sized last column and last row.

use std::path::Path;

use crate::types::{PosterError, Result};

use super::{GridPosition, Resolution, Tile};

// =============================================================================
// Block Sizes
// =============================================================================

/// Pixel sizes shared by every tile of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub pixel_overlap: u32,
    pub block_width: u32,
    pub block_height: u32,
    pub shift_x: u32,
    pub shift_y: u32,
    pub last_width: u32,
    pub last_height: u32,
}

/// Compute regular and last tile sizes for an image.
///
/// The axis that does not bind gets a last tile that closes the remaining
/// image span exactly. The binding axis keeps the regular size on its last
/// tile. Any non-positive size is reported instead of clamped.
pub fn block_layout(
    image_width: u32,
    image_height: u32,
    columns: u32,
    rows: u32,
    resolution: &Resolution,
    overlap_in: f64,
) -> Result<BlockLayout> {
    let dpi = resolution.dpi;

    let pixel_overlap = (overlap_in * dpi).round() as i64;
    let block_width = (dpi * resolution.paper_width_in).round() as i64;
    let block_height = (dpi * resolution.paper_height_in).round() as i64;
    let shift_x = block_width - pixel_overlap;
    let shift_y = block_height - pixel_overlap;

    let (last_width, last_height) = if resolution.width_binds() {
        (
            block_width,
            i64::from(image_height) - shift_y * (i64::from(rows) - 1),
        )
    } else {
        (
            i64::from(image_width) - shift_x * (i64::from(columns) - 1),
            block_height,
        )
    };

    positive("tile width", block_width)?;
    positive("tile height", block_height)?;
    if columns > 1 {
        positive("horizontal tile stride", shift_x)?;
    }
    if rows > 1 {
        positive("vertical tile stride", shift_y)?;
    }
    positive("last column width", last_width)?;
    positive("last row height", last_height)?;

    Ok(BlockLayout {
        pixel_overlap: to_pixels(pixel_overlap)?,
        block_width: to_pixels(block_width)?,
        block_height: to_pixels(block_height)?,
        shift_x: to_pixels(shift_x.max(0))?,
        shift_y: to_pixels(shift_y.max(0))?,
        last_width: to_pixels(last_width)?,
        last_height: to_pixels(last_height)?,
    })
}

fn positive(what: &str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(PosterError::DegenerateGeometry(format!(
            "{} is {}px; the image is too small for the requested grid",
            what, value
        )));
    }
    Ok(())
}

fn to_pixels(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        PosterError::DegenerateGeometry(format!("{}px does not fit a pixel coordinate", value))
    })
}

// =============================================================================
// Tile Emission
// =============================================================================

/// Emit every tile in row-major order: top row left to right, then the next.
pub fn partition_tiles(image_name: &str, columns: u32, rows: u32, layout: &BlockLayout) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(columns as usize * rows as usize);

    for y in 0..rows {
        for x in 0..columns {
            tiles.push(Tile {
                name: tile_name(image_name, y, x),
                position: GridPosition::new(y, x),
                left: layout.shift_x * x,
                top: layout.shift_y * y,
                width: if x < columns - 1 {
                    layout.block_width
                } else {
                    layout.last_width
                },
                height: if y < rows - 1 {
                    layout.block_height
                } else {
                    layout.last_height
                },
            });
        }
    }

    tiles
}

/// Output file name for a tile: `-{row}-{col}` goes before the extension.
///
/// Only the file name of `image_name` is used; any directory is dropped.
pub fn tile_name(image_name: &str, row: u32, col: u32) -> String {
    let path = Path::new(image_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| image_name.to_string());

    match path.extension() {
        Some(ext) => format!("{}-{}-{}.{}", stem, row, col, ext.to_string_lossy()),
        None => format!("{}-{}-{}", stem, row, col),
    }
}

// =============================================================================
// Tests
// =============================================================================
