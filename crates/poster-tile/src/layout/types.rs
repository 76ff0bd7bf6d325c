//! Layout data types for poster tiling
//!
//! These types carry the intermediate results between the resolution
//! derivation and the crop pipeline.

use crate::types::{BindingAxis, GridSpec, Orientation, PaperFormat};

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: u32,
    /// Column index (0 = leftmost column)
    pub col: u32,
}

impl GridPosition {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Total printable area of the sheet grid in inches, net of overlaps
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Canvas {
    pub width_in: f64,
    pub height_in: f64,
}

impl Canvas {
    /// Height to width ratio
    pub fn ratio(&self) -> f64 {
        self.height_in / self.width_in
    }
}

/// Print resolution and the quantities it was derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Print area width of one sheet after orientation, in inches
    pub paper_width_in: f64,
    /// Print area height of one sheet after orientation, in inches
    pub paper_height_in: f64,
    pub canvas: Canvas,
    /// Image height / width
    pub image_ratio: f64,
    /// Canvas height / width
    pub canvas_ratio: f64,
    pub binding: BindingAxis,
    /// Pixels per inch on paper
    pub dpi: f64,
}

impl Resolution {
    pub fn width_binds(&self) -> bool {
        self.binding == BindingAxis::Width
    }
}

/// One crop rectangle in source image pixels, printed on one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Output file name
    pub name: String,
    pub position: GridPosition,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Tile {
    /// Right edge (exclusive)
    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }

    /// ImageMagick geometry string, `WxH+L+T`
    pub fn crop_geometry(&self) -> String {
        format!("{}x{}+{}+{}", self.width, self.height, self.left, self.top)
    }

    /// The rectangle intersected with an image of the given size
    pub fn clamped(&self, image_width: u32, image_height: u32) -> (u32, u32, u32, u32) {
        let left = self.left.min(image_width);
        let top = self.top.min(image_height);
        let width = self.width.min(image_width - left);
        let height = self.height.min(image_height - top);
        (left, top, width, height)
    }
}

/// Complete tiling of one image
///
/// Holds the derived resolution, the pixel block sizes and every tile in
/// emission order (row-major, top row first).
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlan {
    pub image_width: u32,
    pub image_height: u32,
    pub grid: GridSpec,
    pub paper: PaperFormat,
    pub orientation: Orientation,
    pub overlap_in: f64,
    pub resolution: Resolution,
    /// Overlap between adjacent tiles in pixels
    pub pixel_overlap: u32,
    /// Size of a regular (not last) tile
    pub block_width: u32,
    pub block_height: u32,
    /// Distance between consecutive tile origins
    pub shift_x: u32,
    pub shift_y: u32,
    /// Size of the tiles in the last column / last row
    pub last_width: u32,
    pub last_height: u32,
    pub tiles: Vec<Tile>,
}

impl TilePlan {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    pub fn dpi(&self) -> f64 {
        self.resolution.dpi
    }

    /// Tile at a grid position, if inside the grid
    pub fn tile(&self, pos: GridPosition) -> Option<&Tile> {
        if pos.row >= self.grid.rows || pos.col >= self.grid.columns {
            return None;
        }
        let index = pos.row as usize * self.grid.columns as usize + pos.col as usize;
        self.tiles.get(index)
    }

    /// Pixels by which the last column and last row reach past the image.
    ///
    /// Only the binding axis can overshoot, by less than one pixel per tile,
    /// because its last tile keeps the rounded regular size.
    pub fn overshoot(&self) -> (u32, u32) {
        let right = self.tiles.iter().map(Tile::right).max().unwrap_or(0);
        let bottom = self.tiles.iter().map(Tile::bottom).max().unwrap_or(0);
        (
            right.saturating_sub(self.image_width),
            bottom.saturating_sub(self.image_height),
        )
    }
}

impl<'a> IntoIterator for &'a TilePlan {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
