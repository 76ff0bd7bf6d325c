//! Layout calculation modules for poster tiling
//!
//! This module handles all the geometric calculations:
//! - Canvas size and print resolution (which axis binds)
//! - Regular and last tile sizes in pixels
//! - Crop rectangles for every sheet, in emission order

mod calculator;
mod geometry;
mod grid;
mod types;

pub use calculator::*;
pub use geometry::*;
pub use grid::*;
pub use types::*;
