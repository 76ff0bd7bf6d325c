//! Print resolution derivation
//!
//! Works out how large the sheet grid is on paper and which image axis
//! limits the print resolution.

use crate::types::{BindingAxis, GridSpec, Orientation, PaperFormat, PosterError, Result};

use super::{Canvas, Resolution};

// =============================================================================
// Canvas
// =============================================================================

/// Canvas size for a grid of sheets, each `paper_width_in` × `paper_height_in`.
///
/// Every interior seam consumes one overlap strip, so a grid of `n` sheets
/// is `n` sheets wide minus `n - 1` overlaps.
pub fn canvas_size(
    grid: GridSpec,
    paper_width_in: f64,
    paper_height_in: f64,
    overlap_in: f64,
) -> Result<Canvas> {
    grid.validate()?;

    let columns = f64::from(grid.columns);
    let rows = f64::from(grid.rows);

    Ok(Canvas {
        width_in: paper_width_in * columns - overlap_in * (columns - 1.0),
        height_in: paper_height_in * rows - overlap_in * (rows - 1.0),
    })
}

// =============================================================================
// Resolution
// =============================================================================

/// Derive the print resolution for an image printed on a grid of sheets.
///
/// The image is scaled so that it exactly fills the canvas along one axis
/// and stays inside it along the other. When the canvas is relatively taller
/// than the image, the width binds; otherwise the height binds.
pub fn derive_resolution(
    image_width: u32,
    image_height: u32,
    grid: GridSpec,
    paper: PaperFormat,
    orientation: Orientation,
    overlap_in: f64,
) -> Result<Resolution> {
    if image_width == 0 || image_height == 0 {
        return Err(PosterError::Config(format!(
            "Image dimensions must be positive, got {}x{}",
            image_width, image_height
        )));
    }
    if !overlap_in.is_finite() || overlap_in < 0.0 {
        return Err(PosterError::Config(format!(
            "Overlap must be a non-negative length, got {}",
            overlap_in
        )));
    }

    let (paper_width_in, paper_height_in) = paper.dimensions_with_orientation(orientation);
    let canvas = canvas_size(grid, paper_width_in, paper_height_in, overlap_in)?;
    if canvas.width_in <= 0.0 || canvas.height_in <= 0.0 {
        return Err(PosterError::DegenerateGeometry(format!(
            "Canvas of {}x{}in leaves no printable area",
            canvas.width_in, canvas.height_in
        )));
    }

    let image_ratio = f64::from(image_height) / f64::from(image_width);
    let canvas_ratio = canvas.ratio();

    let (binding, dpi) = if canvas_ratio > image_ratio {
        (BindingAxis::Width, f64::from(image_width) / canvas.width_in)
    } else {
        (BindingAxis::Height, f64::from(image_height) / canvas.height_in)
    };

    Ok(Resolution {
        paper_width_in,
        paper_height_in,
        canvas,
        image_ratio,
        canvas_ratio,
        binding,
        dpi,
    })
}

// =============================================================================
// Tests
// =============================================================================
