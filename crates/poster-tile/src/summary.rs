use crate::constants::{INCH_DIGITS, RATIO_DIGITS, round_to};
use crate::layout::TilePlan;
use crate::types::*;
use std::fmt;

/// Human-facing numbers shown before any tile is produced
#[derive(Debug, Clone, PartialEq)]
pub struct PosterSummary {
    pub image_name: String,
    pub image_width: u32,
    pub image_height: u32,
    /// Image height / width
    pub image_ratio: f64,
    pub paper: PaperFormat,
    pub orientation: Orientation,
    /// Catalog print area, before orientation is applied
    pub paper_width_in: f64,
    pub paper_height_in: f64,
    /// Paper height / width after orientation
    pub paper_ratio: f64,
    pub canvas_width_in: f64,
    pub canvas_height_in: f64,
    pub canvas_ratio: f64,
    /// Physical size of the printed image
    pub print_width_in: f64,
    pub print_height_in: f64,
    pub dpi: f64,
    pub grid: GridSpec,
    pub tile_count: usize,
    pub tile_width_px: u32,
    pub tile_height_px: u32,
    pub pixel_overlap: u32,
}

/// Collect the summary for a computed plan
pub fn calculate_summary(image_name: &str, plan: &TilePlan) -> PosterSummary {
    let res = &plan.resolution;
    let (paper_width_in, paper_height_in) = plan.paper.dimensions_in();

    PosterSummary {
        image_name: image_name.to_string(),
        image_width: plan.image_width,
        image_height: plan.image_height,
        image_ratio: res.image_ratio,
        paper: plan.paper,
        orientation: plan.orientation,
        paper_width_in,
        paper_height_in,
        paper_ratio: res.paper_height_in / res.paper_width_in,
        canvas_width_in: res.canvas.width_in,
        canvas_height_in: res.canvas.height_in,
        canvas_ratio: res.canvas_ratio,
        print_width_in: f64::from(plan.image_width) / res.dpi,
        print_height_in: f64::from(plan.image_height) / res.dpi,
        dpi: res.dpi,
        grid: plan.grid,
        tile_count: plan.len(),
        tile_width_px: plan.block_width,
        tile_height_px: plan.block_height,
        pixel_overlap: plan.pixel_overlap,
    }
}

impl fmt::Display for PosterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Image {} has dimensions {}x{}px (1:{})",
            self.image_name,
            self.image_width,
            self.image_height,
            round_to(self.image_ratio, RATIO_DIGITS)
        )?;
        writeln!(
            f,
            "Using paper format {} with print area dimensions {}x{}in (1:{}) in {} orientation",
            self.paper.title(),
            self.paper_width_in,
            self.paper_height_in,
            round_to(self.paper_ratio, RATIO_DIGITS),
            self.orientation
        )?;
        writeln!(
            f,
            "Canvas size is {}x{}in (1:{})",
            round_to(self.canvas_width_in, RATIO_DIGITS),
            round_to(self.canvas_height_in, RATIO_DIGITS),
            round_to(self.canvas_ratio, RATIO_DIGITS)
        )?;
        writeln!(
            f,
            "Print dimensions are {}x{}in, {}dpi",
            round_to(self.print_width_in, INCH_DIGITS),
            round_to(self.print_height_in, INCH_DIGITS),
            self.dpi.round()
        )?;
        write!(
            f,
            "Splitting into {} tiles ({}x{}) of {}x{}px with {}px overlap",
            self.tile_count,
            self.grid.columns,
            self.grid.rows,
            self.tile_width_px,
            self.tile_height_px,
            self.pixel_overlap
        )
    }
}
