//! Poster production - turning one image into printable tiles
//!
//! This module orchestrates a run:
//! 1. Validate options and query the image dimensions
//! 2. Compute the tile plan and its summary
//! 3. Ask for confirmation
//! 4. Crop the tiles one after another, stopping at the first failure

mod crop;
mod io;

pub use crop::{ConvertCropper, NativeCropper, convert_args};
pub use io::{IdentifyMetrics, NativeMetrics, parse_identify_output};

use crate::layout::{Tile, TileGeometryCalculator, TilePlan};
use crate::options::PosterOptions;
use crate::summary::{PosterSummary, calculate_summary};
use crate::types::*;
use std::future::Future;
use std::path::{Path, PathBuf};

// =============================================================================
// Collaborators
// =============================================================================

/// Reports the pixel dimensions of an image
pub trait ImageMetrics {
    fn dimensions(&self, path: &Path) -> impl Future<Output = Result<(u32, u32)>>;
}

/// Writes one tile of `source` to `destination`, re-anchored at the origin
pub trait CropExecutor {
    fn crop(
        &mut self,
        source: &Path,
        tile: &Tile,
        destination: &Path,
    ) -> impl Future<Output = Result<()>>;
}

/// Yes/no gate between planning and producing tiles
pub trait Confirm {
    fn confirm(&mut self, summary: &PosterSummary) -> impl Future<Output = Result<bool>>;
}

/// Confirms every plan without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    async fn confirm(&mut self, _summary: &PosterSummary) -> Result<bool> {
        Ok(true)
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// How a run ended without an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Every tile was written; paths in emission order
    Completed(Vec<PathBuf>),
    /// The confirmation was declined and nothing was written
    Declined,
}

/// Validate options, read the image size and compute the tile plan.
///
/// Configuration problems are reported before the metrics provider is
/// queried.
pub async fn plan_poster<M: ImageMetrics>(
    options: &PosterOptions,
    metrics: &M,
) -> Result<(TilePlan, PosterSummary)> {
    options.validate()?;

    let (width, height) = metrics.dimensions(&options.image_path).await?;
    log::debug!(
        "{} is {}x{}px",
        options.image_path.display(),
        width,
        height
    );

    let image_name = options.image_name();
    let plan = TileGeometryCalculator::from_options(options).plan(&image_name, width, height)?;
    let summary = calculate_summary(&image_name, &plan);

    Ok((plan, summary))
}

/// Crop every tile of `plan` in emission order.
///
/// Each crop completes before the next one starts. The first failure stops
/// the run; tiles already written stay on disk.
pub async fn produce_tiles<C: CropExecutor>(
    source: &Path,
    plan: &TilePlan,
    output_dir: &Path,
    cropper: &mut C,
) -> Result<Vec<PathBuf>> {
    let total = plan.len();
    let mut produced = Vec::with_capacity(total);

    for tile in plan {
        let destination = output_dir.join(&tile.name);
        log::info!(
            "[{}/{}] {} -> {}",
            produced.len() + 1,
            total,
            tile.crop_geometry(),
            destination.display()
        );
        cropper.crop(source, tile, &destination).await?;
        produced.push(destination);
    }

    Ok(produced)
}

/// Run the whole pipeline: plan, confirm, then produce the tiles
pub async fn run_poster<M, P, C>(
    options: &PosterOptions,
    metrics: &M,
    prompt: &mut P,
    cropper: &mut C,
) -> Result<PipelineOutcome>
where
    M: ImageMetrics,
    P: Confirm,
    C: CropExecutor,
{
    let (plan, summary) = plan_poster(options, metrics).await?;

    if !prompt.confirm(&summary).await? {
        log::info!("Exited by user's request");
        return Ok(PipelineOutcome::Declined);
    }

    let output_dir = options.output_dir();
    tokio::fs::create_dir_all(&output_dir).await?;

    let produced = produce_tiles(&options.image_path, &plan, &output_dir, cropper).await?;
    log::info!("All done! {} tiles written to {}", produced.len(), output_dir.display());

    Ok(PipelineOutcome::Completed(produced))
}
