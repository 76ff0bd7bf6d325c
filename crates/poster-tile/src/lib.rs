pub mod constants;
pub mod layout;
mod options;
pub mod pipeline;
mod summary;
mod types;

pub use layout::{GridPosition, Tile, TileGeometryCalculator, TilePlan};
pub use options::*;
pub use pipeline::{
    AssumeYes, Confirm, CropExecutor, ImageMetrics, PipelineOutcome, plan_poster, produce_tiles,
    run_poster,
};
pub use summary::{PosterSummary, calculate_summary};
pub use types::*;
