mod logger;
mod prompt;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use logger::ConsoleLogger;
use poster_tile::pipeline::{ConvertCropper, IdentifyMetrics, NativeCropper, NativeMetrics};
use poster_tile::{Backend, PipelineOutcome, PosterOptions, PosterSummary, TilePlan};
use prompt::ConsolePrompt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit status when the confirmation prompt is declined
const DECLINED_EXIT: u8 = 255;

#[derive(Parser)]
#[command(
    name = "poster",
    about = "Split a large image into overlapping tiles, one per printed sheet",
    version,
    disable_help_flag = true
)]
struct Cli {
    /// Image to split
    image: Option<PathBuf>,

    /// Number of sheets across
    #[arg(short = 'w', long = "width", value_name = "COLUMNS",
          value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Number of sheets down
    #[arg(short = 'h', long = "height", value_name = "ROWS",
          value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// Sheet orientation [default: p]
    #[arg(short, long, value_enum, ignore_case = true)]
    orientation: Option<OrientationArg>,

    /// Paper format [default: letter]
    #[arg(short, long, value_enum)]
    paper: Option<PaperArg>,

    /// Directory for the tiles (defaults to the image's directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Tool used to read and crop the image [default: magick]
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Proceed without asking for confirmation
    #[arg(short, long)]
    yes: bool,

    /// Show the tile plan only, don't produce tiles
    #[arg(long)]
    plan_only: bool,

    /// Load options from a JSON file; command line flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the effective options to a JSON file
    #[arg(long, value_name = "FILE")]
    save_config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    #[value(name = "p", alias = "portrait")]
    Portrait,
    #[value(name = "l", alias = "landscape")]
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    Letter,
    Legal,
    Ledger,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Magick,
    Native,
}

impl From<OrientationArg> for poster_tile::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<PaperArg> for poster_tile::PaperFormat {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Ledger => Self::Ledger,
        }
    }
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Magick => Self::Magick,
            BackendArg::Native => Self::Native,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = ConsoleLogger::from_verbosity(cli.verbose).init() {
        eprintln!("Failed to install logger: {}", e);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let options = build_options(&cli).await?;

    if let Some(path) = &cli.save_config {
        save_options(&options, path).await?;
    }

    if cli.plan_only {
        let (plan, summary) = plan_with_backend(&options).await?;
        print_plan(&summary, &plan);
        return Ok(ExitCode::SUCCESS);
    }

    let mut prompt = ConsolePrompt::new(cli.yes);
    let outcome = match options.backend {
        Backend::Magick => {
            poster_tile::run_poster(
                &options,
                &IdentifyMetrics::default(),
                &mut prompt,
                &mut ConvertCropper::default(),
            )
            .await?
        }
        Backend::Native => {
            poster_tile::run_poster(&options, &NativeMetrics, &mut prompt, &mut NativeCropper::new())
                .await?
        }
    };

    match outcome {
        PipelineOutcome::Completed(_) => Ok(ExitCode::SUCCESS),
        PipelineOutcome::Declined => Ok(ExitCode::from(DECLINED_EXIT)),
    }
}

/// Merge the optional JSON config with the command line.
///
/// Without a config file the image and both grid dimensions are required;
/// a missing one is a usage error reported by clap.
async fn build_options(cli: &Cli) -> Result<PosterOptions> {
    let mut options = match &cli.config {
        Some(path) => PosterOptions::load(path)
            .await
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => {
            if cli.image.is_none() || cli.width.is_none() || cli.height.is_none() {
                Cli::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "usage: poster -w <COLUMNS> -h <ROWS> [-o {p|l}] <IMAGE>",
                    )
                    .exit();
            }
            PosterOptions::default()
        }
    };

    if let Some(image) = &cli.image {
        options.image_path = image.clone();
    }
    if let Some(columns) = cli.width {
        options.grid.columns = columns;
    }
    if let Some(rows) = cli.height {
        options.grid.rows = rows;
    }
    if let Some(orientation) = cli.orientation {
        options.orientation = orientation.into();
    }
    if let Some(paper) = cli.paper {
        options.paper = paper.into();
    }
    if let Some(dir) = &cli.out_dir {
        options.output_dir = Some(dir.clone());
    }
    if let Some(backend) = cli.backend {
        options.backend = backend.into();
    }

    Ok(options)
}

/// Only options that pass validation are written out
async fn save_options(options: &PosterOptions, path: &Path) -> Result<()> {
    options.validate()?;
    options
        .save(path)
        .await
        .with_context(|| format!("Failed to save options to {}", path.display()))?;
    log::info!("Saved options to {}", path.display());
    Ok(())
}

async fn plan_with_backend(options: &PosterOptions) -> Result<(TilePlan, PosterSummary)> {
    let planned = match options.backend {
        Backend::Magick => poster_tile::plan_poster(options, &IdentifyMetrics::default()).await?,
        Backend::Native => poster_tile::plan_poster(options, &NativeMetrics).await?,
    };
    Ok(planned)
}

fn print_plan(summary: &PosterSummary, plan: &TilePlan) {
    println!("{}", summary);
    println!("Tiles:");
    for tile in plan {
        println!("  {}  {}", tile.name, tile.crop_geometry());
    }
}
