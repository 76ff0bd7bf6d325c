use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosterError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Cannot determine dimensions of {}: {message}", .path.display())]
    Metrics { path: PathBuf, message: String },
    #[error("Degenerate tile geometry: {0}")]
    DegenerateGeometry(String),
    #[error("Failed to produce tile {tile}: {message}")]
    Crop { tile: String, message: String },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PosterError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: the catalog width runs horizontally
    #[default]
    Portrait,
    /// Landscape: width and height of the print area are swapped
    Landscape,
}

impl Orientation {
    pub fn name(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    pub fn is_landscape(self) -> bool {
        self == Orientation::Landscape
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Orientation {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "portrait" => Ok(Orientation::Portrait),
            "l" | "landscape" => Ok(Orientation::Landscape),
            other => Err(PosterError::Config(format!(
                "Unknown orientation '{}', expected 'p' or 'l'",
                other
            ))),
        }
    }
}

/// Supported paper formats.
///
/// Dimensions describe the printable area in inches, i.e. the sheet size
/// minus the printer margins (half an inch less on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperFormat {
    #[default]
    Letter,
    Legal,
    Ledger,
}

impl PaperFormat {
    pub const ALL: [PaperFormat; 3] = [PaperFormat::Letter, PaperFormat::Legal, PaperFormat::Ledger];

    pub fn title(self) -> &'static str {
        match self {
            PaperFormat::Letter => "Letter",
            PaperFormat::Legal => "Legal",
            PaperFormat::Ledger => "Ledger",
        }
    }

    /// Print area (width, height) in inches, always portrait
    pub fn dimensions_in(self) -> (f64, f64) {
        match self {
            PaperFormat::Letter => (8.0, 10.5),
            PaperFormat::Legal => (8.0, 13.5),
            PaperFormat::Ledger => (10.5, 16.5),
        }
    }

    /// Get print area dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions_in();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Look up a catalog entry by its title, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.title().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PaperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for PaperFormat {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
            .ok_or_else(|| PosterError::Config(format!("Unknown paper format '{}'", s.trim())))
    }
}

/// The image axis whose full extent is matched exactly by the print resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingAxis {
    /// Image width fills the canvas width; the height is under-filled
    Width,
    /// Image height fills the canvas height; the width is under-filled
    Height,
}

/// Which implementation reads image sizes and crops tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Backend {
    /// ImageMagick `identify` and `convert` processes
    #[default]
    Magick,
    /// In-process decoding and cropping with the `image` crate
    Native,
}

/// Requested tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridSpec {
    /// Number of sheets across
    pub columns: u32,
    /// Number of sheets down
    pub rows: u32,
}

impl GridSpec {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Total number of tiles in the grid
    pub fn tile_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns < 1 {
            return Err(PosterError::Config(
                "Grid must have at least one column".to_string(),
            ));
        }
        if self.rows < 1 {
            return Err(PosterError::Config(
                "Grid must have at least one row".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: 1,
            rows: 1,
        }
    }
}
