use crate::constants::OVERLAP_IN;
use crate::types::*;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Poster tiling configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PosterOptions {
    // Input
    pub image_path: PathBuf,

    // Sheet layout
    pub grid: GridSpec,
    pub paper: PaperFormat,
    pub orientation: Orientation,
    pub overlap_in: f64,

    // Output
    pub output_dir: Option<PathBuf>,
    pub backend: Backend,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            image_path: PathBuf::new(),
            grid: GridSpec::default(),
            paper: PaperFormat::Letter,
            orientation: Orientation::Portrait,
            overlap_in: OVERLAP_IN,
            output_dir: None,
            backend: Backend::Magick,
        }
    }
}

impl PosterOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PosterError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PosterError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.image_path.as_os_str().is_empty() {
            return Err(PosterError::Config("No image file specified".to_string()));
        }

        self.grid.validate()?;

        if !self.overlap_in.is_finite() || self.overlap_in < 0.0 {
            return Err(PosterError::Config(format!(
                "Overlap must be a non-negative length, got {}",
                self.overlap_in
            )));
        }

        let (paper_width, paper_height) = self.paper.dimensions_in();
        if self.overlap_in >= paper_width.min(paper_height) {
            return Err(PosterError::Config(format!(
                "Overlap of {}in does not fit on {} paper",
                self.overlap_in,
                self.paper.title()
            )));
        }

        Ok(())
    }

    /// Directory receiving the tiles: the configured one, or the image's own
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .image_path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Name the tile file names are derived from
    pub fn image_name(&self) -> String {
        self.image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
