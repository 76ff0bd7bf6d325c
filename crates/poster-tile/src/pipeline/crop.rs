//! Tile croppers

use crate::constants::CONVERT_PROGRAM;
use crate::layout::Tile;
use crate::types::*;
use image::DynamicImage;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;

use super::CropExecutor;

/// Arguments for `convert` writing one tile.
///
/// `+repage` drops the virtual canvas offset so the tile starts at 0,0.
pub fn convert_args(source: &Path, tile: &Tile, destination: &Path) -> Vec<OsString> {
    vec![
        source.as_os_str().to_owned(),
        OsString::from("-crop"),
        OsString::from(tile.crop_geometry()),
        OsString::from("+repage"),
        destination.as_os_str().to_owned(),
    ]
}

/// Crops with ImageMagick's `convert`, one process per tile
#[derive(Debug, Clone)]
pub struct ConvertCropper {
    program: String,
}

impl ConvertCropper {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ConvertCropper {
    fn default() -> Self {
        Self::new(CONVERT_PROGRAM)
    }
}

impl CropExecutor for ConvertCropper {
    async fn crop(&mut self, source: &Path, tile: &Tile, destination: &Path) -> Result<()> {
        let args = convert_args(source, tile, destination);
        log::debug!(
            "Run {} {}",
            self.program,
            args.iter()
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| crop_error(tile, format!("cannot run {}: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            log::info!("{}", stdout.trim_end());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            log::warn!("{}", stderr.trim_end());
        }

        if !output.status.success() {
            return Err(crop_error(
                tile,
                format!("{} exited with {}", self.program, output.status),
            ));
        }
        Ok(())
    }
}

/// Crops in-process with the `image` crate.
///
/// The source is decoded once and reused for every tile of the run.
#[derive(Debug, Default)]
pub struct NativeCropper {
    decoded: Option<(PathBuf, Arc<DynamicImage>)>,
}

impl NativeCropper {
    pub fn new() -> Self {
        Self::default()
    }

    async fn source_image(&mut self, source: &Path) -> Result<Arc<DynamicImage>> {
        if let Some((path, image)) = &self.decoded {
            if path == source {
                return Ok(Arc::clone(image));
            }
        }

        let path = source.to_owned();
        let image = tokio::task::spawn_blocking(move || image::open(&path)).await??;
        let image = Arc::new(image);
        self.decoded = Some((source.to_owned(), Arc::clone(&image)));
        Ok(image)
    }
}

impl CropExecutor for NativeCropper {
    async fn crop(&mut self, source: &Path, tile: &Tile, destination: &Path) -> Result<()> {
        let image = self.source_image(source).await?;

        // Rounding slack on the binding axis can reach past the image edge
        let (left, top, width, height) = tile.clamped(image.width(), image.height());
        let destination = destination.to_owned();

        tokio::task::spawn_blocking(move || {
            image
                .crop_imm(left, top, width, height)
                .save(&destination)
        })
        .await?
        .map_err(|e| crop_error(tile, e.to_string()))
    }
}

fn crop_error(tile: &Tile, message: String) -> PosterError {
    PosterError::Crop {
        tile: tile.name.clone(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridPosition;

    #[test]
    fn test_convert_args() {
        let tile = Tile {
            name: "poster-1-0.jpg".to_string(),
            position: GridPosition::new(1, 0),
            left: 0,
            top: 1962,
            width: 1509,
            height: 438,
        };

        let args = convert_args(
            Path::new("poster.jpg"),
            &tile,
            Path::new("out/poster-1-0.jpg"),
        );

        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec![
                "poster.jpg",
                "-crop",
                "1509x438+0+1962",
                "+repage",
                "out/poster-1-0.jpg"
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_convert_failure_is_crop_error() {
        let tile = Tile {
            name: "a-0-0.png".to_string(),
            position: GridPosition::new(0, 0),
            left: 0,
            top: 0,
            width: 10,
            height: 10,
        };
        let mut cropper = ConvertCropper::new("false");

        let result = cropper
            .crop(Path::new("a.png"), &tile, Path::new("a-0-0.png"))
            .await;

        match result {
            Err(PosterError::Crop { tile, message }) => {
                assert_eq!(tile, "a-0-0.png");
                assert!(message.starts_with("false exited"));
            }
            other => panic!("Expected Crop error, got {other:?}"),
        }
    }
}
