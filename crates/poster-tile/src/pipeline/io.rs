//! Image dimension providers

use crate::constants::{IDENTIFY_FORMAT, IDENTIFY_PROGRAM};
use crate::types::*;
use std::path::Path;
use tokio::process::Command;

use super::ImageMetrics;

/// Reads dimensions with ImageMagick's `identify`
#[derive(Debug, Clone)]
pub struct IdentifyMetrics {
    program: String,
}

impl IdentifyMetrics {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for IdentifyMetrics {
    fn default() -> Self {
        Self::new(IDENTIFY_PROGRAM)
    }
}

impl ImageMetrics for IdentifyMetrics {
    async fn dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        log::debug!(
            "Run {} -format {} {}",
            self.program,
            IDENTIFY_FORMAT,
            path.display()
        );

        let output = Command::new(&self.program)
            .arg("-format")
            .arg(IDENTIFY_FORMAT)
            .arg(path)
            .output()
            .await
            .map_err(|e| metrics_error(path, format!("cannot run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(metrics_error(
                path,
                format!("{} failed ({}): {}", self.program, output.status, stderr.trim()),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_identify_output(&stdout).ok_or_else(|| {
            metrics_error(
                path,
                format!("unexpected {} output '{}'", self.program, stdout.trim()),
            )
        })
    }
}

/// Parse `identify -format "%w %h\n"` output.
///
/// Multi-frame images print one line per frame; the first frame wins.
pub fn parse_identify_output(text: &str) -> Option<(u32, u32)> {
    let line = text.lines().map(str::trim).find(|line| !line.is_empty())?;
    let mut parts = line.split_whitespace();
    let width = parts.next()?.parse().ok()?;
    let height = parts.next()?.parse().ok()?;
    Some((width, height))
}

/// Reads dimensions from the image header with the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeMetrics;

impl ImageMetrics for NativeMetrics {
    async fn dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        let owned = path.to_owned();
        tokio::task::spawn_blocking(move || image::image_dimensions(&owned))
            .await?
            .map_err(|e| metrics_error(path, e.to_string()))
    }
}

fn metrics_error(path: &Path, message: String) -> PosterError {
    PosterError::Metrics {
        path: path.to_owned(),
        message,
    }
}
