//! Shared constants for poster tiling
//!
//! This module centralizes the fixed physical quantities and the rounding
//! helper used by the geometry and the summary output.

// =============================================================================
// Physical Layout
// =============================================================================

/// Strip of image printed twice on adjacent sheets (inches)
pub const OVERLAP_IN: f64 = 0.1;

// =============================================================================
// External Tools
// =============================================================================

/// ImageMagick program reporting image dimensions
pub const IDENTIFY_PROGRAM: &str = "identify";

/// ImageMagick program cropping a tile
pub const CONVERT_PROGRAM: &str = "convert";

/// Format string making `identify` print "<width> <height>" per frame
pub const IDENTIFY_FORMAT: &str = "%w %h\\n";

// =============================================================================
// Summary Output
// =============================================================================

/// Decimals shown for aspect ratios
pub const RATIO_DIGITS: i32 = 3;

/// Decimals shown for physical sizes in inches
pub const INCH_DIGITS: i32 = 1;

/// Round `value` to `digits` decimal places
#[inline]
pub fn round_to(value: f64, digits: i32) -> f64 {
    let multiply = 10f64.powi(digits);
    (value * multiply).round() / multiply
}
