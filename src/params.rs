//! Parameter validation and output-format mapping.
//!
//! Validation happens once, at the CLI boundary, before any asset I/O; the
//! compositor itself assumes its inputs are already checked.

use image::ImageFormat;

/// Validate the target image dimensions.
///
/// # Errors
///
/// Returns an error if either dimension is zero.
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), String> {
    if width == 0 || height == 0 {
        Err(format!("Image dimensions must be positive, got {width}x{height}"))
    } else {
        Ok(())
    }
}

/// Validate the sprite-count range.
///
/// # Errors
///
/// Returns an error if `min_cells` exceeds `max_cells`.
pub fn validate_cell_range(min_cells: u32, max_cells: u32) -> Result<(), String> {
    if min_cells > max_cells {
        Err(format!("min-cells ({min_cells}) must not exceed max-cells ({max_cells})"))
    } else {
        Ok(())
    }
}

/// Validate the image count.
///
/// # Errors
///
/// Returns an error if the count is zero.
pub fn validate_count(count: u32) -> Result<(), String> {
    if count == 0 {
        Err("Image count must be at least 1".to_string())
    } else {
        Ok(())
    }
}

/// Validate the output format parameter.
///
/// # Errors
///
/// Returns an error if the format is not recognized.
pub fn validate_format(format: &str) -> Result<(), String> {
    match format {
        "png" | "jpeg" | "webp" => Ok(()),
        _ => Err(format!("Unsupported format '{format}'. Valid: png, jpeg, webp")),
    }
}

/// Get the file extension for an output format.
#[must_use]
pub fn format_extension(format: &str) -> &'static str {
    match format {
        "jpeg" => "jpg",
        "webp" => "webp",
        // png and any unknown format default to png
        _ => "png",
    }
}

/// Get the encoder format for an output format.
#[must_use]
pub fn image_format(format: &str) -> ImageFormat {
    match format {
        "jpeg" => ImageFormat::Jpeg,
        "webp" => ImageFormat::WebP,
        _ => ImageFormat::Png,
    }
}
