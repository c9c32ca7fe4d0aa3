//! Result file naming and image saving.

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::GenerateError;
use crate::params::{format_extension, image_format};

/// Build the output filename for the image at `index`.
///
/// Indices are zero-based and match the order of the generation loop.
#[must_use]
pub fn result_filename(index: u32, format: &str) -> String {
    let ext = format_extension(format);
    format!("result_{index}.{ext}")
}

/// Resolve the full output path for the image at `index`.
#[must_use]
pub fn result_path(dir: &Path, index: u32, format: &str) -> PathBuf {
    dir.join(result_filename(index, format))
}

/// Create the output directory if it does not exist.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_output_dir(dir: &Path) -> Result<(), GenerateError> {
    std::fs::create_dir_all(dir).map_err(GenerateError::Io)
}

/// Encode a generated image to `path` in the requested format.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_image(image: &RgbImage, path: &Path, format: &str) -> Result<(), GenerateError> {
    image
        .save_with_format(path, image_format(format))
        .map_err(|source| GenerateError::Save { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    #[test]
    fn filename_is_zero_based_and_indexed() {
        assert_eq!(result_filename(0, "png"), "result_0.png");
        assert_eq!(result_filename(12, "png"), "result_12.png");
    }

    #[test]
    fn filename_uses_format_extension() {
        assert_eq!(result_filename(0, "jpeg"), "result_0.jpg");
        assert_eq!(result_filename(3, "webp"), "result_3.webp");
    }

    #[test]
    fn result_path_joins_directory() {
        let path = result_path(Path::new("/data/out"), 4, "png");
        assert_eq!(path, PathBuf::from("/data/out/result_4.png"));
    }

    #[test]
    fn ensure_output_dir_creates_nested_dirs() {
        let dir = std::env::temp_dir().join("cellforge_output_test/nested/deep");
        let _ = std::fs::remove_dir_all(std::env::temp_dir().join("cellforge_output_test"));

        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());

        // A second call on an existing directory is fine.
        ensure_output_dir(&dir).unwrap();

        let _ = std::fs::remove_dir_all(std::env::temp_dir().join("cellforge_output_test"));
    }

    #[test]
    fn save_writes_a_decodable_png() {
        let dir = std::env::temp_dir().join("cellforge_save_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("result_0.png");

        let img = RgbImage::from_pixel(8, 6, Rgb([1, 2, 3]));
        save_image(&img, &path, "png").unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (8, 6));
        assert_eq!(decoded.as_raw(), img.as_raw());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_to_missing_directory_errors() {
        let img = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        let path = Path::new("/nonexistent/cellforge/result_0.png");
        assert!(matches!(
            save_image(&img, path, "png").unwrap_err(),
            GenerateError::Save { .. }
        ));
    }
}
