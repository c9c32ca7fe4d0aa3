//! Directory-backed adapter for the `AssetProvider` port.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::GenerateError;
use crate::ports::AssetProvider;

/// File extensions accepted when scanning an asset directory.
const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// Serves asset paths by uniform random selection from two directories.
///
/// The file lists are collected once at construction and sorted so that
/// selection order does not depend on filesystem enumeration order. The
/// provider draws from its own generator; pass the same seed to it and to
/// the compositor to make a full run reproducible.
pub struct DirectoryProvider {
    backgrounds: Vec<PathBuf>,
    cells: Vec<PathBuf>,
    rng: StdRng,
}

impl DirectoryProvider {
    /// Scan the two asset directories and build a provider.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read or contains no files
    /// with a recognized raster extension.
    pub fn new(
        backgrounds_dir: &Path,
        cells_dir: &Path,
        seed: Option<u64>,
    ) -> Result<Self, GenerateError> {
        let backgrounds = scan_raster_files(backgrounds_dir)?;
        let cells = scan_raster_files(cells_dir)?;
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Ok(Self { backgrounds, cells, rng })
    }

    /// Number of background files found at construction.
    #[must_use]
    pub fn background_count(&self) -> usize {
        self.backgrounds.len()
    }

    /// Number of cell sprite files found at construction.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl AssetProvider for DirectoryProvider {
    fn random_background(&mut self) -> PathBuf {
        self.backgrounds[self.rng.gen_range(0..self.backgrounds.len())].clone()
    }

    fn random_cell(&mut self) -> PathBuf {
        self.cells[self.rng.gen_range(0..self.cells.len())].clone()
    }
}

/// List files in `dir` with a recognized raster extension, sorted by path.
fn scan_raster_files(dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let recognized = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| RASTER_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if recognized {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(GenerateError::EmptyAssetDir { path: dir.to_path_buf() });
    }
    files.sort();
    Ok(files)
}
