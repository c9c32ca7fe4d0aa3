//! Asset provider port for background and cell sprite sources.

use std::path::PathBuf;

/// Supplies file paths to background and cell sprite images on demand.
///
/// Every returned path must point at a decodable raster file; the compositor
/// reports a decode failure as [`GenerateError::AssetLoad`] and aborts the
/// run. Providers own their selection randomness (hence `&mut self`) and may
/// be seeded so that a full generation run is reproducible.
///
/// [`GenerateError::AssetLoad`]: crate::error::GenerateError::AssetLoad
pub trait AssetProvider {
    /// Pick a background image path.
    fn random_background(&mut self) -> PathBuf;

    /// Pick a cell sprite image path.
    fn random_cell(&mut self) -> PathBuf;
}
