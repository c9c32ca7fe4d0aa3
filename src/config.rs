//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Asset directory locations.
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Default generation parameters (used when CLI flags are absent).
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Asset directory locations.
#[derive(Debug, Default, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding background images.
    pub backgrounds: Option<PathBuf>,
    /// Directory holding cell sprite images.
    pub cells: Option<PathBuf>,
}

/// Default generation parameters from the config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Target image width in pixels.
    pub width: u32,
    /// Target image height in pixels.
    pub height: u32,
    /// Number of images to generate.
    pub count: u32,
    /// Minimum sprite count per image.
    pub min_cells: u32,
    /// Maximum sprite count per image.
    pub max_cells: u32,
    /// Output image format.
    pub format: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            count: 5,
            min_cells: 5,
            max_cells: 25,
            format: "png".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `CELLFORGE_CONFIG` environment variable
/// 3. `~/.config/cellforge/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("CELLFORGE_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/cellforge/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/cellforge/config.toml")
    } else {
        PathBuf::from("cellforge.toml")
    }
}
