//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

/// Synthetic cell-image dataset generator.
///
/// Composites randomly rotated, semi-transparent cell sprites onto
/// backgrounds and adds pixel noise. Numeric flags left unset fall back to
/// the config file's `[defaults]` section, then to built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "cellforge", version, about)]
pub struct Cli {
    /// Directory to write result images into (created if absent).
    #[arg(default_value = "output")]
    pub output_dir: PathBuf,

    /// Directory holding background images.
    #[arg(short, long)]
    pub backgrounds: Option<PathBuf>,

    /// Directory holding cell sprite images.
    #[arg(short = 'c', long)]
    pub cells: Option<PathBuf>,

    /// Number of images to generate.
    #[arg(short = 'n', long)]
    pub count: Option<u32>,

    /// Target image width in pixels.
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Target image height in pixels.
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Minimum sprite count per image.
    #[arg(long)]
    pub min_cells: Option<u32>,

    /// Maximum sprite count per image.
    #[arg(long)]
    pub max_cells: Option<u32>,

    /// Seed for the compositor and the asset picker; omit for entropy.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output format: png, jpeg, webp.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cli = Cli::parse_from(["cellforge"]);
        assert_eq!(cli.output_dir, PathBuf::from("output"));
        assert!(cli.backgrounds.is_none());
        assert!(cli.cells.is_none());
        assert!(cli.count.is_none());
        assert!(cli.width.is_none());
        assert!(cli.height.is_none());
        assert!(cli.min_cells.is_none());
        assert!(cli.max_cells.is_none());
        assert!(cli.seed.is_none());
        assert!(cli.format.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn all_options() {
        let cli = Cli::parse_from([
            "cellforge",
            "-b",
            "/data/bg",
            "-c",
            "/data/cells",
            "-n",
            "12",
            "-w",
            "800",
            "-H",
            "600",
            "--min-cells",
            "2",
            "--max-cells",
            "9",
            "-s",
            "42",
            "-f",
            "jpeg",
            "-v",
            "out/run1",
        ]);
        assert_eq!(cli.output_dir, PathBuf::from("out/run1"));
        assert_eq!(cli.backgrounds.as_deref(), Some(std::path::Path::new("/data/bg")));
        assert_eq!(cli.cells.as_deref(), Some(std::path::Path::new("/data/cells")));
        assert_eq!(cli.count, Some(12));
        assert_eq!(cli.width, Some(800));
        assert_eq!(cli.height, Some(600));
        assert_eq!(cli.min_cells, Some(2));
        assert_eq!(cli.max_cells, Some(9));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.format.as_deref(), Some("jpeg"));
        assert!(cli.verbose);
    }

    #[test]
    fn seed_accepts_large_values() {
        let cli = Cli::parse_from(["cellforge", "--seed", "18446744073709551615"]);
        assert_eq!(cli.seed, Some(u64::MAX));
    }
}
