//! Cellforge - synthetic cell-image dataset generator.

mod adapters;
mod cli;
mod compositor;
mod config;
mod error;
mod output;
mod params;
mod ports;

use std::process;

use clap::Parser;

use crate::adapters::directory::DirectoryProvider;
use crate::cli::Cli;
use crate::compositor::{Compositor, GeneratorConfig};
use crate::config::Config;
use crate::output::{ensure_output_dir, result_path, save_image};
use crate::params::{validate_cell_range, validate_count, validate_dimensions, validate_format};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), error::GenerateError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(error::GenerateError::Config)?;

    // Resolve parameters: CLI flag, then config defaults
    let width = cli.width.unwrap_or(config.defaults.width);
    let height = cli.height.unwrap_or(config.defaults.height);
    let count = cli.count.unwrap_or(config.defaults.count);
    let min_cells = cli.min_cells.unwrap_or(config.defaults.min_cells);
    let max_cells = cli.max_cells.unwrap_or(config.defaults.max_cells);
    let format = cli.format.unwrap_or_else(|| config.defaults.format.clone());

    // Resolve asset directories: CLI flag, then config
    let backgrounds_dir = cli.backgrounds.or(config.assets.backgrounds).ok_or_else(|| {
        error::GenerateError::InvalidArgument(
            "No backgrounds directory. Pass --backgrounds or set [assets] backgrounds in the config file."
                .to_string(),
        )
    })?;
    let cells_dir = cli.cells.or(config.assets.cells).ok_or_else(|| {
        error::GenerateError::InvalidArgument(
            "No cells directory. Pass --cells or set [assets] cells in the config file."
                .to_string(),
        )
    })?;

    // Validate parameters before touching any asset I/O
    validate_dimensions(width, height).map_err(error::GenerateError::InvalidArgument)?;
    validate_cell_range(min_cells, max_cells).map_err(error::GenerateError::InvalidArgument)?;
    validate_count(count).map_err(error::GenerateError::InvalidArgument)?;
    validate_format(&format).map_err(error::GenerateError::InvalidArgument)?;

    let mut provider = DirectoryProvider::new(&backgrounds_dir, &cells_dir, cli.seed)?;

    if cli.verbose {
        eprintln!(
            "Assets: {} backgrounds, {} cells",
            provider.background_count(),
            provider.cell_count()
        );
        match cli.seed {
            Some(seed) => eprintln!("Seed: {seed}"),
            None => eprintln!("Seed: entropy"),
        }
    }

    let mut compositor = Compositor::new(GeneratorConfig {
        img_height: height,
        img_width: width,
        num_imgs: count,
        min_cells,
        max_cells,
        seed: cli.seed,
    });

    ensure_output_dir(&cli.output_dir)?;

    for index in 0..count {
        let image = compositor.generate_image(&mut provider)?;
        let path = result_path(&cli.output_dir, index, &format);
        save_image(&image, &path, &format)?;
        eprintln!("Saved: {}", path.display());
    }

    Ok(())
}
