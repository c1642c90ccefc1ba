//! texpipe - incremental game asset pipeline.
//!
//! Tracks every source asset with a content-hashed side-car record and only
//! reprocesses what changed: SVG icons become signed distance field PNGs,
//! PNG textures become DDS mip chains.

#![allow(dead_code)]

mod cli;
mod config;
mod error;
mod logger;
mod metadata;
mod pipeline;
mod sdf;
mod texture;

use anyhow::{Result, bail};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, process::Processors};
use config::PipelineConfig;
use logger::Logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let logger = Logger::new(cli.verbose, cli.quiet);

    if let Commands::Init { path } = &cli.command {
        return cli::init::write_config(path.as_ref().unwrap_or(&cli.config), logger);
    }

    if !cli.config.exists() {
        bail!(
            "config file '{}' not found. Run 'texpipe init' to create one.",
            cli.config.display()
        );
    }
    let config = PipelineConfig::load(&cli.config, logger)?;

    match cli.command {
        Commands::Sdf => cli::process::run(&config, Processors::Sdf, logger).map(|_| ()),
        Commands::Mips => cli::process::run(&config, Processors::Mips, logger).map(|_| ()),
        Commands::All => cli::process::run(&config, Processors::All, logger).map(|_| ()),
        Commands::Status => cli::status::show_status(&config, logger).map(|_| ()),
        Commands::Init { .. } => Ok(()),
    }
}
