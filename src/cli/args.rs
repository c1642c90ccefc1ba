//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_FILE;

/// Incremental game asset pipeline: SVG distance fields and DDS mip chains
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: texpipe.toml)
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print per-step debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Export signed distance fields for new or modified SVGs
    Sdf,

    /// Export DDS mip chains for new or modified PNGs
    Mips,

    /// Run `sdf` then `mips`
    #[command(visible_alias = "a")]
    All,

    /// Show what would be processed without writing anything
    #[command(visible_alias = "s")]
    Status,

    /// Write a default config file
    #[command(visible_alias = "i")]
    Init {
        /// Where to write the config (default: the `--config` path)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        path: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["texpipe", "sdf", "-v", "-C", "art/pipeline.toml"]);
        assert!(matches!(cli.command, Commands::Sdf));
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("art/pipeline.toml"));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["texpipe", "-q", "-v", "status"]).is_err());
    }

    #[test]
    fn test_init_path() {
        let cli = Cli::parse_from(["texpipe", "init", "tools/texpipe.toml"]);
        match cli.command {
            Commands::Init { path } => assert_eq!(path, Some(PathBuf::from("tools/texpipe.toml"))),
            _ => unreachable!(),
        }
    }
}
