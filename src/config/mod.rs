//! Pipeline configuration management for `texpipe.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [sdf], [mips] and their [[paths]] tables
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # PipelineConfig (this file)
//! ```
//!
//! Relative `source`/`output` paths are resolved against the directory that
//! holds the config file, so a run behaves the same from any working directory.

pub mod section;
pub mod types;

pub use section::{MipsConfig, ProcessingPaths, SdfConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::log;
use crate::logger::Logger;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

/// Supported config schema version.
pub const CONFIG_VERSION: u32 = 1;

/// Default config filename
pub const CONFIG_FILE: &str = "texpipe.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing texpipe.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory holding the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Config schema version.
    pub version: u32,

    pub sdf: SdfConfig,

    pub mips: MipsConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            version: CONFIG_VERSION,
            sdf: SdfConfig::default(),
            mips: MipsConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load, resolve and validate a config file.
    ///
    /// Unknown keys are reported as warnings. Any validation error is fatal
    /// and returned as [`ConfigError::Diagnostics`].
    pub fn load(path: &Path, logger: Logger) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path, logger);
        }

        let config_path =
            std::path::absolute(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.config_path = config_path;
        config.set_root(&root);

        config.validate(logger)?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path, logger: Logger) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!(logger, "warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            log!(logger, "warning"; "- {}", field);
        }
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// `[[sdf.paths]]` resolved against the config directory.
    pub fn sdf_paths(&self) -> Vec<ProcessingPaths> {
        self.resolve_all(&self.sdf.paths)
    }

    /// `[[mips.paths]]` resolved against the config directory.
    pub fn mips_paths(&self) -> Vec<ProcessingPaths> {
        self.resolve_all(&self.mips.paths)
    }

    fn resolve_all(&self, paths: &[ProcessingPaths]) -> Vec<ProcessingPaths> {
        paths.iter().map(|p| p.resolve(&self.root)).collect()
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, reporting all errors at once.
    pub fn validate(&self, logger: Logger) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::Validation(format!(
                "unsupported config version {} (expected {CONFIG_VERSION})",
                self.version
            )));
        }

        let mut diag = ConfigDiagnostics::new();
        self.sdf.validate(&mut diag);
        self.mips.validate(&mut diag);

        diag.print_warnings(logger);
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    // ========================================================================
    // init
    // ========================================================================

    /// Commented default config written by `texpipe init`.
    pub fn template() -> String {
        let sdf = SdfConfig::default();
        format!(
            r#"# texpipe configuration (v{pkg})
version = {CONFIG_VERSION}

[sdf]
svg_rasterization_size = {raster}   # Raster size of the dominant axis (px)
max_output_size = {output}          # Distance field size of the dominant axis (px)
max_relative_distance = {distance}  # Clip distance as a fraction of max(H, W)
threshold = {threshold}             # Binarization cut point
channel_mapping = [0, 1, 2, 3]      # Source channel -> output channel
prefix = "{prefix}"
single_postfix = "{single}"
multi_postfix = "{multi}"

# [[sdf.paths]]
# source = "art/icons"
# output = "export/icons"

[mips]
layout = "atlas"                    # atlas | generate
prefix = ""

# [[mips.paths]]
# source = "art/textures"
# output = "export/textures"
"#,
            pkg = env!("CARGO_PKG_VERSION"),
            raster = sdf.svg_rasterization_size,
            output = sdf.max_output_size,
            distance = sdf.max_relative_distance,
            threshold = sdf.threshold,
            prefix = sdf.prefix,
            single = sdf.single_postfix,
            multi = sdf.multi_postfix,
        )
    }

    /// Write [`Self::template`] to `path`, refusing to overwrite.
    pub fn write_template(path: &Path) -> Result<(), ConfigError> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => ConfigError::Validation(format!(
                    "`{}` already exists, refusing to overwrite",
                    path.display()
                )),
                _ => ConfigError::Io(path.to_path_buf(), err),
            })?;
        file.write_all(Self::template().as_bytes())
            .map_err(|err| ConfigError::Io(path.to_path_buf(), err))
    }
}

// ============================================================================
// tests
// ============================================================================
