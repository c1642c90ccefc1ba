//! `[mips]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [mips]
//! layout = "atlas"    # atlas | generate
//! prefix = ""
//!
//! [[mips.paths]]
//! source = "art/textures"
//! output = "export/textures"
//! ```

use serde::{Deserialize, Serialize};

use super::ProcessingPaths;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::texture::MipLayout;

/// Mip chain export settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MipsConfig {
    /// How source images provide their levels.
    pub layout: MipLayout,
    /// Prepended to the source stem of every `.dds` output.
    pub prefix: String,
    pub paths: Vec<ProcessingPaths>,
}

impl MipsConfig {
    const PATHS: FieldPath = FieldPath::new("mips.paths");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.paths.is_empty() {
            diag.warn(Self::PATHS, "no directories configured, `mips` will do nothing");
        }
    }
}
