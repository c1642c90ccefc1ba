//! `texpipe init`: write a default config.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::PipelineConfig;
use crate::log;
use crate::logger::Logger;

/// Write the default config template to `path`. Never overwrites.
pub fn write_config(path: &Path, logger: Logger) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    PipelineConfig::write_template(path)?;
    log!(logger, "init"; "wrote {}", path.display());
    log!(logger, "init"; "add [[sdf.paths]] or [[mips.paths]] entries, then run `texpipe sdf`");
    Ok(())
}
