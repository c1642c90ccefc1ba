//! Raster texture → DDS mip chain processor.

use std::path::{Path, PathBuf};

use super::transform::{AssetTransform, output_path};
use crate::config::MipsConfig;
use crate::debug;
use crate::error::{AssetError, AssetResult};
use crate::logger::Logger;
use crate::texture::{MipLayout, write_mip_chain};

const OUTPUT_EXTENSION: &str = "dds";

/// Builds a mip chain from each PNG and writes it as an uncompressed DDS.
#[derive(Debug, Clone)]
pub struct MipsProcessor {
    layout: MipLayout,
    prefix: String,
    logger: Logger,
}

impl MipsProcessor {
    pub fn new(config: &MipsConfig, logger: Logger) -> Self {
        Self {
            layout: config.layout,
            prefix: config.prefix.clone(),
            logger,
        }
    }
}

impl AssetTransform for MipsProcessor {
    fn name(&self) -> &'static str {
        "mips"
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn transform(&self, source: &Path, output_dir: &Path) -> AssetResult<Vec<PathBuf>> {
        let image = image::open(source)
            .map_err(|e| AssetError::image(source, e))?
            .to_rgba8();

        let levels = self.layout.build_chain(&image)?;
        debug!(self.logger, "mips"; "{}: {} mip levels", source.display(), levels.len());

        let destination = output_path(output_dir, source, &self.prefix, "", OUTPUT_EXTENSION);
        write_mip_chain(&levels, &destination)?;
        Ok(vec![destination])
    }
}
