//! SVG → signed distance field PNG processor.

use std::path::{Path, PathBuf};

use image::ImageFormat;

use super::transform::{AssetTransform, output_path};
use crate::config::SdfConfig;
use crate::debug;
use crate::error::{AssetError, AssetResult};
use crate::logger::Logger;
use crate::sdf::{ChannelMapping, SdfOutput, SdfParams, compute_multichannel_sdf};
use crate::texture::rasterize_svg;

const OUTPUT_EXTENSION: &str = "png";

/// Rasterizes each SVG and exports its (multi-channel) distance field.
#[derive(Debug, Clone)]
pub struct SdfProcessor {
    params: SdfParams,
    raster_size: u32,
    mapping: ChannelMapping,
    prefix: String,
    single_postfix: String,
    multi_postfix: String,
    logger: Logger,
}

impl SdfProcessor {
    pub fn new(config: &SdfConfig, logger: Logger) -> Self {
        Self {
            params: config.params(),
            raster_size: config.svg_rasterization_size,
            mapping: config.channel_mapping,
            prefix: config.prefix.clone(),
            single_postfix: config.single_postfix.clone(),
            multi_postfix: config.multi_postfix.clone(),
            logger,
        }
    }

    fn postfix(&self, output: &SdfOutput) -> &str {
        match output {
            SdfOutput::Single(_) => &self.single_postfix,
            SdfOutput::Multi(_) => &self.multi_postfix,
        }
    }
}

impl AssetTransform for SdfProcessor {
    fn name(&self) -> &'static str {
        "sdf"
    }

    fn extension(&self) -> &'static str {
        "svg"
    }

    fn transform(&self, source: &Path, output_dir: &Path) -> AssetResult<Vec<PathBuf>> {
        // The clip distance doubles as the transparent raster margin
        let raster = rasterize_svg(source, self.raster_size, self.params.max_relative_distance)?;
        debug!(self.logger, "sdf"; "rasterized {} at {}x{}", source.display(), raster.width(), raster.height());

        let output = compute_multichannel_sdf(&raster, &self.params, &self.mapping)?
            .ok_or_else(|| {
                AssetError::invalid(format!(
                    "`{}` has no signal: every channel is uniform",
                    source.display()
                ))
            })?;
        debug!(
            self.logger, "sdf";
            "{} channel(s), {}x{}",
            output.channel_count(),
            output.dimensions().0,
            output.dimensions().1
        );

        let destination = output_path(
            output_dir,
            source,
            &self.prefix,
            self.postfix(&output),
            OUTPUT_EXTENSION,
        );
        output
            .into_dynamic()
            .save_with_format(&destination, ImageFormat::Png)
            .map_err(|e| AssetError::image(&destination, e))?;

        Ok(vec![destination])
    }
}
