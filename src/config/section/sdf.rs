//! `[sdf]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [sdf]
//! svg_rasterization_size = 4096   # Raster size of the dominant axis
//! max_output_size = 512           # Distance field size of the dominant axis
//! max_relative_distance = 0.03    # Clip distance as a fraction of max(H, W)
//! threshold = 127                 # Binarization cut point
//! channel_mapping = [0, 1, 2, 3]  # Source channel -> output channel
//! prefix = "T_"
//! single_postfix = "_SDF"
//! multi_postfix = "_MSDF"
//!
//! [[sdf.paths]]
//! source = "art/icons"
//! output = "export/icons"
//! ```

use serde::{Deserialize, Serialize};

use super::ProcessingPaths;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::sdf::{
    ChannelMapping, DEFAULT_THRESHOLD, IDENTITY_MAPPING, INPUT_CHANNELS, SdfParams, is_permutation,
};

/// Distance field export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdfConfig {
    pub svg_rasterization_size: u32,
    pub max_output_size: u32,
    pub max_relative_distance: f64,
    pub threshold: u8,
    pub channel_mapping: ChannelMapping,
    pub prefix: String,
    pub single_postfix: String,
    pub multi_postfix: String,
    pub paths: Vec<ProcessingPaths>,
}

impl Default for SdfConfig {
    fn default() -> Self {
        Self {
            svg_rasterization_size: 4096,
            max_output_size: 512,
            max_relative_distance: 0.03,
            threshold: DEFAULT_THRESHOLD,
            channel_mapping: IDENTITY_MAPPING,
            prefix: "T_".into(),
            single_postfix: "_SDF".into(),
            multi_postfix: "_MSDF".into(),
            paths: Vec::new(),
        }
    }
}

impl SdfConfig {
    const SVG_RASTERIZATION_SIZE: FieldPath = FieldPath::new("sdf.svg_rasterization_size");
    const MAX_OUTPUT_SIZE: FieldPath = FieldPath::new("sdf.max_output_size");
    const MAX_RELATIVE_DISTANCE: FieldPath = FieldPath::new("sdf.max_relative_distance");
    const CHANNEL_MAPPING: FieldPath = FieldPath::new("sdf.channel_mapping");
    const PATHS: FieldPath = FieldPath::new("sdf.paths");

    /// Raster pixels folded into one output pixel per axis.
    pub const fn downsample_factor(&self) -> u32 {
        if self.max_output_size == 0 {
            1
        } else {
            self.svg_rasterization_size / self.max_output_size
        }
    }

    /// Parameters handed to the distance field transform.
    pub const fn params(&self) -> SdfParams {
        SdfParams::new(
            self.max_relative_distance,
            self.downsample_factor(),
            self.threshold,
        )
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.svg_rasterization_size == 0 {
            diag.error(Self::SVG_RASTERIZATION_SIZE, "must be greater than 0");
        }
        if self.max_output_size == 0 {
            diag.error(Self::MAX_OUTPUT_SIZE, "must be greater than 0");
        }
        if self.svg_rasterization_size > 0
            && self.max_output_size > 0
            && (self.svg_rasterization_size < self.max_output_size
                || self.svg_rasterization_size % self.max_output_size != 0)
        {
            diag.error_with_hint(
                Self::SVG_RASTERIZATION_SIZE,
                format!(
                    "{} is not a multiple of max_output_size ({})",
                    self.svg_rasterization_size, self.max_output_size
                ),
                "use sizes such as 4096 and 512 (downsample factor 8)",
            );
        }

        let distance = self.max_relative_distance;
        if !(distance > 0.0 && distance < 0.5) {
            diag.error_with_hint(
                Self::MAX_RELATIVE_DISTANCE,
                format!("{distance} is outside (0, 0.5)"),
                "typical values are between 0.01 and 0.1",
            );
        }

        if !is_permutation(&self.channel_mapping) {
            diag.error_with_hint(
                Self::CHANNEL_MAPPING,
                format!("{:?} is not a permutation of 0..{INPUT_CHANNELS}", self.channel_mapping),
                "every output channel 0, 1, 2, 3 must appear exactly once",
            );
        }

        if self.paths.is_empty() {
            diag.warn(Self::PATHS, "no directories configured, `sdf` will do nothing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(config: &SdfConfig) -> Vec<&'static str> {
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        diag.errors().iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = SdfConfig::default();
        assert!(errors(&config).is_empty());
        assert_eq!(config.downsample_factor(), 8);
        assert_eq!(config.params().downsample_factor, 8);
    }

    #[test]
    fn test_empty_paths_only_warns() {
        let mut diag = ConfigDiagnostics::new();
        SdfConfig::default().validate(&mut diag);
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_non_multiple_sizes_rejected() {
        let config = SdfConfig {
            svg_rasterization_size: 1000,
            max_output_size: 512,
            ..SdfConfig::default()
        };
        assert_eq!(errors(&config), vec!["sdf.svg_rasterization_size"]);
    }

    #[test]
    fn test_zero_output_size_rejected() {
        let config = SdfConfig {
            max_output_size: 0,
            ..SdfConfig::default()
        };
        assert_eq!(errors(&config), vec!["sdf.max_output_size"]);
        assert_eq!(config.downsample_factor(), 1);
    }

    #[test]
    fn test_distance_bounds() {
        for bad in [0.0, -0.1, 0.5, f64::NAN] {
            let config = SdfConfig {
                max_relative_distance: bad,
                ..SdfConfig::default()
            };
            assert_eq!(errors(&config), vec!["sdf.max_relative_distance"], "{bad}");
        }
    }

    #[test]
    fn test_channel_mapping_must_be_permutation() {
        let config = SdfConfig {
            channel_mapping: [0, 1, 1, 3],
            ..SdfConfig::default()
        };
        assert_eq!(errors(&config), vec!["sdf.channel_mapping"]);
    }
}
