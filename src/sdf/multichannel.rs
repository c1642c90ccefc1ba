//! Multi-channel SDF packing.
//!
//! Each content-bearing channel of an RGBA raster gets its own independent
//! distance field; the fields are then packed into one output image.

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use super::field::{SdfParams, compute_distance_field};
use crate::error::{AssetError, AssetResult};

/// Number of input channels considered.
pub const INPUT_CHANNELS: usize = 4;

/// Routing table: `mapping[source_channel]` is the output channel index.
pub type ChannelMapping = [usize; INPUT_CHANNELS];

/// Identity routing (`R->R`, `G->G`, `B->B`, `A->A`).
pub const IDENTITY_MAPPING: ChannelMapping = [0, 1, 2, 3];

/// Result of a multi-channel SDF computation.
#[derive(Debug, Clone, PartialEq)]
pub enum SdfOutput {
    /// Exactly one channel had content; stored as grayscale.
    Single(GrayImage),
    /// Two or more channels packed into an RGB or RGBA image.
    Multi(DynamicImage),
}

impl SdfOutput {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Single(image) => image.dimensions(),
            Self::Multi(image) => (image.width(), image.height()),
        }
    }

    pub fn channel_count(&self) -> u8 {
        match self {
            Self::Single(_) => 1,
            Self::Multi(image) => image.color().channel_count(),
        }
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            Self::Single(image) => DynamicImage::ImageLuma8(image),
            Self::Multi(image) => image,
        }
    }
}

/// Which channels carry signal: a channel counts iff its min and max differ.
///
/// A single stray pixel is enough to mark a channel as content-bearing.
pub fn analyze_channels(image: &RgbaImage) -> [bool; INPUT_CHANNELS] {
    let mut min = [u8::MAX; INPUT_CHANNELS];
    let mut max = [u8::MIN; INPUT_CHANNELS];
    for pixel in image.pixels() {
        for c in 0..INPUT_CHANNELS {
            min[c] = min[c].min(pixel.0[c]);
            max[c] = max[c].max(pixel.0[c]);
        }
    }

    let mut has_content = [false; INPUT_CHANNELS];
    for c in 0..INPUT_CHANNELS {
        // Empty images leave min > max, which also reads as "no content"
        has_content[c] = min[c] < max[c];
    }
    has_content
}

/// Copy one channel of an RGBA image into a grayscale image.
pub fn extract_channel(image: &RgbaImage, channel: usize) -> GrayImage {
    let (width, height) = image.dimensions();
    let data = image
        .as_raw()
        .chunks_exact(INPUT_CHANNELS)
        .map(|px| px[channel])
        .collect();
    // Length is width * height by construction
    GrayImage::from_raw(width, height, data).unwrap_or_else(|| GrayImage::new(width, height))
}

/// Compute per-channel distance fields and pack them.
///
/// Returns `Ok(None)` when no channel has content ("no signal"); callers
/// must treat that as a failed asset, not as an empty image.
pub fn compute_multichannel_sdf(
    image: &RgbaImage,
    params: &SdfParams,
    mapping: &ChannelMapping,
) -> AssetResult<Option<SdfOutput>> {
    validate_mapping(mapping)?;

    let has_content = analyze_channels(image);
    let sources: Vec<usize> = (0..INPUT_CHANNELS).filter(|&c| has_content[c]).collect();

    match sources.as_slice() {
        [] => Ok(None),
        [only] => {
            let field = compute_distance_field(&extract_channel(image, *only), params)?;
            Ok(Some(SdfOutput::Single(field)))
        }
        _ => pack_channels(image, params, mapping, &sources).map(Some),
    }
}

fn pack_channels(
    image: &RgbaImage,
    params: &SdfParams,
    mapping: &ChannelMapping,
    sources: &[usize],
) -> AssetResult<SdfOutput> {
    let highest = sources.iter().map(|&c| mapping[c]).max().unwrap_or(0);
    let channels = (highest + 1).max(3);

    let (width, height) = image.dimensions();
    let (out_w, out_h) = params.output_size(width, height);
    let mut packed = vec![0u8; out_w as usize * out_h as usize * channels];

    for &source in sources {
        let field = compute_distance_field(&extract_channel(image, source), params)?;
        let target = mapping[source];
        for (i, value) in field.as_raw().iter().enumerate() {
            packed[i * channels + target] = *value;
        }
    }

    let packed = if channels == 3 {
        RgbImage::from_raw(out_w, out_h, packed).map(DynamicImage::ImageRgb8)
    } else {
        RgbaImage::from_raw(out_w, out_h, packed).map(DynamicImage::ImageRgba8)
    };
    packed
        .map(SdfOutput::Multi)
        .ok_or_else(|| AssetError::invalid("packed SDF buffer has the wrong length"))
}

/// Every output channel `0..INPUT_CHANNELS` appears exactly once.
pub fn is_permutation(mapping: &ChannelMapping) -> bool {
    let mut seen = [false; INPUT_CHANNELS];
    for &target in mapping {
        if target >= INPUT_CHANNELS || seen[target] {
            return false;
        }
        seen[target] = true;
    }
    true
}

fn validate_mapping(mapping: &ChannelMapping) -> AssetResult<()> {
    if is_permutation(mapping) {
        Ok(())
    } else {
        Err(AssetError::invalid(format!(
            "channel mapping {mapping:?} is not a permutation of 0..{INPUT_CHANNELS}"
        )))
    }
}
