//! Mip chain construction.
//!
//! Two source layouts are supported:
//!
//! ```text
//! atlas                                  generate
//! ┌───────────────┬───────┬───┬─┐        ┌───────────────┐
//! │               │  1    │ 2 │3│        │               │
//! │      0        ├───────┴───┴─┘        │      0        │ ──► resize /2 ──► ...
//! │               │                      │               │
//! └───────────────┘                      └───────────────┘
//! ```
//!
//! In an atlas the base level fills the left half and every further level
//! follows left-to-right, top-aligned. `generate` only needs the base image.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::{AssetError, AssetResult};

/// How a source image provides its mip levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MipLayout {
    /// Levels are pre-authored side by side in one image.
    #[default]
    Atlas,
    /// Levels are downsampled from the full image.
    Generate,
}

impl MipLayout {
    /// Build the chain for `image` using this layout.
    pub fn build_chain(self, image: &RgbaImage) -> AssetResult<Vec<RgbaImage>> {
        match self {
            Self::Atlas => slice_mip_atlas(image),
            Self::Generate => generate_mip_chain(image),
        }
    }
}

/// Number of levels down to 1x1: `floor(log2(max(w, h))) + 1`.
pub fn mip_count(width: u32, height: u32) -> u32 {
    width.max(height).max(1).ilog2() + 1
}

/// Dimensions of `level`, halving (rounding down) with a floor of 1.
pub fn mip_size(width: u32, height: u32, level: u32) -> (u32, u32) {
    let shrink = |v: u32| v.checked_shr(level).unwrap_or(0).max(1);
    (shrink(width), shrink(height))
}

/// Region of one level inside an atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Level regions of an atlas of `atlas_width` x `atlas_height`.
pub fn atlas_mip_rects(atlas_width: u32, atlas_height: u32) -> Vec<MipRect> {
    let base_width = (atlas_width / 2).max(1);
    let base_height = atlas_height.max(1);

    let mut x = 0;
    (0..mip_count(base_width, base_height))
        .map(|level| {
            let (width, height) = mip_size(base_width, base_height, level);
            let rect = MipRect {
                x,
                y: 0,
                width,
                height,
            };
            x += width;
            rect
        })
        .collect()
}

/// Cut the levels out of an atlas image.
pub fn slice_mip_atlas(image: &RgbaImage) -> AssetResult<Vec<RgbaImage>> {
    let (atlas_width, atlas_height) = image.dimensions();
    if atlas_width < 2 || atlas_height == 0 {
        return Err(AssetError::invalid(format!(
            "{atlas_width}x{atlas_height} image is too small for a mip atlas"
        )));
    }

    atlas_mip_rects(atlas_width, atlas_height)
        .into_iter()
        .enumerate()
        .map(|(level, rect)| {
            if rect.x + rect.width > atlas_width || rect.y + rect.height > atlas_height {
                return Err(AssetError::invalid(format!(
                    "mip level {level} ({}x{} at x={}) does not fit a {atlas_width}x{atlas_height} atlas",
                    rect.width, rect.height, rect.x
                )));
            }
            Ok(imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image())
        })
        .collect()
}

/// Downsample `image` level by level to 1x1 with a triangle filter.
pub fn generate_mip_chain(image: &RgbaImage) -> AssetResult<Vec<RgbaImage>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::invalid("cannot build mips for an empty image"));
    }

    let mut chain = vec![image.clone()];
    for level in 1..mip_count(width, height) {
        let (w, h) = mip_size(width, height, level);
        let previous = chain.last().unwrap_or(image);
        let next = imageops::resize(previous, w, h, FilterType::Triangle);
        chain.push(next);
    }
    Ok(chain)
}
