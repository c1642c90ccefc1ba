//! SVG rasterization using usvg + resvg.
//!
//! The SVG is scaled to fit a power-of-two texture whose dominant side is
//! `max_resolution`, keeping its aspect ratio and a transparent margin on
//! every side so distance fields have room to fall off.

use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use resvg::tiny_skia;

use crate::error::{AssetError, AssetResult};

/// Relative slack under which a size snaps down to the lower power of two.
const POWER_OF_TWO_THRESHOLD: f64 = 0.05;

/// Round `n` to a power of two.
///
/// Returns the lower power of two when `n` exceeds it by less than
/// `threshold` (relative), the next higher one otherwise.
pub fn nearest_power_of_two(n: f64, threshold: f64) -> u32 {
    if n <= 0.0 || !n.is_finite() {
        return 0;
    }
    let exponent = n.log2();
    let lower = exponent.floor().exp2();
    let higher = exponent.ceil().exp2();
    let snapped = if (n - lower) / lower < threshold {
        lower
    } else {
        higher
    };
    (snapped as u32).max(1)
}

/// Texture size and placement of the SVG content inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderLayout {
    pub width: u32,
    pub height: u32,
    pub offset_x: f64,
    pub offset_y: f64,
    pub render_width: f64,
    pub render_height: f64,
}

impl RenderLayout {
    /// Compute the layout for an SVG of `svg_size` (width, height).
    ///
    /// `margin` is a fraction of the dominant texture side, in `[0, 0.5)`.
    pub fn compute(svg_size: (f64, f64), max_resolution: u32, margin: f64) -> AssetResult<Self> {
        let (svg_width, svg_height) = svg_size;
        if !(svg_width > 0.0 && svg_height > 0.0) {
            return Err(AssetError::invalid(format!(
                "svg has no area ({svg_width}x{svg_height})"
            )));
        }
        if max_resolution == 0 {
            return Err(AssetError::invalid("max resolution must be positive"));
        }
        if !(0.0..0.5).contains(&margin) {
            return Err(AssetError::invalid(format!(
                "margin must be in [0, 0.5), got {margin}"
            )));
        }

        let ratio = svg_width / svg_height;
        let dominant = nearest_power_of_two(f64::from(max_resolution), POWER_OF_TWO_THRESHOLD);
        let abs_margin = f64::from(dominant) * margin;

        let (width, height, render_width, render_height) = if svg_width >= svg_height {
            let render_width = f64::from(dominant) - 2.0 * abs_margin;
            let render_height = render_width / ratio;
            let height =
                nearest_power_of_two(render_height + 2.0 * abs_margin, POWER_OF_TWO_THRESHOLD);
            (dominant, height, render_width, render_height)
        } else {
            let render_height = f64::from(dominant) - 2.0 * abs_margin;
            let render_width = render_height * ratio;
            let width =
                nearest_power_of_two(render_width + 2.0 * abs_margin, POWER_OF_TWO_THRESHOLD);
            (width, dominant, render_width, render_height)
        };

        Ok(Self {
            width,
            height,
            offset_x: (f64::from(width) - render_width) / 2.0,
            offset_y: (f64::from(height) - render_height) / 2.0,
            render_width,
            render_height,
        })
    }
}

/// Rasterize an SVG file to a straight-alpha RGBA image.
pub fn rasterize_svg(path: &Path, max_resolution: u32, margin: f64) -> AssetResult<RgbaImage> {
    let data = fs::read(path).map_err(|e| AssetError::io(path, e))?;
    rasterize_svg_data(&data, max_resolution, margin)
        .map_err(|e| match e {
            AssetError::InvalidInput(msg) => {
                AssetError::invalid(format!("`{}`: {msg}", path.display()))
            }
            other => other,
        })
}

/// Rasterize SVG bytes. See [`rasterize_svg`].
pub fn rasterize_svg_data(data: &[u8], max_resolution: u32, margin: f64) -> AssetResult<RgbaImage> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default())
        .map_err(|e| AssetError::invalid(format!("failed to parse svg: {e}")))?;

    let size = tree.size();
    let svg_size = (f64::from(size.width()), f64::from(size.height()));
    let layout = RenderLayout::compute(svg_size, max_resolution, margin)?;

    let mut pixmap = tiny_skia::Pixmap::new(layout.width, layout.height).ok_or_else(|| {
        AssetError::invalid(format!(
            "cannot allocate {}x{} pixmap",
            layout.width, layout.height
        ))
    })?;

    #[allow(clippy::cast_possible_truncation)]
    let transform = tiny_skia::Transform::from_row(
        (layout.render_width / svg_size.0) as f32,
        0.0,
        0.0,
        (layout.render_height / svg_size.1) as f32,
        layout.offset_x as f32,
        layout.offset_y as f32,
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let mut image = RgbaImage::new(layout.width, layout.height);
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    Ok(image)
}
