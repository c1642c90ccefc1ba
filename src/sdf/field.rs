//! Single-channel signed distance field.

use image::GrayImage;

use super::edt::distance_transform;
use crate::error::{AssetError, AssetResult};

/// Default binarization cut point.
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Parameters shared by single and multi-channel SDF computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SdfParams {
    /// Clip distance as a fraction of `max(height, width)` of the input.
    pub max_relative_distance: f64,
    /// Edge length of the square blocks averaged into one output sample.
    pub downsample_factor: u32,
    /// Samples `>= threshold` are foreground.
    pub threshold: u8,
}

impl Default for SdfParams {
    fn default() -> Self {
        Self {
            max_relative_distance: 0.1,
            downsample_factor: 4,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl SdfParams {
    pub const fn new(max_relative_distance: f64, downsample_factor: u32, threshold: u8) -> Self {
        Self {
            max_relative_distance,
            downsample_factor,
            threshold,
        }
    }

    /// Output dimensions for an input of `width` x `height`.
    ///
    /// Trailing rows/columns that do not fill a whole block are dropped.
    pub const fn output_size(&self, width: u32, height: u32) -> (u32, u32) {
        if self.downsample_factor == 0 {
            return (0, 0);
        }
        (width / self.downsample_factor, height / self.downsample_factor)
    }

    pub(super) fn validate(&self, width: u32, height: u32) -> AssetResult<()> {
        if self.downsample_factor == 0 {
            return Err(AssetError::invalid("downsample factor must be at least 1"));
        }
        if !(self.max_relative_distance.is_finite() && self.max_relative_distance > 0.0) {
            return Err(AssetError::invalid(format!(
                "max relative distance must be positive, got {}",
                self.max_relative_distance
            )));
        }
        let (out_w, out_h) = self.output_size(width, height);
        if out_w == 0 || out_h == 0 {
            return Err(AssetError::invalid(format!(
                "{width}x{height} image is smaller than one {0}x{0} block",
                self.downsample_factor
            )));
        }
        Ok(())
    }
}

/// Compute a downsampled 8-bit signed distance field from a grayscale image.
///
/// Inside distances are positive: samples well inside the shape map towards
/// 255, samples far outside towards 0, and the edge sits near 127.
pub fn compute_distance_field(channel: &GrayImage, params: &SdfParams) -> AssetResult<GrayImage> {
    let (width, height) = channel.dimensions();
    params.validate(width, height)?;

    let (w, h) = (width as usize, height as usize);
    let max_distance = params.max_relative_distance * w.max(h) as f64;

    // Binarize to drop anti-aliasing before measuring distances
    let inside: Vec<bool> = channel
        .as_raw()
        .iter()
        .map(|&v| v >= params.threshold)
        .collect();
    let outside: Vec<bool> = inside.iter().map(|&v| !v).collect();

    let interior = distance_transform(&inside, w, h);
    let exterior = distance_transform(&outside, w, h);

    let signed: Vec<f64> = interior
        .iter()
        .zip(&exterior)
        .map(|(i, e)| (i - e).clamp(-max_distance, max_distance))
        .collect();

    let (out_w, out_h) = params.output_size(width, height);
    let factor = params.downsample_factor as usize;
    let block_area = (factor * factor) as f64;
    let range = 2.0 * max_distance;

    let mut output = GrayImage::new(out_w, out_h);
    for (bx, by, pixel) in output.enumerate_pixels_mut() {
        let (x0, y0) = (bx as usize * factor, by as usize * factor);
        let mut sum = 0.0;
        for y in y0..y0 + factor {
            let row = &signed[y * w + x0..y * w + x0 + factor];
            sum += row.iter().sum::<f64>();
        }
        let mean = sum / block_area;
        // Truncating cast; `t` is within [0, 1] and exactly 1.0 at the clip
        let t = (mean + max_distance) / range;
        pixel.0[0] = (255.0 * t) as u8;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use image::Luma;

    /// Filled disc of `radius` centered in a `size` x `size` image.
    fn disc(size: u32, radius: f64, value: u8) -> GrayImage {
        let c = (size as f64 - 1.0) / 2.0;
        GrayImage::from_fn(size, size, |x, y| {
            let (dx, dy) = (x as f64 - c, y as f64 - c);
            if (dx * dx + dy * dy).sqrt() <= radius {
                Luma([value])
            } else {
                Luma([0])
            }
        })
    }

    #[test]
    fn test_output_shape() {
        let params = SdfParams::new(0.1, 4, 127);
        let sdf = compute_distance_field(&disc(64, 20.0, 255), &params).unwrap();
        assert_eq!(sdf.dimensions(), (16, 16));
    }

    #[test]
    fn test_inside_bright_outside_dark() {
        let params = SdfParams::new(0.25, 1, 127);
        let sdf = compute_distance_field(&disc(32, 10.0, 255), &params).unwrap();

        let center = sdf.get_pixel(16, 16).0[0];
        let corner = sdf.get_pixel(0, 0).0[0];
        assert!(center > 200, "center = {center}");
        assert!(corner < 50, "corner = {corner}");
    }

    #[test]
    fn test_clip_saturates_far_samples() {
        // max distance = 0.05 * 64 = 3.2 px, corners are much further away
        let params = SdfParams::new(0.05, 1, 127);
        let sdf = compute_distance_field(&disc(64, 20.0, 255), &params).unwrap();
        assert_eq!(sdf.get_pixel(0, 0).0[0], 0);
        assert_eq!(sdf.get_pixel(32, 32).0[0], 255);
    }

    #[test]
    fn test_threshold_removes_faint_samples() {
        let mut image = disc(32, 8.0, 255);
        // Faint anti-aliasing halo well away from the disc
        image.put_pixel(2, 2, Luma([100]));
        let params = SdfParams::new(0.25, 1, 127);
        let with_halo = compute_distance_field(&image, &params).unwrap();
        let without = compute_distance_field(&disc(32, 8.0, 255), &params).unwrap();
        assert_eq!(with_halo, without);

        // Lowering the threshold turns the halo into foreground
        let low = SdfParams::new(0.25, 1, 100);
        let changed = compute_distance_field(&image, &low).unwrap();
        assert_ne!(changed, without);
    }

    #[test]
    fn test_edge_lands_at_midpoint() {
        // Left half foreground, right half background, clip at 8 px
        let image = GrayImage::from_fn(32, 32, |x, _| Luma([if x < 16 { 255 } else { 0 }]));
        let params = SdfParams::new(0.25, 1, 127);
        let sdf = compute_distance_field(&image, &params).unwrap();

        // x = 15: interior distance 1 -> 127.5 + 1 * 255/16
        assert_eq!(sdf.get_pixel(15, 0).0[0], 143);
        // x = 16: exterior distance 1 -> 127.5 - 1 * 255/16
        assert_eq!(sdf.get_pixel(16, 0).0[0], 111);
        assert_eq!(sdf.get_pixel(0, 0).0[0], 255);
        assert_eq!(sdf.get_pixel(31, 0).0[0], 0);
    }

    #[test]
    fn test_downsample_averages_blocks() {
        let image = GrayImage::from_fn(32, 32, |x, _| Luma([if x < 16 { 255 } else { 0 }]));
        let params = SdfParams::new(0.25, 2, 127);
        let sdf = compute_distance_field(&image, &params).unwrap();
        // Block at columns 14..16: mean interior distance (2 + 1) / 2 = 1.5
        let expected = ((1.5 + 8.0) * 255.0 / 16.0) as u8;
        assert_eq!(sdf.get_pixel(7, 3).0[0], expected);
    }

    #[test]
    fn test_non_divisible_size_drops_remainder() {
        let params = SdfParams::new(0.1, 4, 127);
        let image = disc(66, 20.0, 255);
        let sdf = compute_distance_field(&image, &params).unwrap();
        assert_eq!(sdf.dimensions(), (16, 16));

        let odd = GrayImage::from_fn(35, 18, |x, y| Luma([if x > y { 255 } else { 0 }]));
        let sdf = compute_distance_field(&odd, &params).unwrap();
        assert_eq!(sdf.dimensions(), (8, 4));
    }

    #[test]
    fn test_deterministic() {
        let params = SdfParams::new(0.03, 4, 127);
        let image = disc(128, 40.0, 200);
        let a = compute_distance_field(&image, &params).unwrap();
        let b = compute_distance_field(&image, &params).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_uniform_input_saturates() {
        let params = SdfParams::new(0.1, 2, 127);
        let full = GrayImage::from_pixel(8, 8, Luma([255]));
        let empty = GrayImage::from_pixel(8, 8, Luma([0]));
        assert!(compute_distance_field(&full, &params).unwrap().pixels().all(|p| p.0[0] == 255));
        assert!(compute_distance_field(&empty, &params).unwrap().pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_invalid_params() {
        let image = disc(16, 4.0, 255);
        let zero_factor = SdfParams::new(0.1, 0, 127);
        assert_eq!(
            compute_distance_field(&image, &zero_factor).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );

        let zero_distance = SdfParams::new(0.0, 2, 127);
        assert!(compute_distance_field(&image, &zero_distance).is_err());

        let too_coarse = SdfParams::new(0.1, 32, 127);
        assert!(compute_distance_field(&image, &too_coarse).is_err());
    }
}
