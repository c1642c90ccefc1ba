//! Uncompressed 32-bit DDS writer.
//!
//! Layout: `DDS ` magic, 124-byte `DDS_HEADER`, then every mip level's pixels
//! in B, G, R, A byte order, largest level first.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{AssetError, AssetResult};

const MAGIC: &[u8; 4] = b"DDS ";
const HEADER_SIZE: u32 = 124;
const PIXEL_FORMAT_SIZE: u32 = 32;

const DDSD_CAPS: u32 = 0x1;
const DDSD_HEIGHT: u32 = 0x2;
const DDSD_WIDTH: u32 = 0x4;
const DDSD_PITCH: u32 = 0x8;
const DDSD_PIXELFORMAT: u32 = 0x1000;
const DDSD_MIPMAPCOUNT: u32 = 0x20000;

const DDPF_ALPHAPIXELS: u32 = 0x1;
const DDPF_RGB: u32 = 0x40;

const DDSCAPS_COMPLEX: u32 = 0x8;
const DDSCAPS_TEXTURE: u32 = 0x1000;
const DDSCAPS_MIPMAP: u32 = 0x40_0000;

const R_MASK: u32 = 0x00FF_0000;
const G_MASK: u32 = 0x0000_FF00;
const B_MASK: u32 = 0x0000_00FF;
const A_MASK: u32 = 0xFF00_0000;

/// Total size of magic plus header.
pub const PREAMBLE_LEN: usize = 4 + HEADER_SIZE as usize;

/// Check that `levels` form a mip chain.
///
/// Each level must be exactly half the previous one per axis, rounding down
/// with a floor of 1.
pub fn validate_chain(levels: &[RgbaImage]) -> AssetResult<()> {
    let Some(base) = levels.first() else {
        return Err(AssetError::invalid("mip chain is empty"));
    };

    let (base_w, base_h) = base.dimensions();
    if base_w == 0 || base_h == 0 {
        return Err(AssetError::invalid("mip level 0 has no pixels"));
    }

    let (mut expected_w, mut expected_h) = (base_w, base_h);
    for (level, image) in levels.iter().enumerate().skip(1) {
        expected_w = (expected_w / 2).max(1);
        expected_h = (expected_h / 2).max(1);
        let actual = image.dimensions();
        if actual != (expected_w, expected_h) {
            return Err(AssetError::invalid(format!(
                "mip level {level} is {}x{}, expected {expected_w}x{expected_h}",
                actual.0, actual.1
            )));
        }
    }
    Ok(())
}

/// Encode a validated chain into DDS bytes.
pub fn encode_mip_chain(levels: &[RgbaImage]) -> AssetResult<Vec<u8>> {
    validate_chain(levels)?;

    let (width, height) = levels[0].dimensions();
    let mip_count = u32::try_from(levels.len())
        .map_err(|_| AssetError::invalid("too many mip levels"))?;
    let payload: usize = levels.iter().map(|l| l.as_raw().len()).sum();

    let mut out = Vec::with_capacity(PREAMBLE_LEN + payload);
    out.extend_from_slice(MAGIC);

    let flags = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT | DDSD_MIPMAPCOUNT | DDSD_PITCH;
    let pitch = width * 4;
    for value in [HEADER_SIZE, flags, height, width, pitch, 0, mip_count] {
        put_u32(&mut out, value);
    }
    // dwReserved1[11]
    for _ in 0..11 {
        put_u32(&mut out, 0);
    }

    // DDS_PIXELFORMAT
    for value in [
        PIXEL_FORMAT_SIZE,
        DDPF_RGB | DDPF_ALPHAPIXELS,
        0, // no FourCC
        32,
        R_MASK,
        G_MASK,
        B_MASK,
        A_MASK,
    ] {
        put_u32(&mut out, value);
    }

    // caps, caps2, caps3, caps4, reserved2
    for value in [DDSCAPS_TEXTURE | DDSCAPS_COMPLEX | DDSCAPS_MIPMAP, 0, 0, 0, 0] {
        put_u32(&mut out, value);
    }
    debug_assert_eq!(out.len(), PREAMBLE_LEN);

    for level in levels {
        for px in level.as_raw().chunks_exact(4) {
            out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
    }
    Ok(out)
}

/// Validate and write a mip chain to `destination`.
///
/// Nothing is created on disk when validation fails. Bytes go to a sibling
/// scratch file first and are renamed into place.
pub fn write_mip_chain(levels: &[RgbaImage], destination: &Path) -> AssetResult<()> {
    let bytes = encode_mip_chain(levels)?;

    let mut temp = OsString::from(destination.as_os_str());
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    fs::write(&temp, bytes).map_err(|e| AssetError::io(destination, e))?;
    if let Err(e) = fs::rename(&temp, destination) {
        let _ = fs::remove_file(&temp);
        return Err(AssetError::io(destination, e));
    }
    Ok(())
}

#[inline]
fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}
