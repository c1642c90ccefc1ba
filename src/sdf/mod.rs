//! Signed distance field computation.
//!
//! ```text
//! grayscale channel
//!         │
//!         ▼
//!    ┌──────────┐
//!    │ binarize │ ──► samples >= threshold are foreground
//!    └────┬─────┘
//!         ▼
//!    ┌──────────┐
//!    │ dual EDT │ ──► exact distance inside and outside the shape
//!    └────┬─────┘
//!         ▼
//!    ┌──────────┐
//!    │ combine  │ ──► inside - outside, clipped to ±max distance
//!    └────┬─────┘
//!         ▼
//!    ┌──────────┐
//!    │ reduce   │ ──► block mean, remap to 0..=255
//!    └──────────┘
//! ```
//!
//! [`compute_multichannel_sdf`] runs this independently for every channel of
//! an RGBA raster that carries signal and packs the results.

mod edt;
mod field;
mod multichannel;

pub use field::{DEFAULT_THRESHOLD, SdfParams};
pub use multichannel::{
    ChannelMapping, IDENTITY_MAPPING, INPUT_CHANNELS, SdfOutput, compute_multichannel_sdf,
    is_permutation,
};
