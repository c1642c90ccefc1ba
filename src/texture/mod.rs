//! Texture collaborators: SVG rasterization, mip chains and DDS output.
//!
//! # Modules
//!
//! - [`raster`]: SVG → power-of-two RGBA raster (usvg + resvg)
//! - [`mips`]: mip level slicing from atlases or generation by resizing
//! - [`dds`]: mip chain validation and uncompressed DDS writing

pub mod dds;
pub mod mips;
pub mod raster;

pub use dds::write_mip_chain;
pub use mips::MipLayout;
pub use raster::rasterize_svg;
