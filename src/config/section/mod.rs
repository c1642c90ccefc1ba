//! Configuration section definitions.
//!
//! | Section    | Purpose                                   |
//! |------------|-------------------------------------------|
//! | `[sdf]`    | SVG → distance field export               |
//! | `[mips]`   | Raster → DDS mip chain export             |
//!
//! Both sections carry `[[<section>.paths]]` tables of source/output pairs.

mod mips;
mod paths;
mod sdf;

pub use mips::MipsConfig;
pub use paths::ProcessingPaths;
pub use sdf::SdfConfig;
