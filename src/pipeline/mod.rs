//! Incremental asset processing.
//!
//! For every configured `(source, output)` pair:
//!
//! ```text
//! validate ──► enumerate ──► classify ──► pending? ──no──► report
//!                                            │
//!                                           yes
//!                                            ▼
//!                          lock ──► transform each ──► refresh metadata
//! ```
//!
//! A failed transform is logged and its metadata left stale, so the next run
//! picks the asset up again.
//!
//! # Modules
//!
//! - [`transform`]: the [`AssetTransform`] trait and output naming
//! - [`sdf`] / [`mips`]: the two processors
//! - `scan`, `run`, `lock`: the loop itself

mod lock;
pub mod mips;
mod run;
mod scan;
pub mod sdf;
pub mod transform;

pub use mips::MipsProcessor;
pub use run::{Pipeline, RunSummary};
pub use sdf::SdfProcessor;
pub use transform::AssetTransform;
