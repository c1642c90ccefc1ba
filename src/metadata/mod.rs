//! Checksum and metadata store.
//!
//! Every source asset has a JSON side-car (`<asset>.gsam`) recording a
//! stable identifier, the blake3 digest of the asset at last processing, and
//! the files exported from it. Comparing that digest with the current content
//! classifies the asset as new, modified or unchanged.
//!
//! # Modules
//!
//! - [`hash`]: streaming content hashing
//! - [`record`]: immutable `AssetMetadata` and its file schema
//! - [`status`]: [`AssetStatus`] classification result
//! - [`store`]: load/save/refresh/classify on disk

mod hash;
mod record;
mod status;
mod store;

pub use record::AssetMetadataUpdate;
pub use status::AssetStatus;
pub use store::{MetadataStore, is_metadata_file, metadata_path_for};
