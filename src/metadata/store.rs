//! Side-car metadata persistence and change classification.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::hash::compute_content_hash;
use super::record::{AssetMetadata, AssetMetadataUpdate, MetadataFile};
use super::status::AssetStatus;
use crate::error::{AssetError, AssetResult};
use crate::logger::Logger;
use crate::{debug, log};

/// Suffix appended to the full asset file name (`icon.svg` -> `icon.svg.gsam`).
pub const METADATA_EXTENSION: &str = ".gsam";

/// Suffix of the scratch file used while replacing a record.
const TEMP_EXTENSION: &str = ".tmp";

/// Derive the side-car metadata path for an asset. Pure, no IO.
pub fn metadata_path_for(asset_path: &Path) -> PathBuf {
    let mut name = OsString::from(asset_path.as_os_str());
    name.push(METADATA_EXTENSION);
    PathBuf::from(name)
}

/// Whether `path` is itself a metadata side-car.
pub fn is_metadata_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(METADATA_EXTENSION))
}

/// Reads, writes and classifies per-asset metadata records.
///
/// No locking is done here; callers that may run concurrently on one source
/// tree must hold a [`crate::pipeline::DirLock`] around mutations.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    logger: Logger,
}

impl MetadataStore {
    pub const fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Deserialize a record from disk.
    ///
    /// Returns [`AssetError::Corrupt`] if the file exists but is not a valid record.
    pub fn load(&self, metadata_path: &Path) -> AssetResult<AssetMetadata> {
        let bytes = fs::read(metadata_path).map_err(|e| AssetError::io(metadata_path, e))?;
        let file: MetadataFile = serde_json::from_slice(&bytes)
            .map_err(|e| AssetError::corrupt(metadata_path, e.to_string()))?;
        AssetMetadata::from_file(file, metadata_path)
    }

    /// Serialize a record, fully replacing whatever is at `metadata_path`.
    ///
    /// The parent directory must already exist. The record is written to a
    /// sibling scratch file first and renamed into place.
    pub fn save(&self, metadata: &AssetMetadata, metadata_path: &Path) -> AssetResult<()> {
        let mut json = serde_json::to_string_pretty(&metadata.to_file())
            .map_err(|e| AssetError::invalid(format!("unserializable metadata: {e}")))?;
        json.push('\n');

        let mut temp = OsString::from(metadata_path.as_os_str());
        temp.push(TEMP_EXTENSION);
        let temp = PathBuf::from(temp);

        fs::write(&temp, json).map_err(|e| AssetError::io(metadata_path, e))?;
        if let Err(e) = fs::rename(&temp, metadata_path) {
            let _ = fs::remove_file(&temp);
            return Err(AssetError::io(metadata_path, e));
        }

        debug!(self.logger, "meta"; "saved {}", metadata_path.display());
        Ok(())
    }

    /// Load the asset's record, creating and persisting a new one if absent.
    pub fn get_or_create(&self, asset_path: &Path) -> AssetResult<AssetMetadata> {
        ensure_exists(asset_path)?;

        let metadata_path = metadata_path_for(asset_path);
        if metadata_path.exists() {
            debug!(self.logger, "meta"; "found existing metadata for {}", asset_path.display());
            return self.load(&metadata_path);
        }

        let metadata = AssetMetadata::new(compute_content_hash(asset_path)?);
        self.save(&metadata, &metadata_path)?;
        log!(self.logger, "meta"; "created metadata for {}", asset_path.display());
        Ok(metadata)
    }

    /// Apply `update`, recompute the content hash and persist.
    ///
    /// This is the only mutation path. A record that does not exist yet is
    /// created and written in the same step.
    pub fn refresh(
        &self,
        asset_path: &Path,
        update: AssetMetadataUpdate,
    ) -> AssetResult<AssetMetadata> {
        ensure_exists(asset_path)?;

        let metadata_path = metadata_path_for(asset_path);
        let content_hash = compute_content_hash(asset_path)?;
        let current = if metadata_path.exists() {
            self.load(&metadata_path)?
        } else {
            AssetMetadata::new(content_hash)
        };

        let updated = current.updated(update, content_hash);
        self.save(&updated, &metadata_path)?;
        debug!(self.logger, "meta"; "refreshed {} ({})", asset_path.display(), content_hash);
        Ok(updated)
    }

    /// Classify an asset against its stored record. Never writes.
    pub fn classify(&self, asset_path: &Path) -> AssetResult<AssetStatus> {
        ensure_exists(asset_path)?;

        let metadata_path = metadata_path_for(asset_path);
        if !metadata_path.exists() {
            return Ok(AssetStatus::New);
        }

        let metadata = self.load(&metadata_path)?;
        let current = compute_content_hash(asset_path)?;
        if current == metadata.content_hash() {
            Ok(AssetStatus::Unchanged)
        } else {
            Ok(AssetStatus::Modified)
        }
    }
}

fn ensure_exists(asset_path: &Path) -> AssetResult<()> {
    if asset_path.exists() {
        Ok(())
    } else {
        Err(AssetError::NotFound(asset_path.to_path_buf()))
    }
}
