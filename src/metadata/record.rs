//! Asset metadata record and its on-disk schema.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::hash::ContentHash;
use crate::error::{AssetError, AssetResult};

/// Current metadata file schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Provenance record for one source asset.
///
/// Immutable once built: the only way to obtain a changed record is
/// [`AssetMetadata::updated`], which never touches `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMetadata {
    id: String,
    content_hash: ContentHash,
    exported_files: Vec<PathBuf>,
    schema_version: u32,
}

/// Field overrides accepted by [`AssetMetadata::updated`].
#[derive(Debug, Clone, Default)]
pub struct AssetMetadataUpdate {
    pub exported_files: Option<Vec<PathBuf>>,
}

impl AssetMetadataUpdate {
    pub fn exported_files(files: Vec<PathBuf>) -> Self {
        Self {
            exported_files: Some(files),
        }
    }
}

impl AssetMetadata {
    /// Fresh record with a newly generated identifier.
    pub fn new(content_hash: ContentHash) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content_hash,
            exported_files: Vec::new(),
            schema_version: SCHEMA_VERSION,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn content_hash(&self) -> ContentHash {
        self.content_hash
    }

    pub fn exported_files(&self) -> &[PathBuf] {
        &self.exported_files
    }

    pub const fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// Derive a copy with `update` applied and the hash replaced.
    pub fn updated(&self, update: AssetMetadataUpdate, content_hash: ContentHash) -> Self {
        Self {
            id: self.id.clone(),
            content_hash,
            exported_files: update
                .exported_files
                .unwrap_or_else(|| self.exported_files.clone()),
            schema_version: self.schema_version,
        }
    }

    /// Convert into the serialized form.
    pub(super) fn to_file(&self) -> MetadataFile {
        MetadataFile {
            id: self.id.clone(),
            content_hash: self.content_hash.to_hex(),
            exported_files: self.exported_files.clone(),
            schema_version: self.schema_version,
        }
    }

    /// Validate a parsed file. `path` is only used for error reporting.
    pub(super) fn from_file(file: MetadataFile, path: &Path) -> AssetResult<Self> {
        if file.id.trim().is_empty() {
            return Err(AssetError::corrupt(path, "empty `id`"));
        }
        let content_hash = ContentHash::from_hex(&file.content_hash).ok_or_else(|| {
            AssetError::corrupt(
                path,
                format!("`content_hash` is not a 256-bit hex digest: {:?}", file.content_hash),
            )
        })?;

        Ok(Self {
            id: file.id,
            content_hash,
            exported_files: file.exported_files,
            schema_version: file.schema_version,
        })
    }
}

/// Serialized metadata layout. Field order is the JSON key order.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct MetadataFile {
    id: String,
    content_hash: String,
    #[serde(default)]
    exported_files: Vec<PathBuf>,
    #[serde(default = "default_schema_version")]
    schema_version: u32,
}

const fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_records_get_distinct_ids() {
        let hash = ContentHash::new([1; 32]);
        let a = AssetMetadata::new(hash);
        let b = AssetMetadata::new(hash);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.schema_version(), SCHEMA_VERSION);
        assert!(a.exported_files().is_empty());
    }

    #[test]
    fn test_updated_keeps_id_and_replaces_fields() {
        let original = AssetMetadata::new(ContentHash::new([1; 32]));
        let files = vec![PathBuf::from("out/T_icon_SDF.png")];

        let updated = original.updated(
            AssetMetadataUpdate::exported_files(files.clone()),
            ContentHash::new([2; 32]),
        );

        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.content_hash(), ContentHash::new([2; 32]));
        assert_eq!(updated.exported_files(), files.as_slice());
        // Original is untouched
        assert_eq!(original.content_hash(), ContentHash::new([1; 32]));
        assert!(original.exported_files().is_empty());
    }

    #[test]
    fn test_updated_without_override_keeps_exports() {
        let original = AssetMetadata::new(ContentHash::new([1; 32])).updated(
            AssetMetadataUpdate::exported_files(vec![PathBuf::from("a.png")]),
            ContentHash::new([1; 32]),
        );
        let updated = original.updated(AssetMetadataUpdate::default(), ContentHash::new([3; 32]));
        assert_eq!(updated.exported_files(), original.exported_files());
    }

    #[test]
    fn test_from_file_rejects_bad_hash() {
        let file = MetadataFile {
            id: "x".into(),
            content_hash: "not-hex".into(),
            exported_files: Vec::new(),
            schema_version: 1,
        };
        assert!(AssetMetadata::from_file(file, Path::new("a.gsam")).is_err());
    }

    #[test]
    fn test_from_file_rejects_empty_id() {
        let file = MetadataFile {
            id: "  ".into(),
            content_hash: ContentHash::new([0; 32]).to_hex(),
            exported_files: Vec::new(),
            schema_version: 1,
        };
        assert!(AssetMetadata::from_file(file, Path::new("a.gsam")).is_err());
    }
}
