//! Enumerate and classify the assets of one source directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AssetError, AssetResult, ErrorKind};
use crate::metadata::{AssetStatus, MetadataStore, is_metadata_file};

/// Classification of every matching file in a source directory.
///
/// Entries keep directory listing order; no sort is applied.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub entries: Vec<(PathBuf, AssetStatus)>,
    /// Assets that vanished or could not be read while classifying.
    pub unreadable: Vec<(PathBuf, AssetError)>,
}

impl ScanReport {
    pub fn count(&self, status: AssetStatus) -> usize {
        self.entries.iter().filter(|(_, s)| *s == status).count()
    }

    /// `NEW` and `MODIFIED` assets, in enumeration order.
    pub fn pending(&self) -> impl Iterator<Item = &Path> {
        self.entries
            .iter()
            .filter(|(_, status)| status.is_pending())
            .map(|(path, _)| path.as_path())
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|(_, s)| s.is_pending()).count()
    }

    pub fn is_up_to_date(&self) -> bool {
        self.pending_count() == 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Immediate files of `dir` whose extension matches, ignoring case.
///
/// Subdirectories and metadata side-cars are skipped.
pub fn enumerate_assets(dir: &Path, extension: &str) -> AssetResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| AssetError::io(dir, e))?;

    let mut assets = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AssetError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() || is_metadata_file(&path) {
            continue;
        }
        let matches = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));
        if matches {
            assets.push(path);
        }
    }
    Ok(assets)
}

/// Classify every asset of `dir` against its stored metadata. Never writes.
pub fn scan_directory(
    store: &MetadataStore,
    dir: &Path,
    extension: &str,
) -> AssetResult<ScanReport> {
    classify_assets(store, enumerate_assets(dir, extension)?)
}

/// Classify `assets` in order.
///
/// Corrupt metadata is returned as an error. Any other per-asset failure
/// lands in [`ScanReport::unreadable`] and classification moves on.
pub fn classify_assets(
    store: &MetadataStore,
    assets: impl IntoIterator<Item = PathBuf>,
) -> AssetResult<ScanReport> {
    let mut report = ScanReport::default();
    for path in assets {
        match store.classify(&path) {
            Ok(status) => report.entries.push((path, status)),
            Err(e) if e.kind() == ErrorKind::Corrupt => return Err(e),
            Err(e) => report.unreadable.push((path, e)),
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use crate::metadata::AssetMetadataUpdate;
    use tempfile::TempDir;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_enumerate_filters_extension_case_insensitively() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.svg"), "a").unwrap();
        fs::write(dir.path().join("B.SVG"), "b").unwrap();
        fs::write(dir.path().join("c.png"), "c").unwrap();
        fs::write(dir.path().join("a.svg.gsam"), "{}").unwrap();
        fs::create_dir(dir.path().join("nested.svg")).unwrap();
        fs::write(dir.path().join("nested.svg").join("d.svg"), "d").unwrap();

        let assets = enumerate_assets(dir.path(), "svg").unwrap();
        assert_eq!(names(&assets), vec!["B.SVG", "a.svg"]);
    }

    #[test]
    fn test_enumerate_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = enumerate_assets(&dir.path().join("gone"), "svg").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::NotFound);
    }

    #[test]
    fn test_scan_buckets() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(Logger::silent());
        let fresh = dir.path().join("fresh.svg");
        let edited = dir.path().join("edited.svg");
        let same = dir.path().join("same.svg");
        for path in [&fresh, &edited, &same] {
            fs::write(path, path.to_string_lossy().as_bytes()).unwrap();
        }
        store.refresh(&edited, AssetMetadataUpdate::default()).unwrap();
        store.refresh(&same, AssetMetadataUpdate::default()).unwrap();
        fs::write(&edited, "changed").unwrap();

        let report = scan_directory(&store, dir.path(), "svg").unwrap();
        assert_eq!(report.len(), 3);
        assert_eq!(report.count(AssetStatus::New), 1);
        assert_eq!(report.count(AssetStatus::Modified), 1);
        assert_eq!(report.count(AssetStatus::Unchanged), 1);

        let pending: Vec<PathBuf> = report.pending().map(Path::to_path_buf).collect();
        assert_eq!(names(&pending), vec!["edited.svg", "fresh.svg"]);
    }

    #[test]
    fn test_vanished_asset_does_not_stop_classification() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(Logger::silent());
        let gone = dir.path().join("gone.svg");
        let kept = dir.path().join("kept.svg");
        fs::write(&gone, "g").unwrap();
        fs::write(&kept, "k").unwrap();

        let assets = enumerate_assets(dir.path(), "svg").unwrap();
        fs::remove_file(&gone).unwrap();

        let report = classify_assets(&store, assets).unwrap();
        assert_eq!(report.entries, vec![(kept, AssetStatus::New)]);
        assert_eq!(report.unreadable.len(), 1);
        assert_eq!(report.unreadable[0].0, gone);
        assert_eq!(report.unreadable[0].1.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_corrupt_side_car_still_fails_classification() {
        let dir = TempDir::new().unwrap();
        let store = MetadataStore::new(Logger::silent());
        let asset = dir.path().join("a.svg");
        fs::write(&asset, "a").unwrap();
        fs::write(crate::metadata::metadata_path_for(&asset), "{ broken").unwrap();

        let err = classify_assets(&store, vec![asset]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Corrupt);
    }
}
