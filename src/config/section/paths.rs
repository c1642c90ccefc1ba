//! `[[sdf.paths]]` / `[[mips.paths]]` entries.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One source directory and the directory its exports are written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingPaths {
    pub source: PathBuf,
    pub output: PathBuf,
}

impl ProcessingPaths {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }

    /// Expand `~` and make both paths absolute against `root`.
    pub fn resolve(&self, root: &Path) -> Self {
        Self {
            source: resolve_path(&self.source, root),
            output: resolve_path(&self.output, root),
        }
    }
}

fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    if path.is_relative() {
        root.join(path)
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_join_root() {
        let pair = ProcessingPaths::new("art/icons", "export/icons");
        let resolved = pair.resolve(Path::new("/project"));
        assert_eq!(resolved.source, PathBuf::from("/project/art/icons"));
        assert_eq!(resolved.output, PathBuf::from("/project/export/icons"));
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let pair = ProcessingPaths::new("/abs/icons", "out");
        let resolved = pair.resolve(Path::new("/project"));
        assert_eq!(resolved.source, PathBuf::from("/abs/icons"));
        assert_eq!(resolved.output, PathBuf::from("/project/out"));
    }

    #[test]
    fn test_tilde_is_expanded() {
        let pair = ProcessingPaths::new("~/icons", "out");
        let resolved = pair.resolve(Path::new("/project"));
        assert!(!resolved.source.to_string_lossy().starts_with('~'));
        assert!(resolved.source.ends_with("icons"));
    }
}
