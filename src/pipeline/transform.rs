//! The per-asset transform seam.

use std::path::{Path, PathBuf};

use crate::error::AssetResult;

/// A processor applied to every pending asset of a source directory.
///
/// Implementations own all decoding and encoding for one asset and must not
/// touch metadata; the scan loop refreshes metadata only after `transform`
/// returns `Ok`.
pub trait AssetTransform {
    /// Module name used as the log prefix (`sdf`, `mips`).
    fn name(&self) -> &'static str;

    /// Source file extension without the dot, matched case-insensitively.
    fn extension(&self) -> &'static str;

    /// Process `source` and write outputs into `output_dir`.
    ///
    /// `output_dir` exists when this is called. Returns every file produced.
    fn transform(&self, source: &Path, output_dir: &Path) -> AssetResult<Vec<PathBuf>>;
}

/// `<prefix><stem><postfix>.<extension>` inside `output_dir`.
pub fn output_path(
    output_dir: &Path,
    source: &Path,
    prefix: &str,
    postfix: &str,
    extension: &str,
) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    output_dir.join(format!("{prefix}{stem}{postfix}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("/out"), Path::new("/art/icon.svg"), "T_", "_SDF", "png");
        assert_eq!(path, PathBuf::from("/out/T_icon_SDF.png"));

        let path = output_path(Path::new("out"), Path::new("brick.diffuse.png"), "", "", "dds");
        assert_eq!(path, PathBuf::from("out/brick.diffuse.dds"));
    }
}
