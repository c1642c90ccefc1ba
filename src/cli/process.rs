//! `texpipe sdf`, `texpipe mips` and `texpipe all`.

use anyhow::Result;

use crate::config::{PipelineConfig, ProcessingPaths};
use crate::logger::{Logger, plural};
use crate::log;
use crate::pipeline::{AssetTransform, MipsProcessor, Pipeline, RunSummary, SdfProcessor};

/// Processor selection for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Processors {
    Sdf,
    Mips,
    All,
}

impl Processors {
    const fn sdf(self) -> bool {
        matches!(self, Self::Sdf | Self::All)
    }

    const fn mips(self) -> bool {
        matches!(self, Self::Mips | Self::All)
    }
}

/// Run the selected processors over their configured pairs.
///
/// Asset failures are reported in the summary, not as an error; only
/// metadata corruption and other hard failures return `Err`.
pub fn run(config: &PipelineConfig, which: Processors, logger: Logger) -> Result<RunSummary> {
    let pipeline = Pipeline::new(logger);
    let mut summary = RunSummary::default();

    if which.sdf() {
        let processor = SdfProcessor::new(&config.sdf, logger);
        summary += run_processor(&pipeline, &config.sdf_paths(), &processor, logger)?;
    }
    if which.mips() {
        let processor = MipsProcessor::new(&config.mips, logger);
        summary += run_processor(&pipeline, &config.mips_paths(), &processor, logger)?;
    }

    print_summary(&summary, logger);
    Ok(summary)
}

fn run_processor(
    pipeline: &Pipeline,
    pairs: &[ProcessingPaths],
    processor: &dyn AssetTransform,
    logger: Logger,
) -> Result<RunSummary> {
    if pairs.is_empty() {
        log!(logger, processor.name(); "no directories configured");
        return Ok(RunSummary::default());
    }
    Ok(pipeline.run(pairs, processor)?)
}

fn print_summary(summary: &RunSummary, logger: Logger) {
    log!(
        logger, "done";
        "{} processed, {} failed, {} unchanged, {} skipped",
        plural(summary.processed, "asset"),
        summary.failed,
        summary.unchanged,
        plural(summary.skipped, "directory pair")
    );
    for failure in &summary.failures {
        log!(logger, "warning"; "will retry next run: {}", failure.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::metadata_path_for;
    use image::{Rgba, RgbaImage};
    use std::path::Path;
    use tempfile::TempDir;

    fn config(root: &Path) -> PipelineConfig {
        let content = r#"
[mips]
layout = "generate"

[[mips.paths]]
source = "textures"
output = "export"
"#;
        let mut config = PipelineConfig::from_str(content).unwrap();
        config.set_root(root);
        config
    }

    #[test]
    fn test_mips_run_end_to_end() {
        let dir = TempDir::new().unwrap();
        let textures = dir.path().join("textures");
        std::fs::create_dir(&textures).unwrap();
        RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]))
            .save(textures.join("stone.png"))
            .unwrap();

        let config = config(dir.path());
        let summary = run(&config, Processors::Mips, Logger::silent()).unwrap();
        assert_eq!(summary.processed, 1);
        assert!(dir.path().join("export").join("stone.dds").exists());
        assert!(metadata_path_for(&textures.join("stone.png")).exists());

        // sdf has no pairs configured, so `all` only re-checks mips
        let again = run(&config, Processors::All, Logger::silent()).unwrap();
        assert_eq!(again.processed, 0);
        assert_eq!(again.unchanged, 1);
    }
}
