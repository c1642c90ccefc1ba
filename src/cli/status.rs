//! `texpipe status`: dry-run classification of every configured pair.

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};

use crate::config::{PipelineConfig, ProcessingPaths};
use crate::log;
use crate::logger::Logger;
use crate::metadata::AssetStatus;
use crate::pipeline::{AssetTransform, MipsProcessor, Pipeline, RunSummary, SdfProcessor};

/// Classify all configured pairs and print pending assets. Writes nothing.
pub fn show_status(config: &PipelineConfig, logger: Logger) -> Result<RunSummary> {
    let pipeline = Pipeline::new(logger);
    let mut summary = RunSummary::default();

    let sdf = SdfProcessor::new(&config.sdf, logger);
    let mips = MipsProcessor::new(&config.mips, logger);
    summary += scan_pairs(&pipeline, &sdf, &config.sdf_paths(), logger)?;
    summary += scan_pairs(&pipeline, &mips, &config.mips_paths(), logger)?;

    log!(
        logger, "status";
        "{} pending ({} new, {} modified), {} unchanged",
        summary.pending(),
        summary.new,
        summary.modified,
        summary.unchanged
    );
    Ok(summary)
}

fn scan_pairs(
    pipeline: &Pipeline,
    processor: &dyn AssetTransform,
    pairs: &[ProcessingPaths],
    logger: Logger,
) -> Result<RunSummary> {
    let name = processor.name();
    let mut summary = RunSummary::default();
    for pair in pairs {
        let Some(report) = pipeline.scan(pair, processor.extension())? else {
            summary.skipped += 1;
            continue;
        };

        summary.new += report.count(AssetStatus::New);
        summary.modified += report.count(AssetStatus::Modified);
        summary.unchanged += report.count(AssetStatus::Unchanged);
        summary.failed += report.unreadable.len();
        pipeline.report_unreadable(&report);

        log!(logger, name; "{}", pair.source.display());
        for (path, status) in report.entries.iter().filter(|(_, s)| s.is_pending()) {
            let label = match status {
                AssetStatus::New => status
                    .as_str()
                    .if_supports_color(Stream::Stdout, |t| t.green())
                    .to_string(),
                _ => status
                    .as_str()
                    .if_supports_color(Stream::Stdout, |t| t.yellow())
                    .to_string(),
            };
            let file = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            log!(logger, name; "  {label:<8} {file}");
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::metadata_path_for;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_status_counts_without_writing() {
        let dir = TempDir::new().unwrap();
        let icons = dir.path().join("icons");
        fs::create_dir(&icons).unwrap();
        fs::write(icons.join("a.svg"), "<svg/>").unwrap();
        fs::write(icons.join("b.svg"), "<svg></svg>").unwrap();

        let mut config = PipelineConfig::from_str(
            "[[sdf.paths]]\nsource = \"icons\"\noutput = \"out\"\n\
             [[mips.paths]]\nsource = \"missing\"\noutput = \"out\"\n",
        )
        .unwrap();
        config.set_root(dir.path());

        let summary = show_status(&config, Logger::silent()).unwrap();
        assert_eq!(summary.new, 2);
        assert_eq!(summary.skipped, 1);
        assert!(!metadata_path_for(&icons.join("a.svg")).exists());
        assert!(!dir.path().join("out").exists());
    }
}
