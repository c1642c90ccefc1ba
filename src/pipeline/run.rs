//! The incremental scan/process loop.

use std::fs;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::lock::DirLock;
use super::scan::{ScanReport, classify_assets, scan_directory};
use super::transform::AssetTransform;
use crate::config::ProcessingPaths;
use crate::error::AssetResult;
use crate::logger::{Logger, format_elapsed, plural};
use crate::metadata::{AssetMetadataUpdate, AssetStatus, MetadataStore};
use crate::{debug, log};

/// Counts accumulated over one or more directory pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub new: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub processed: usize,
    pub failed: usize,
    /// Pairs skipped because the source was invalid or locked.
    pub skipped: usize,
    /// Assets that could not be classified, transformed or refreshed.
    /// Retried next run.
    pub failures: Vec<PathBuf>,
}

impl RunSummary {
    fn from_report(report: &ScanReport) -> Self {
        Self {
            new: report.count(AssetStatus::New),
            modified: report.count(AssetStatus::Modified),
            unchanged: report.count(AssetStatus::Unchanged),
            failed: report.unreadable.len(),
            failures: report.unreadable.iter().map(|(p, _)| p.clone()).collect(),
            ..Self::default()
        }
    }

    fn skipped_pair() -> Self {
        Self {
            skipped: 1,
            ..Self::default()
        }
    }

    pub const fn pending(&self) -> usize {
        self.new + self.modified
    }

    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl AddAssign for RunSummary {
    fn add_assign(&mut self, other: Self) {
        self.new += other.new;
        self.modified += other.modified;
        self.unchanged += other.unchanged;
        self.processed += other.processed;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.failures.extend(other.failures);
    }
}

/// Drives classification and per-asset transforms over directory pairs.
///
/// Stateless across invocations: everything it knows comes from the
/// metadata side-cars, so re-running is the recovery path after a crash.
#[derive(Debug, Clone)]
pub struct Pipeline {
    store: MetadataStore,
    logger: Logger,
}

impl Pipeline {
    pub const fn new(logger: Logger) -> Self {
        Self {
            store: MetadataStore::new(logger),
            logger,
        }
    }

    pub const fn store(&self) -> &MetadataStore {
        &self.store
    }

    /// Classify one source directory without writing anything.
    ///
    /// Returns `Ok(None)` when the source is not a directory.
    pub fn scan(&self, pair: &ProcessingPaths, extension: &str) -> AssetResult<Option<ScanReport>> {
        if !pair.source.is_dir() {
            log!(self.logger, "warning"; "invalid directory: {}", pair.source.display());
            return Ok(None);
        }
        scan_directory(&self.store, &pair.source, extension).map(Some)
    }

    /// Re-classify the pending assets of `report`.
    ///
    /// Run with the lock held: another run may have refreshed some of them
    /// between the scan and the lock.
    pub fn recheck_pending(&self, report: &ScanReport) -> AssetResult<ScanReport> {
        classify_assets(&self.store, report.pending().map(Path::to_path_buf))
    }

    /// Log every asset that could not be classified.
    pub fn report_unreadable(&self, report: &ScanReport) {
        for (path, e) in &report.unreadable {
            log!(self.logger, "error"; "{}: {}", path.display(), e);
        }
    }

    /// Process every pair in order.
    ///
    /// Invalid or locked pairs, unreadable and failed assets never abort the
    /// run. Metadata corruption does.
    pub fn run(
        &self,
        pairs: &[ProcessingPaths],
        transform: &dyn AssetTransform,
    ) -> AssetResult<RunSummary> {
        let mut summary = RunSummary::default();
        for pair in pairs {
            summary += self.run_pair(pair, transform)?;
        }
        Ok(summary)
    }

    /// Validate, enumerate, classify and process a single pair.
    pub fn run_pair(
        &self,
        pair: &ProcessingPaths,
        transform: &dyn AssetTransform,
    ) -> AssetResult<RunSummary> {
        let name = transform.name();
        log!(self.logger, name; "scanning {}", pair.source.display());

        let Some(report) = self.scan(pair, transform.extension())? else {
            return Ok(RunSummary::skipped_pair());
        };
        self.report_unreadable(&report);
        let mut summary = RunSummary::from_report(&report);

        log!(
            self.logger, name;
            "found {} ({} new, {} modified, {} unchanged)",
            plural(report.len(), &format!("{} asset", transform.extension())),
            summary.new,
            summary.modified,
            summary.unchanged
        );

        if report.is_up_to_date() {
            log!(self.logger, name; "all assets are up to date");
            return Ok(summary);
        }

        let Some(_lock) = DirLock::acquire(&pair.source)? else {
            log!(
                self.logger, "warning";
                "{} exists, another run is processing {}; skipping",
                DirLock::path_for(&pair.source).display(),
                pair.source.display()
            );
            summary.skipped += 1;
            return Ok(summary);
        };

        if let Err(e) = fs::create_dir_all(&pair.output) {
            log!(
                self.logger, "error";
                "cannot create output directory {}: {}",
                pair.output.display(),
                e
            );
            summary.skipped += 1;
            return Ok(summary);
        }

        let pending = self.recheck_pending(&report)?;
        self.report_unreadable(&pending);
        summary.failed += pending.unreadable.len();
        summary
            .failures
            .extend(pending.unreadable.iter().map(|(p, _)| p.clone()));
        let done_elsewhere = pending.count(AssetStatus::Unchanged);
        if done_elsewhere > 0 {
            log!(
                self.logger, name;
                "{} refreshed by another run meanwhile",
                plural(done_elsewhere, "asset")
            );
        }

        for asset in pending.pending() {
            if self.process_asset(asset, &pair.output, transform) {
                summary.processed += 1;
            } else {
                summary.failed += 1;
                summary.failures.push(asset.to_path_buf());
            }
        }

        log!(
            self.logger, "done";
            "{} of {} exported to {}",
            summary.processed,
            plural(pending.pending_count(), "asset"),
            pair.output.display()
        );
        Ok(summary)
    }

    /// Transform one asset and refresh its metadata. Returns success.
    ///
    /// On any failure the metadata is left as it was so the asset stays
    /// pending for the next run.
    fn process_asset(&self, asset: &Path, output_dir: &Path, transform: &dyn AssetTransform) -> bool {
        let name = transform.name();
        debug!(self.logger, name; "processing {}", asset.display());

        let start = Instant::now();
        let exported = match transform.transform(asset, output_dir) {
            Ok(files) => files,
            Err(e) => {
                log!(self.logger, "error"; "{}: {}", asset.display(), e);
                return false;
            }
        };
        let elapsed = start.elapsed();

        match self
            .store
            .refresh(asset, AssetMetadataUpdate::exported_files(exported.clone()))
        {
            Ok(_) => {
                for file in &exported {
                    log!(self.logger, name; "saved {} ({})", file.display(), format_elapsed(elapsed));
                }
                true
            }
            Err(e) => {
                log!(self.logger, "error"; "{}: metadata refresh failed: {}", asset.display(), e);
                false
            }
        }
    }
}
