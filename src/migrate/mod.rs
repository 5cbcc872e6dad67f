//! Batch migration of stored records.
//!
//! ```text
//! migrate/
//! ├── check    # check_document: structural check of a converted tree
//! └── report   # MigrationReport: counts + failures grouped by slug
//! ```
//!
//! For each pending record: read legacy content, convert, check the tree,
//! persist. A failing record is reported and the batch moves on.

pub mod check;
mod report;

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::convert::convert_value;
use crate::debug;
use crate::document::LegacyDocument;
use crate::logger::ProgressLine;
use crate::store::{ContentStore, ConvertedRecord, RecordError, StoreError, StoredRecord};
use crate::utils::{ParallelCollector, plural_count};

pub use check::{Issue, check_document};
pub use report::{MigrationReport, print_grouped};

/// Batch behaviour switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrateOptions {
    /// Convert and check, but write nothing.
    pub dry_run: bool,
    /// Also convert records that already have converted content.
    pub force: bool,
    /// Show a progress line on stderr.
    pub progress: bool,
}

/// Convert every pending record in `store`.
///
/// Records are converted in parallel on the current rayon pool. `stop` is
/// polled before each record; once it returns true the remaining records
/// are counted as interrupted. Only a store that cannot be read at all is
/// an error: per-record problems end up in the report.
pub fn migrate(
    store: &dyn ContentStore,
    options: MigrateOptions,
    stop: &(dyn Fn() -> bool + Sync),
) -> Result<MigrationReport, StoreError> {
    let loaded = store.load()?;
    let pending: Vec<&StoredRecord> = loaded
        .records
        .iter()
        .filter(|record| record.is_pending(options.force))
        .collect();

    let mut report = MigrationReport {
        total: loaded.records.len() + loaded.failures.len(),
        pending: pending.len(),
        skipped: loaded.records.len() - pending.len(),
        dry_run: options.dry_run,
        ..Default::default()
    };
    for failure in loaded.failures {
        report.add_failure(failure);
    }
    if pending.is_empty() {
        return Ok(report);
    }

    debug!("migrate"; "{} pending", plural_count(pending.len(), "record"));

    let progress = options.progress.then(|| {
        ProgressLine::new(
            "migrate",
            &[("converted", pending.len()), ("failed", pending.len())],
        )
    });
    let failures = ParallelCollector::new();
    let converted = AtomicUsize::new(0);
    let interrupted = AtomicUsize::new(0);

    pending.par_iter().for_each(|record| {
        if stop() {
            interrupted.fetch_add(1, Ordering::Relaxed);
            return;
        }
        match migrate_record(store, record, options.dry_run) {
            Ok(()) => {
                converted.fetch_add(1, Ordering::Relaxed);
                if let Some(progress) = &progress {
                    progress.inc("converted");
                }
            }
            Err(failure) => {
                failures.push(failure);
                if let Some(progress) = &progress {
                    progress.inc("failed");
                }
            }
        }
    });

    if let Some(progress) = progress {
        progress.finish();
    }

    report.converted = converted.into_inner();
    report.interrupted = interrupted.into_inner();
    for failure in failures.drain() {
        report.add_failure(failure);
    }
    Ok(report)
}

/// Convert, check and (unless `dry_run`) persist one record.
pub fn migrate_record(
    store: &dyn ContentStore,
    record: &StoredRecord,
    dry_run: bool,
) -> Result<(), RecordError> {
    let legacy = record
        .legacy_content
        .as_ref()
        .filter(|legacy| LegacyDocument::has_blocks_array(legacy))
        .ok_or_else(|| RecordError::new(&record.slug, "legacy content has no `blocks` array"))?;

    let document = convert_value(legacy);

    let issues = check_document(&document.to_value());
    if !issues.is_empty() {
        let details: Vec<_> = issues.iter().map(ToString::to_string).collect();
        return Err(RecordError::new(
            &record.slug,
            format!("converted tree failed check: {}", details.join("; ")),
        ));
    }

    if !dry_run {
        store
            .persist(&ConvertedRecord::new(&record.id, document))
            .map_err(|err| RecordError::from_error(&record.slug, &err))?;
    }

    debug!("migrate"; "converted `{}`", record.slug);
    Ok(())
}
