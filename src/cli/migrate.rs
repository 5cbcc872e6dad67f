//! `folio migrate`: convert every pending record in the store.

use anyhow::{Context, Result, bail};
use folio::core::is_shutdown;
use folio::log;
use folio::migrate::{MigrateOptions, migrate};
use folio::store::JsonDirStore;
use folio::utils::plural_count;

use super::MigrateArgs;
use crate::config::FolioConfig;

/// Run the batch on a worker pool sized from `[migrate] jobs`.
pub fn run_migrate(args: &MigrateArgs, config: &FolioConfig) -> Result<()> {
    let dir = &config.store.dir;
    let store = JsonDirStore::new(dir).with_pretty(config.migrate.pretty);
    let options = MigrateOptions {
        dry_run: config.migrate.dry_run,
        force: args.force,
        progress: true,
    };

    log!(
        "migrate";
        "{}records in {}",
        if options.dry_run { "dry run, " } else { "" },
        store.dir().display()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.migrate.jobs)
        .build()
        .context("Failed to start worker pool")?;

    let report = pool
        .install(|| migrate(&store, options, &is_shutdown))
        .with_context(|| format!("Failed to load records from `{}`", dir.display()))?;

    if report.total == 0 {
        log!("migrate"; "no records found");
        return Ok(());
    }

    report.print();
    log!("migrate"; "{}", report);

    let failed = report.failure_count();
    if failed > 0 {
        bail!("Migration failed for {}", plural_count(failed, "record"));
    }
    if report.interrupted > 0 {
        bail!("Interrupted with {} left", plural_count(report.interrupted, "record"));
    }
    Ok(())
}
