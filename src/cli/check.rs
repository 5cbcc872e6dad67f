//! `folio check`: structural check of converted content in the store.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use folio::migrate::{check_document, print_grouped};
use folio::store::{ContentStore, JsonDirStore};
use folio::utils::{ParallelCollector, plural_count};
use folio::{debug, log};
use rayon::prelude::*;

use super::CheckArgs;
use crate::config::FolioConfig;

/// Check every record that carries converted content.
pub fn run_check(args: &CheckArgs, config: &FolioConfig) -> Result<()> {
    let dir = &config.store.dir;
    let store = JsonDirStore::new(dir);
    let loaded = store
        .load()
        .with_context(|| format!("Failed to load records from `{}`", dir.display()))?;

    let mut problems: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for failure in loaded.failures {
        problems
            .entry(failure.slug)
            .or_default()
            .push(failure.message);
    }

    let converted: Vec<_> = loaded
        .records
        .iter()
        .filter_map(|record| record.content.as_ref().map(|content| (record, content)))
        .collect();
    let pending = loaded
        .records
        .iter()
        .filter(|record| record.is_pending(false))
        .count();

    log!("check"; "checking {}", plural_count(converted.len(), "converted record"));

    let found = ParallelCollector::new();
    converted.par_iter().for_each(|(record, content)| {
        let issues = check_document(content);
        if issues.is_empty() {
            debug!("check"; "`{}` ok", record.slug);
        } else {
            let messages = issues.iter().map(ToString::to_string).collect::<Vec<_>>();
            found.push((record.slug.clone(), messages));
        }
    });
    for (slug, messages) in found.drain() {
        problems.entry(slug).or_default().extend(messages);
    }

    let unconvertible = loaded
        .records
        .iter()
        .filter(|record| record.is_pending(false) && !record.has_blocks_array())
        .count();
    if unconvertible > 0 {
        log!(
            "warning";
            "{} marked as having legacy blocks without a `blocks` array",
            plural_count(unconvertible, "record")
        );
    }
    if pending > 0 {
        log!("check"; "{} waiting for conversion", plural_count(pending, "record"));
    }

    print_grouped("problems", &problems);

    if !problems.is_empty() {
        bail!("Found problems in {}", plural_count(problems.len(), "record"));
    }
    if args.strict && pending > 0 {
        bail!("{} not converted yet", plural_count(pending, "record"));
    }
    log!("check"; "all converted records passed");
    Ok(())
}
