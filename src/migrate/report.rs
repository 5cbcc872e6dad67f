//! Migration report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::store::RecordError;
use crate::utils::{plural_count, plural_s};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// Records found in the store (readable or not).
    pub total: usize,
    /// Records selected for conversion.
    pub pending: usize,
    /// Records converted (and written, unless dry run).
    pub converted: usize,
    /// Readable records without legacy blocks, or already converted.
    pub skipped: usize,
    /// Pending records left alone after an interrupt.
    pub interrupted: usize,
    pub dry_run: bool,
    /// Failure messages grouped by record slug.
    pub failures: BTreeMap<String, Vec<String>>,
}

impl MigrationReport {
    pub fn add_failure(&mut self, failure: RecordError) {
        self.failures
            .entry(failure.slug)
            .or_default()
            .push(failure.message);
    }

    /// Number of records with at least one failure.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Print failures grouped by record to stderr.
    pub fn print(&self) {
        print_grouped("failures", &self.failures);
    }
}

/// Print `[slug]` headers with one `→ message` line per entry to stderr.
pub fn print_grouped(title: &str, groups: &BTreeMap<String, Vec<String>>) {
    if groups.is_empty() {
        return;
    }
    eprintln!();

    eprintln!(
        "{} {}",
        title.red().bold(),
        format!("({})", plural_count(groups.len(), "record")).dimmed()
    );

    for (slug, messages) in groups {
        eprintln!("{}{}{}", "[".dimmed(), slug.cyan(), "]".dimmed());
        for message in messages {
            eprintln!("{} {}", "→".red(), message);
        }
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run {
            "would convert"
        } else {
            "converted"
        };
        write!(
            f,
            "{} {}, skipped {}",
            verb,
            plural_count(self.converted, "record"),
            self.skipped
        )?;
        if self.interrupted > 0 {
            write!(f, ", {} {}", "interrupted".yellow(), self.interrupted)?;
        }
        let failed = self.failure_count();
        if failed > 0 {
            write!(
                f,
                ", {} {}",
                failed.to_string().red().bold(),
                format!("failure{}", plural_s(failed)).dimmed()
            )?;
        }
        Ok(())
    }
}
