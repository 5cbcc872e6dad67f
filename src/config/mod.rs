//! Configuration management for `folio.toml`.
//!
//! ```text
//! config/
//! ├── error   # ConfigError
//! ├── util    # find_config_file, resolve_path
//! └── mod.rs  # FolioConfig (this file)
//! ```
//!
//! | Section     | Purpose                                    |
//! |-------------|--------------------------------------------|
//! | `[store]`   | Record directory used by migrate and check |
//! | `[migrate]` | Worker count, dry run, output formatting   |
//! | `[convert]` | Output formatting of the convert command   |
//!
//! A missing config file is not an error: every field has a default.

mod error;
mod util;

pub use error::ConfigError;
use util::{find_config_file, resolve_path};

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result};
use folio::{debug, log};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// `[store]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory of `*.json` record files.
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content"),
        }
    }
}

/// `[migrate]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MigrateConfig {
    /// Worker threads, 0 for one per core.
    pub jobs: usize,
    pub dry_run: bool,
    /// Pretty-print rewritten record files.
    pub pretty: bool,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            jobs: 0,
            dry_run: false,
            pretty: true,
        }
    }
}

/// `[convert]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub pretty: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Root configuration structure representing `folio.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    /// Config file in use, if one was found
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub migrate: MigrateConfig,

    #[serde(default)]
    pub convert: ConvertConfig,
}

impl FolioConfig {
    /// Load configuration for the parsed command line.
    ///
    /// Searches upward from cwd for the config file. Relative paths in the
    /// file resolve against its directory, paths given on the command line
    /// against cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = Some(path);
                config
            }
            None => {
                debug!("config"; "`{}` not found, using defaults", cli.config.display());
                Self {
                    root: cwd.clone(),
                    ..Self::default()
                }
            }
        };

        config.validate()?;
        config.normalize_paths();
        config.apply_command_options(&cli.command, &cwd);
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Reject values that cannot be resolved to anything useful.
    ///
    /// Runs before normalization, while paths are still as written.
    fn validate(&self) -> Result<()> {
        if self.store.dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("[store] dir must not be empty".into()).into());
        }
        Ok(())
    }

    /// Resolve config paths against the config directory.
    fn normalize_paths(&mut self) {
        self.store.dir = resolve_path(&self.store.dir, &self.root);
    }

    /// Apply command-specific CLI overrides.
    fn apply_command_options(&mut self, command: &Commands, cwd: &Path) {
        if let Some(dir) = command.store_dir() {
            self.store.dir = resolve_path(dir, cwd);
        }

        match command {
            Commands::Convert { args } => {
                Self::update_option(&mut self.convert.pretty, args.pretty.as_ref());
            }
            Commands::Migrate { args } => {
                Self::update_option(&mut self.migrate.jobs, args.jobs.as_ref());
                Self::update_option(&mut self.migrate.pretty, args.pretty.as_ref());
                self.migrate.dry_run |= args.dry_run;
            }
            Commands::Sanitize { .. } | Commands::Check { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("folio").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = FolioConfig::from_str("").unwrap();
        assert_eq!(config.store.dir, PathBuf::from("content"));
        assert_eq!(config.migrate, MigrateConfig::default());
        assert!(config.convert.pretty);
    }

    #[test]
    fn test_full_config() {
        let config = FolioConfig::from_str(
            r#"
            [store]
            dir = "records"

            [migrate]
            jobs = 4
            dry_run = true
            pretty = false

            [convert]
            pretty = false
            "#,
        )
        .unwrap();
        assert_eq!(config.store.dir, PathBuf::from("records"));
        assert_eq!(config.migrate.jobs, 4);
        assert!(config.migrate.dry_run);
        assert!(!config.migrate.pretty);
        assert!(!config.convert.pretty);
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (config, ignored) = FolioConfig::parse_with_ignored(
            r#"
            [store]
            dir = "records"
            format = "json"

            [publish]
            target = "s3"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.dir, PathBuf::from("records"));
        assert_eq!(ignored, vec!["store.format", "publish"]);
    }

    #[test]
    fn test_invalid_toml() {
        let err = FolioConfig::parse_with_ignored("[migrate]\njobs = \"many\"").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_empty_store_dir_rejected() {
        let config = FolioConfig::from_str("[store]\ndir = \"\"").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folio.toml");
        fs::write(&path, "[store]\ndir = \"records\"\n").unwrap();

        let cli = parse(&["-C", path.to_str().unwrap(), "check"]);
        let config = FolioConfig::load(&cli).unwrap();
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.store.dir, dir.path().join("records"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = FolioConfig::from_str("[migrate]\njobs = 2\npretty = true").unwrap();
        let cwd = Path::new("/work");

        let cli = parse(&["migrate", "posts", "--jobs", "8", "--pretty", "false", "--dry-run"]);
        config.apply_command_options(&cli.command, cwd);
        assert_eq!(config.store.dir, PathBuf::from("/work/posts"));
        assert_eq!(config.migrate.jobs, 8);
        assert!(!config.migrate.pretty);
        assert!(config.migrate.dry_run);

        let cli = parse(&["convert", "--pretty=false"]);
        config.apply_command_options(&cli.command, cwd);
        assert!(!config.convert.pretty);
    }

    #[test]
    fn test_cli_leaves_config_alone() {
        let mut config = FolioConfig::from_str("[migrate]\njobs = 2").unwrap();
        let before = config.migrate.clone();
        let cli = parse(&["migrate"]);
        config.apply_command_options(&cli.command, Path::new("/work"));
        assert_eq!(config.migrate, before);
        assert_eq!(config.store.dir, PathBuf::from("content"));
    }
}
