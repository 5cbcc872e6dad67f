//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Folio legacy block document converter
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: folio.toml)
    #[arg(short = 'C', long, global = true, default_value = "folio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert one legacy document to a rich-text tree
    #[command(visible_alias = "c")]
    Convert {
        #[command(flatten)]
        args: ConvertArgs,
    },

    /// Sanitize an HTML fragment against the inline allow-list
    #[command(visible_alias = "s")]
    Sanitize {
        #[command(flatten)]
        args: SanitizeArgs,
    },

    /// Convert every pending record in the store
    #[command(visible_alias = "m")]
    Migrate {
        #[command(flatten)]
        args: MigrateArgs,
    },

    /// Check converted records for structural problems
    #[command(visible_alias = "k")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
}

impl Commands {
    /// Store directory given on the command line, if any.
    pub fn store_dir(&self) -> Option<&Path> {
        match self {
            Self::Migrate { args } => args.store.as_deref(),
            Self::Check { args } => args.store.as_deref(),
            Self::Convert { .. } | Self::Sanitize { .. } => None,
        }
    }
}

/// Convert command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Legacy document JSON file. Reads stdin when omitted or `-`.
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Write the tree to a file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub pretty: Option<bool>,
}

/// Sanitize command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct SanitizeArgs {
    /// HTML fragment. Reads stdin when omitted or `-`.
    #[arg(value_name = "HTML")]
    pub html: Option<String>,

    /// Print the inline nodes (text + marks) as JSON
    #[arg(short, long, conflicts_with = "plain")]
    pub inline: bool,

    /// Print the plain text only
    #[arg(short = 't', long)]
    pub plain: bool,
}

/// Migrate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct MigrateArgs {
    /// Record directory (overrides `[store] dir`)
    #[arg(value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    pub store: Option<PathBuf>,

    /// Convert and check without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Re-convert records that already have converted content
    #[arg(short, long)]
    pub force: bool,

    /// Number of worker threads (0 = one per core)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Pretty-print rewritten record files
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub pretty: Option<bool>,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Record directory (overrides `[store] dir`)
    #[arg(value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    pub store: Option<PathBuf>,

    /// Also fail when records are still waiting for conversion
    #[arg(short, long)]
    pub strict: bool,
}
