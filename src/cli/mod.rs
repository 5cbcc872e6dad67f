//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod convert;
pub mod migrate;
pub mod sanitize;

pub use args::{CheckArgs, Cli, Commands, ConvertArgs, MigrateArgs, SanitizeArgs};
