//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Input read from a file argument or stdin.
pub struct Input {
    /// Name used in messages (`<stdin>` for stdin)
    pub name: String,
    pub text: String,
}

/// Read `path`, or stdin when it is absent or `-`.
pub fn read_input(path: Option<&Path>) -> Result<Input> {
    match path {
        Some(path) if path != Path::new("-") => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read `{}`", path.display()))?;
            Ok(Input {
                name: path.display().to_string(),
                text,
            })
        }
        _ => read_stdin(),
    }
}

/// Read all of stdin.
pub fn read_stdin() -> Result<Input> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(Input {
        name: "<stdin>".to_owned(),
        text,
    })
}

/// Serialize `value` as JSON, pretty or compact.
pub fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
