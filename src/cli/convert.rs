//! `folio convert`: one legacy document to a rich-text tree.

use std::fs;

use anyhow::{Context, Result};
use folio::convert::convert_value;
use folio::document::LegacyDocument;
use folio::utils::plural_count;
use folio::{debug, log};

use super::ConvertArgs;
use super::common::{read_input, to_json};
use crate::config::FolioConfig;

/// Convert the input document and print or write the result.
pub fn run_convert(args: &ConvertArgs, config: &FolioConfig) -> Result<()> {
    let input = read_input(args.input.as_deref())?;
    let value: serde_json::Value = serde_json::from_str(&input.text)
        .with_context(|| format!("`{}` is not valid JSON", input.name))?;

    if !LegacyDocument::has_blocks_array(&value) {
        log!("warning"; "`{}` has no `blocks` array, output is an empty document", input.name);
    }

    let document = convert_value(&value);
    debug!(
        "convert";
        "{} → {}",
        input.name,
        plural_count(document.content.len(), "node")
    );

    let json = to_json(&document, config.convert.pretty)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write `{}`", path.display()))?;
            log!("convert"; "wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
