//! `folio sanitize`: inspect what the inline pipeline makes of a fragment.

use anyhow::Result;
use folio::convert::{parse_inline, plain_text};
use folio::sanitize::sanitize;

use super::SanitizeArgs;
use super::common::{Input, read_stdin, to_json};

/// Print the sanitized HTML, the inline nodes, or the plain text.
pub fn run_sanitize(args: &SanitizeArgs) -> Result<()> {
    let html = match args.html.as_deref() {
        Some(html) if html != "-" => html.to_owned(),
        _ => {
            let Input { text, .. } = read_stdin()?;
            text
        }
    };

    let output = if args.inline {
        to_json(&parse_inline(&html), true)?
    } else if args.plain {
        plain_text(&html)
    } else {
        sanitize(&html)
    };
    println!("{output}");
    Ok(())
}
