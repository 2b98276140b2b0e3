use std::io::Read;
use std::path::Path;

use tabled::{Table, Tabled};

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::apply_table_style;
use crate::extract::{ExtractMode, Extraction, Extractor};

#[derive(Tabled)]
pub(crate) struct ItemDisplay {
    #[tabled(rename = "#")]
    pub(crate) index: usize,
    #[tabled(rename = "Action item")]
    pub(crate) description: String,
}

/// Text to scan: `--file` if given, else the positional argument, else stdin.
pub fn read_input(text: Option<String>, file: Option<&Path>) -> CliResult<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    if let Some(text) = text {
        return Ok(text);
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|source| CliError::Io {
            path: "<stdin>".into(),
            source,
        })?;
    Ok(buf)
}

/// Run the engine locally and render the result. Nothing is stored.
pub fn extract(extractor: &Extractor, text: &str, mode: ExtractMode, format: &str) -> CliResult<String> {
    let extraction = extractor.extract(text, mode);

    match format {
        "json" => Ok(serde_json::to_string_pretty(&extraction)?),
        _ => Ok(format_table(&extraction)),
    }
}

pub(crate) fn format_table(extraction: &Extraction) -> String {
    if extraction.action_items.is_empty() {
        return "No action items found.".to_string();
    }

    let rows: Vec<ItemDisplay> = extraction
        .action_items
        .iter()
        .enumerate()
        .map(|(i, description)| ItemDisplay {
            index: i + 1,
            description: description.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);

    let mut output = table.to_string();
    if !extraction.tags.is_empty() {
        let tags: Vec<&str> = extraction.tags.iter().map(String::as_str).collect();
        output.push_str(&format!("\nTags: {}", tags.join(", ")));
    }
    output
}
