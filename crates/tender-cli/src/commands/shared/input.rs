use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tender_core::entities::TableRow;

use crate::cli::subcommands::FillValues;
use crate::commands::shared::parse::parse_assignments;

/// Read a UTF-8 text file given on the command line.
pub fn read_text(path: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(Path::new(path)).with_context(|| format!("failed to read {path}"))
}

/// Read and deserialize a JSON file given on the command line.
pub fn read_json<T: DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| format!("{path} is not valid JSON for this command"))
}

/// Overrides and table rows typed for one fill.
pub fn fill_values(
    values: &FillValues,
) -> anyhow::Result<(BTreeMap<String, String>, BTreeMap<String, Vec<TableRow>>)> {
    let overrides = parse_assignments(&values.set)?;
    let tables = match &values.tables_file {
        Some(path) => read_json(path)?,
        None => BTreeMap::new(),
    };
    Ok((overrides, tables))
}
