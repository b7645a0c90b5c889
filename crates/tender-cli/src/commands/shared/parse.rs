use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tender_core::entities::TenderKind;

use crate::cli::subcommands::KindArg;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Collect repeated `key=value` arguments. Later keys win.
pub fn parse_assignments(pairs: &[String]) -> anyhow::Result<BTreeMap<String, String>> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("expected KEY=VALUE, got '{pair}'"))?;
            let key = key.trim();
            if key.is_empty() {
                anyhow::bail!("expected KEY=VALUE, got '{pair}'");
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

pub const fn tender_kind(kind: KindArg) -> TenderKind {
    match kind {
        KindArg::Tender => TenderKind::OfflineTender,
        KindArg::Workorder => TenderKind::Workorder,
    }
}
