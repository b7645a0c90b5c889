use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{BodyFormat, TemplateScope};
use crate::time::Timestamp;

/// One row of table data, keyed by column key.
pub type TableRow = BTreeMap<String, String>;

/// A document template with `{{key}}` and `{{table:key}}` placeholders.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Template {
    pub id: String,
    pub scope: TemplateScope,
    /// Set for contractor-scoped templates.
    #[serde(default)]
    pub owner_yoj_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub body: String,
    #[serde(default)]
    pub format: BodyFormat,
    #[serde(default)]
    pub tables: Vec<TemplateTable>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Template {
    /// Table definition for a `{{table:key}}` placeholder.
    #[must_use]
    pub fn table(&self, key: &str) -> Option<&TemplateTable> {
        self.tables.iter().find(|table| table.key == key)
    }

    /// Whether `yoj_id` may edit or delete this template.
    #[must_use]
    pub fn is_owned_by(&self, yoj_id: &str) -> bool {
        self.scope == TemplateScope::Contractor && self.owner_yoj_id.as_deref() == Some(yoj_id)
    }
}

/// A repeating table inside a template body.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TemplateTable {
    pub key: String,
    #[serde(default)]
    pub title: String,
    pub columns: Vec<TableColumn>,
    /// Custom per-row markup using `{{column}}` placeholders. When absent, one
    /// cell per configured column is emitted.
    #[serde(default)]
    pub row_template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TableColumn {
    pub key: String,
    pub label: String,
}

impl TableColumn {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}
