use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{BodyFormat, ChecklistStatus, ItemSource, Orientation, PackStatus, PageSize};
use crate::errors::ValidationError;
use crate::time::Timestamp;

/// Everything needed to submit one tender or fulfil one workorder.
///
/// Never hard-deleted; archived through `status`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Pack {
    pub pack_id: String,
    pub owner_yoj_id: String,
    pub title: String,
    #[serde(default)]
    pub source: PackSource,
    #[serde(default)]
    pub items: Vec<PackItem>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    /// Vault documents mapped onto items or checklist items.
    #[serde(default)]
    pub attachments: Vec<AttachmentMapping>,
    #[serde(default)]
    pub generated_docs: Vec<GeneratedDoc>,
    /// IDs of templates already generated into this pack.
    #[serde(default)]
    pub generated_templates: Vec<String>,
    #[serde(default)]
    pub annexure_list: Vec<Annexure>,
    #[serde(default)]
    pub print_prefs: PrintPrefs,
    #[serde(default)]
    pub status: PackStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Pack {
    /// Check the structural invariants before the pack is persisted.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the title is blank, a checklist or item
    /// ID repeats, or an attachment mapping points at an unknown item.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new("title", "must not be empty"));
        }

        let mut known = HashSet::new();
        for id in self
            .items
            .iter()
            .map(|item| item.item_id.as_str())
            .chain(self.checklist.iter().map(|item| item.item_id.as_str()))
        {
            if !known.insert(id) {
                return Err(ValidationError::new(
                    "item_id",
                    format!("duplicate item id '{id}'"),
                ));
            }
        }

        if let Some(mapping) = self
            .attachments
            .iter()
            .find(|mapping| !known.contains(mapping.item_id.as_str()))
        {
            return Err(ValidationError::new(
                "attachments",
                format!(
                    "mapping for file '{}' references unknown item '{}'",
                    mapping.file_id, mapping.item_id
                ),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn checklist_item(&self, item_id: &str) -> Option<&ChecklistItem> {
        self.checklist.iter().find(|item| item.item_id == item_id)
    }

    pub fn checklist_item_mut(&mut self, item_id: &str) -> Option<&mut ChecklistItem> {
        self.checklist.iter_mut().find(|item| item.item_id == item_id)
    }

    /// Whether `item_id` names an item or checklist entry of this pack.
    #[must_use]
    pub fn has_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.item_id == item_id)
            || self.checklist.iter().any(|item| item.item_id == item_id)
    }
}

/// What a pack was created from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PackSource {
    OfflineTender { tender_id: String },
    Workorder { workorder_id: String },
    Blueprint { blueprint_id: String },
    Template { template_id: String },
    #[default]
    Manual,
}

/// A non-checklist pack entry (e.g. a bid section the contractor tracks).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PackItem {
    pub item_id: String,
    pub title: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub notes: String,
}

/// One deliverable tracked in a pack.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistItem {
    pub item_id: String,
    pub title: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub status: ChecklistStatus,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub source: ItemSource,
    #[serde(default)]
    pub file_refs: Vec<FileRef>,
    #[serde(default)]
    pub notes: String,
}

impl ChecklistItem {
    pub fn new(item_id: impl Into<String>, title: impl Into<String>, required: bool) -> Self {
        Self {
            item_id: item_id.into(),
            title: title.into(),
            required,
            status: ChecklistStatus::Pending,
            category: String::new(),
            source: ItemSource::Contractor,
            file_refs: Vec::new(),
            notes: String::new(),
        }
    }
}

/// Evidence attached to a checklist item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileRef {
    /// File uploaded directly against this item.
    Upload { path: String, name: String },
    /// Document linked from the contractor's vault.
    Vault { file_id: String },
    /// Document generated from a template inside this pack.
    Generated { doc_id: String },
}

/// Maps a vault document onto an item of the pack.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttachmentMapping {
    pub item_id: String,
    pub file_id: String,
}

/// A template rendered into the pack.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GeneratedDoc {
    pub doc_id: String,
    pub template_id: String,
    pub title: String,
    /// Annexure this document fulfils, if any.
    #[serde(default)]
    pub annexure_id: Option<String>,
    pub body: String,
    #[serde(default)]
    pub format: BodyFormat,
    /// Placeholders that were still blank when the document was generated.
    #[serde(default)]
    pub missing: Vec<String>,
    pub generated_at: Timestamp,
}

/// A tender-mandated format or schedule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Annexure {
    pub annexure_id: String,
    /// Label as printed in the notice, e.g. `Annexure-B`.
    #[serde(default)]
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub template_id: Option<String>,
    /// Pricing/BOQ/SOR formats are never generated.
    #[serde(default)]
    pub restricted: bool,
}

const fn default_true() -> bool {
    true
}

/// Print preferences stored with the pack.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PrintPrefs {
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default = "default_true")]
    pub include_letterhead: bool,
    #[serde(default)]
    pub include_checklist_notes: bool,
}

impl Default for PrintPrefs {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            include_letterhead: true,
            include_checklist_notes: false,
        }
    }
}
