use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

const fn default_header_height_mm() -> u32 {
    35
}

const fn default_footer_height_mm() -> u32 {
    20
}

/// Per-contractor letterhead settings applied around every printed section.
///
/// When the letterhead is disabled the same heights are still reserved so
/// pre-printed stationery lines up.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PrintSettings {
    pub yoj_id: String,
    #[serde(default)]
    pub letterhead_enabled: bool,
    #[serde(default)]
    pub header_html: String,
    #[serde(default)]
    pub footer_html: String,
    #[serde(default = "default_header_height_mm")]
    pub header_height_mm: u32,
    #[serde(default = "default_footer_height_mm")]
    pub footer_height_mm: u32,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl PrintSettings {
    #[must_use]
    pub fn new(yoj_id: impl Into<String>) -> Self {
        Self {
            yoj_id: yoj_id.into(),
            letterhead_enabled: false,
            header_html: String::new(),
            footer_html: String::new(),
            header_height_mm: default_header_height_mm(),
            footer_height_mm: default_footer_height_mm(),
            updated_at: None,
        }
    }
}
