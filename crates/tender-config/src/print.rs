//! Print composer defaults.

use serde::{Deserialize, Serialize};
use tender_core::enums::{Orientation, PageSize};

/// Marker printed where a placeholder has no value.
pub const DEFAULT_BLANK_MARKER: &str = "__________";

fn default_blank_marker() -> String {
    DEFAULT_BLANK_MARKER.to_string()
}

const fn default_suggestion_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrintConfig {
    #[serde(default)]
    pub page_size: PageSize,

    #[serde(default)]
    pub orientation: Orientation,

    #[serde(default = "default_blank_marker")]
    pub blank_marker: String,

    /// Minimum confidence for a vault suggestion to be shown.
    #[serde(default = "default_suggestion_threshold")]
    pub suggestion_threshold: f64,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            orientation: Orientation::default(),
            blank_marker: default_blank_marker(),
            suggestion_threshold: default_suggestion_threshold(),
        }
    }
}
