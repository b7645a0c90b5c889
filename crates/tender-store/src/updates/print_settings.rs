//! Letterhead settings update builder.

use serde::Serialize;
use tender_core::entities::PrintSettings;

/// Letterhead heights are limited so header and footer never eat the page.
pub const MAX_LETTERHEAD_MM: u32 = 100;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PrintSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letterhead_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_height_mm: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_height_mm: Option<u32>,
}

impl PrintSettingsUpdate {
    pub fn apply_to(&self, settings: &mut PrintSettings) {
        if let Some(enabled) = self.letterhead_enabled {
            settings.letterhead_enabled = enabled;
        }
        if let Some(html) = &self.header_html {
            settings.header_html.clone_from(html);
        }
        if let Some(html) = &self.footer_html {
            settings.footer_html.clone_from(html);
        }
        if let Some(mm) = self.header_height_mm {
            settings.header_height_mm = mm;
        }
        if let Some(mm) = self.footer_height_mm {
            settings.footer_height_mm = mm;
        }
    }
}

pub struct PrintSettingsUpdateBuilder(PrintSettingsUpdate);

impl PrintSettingsUpdateBuilder {
    pub fn new() -> Self {
        Self(PrintSettingsUpdate::default())
    }

    pub const fn letterhead_enabled(mut self, val: bool) -> Self {
        self.0.letterhead_enabled = Some(val);
        self
    }

    pub fn header_html(mut self, val: impl Into<String>) -> Self {
        self.0.header_html = Some(val.into());
        self
    }

    pub fn footer_html(mut self, val: impl Into<String>) -> Self {
        self.0.footer_html = Some(val.into());
        self
    }

    pub const fn header_height_mm(mut self, val: u32) -> Self {
        self.0.header_height_mm = Some(val);
        self
    }

    pub const fn footer_height_mm(mut self, val: u32) -> Self {
        self.0.footer_height_mm = Some(val);
        self
    }

    pub fn build(self) -> PrintSettingsUpdate {
        self.0
    }
}

impl Default for PrintSettingsUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
