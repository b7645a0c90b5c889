//! Pack print preference update builder.

use serde::Serialize;
use tender_core::entities::PrintPrefs;
use tender_core::enums::{Orientation, PageSize};

#[derive(Debug, Clone, Default, Serialize)]
pub struct PrintPrefsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_letterhead: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_checklist_notes: Option<bool>,
}

impl PrintPrefsUpdate {
    pub const fn apply_to(&self, prefs: &mut PrintPrefs) {
        if let Some(page_size) = self.page_size {
            prefs.page_size = page_size;
        }
        if let Some(orientation) = self.orientation {
            prefs.orientation = orientation;
        }
        if let Some(include) = self.include_letterhead {
            prefs.include_letterhead = include;
        }
        if let Some(include) = self.include_checklist_notes {
            prefs.include_checklist_notes = include;
        }
    }
}

pub struct PrintPrefsUpdateBuilder(PrintPrefsUpdate);

impl PrintPrefsUpdateBuilder {
    pub fn new() -> Self {
        Self(PrintPrefsUpdate::default())
    }

    pub const fn page_size(mut self, val: PageSize) -> Self {
        self.0.page_size = Some(val);
        self
    }

    pub const fn orientation(mut self, val: Orientation) -> Self {
        self.0.orientation = Some(val);
        self
    }

    pub const fn include_letterhead(mut self, val: bool) -> Self {
        self.0.include_letterhead = Some(val);
        self
    }

    pub const fn include_checklist_notes(mut self, val: bool) -> Self {
        self.0.include_checklist_notes = Some(val);
        self
    }

    pub fn build(self) -> PrintPrefsUpdate {
        self.0
    }
}

impl Default for PrintPrefsUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
