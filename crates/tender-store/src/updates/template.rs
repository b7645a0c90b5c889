//! Template update builder.

use serde::Serialize;
use tender_core::entities::{Template, TemplateTable};
use tender_core::enums::BodyFormat;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<BodyFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<TemplateTable>>,
}

impl TemplateUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.body.is_none()
            && self.format.is_none()
            && self.tables.is_none()
    }

    pub fn apply_to(&self, template: &mut Template) {
        if let Some(title) = &self.title {
            template.title.clone_from(title);
        }
        if let Some(category) = &self.category {
            template.category.clone_from(category);
        }
        if let Some(description) = &self.description {
            template.description.clone_from(description);
        }
        if let Some(body) = &self.body {
            template.body.clone_from(body);
        }
        if let Some(format) = self.format {
            template.format = format;
        }
        if let Some(tables) = &self.tables {
            template.tables.clone_from(tables);
        }
    }
}

pub struct TemplateUpdateBuilder(TemplateUpdate);

impl TemplateUpdateBuilder {
    pub fn new() -> Self {
        Self(TemplateUpdate::default())
    }

    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    pub fn category(mut self, val: impl Into<String>) -> Self {
        self.0.category = Some(val.into());
        self
    }

    pub fn description(mut self, val: impl Into<String>) -> Self {
        self.0.description = Some(val.into());
        self
    }

    pub fn body(mut self, val: impl Into<String>) -> Self {
        self.0.body = Some(val.into());
        self
    }

    pub const fn format(mut self, val: BodyFormat) -> Self {
        self.0.format = Some(val);
        self
    }

    pub fn tables(mut self, val: Vec<TemplateTable>) -> Self {
        self.0.tables = Some(val);
        self
    }

    pub fn build(self) -> TemplateUpdate {
        self.0
    }
}

impl Default for TemplateUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
