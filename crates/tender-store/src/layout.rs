//! Logical record layout.
//!
//! ```text
//! contractors/{yoj_id}/profile.json
//! contractors/{yoj_id}/memory.json
//! contractors/{yoj_id}/print_settings.json
//! contractors/{yoj_id}/{packs|templates|tenders|workorders|vault}/{id}.json
//! contractors/{yoj_id}/{collection}/index.json
//! templates/global/{id}.json
//! templates/global/index.json
//! ```
//!
//! Paths are `/`-separated and relative to the store root.

use std::fmt;

use tender_core::entities::TenderKind;
use tender_core::enums::EntityType;

pub const INDEX_FILE: &str = "index.json";
pub const GLOBAL_TEMPLATES_DIR: &str = "templates/global";

/// A directory of detail records plus its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Packs,
    Templates,
    GlobalTemplates,
    Tenders,
    Workorders,
    Vault,
}

impl Collection {
    pub const ALL: [Self; 6] = [
        Self::Packs,
        Self::Templates,
        Self::GlobalTemplates,
        Self::Tenders,
        Self::Workorders,
        Self::Vault,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Packs => "packs",
            Self::Templates => "templates",
            Self::GlobalTemplates => "global_templates",
            Self::Tenders => "tenders",
            Self::Workorders => "workorders",
            Self::Vault => "vault",
        }
    }

    #[must_use]
    pub const fn entity_type(self) -> EntityType {
        match self {
            Self::Packs => EntityType::Pack,
            Self::Templates | Self::GlobalTemplates => EntityType::Template,
            Self::Tenders => EntityType::Tender,
            Self::Workorders => EntityType::Workorder,
            Self::Vault => EntityType::Vault,
        }
    }

    #[must_use]
    pub const fn for_tender(kind: TenderKind) -> Self {
        match kind {
            TenderKind::OfflineTender => Self::Tenders,
            TenderKind::Workorder => Self::Workorders,
        }
    }

    /// Parse a collection name as typed on the command line.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|c| c.as_str() == normalized)
    }

    /// Directory of this collection for `yoj_id`.
    #[must_use]
    pub fn dir(self, yoj_id: &str) -> CollectionPath {
        match self {
            Self::GlobalTemplates => CollectionPath(GLOBAL_TEMPLATES_DIR.to_string()),
            Self::Packs | Self::Templates | Self::Tenders | Self::Workorders | Self::Vault => {
                CollectionPath(format!("{}/{}", contractor_dir(yoj_id), self.as_str()))
            }
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store path of one collection directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPath(String);

impl CollectionPath {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn record(&self, id: &str) -> String {
        format!("{}/{id}.json", self.0)
    }

    #[must_use]
    pub fn index(&self) -> String {
        format!("{}/{INDEX_FILE}", self.0)
    }
}

#[must_use]
pub fn contractor_dir(yoj_id: &str) -> String {
    format!("contractors/{yoj_id}")
}

#[must_use]
pub fn profile_path(yoj_id: &str) -> String {
    format!("{}/profile.json", contractor_dir(yoj_id))
}

#[must_use]
pub fn memory_path(yoj_id: &str) -> String {
    format!("{}/memory.json", contractor_dir(yoj_id))
}

#[must_use]
pub fn print_settings_path(yoj_id: &str) -> String {
    format!("{}/print_settings.json", contractor_dir(yoj_id))
}
