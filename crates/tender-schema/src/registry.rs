//! Central schema registry for all persisted record types.
//!
//! The `SchemaRegistry` builds JSON Schemas from tender-core types at
//! construction time using [`schemars::schema_for!`] and validates via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;
use tender_core::enums::EntityType;

use crate::error::SchemaError;

/// Central store of all JSON Schemas of the record store.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        if let Ok(value) = serde_json::to_value(schema_for!($ty)) {
            $map.insert($name, value);
        }
    };
}

impl SchemaRegistry {
    /// Build a new registry containing all entity, trail, and response schemas.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Stored entities, keyed by `EntityType::as_str` (8) ---
        register!(schemas, "profile", tender_core::entities::ContractorProfile);
        register!(schemas, "memory", tender_core::entities::ProfileMemory);
        register!(schemas, "template", tender_core::entities::Template);
        register!(schemas, "pack", tender_core::entities::Pack);
        register!(schemas, "tender", tender_core::entities::TenderRecord);
        register!(schemas, "workorder", tender_core::entities::TenderRecord);
        register!(schemas, "vault", tender_core::entities::VaultFile);
        register!(
            schemas,
            "print_settings",
            tender_core::entities::PrintSettings
        );

        // --- Embedded parts (3) ---
        register!(schemas, "checklist_item", tender_core::entities::ChecklistItem);
        register!(
            schemas,
            "extracted_fields",
            tender_core::entities::ExtractedFields
        );
        register!(schemas, "index_entry", tender_core::entities::IndexEntry);

        // --- Trail envelope and responses (3) ---
        register!(schemas, "trail_operation", tender_core::trail::TrailOperation);
        register!(schemas, "flash", tender_core::responses::Flash);
        register!(schemas, "index_drift", tender_core::responses::IndexDrift);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Schema of the record stored for `entity`.
    #[must_use]
    pub fn for_entity(&self, entity: EntityType) -> Option<&serde_json::Value> {
        self.get(entity.as_str())
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate a stored record of the given entity type.
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate`].
    pub fn validate_entity(
        &self,
        entity: EntityType,
        instance: &serde_json::Value,
    ) -> Result<(), SchemaError> {
        self.validate(entity.as_str(), instance)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
