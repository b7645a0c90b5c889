//! Value resolver: one value per required placeholder key.
//!
//! Precedence per key is fixed:
//! 1. request override, when non-blank
//! 2. profile memory, when non-blank
//! 3. record-derived value: the contractor profile mapping, then any
//!    context-bundle value
//! 4. blank
//!
//! Resolution is pure. Saving a value "for future" is the caller's job.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tender_core::entities::{ContractorProfile, ProfileMemory, Template};

use crate::fill::scan_keys;
use crate::registry::FieldRegistry;

/// Which layer supplied a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    Override,
    Memory,
    Profile,
    Context,
    Blank,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub values: BTreeMap<String, String>,
    /// Keys whose value trims to empty, in required-key order.
    pub missing: Vec<String>,
    pub sources: BTreeMap<String, ValueSource>,
}

impl Resolution {
    /// Whether every required key resolved to a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

fn non_blank(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}

/// Resolve every key in `required_keys`.
#[must_use]
pub fn resolve(
    profile: &ContractorProfile,
    memory: &ProfileMemory,
    overrides: &BTreeMap<String, String>,
    required_keys: &[String],
    registry: &FieldRegistry,
) -> Resolution {
    let mut resolution = Resolution::default();
    let mut seen = HashSet::new();

    for key in required_keys {
        if !seen.insert(key.as_str()) {
            continue;
        }

        let (value, source) = if let Some(v) = overrides.get(key).and_then(|v| non_blank(v)) {
            (v.to_string(), ValueSource::Override)
        } else if let Some(v) = memory.value(key).and_then(non_blank) {
            (v.to_string(), ValueSource::Memory)
        } else if let Some(v) = registry
            .profile_source(key)
            .map(|field| profile.field_value(field))
            .filter(|v| !v.trim().is_empty())
        {
            (v, ValueSource::Profile)
        } else if let Some(v) = registry.context_value(key).and_then(non_blank) {
            (v.to_string(), ValueSource::Context)
        } else {
            (String::new(), ValueSource::Blank)
        };

        if source == ValueSource::Blank {
            resolution.missing.push(key.clone());
        }
        resolution.values.insert(key.clone(), value);
        resolution.sources.insert(key.clone(), source);
    }

    resolution
}

/// Scalar placeholder keys of a template, in first-appearance order.
#[must_use]
pub fn required_keys_for(template: &Template) -> Vec<String> {
    let mut keys = scan_keys(&template.body);
    let mut seen: HashSet<String> = keys.iter().cloned().collect();
    for table in &template.tables {
        if let Some(row_template) = &table.row_template {
            for key in scan_keys(row_template) {
                let is_column = table.columns.iter().any(|column| column.key == key);
                if !is_column && seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tender_core::entities::{ProfileMemoryEntry, TableColumn, TemplateTable};
    use tender_core::enums::{BodyFormat, FieldType, MemorySource, TemplateScope};
    use tender_core::time::now_ist;

    use super::*;
    use crate::registry::ContextBundle;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| (*k).to_string()).collect()
    }

    fn memory_with(key: &str, value: &str) -> ProfileMemory {
        let mut memory = ProfileMemory::new("YOJ1");
        memory.upsert(ProfileMemoryEntry {
            key: key.into(),
            value: value.into(),
            label: String::new(),
            field_type: FieldType::Text,
            updated_at: now_ist(),
            source: MemorySource::Manual,
        });
        memory
    }

    fn profile() -> ContractorProfile {
        let mut profile = ContractorProfile::new("YOJ1");
        profile.firm_name = "Shree Ganesh Constructions".into();
        profile.tax.gst = "08ABCDE1234F1Z5".into();
        profile
    }

    #[test]
    fn override_beats_memory_and_profile() {
        let memory = memory_with("firm.name", "From Memory");
        let overrides = BTreeMap::from([("firm.name".to_string(), "For This Bid".to_string())]);
        let res = resolve(
            &profile(),
            &memory,
            &overrides,
            &keys(&["firm.name"]),
            &FieldRegistry::standard(),
        );
        assert_eq!(res.values["firm.name"], "For This Bid");
        assert_eq!(res.sources["firm.name"], ValueSource::Override);
    }

    #[test]
    fn blank_override_falls_back_to_memory() {
        let memory = memory_with("tax.gst", "08ZZZZZ9999Z1Z5");
        let overrides = BTreeMap::from([("tax.gst".to_string(), "   ".to_string())]);
        let res = resolve(
            &profile(),
            &memory,
            &overrides,
            &keys(&["tax.gst"]),
            &FieldRegistry::standard(),
        );
        assert_eq!(res.values["tax.gst"], "08ZZZZZ9999Z1Z5");
        assert_eq!(res.sources["tax.gst"], ValueSource::Memory);
    }

    #[test]
    fn profile_then_context_then_blank() {
        let bundle = ContextBundle::new("tender").with_field("dept", "Department", FieldType::Text, "PWD");
        let registry = FieldRegistry::build(&[bundle]);
        let res = resolve(
            &profile(),
            &ProfileMemory::new("YOJ1"),
            &BTreeMap::new(),
            &keys(&["firm.name", "dept", "tax.pan", "site.engineer"]),
            &registry,
        );
        assert_eq!(res.sources["firm.name"], ValueSource::Profile);
        assert_eq!(res.sources["dept"], ValueSource::Context);
        assert_eq!(res.values["dept"], "PWD");
        assert_eq!(res.sources["tax.pan"], ValueSource::Blank);
        assert_eq!(res.missing, keys(&["tax.pan", "site.engineer"]));
    }

    #[test]
    fn missing_matches_blank_values_exactly() {
        let memory = memory_with("bank.name", "  ");
        let res = resolve(
            &profile(),
            &memory,
            &BTreeMap::new(),
            &keys(&["bank.name", "firm.name", "bank.name", "tax.gst", "x.y"]),
            &FieldRegistry::standard(),
        );
        let blank: Vec<String> = res
            .values
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(k, _)| k.clone())
            .collect();
        let mut missing = res.missing.clone();
        missing.sort();
        assert_eq!(missing, blank);
        assert_eq!(res.missing, keys(&["bank.name", "x.y"]));
        assert!(!res.is_complete());
    }

    #[test]
    fn required_keys_follow_first_appearance() {
        let template = Template {
            id: "tpl-1".into(),
            scope: TemplateScope::Global,
            owner_yoj_id: None,
            title: "Letter".into(),
            category: String::new(),
            description: String::new(),
            body: "{{dept}} {{firm.name}} {{ dept }} {{table:items}}".into(),
            format: BodyFormat::Text,
            tables: vec![TemplateTable {
                key: "items".into(),
                title: String::new(),
                columns: vec![TableColumn::new("qty", "Qty")],
                row_template: Some("{{qty}} x {{unit.label}}".into()),
            }],
            created_at: now_ist(),
            updated_at: now_ist(),
        };
        assert_eq!(
            required_keys_for(&template),
            keys(&["dept", "firm.name", "unit.label"])
        );
    }
}
