//! Field registry: the table of known placeholder keys.
//!
//! Static declarations cover the contractor profile. Context bundles add keys
//! owned by other records (the tender being bid on, the current request).
//! Unknown keys never fail; they get a label derived from the key itself.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tender_core::entities::{ProfileField, TenderRecord};
use tender_core::enums::FieldType;
use tender_core::errors::ValidationError;
use tender_core::time::{Timestamp, display_date, parse_date};

use crate::patterns::cached;

/// Owner of the statically declared keys.
pub const CONTRACTOR_OWNER: &str = "contractor";

/// Length limit applied to keys that declare none.
pub const DEFAULT_MAX_LEN: usize = 500;

/// Everything the pipeline knows about one placeholder key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub field_type: FieldType,
    pub max_len: usize,
    /// Entity that owns the key (`contractor`, `tender`, `request`, ...).
    pub owner: String,
    /// Direct mapping onto the contractor profile, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_source: Option<ProfileField>,
}

impl FieldSpec {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        field_type: FieldType,
        max_len: usize,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            field_type,
            max_len,
            owner: owner.into(),
            profile_source: None,
        }
    }

    /// Spec for a key nobody declared.
    #[must_use]
    pub fn generic(key: &str) -> Self {
        Self::new(
            key,
            title_case(key),
            FieldType::Text,
            DEFAULT_MAX_LEN,
            "unknown",
        )
    }
}

/// Keys and values contributed by a record other than the contractor profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextBundle {
    pub owner: String,
    pub fields: Vec<FieldSpec>,
    pub values: BTreeMap<String, String>,
}

impl ContextBundle {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            ..Self::default()
        }
    }

    /// Declare a key owned by this bundle together with its value.
    #[must_use]
    pub fn with_field(
        mut self,
        key: &str,
        label: &str,
        field_type: FieldType,
        value: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldSpec::new(
            key,
            label,
            field_type,
            DEFAULT_MAX_LEN,
            self.owner.clone(),
        ));
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Keys describing the tender or workorder a document is generated for.
    #[must_use]
    pub fn from_tender(record: &TenderRecord) -> Self {
        let x = &record.extracted;
        let title = if x.title.trim().is_empty() {
            record.title.clone()
        } else {
            x.title.clone()
        };
        Self::new(record.kind.entity_type().as_str())
            .with_field("tender.number", "Tender No.", FieldType::Text, x.tender_number.clone())
            .with_field("tender.title", "Name of Work", FieldType::Textarea, title)
            .with_field("dept", "Department", FieldType::Text, x.department.clone())
            .with_field("tender.location", "Work Location", FieldType::Text, x.work_location.clone())
            .with_field("tender.publish_date", "Publish Date", FieldType::Date, x.publish_date.clone())
            .with_field("tender.pre_bid_date", "Pre-bid Meeting", FieldType::Date, x.pre_bid_date.clone())
            .with_field("tender.deadline", "Submission Deadline", FieldType::Date, x.submission_deadline.clone())
            .with_field("tender.opening_date", "Opening Date", FieldType::Date, x.opening_date.clone())
            .with_field("tender.fee", "Tender Fee", FieldType::Text, x.tender_fee.clone())
            .with_field("tender.emd", "EMD", FieldType::Text, x.emd.clone())
            .with_field("tender.completion_period", "Completion Period", FieldType::Text, x.completion_period.clone())
            .with_field("tender.validity_days", "Bid Validity", FieldType::Text, x.validity_days.clone())
    }

    /// Keys known only at request time.
    #[must_use]
    pub fn for_request(now: &Timestamp) -> Self {
        let mut bundle = Self::new("request");
        bundle
            .values
            .insert("date.today".to_string(), display_date(now));
        bundle
    }
}

/// `(key, label, type, max_len, profile mapping)` for the contractor keys.
const STATIC_FIELDS: &[(&str, &str, FieldType, usize, Option<ProfileField>)] = &[
    ("firm.name", "Firm Name", FieldType::Text, 150, Some(ProfileField::FirmName)),
    ("firm.type", "Firm Type", FieldType::Text, 60, Some(ProfileField::FirmType)),
    ("firm.proprietor", "Proprietor / Partner", FieldType::Text, 120, Some(ProfileField::ProprietorName)),
    ("firm.address", "Firm Address", FieldType::Textarea, 300, Some(ProfileField::AddressOneLine)),
    ("firm.city", "City", FieldType::Text, 80, Some(ProfileField::City)),
    ("firm.district", "District", FieldType::Text, 80, Some(ProfileField::District)),
    ("firm.state", "State", FieldType::Text, 80, Some(ProfileField::State)),
    ("firm.pincode", "PIN Code", FieldType::Pincode, 6, Some(ProfileField::Pincode)),
    ("firm.registration_no", "Registration No.", FieldType::Text, 60, Some(ProfileField::RegistrationNo)),
    ("contact.mobile", "Mobile", FieldType::Phone, 16, Some(ProfileField::Mobile)),
    ("contact.email", "Email", FieldType::Email, 120, Some(ProfileField::Email)),
    ("tax.pan", "PAN", FieldType::Pan, 10, Some(ProfileField::Pan)),
    ("tax.gst", "GSTIN", FieldType::Gst, 15, Some(ProfileField::Gst)),
    ("signatory.name", "Authorised Signatory", FieldType::Text, 120, Some(ProfileField::SignatoryName)),
    ("signatory.designation", "Designation", FieldType::Text, 80, Some(ProfileField::SignatoryDesignation)),
    ("bank.account_name", "Account Holder", FieldType::Text, 120, Some(ProfileField::BankAccountName)),
    ("bank.account_no", "Account No.", FieldType::Number, 20, Some(ProfileField::BankAccountNo)),
    ("bank.ifsc", "IFSC", FieldType::Ifsc, 11, Some(ProfileField::BankIfsc)),
    ("bank.name", "Bank", FieldType::Text, 120, Some(ProfileField::BankName)),
    ("bank.branch", "Branch", FieldType::Text, 120, Some(ProfileField::BankBranch)),
    ("date.today", "Date", FieldType::Date, 10, None),
];

/// Lookup table of placeholder keys.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: BTreeMap<String, FieldSpec>,
    context_values: BTreeMap<String, String>,
}

impl FieldRegistry {
    /// Build the registry from the static declarations plus context bundles.
    ///
    /// Earlier declarations win: a bundle can neither redefine a contractor
    /// key nor a key declared by a previous bundle. Bundle values are kept
    /// for every key, first non-blank value wins.
    #[must_use]
    pub fn build(context_bundles: &[ContextBundle]) -> Self {
        let mut fields = BTreeMap::new();
        for (key, label, field_type, max_len, source) in STATIC_FIELDS {
            let mut spec = FieldSpec::new(*key, *label, *field_type, *max_len, CONTRACTOR_OWNER);
            spec.profile_source = *source;
            fields.insert((*key).to_string(), spec);
        }

        let mut context_values = BTreeMap::new();
        for bundle in context_bundles {
            for spec in &bundle.fields {
                fields.entry(spec.key.clone()).or_insert_with(|| spec.clone());
            }
            for (key, value) in &bundle.values {
                if value.trim().is_empty() {
                    continue;
                }
                context_values
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }

        Self {
            fields,
            context_values,
        }
    }

    /// Registry with only the static contractor keys.
    #[must_use]
    pub fn standard() -> Self {
        Self::build(&[])
    }

    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, FieldSpec> {
        &self.fields
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.get(key)
    }

    /// Spec for `key`, falling back to a generic one for unknown keys.
    #[must_use]
    pub fn spec_for(&self, key: &str) -> FieldSpec {
        self.get(key)
            .cloned()
            .unwrap_or_else(|| FieldSpec::generic(key))
    }

    #[must_use]
    pub fn label_for(&self, key: &str) -> String {
        self.get(key)
            .map_or_else(|| title_case(key), |spec| spec.label.clone())
    }

    #[must_use]
    pub fn profile_source(&self, key: &str) -> Option<ProfileField> {
        self.get(key).and_then(|spec| spec.profile_source)
    }

    /// Value a context bundle supplied for `key`.
    #[must_use]
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context_values.get(key).map(String::as_str)
    }

    /// Check a value a contractor typed for `key`.
    ///
    /// Blank values pass; whether a blank is acceptable is decided by the
    /// missing-key report, not here.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` on the key when the value is too long or
    /// does not match the key's format.
    pub fn validate_value(&self, key: &str, value: &str) -> Result<(), ValidationError> {
        let spec = self.spec_for(key);
        let value = value.trim();
        if value.is_empty() {
            return Ok(());
        }
        if value.chars().count() > spec.max_len {
            return Err(ValidationError::new(
                key,
                format!("must be at most {} characters", spec.max_len),
            ));
        }
        if check_format(spec.field_type, value) {
            Ok(())
        } else {
            Err(ValidationError::new(key, format_message(spec.field_type)))
        }
    }
}

static PAN: OnceLock<Option<Regex>> = OnceLock::new();
static GST: OnceLock<Option<Regex>> = OnceLock::new();
static IFSC: OnceLock<Option<Regex>> = OnceLock::new();
static PINCODE: OnceLock<Option<Regex>> = OnceLock::new();
static PHONE: OnceLock<Option<Regex>> = OnceLock::new();
static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();

fn matches(cell: &'static OnceLock<Option<Regex>>, pattern: &str, value: &str) -> bool {
    cached(cell, pattern).is_some_and(|re| re.is_match(value))
}

fn check_format(field_type: FieldType, value: &str) -> bool {
    let upper = value.to_ascii_uppercase();
    match field_type {
        FieldType::Text | FieldType::Textarea => true,
        FieldType::Pan => matches(&PAN, r"^[A-Z]{5}[0-9]{4}[A-Z]$", &upper),
        FieldType::Gst => {
            // The PAN is embedded at positions 3..13.
            matches(&GST, r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$", &upper)
        }
        FieldType::Ifsc => matches(&IFSC, r"^[A-Z]{4}0[A-Z0-9]{6}$", &upper),
        FieldType::Pincode => matches(&PINCODE, r"^[1-9][0-9]{5}$", value),
        FieldType::Phone => matches(&PHONE, r"^(?:\+91[\s-]?|0)?[6-9][0-9]{9}$", value),
        FieldType::Email => matches(&EMAIL, r"^[^@\s]+@[^@\s]+\.[^@\s]+$", value),
        FieldType::Date => parse_date(value).is_some(),
        FieldType::Number => value.replace(',', "").parse::<f64>().is_ok(),
    }
}

const fn format_message(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Text | FieldType::Textarea => "is not valid",
        FieldType::Pan => "must be a PAN like ABCDE1234F",
        FieldType::Gst => "must be a 15-character GSTIN",
        FieldType::Ifsc => "must be an IFSC like SBIN0001234",
        FieldType::Pincode => "must be a 6-digit PIN code",
        FieldType::Phone => "must be a 10-digit mobile number",
        FieldType::Email => "must be an email address",
        FieldType::Date => "must be a date (YYYY-MM-DD or DD-MM-YYYY)",
        FieldType::Number => "must be a number",
    }
}

/// `tax.gst_no` -> `Tax Gst No`.
#[must_use]
pub fn title_case(key: &str) -> String {
    key.split(|c: char| c == '.' || c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
