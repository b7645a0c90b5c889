use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Firm identity and paperwork details of one contractor.
///
/// Edited only through the profile-save flow; never deleted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ContractorProfile {
    pub yoj_id: String,
    #[serde(default)]
    pub firm_name: String,
    /// Proprietorship, partnership, private limited, ...
    #[serde(default)]
    pub firm_type: String,
    #[serde(default)]
    pub proprietor_name: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub tax: TaxIds,
    #[serde(default)]
    pub signatory: Signatory,
    #[serde(default)]
    pub bank: BankDetails,
    /// Contractor registration number with the department.
    #[serde(default)]
    pub registration_no: String,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Address {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
}

impl Address {
    /// Single-line postal address, skipping blank parts.
    #[must_use]
    pub fn one_line(&self) -> String {
        let pin = if self.pincode.trim().is_empty() {
            String::new()
        } else {
            format!("PIN {}", self.pincode.trim())
        };
        [
            self.line1.as_str(),
            self.line2.as_str(),
            self.city.as_str(),
            self.district.as_str(),
            self.state.as_str(),
            pin.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Contact {
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaxIds {
    #[serde(default)]
    pub pan: String,
    #[serde(default)]
    pub gst: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Signatory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub designation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BankDetails {
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub account_no: String,
    #[serde(default)]
    pub ifsc: String,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub branch: String,
}

/// A profile attribute that placeholder keys can map to directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FirmName,
    FirmType,
    ProprietorName,
    AddressOneLine,
    City,
    District,
    State,
    Pincode,
    Mobile,
    Email,
    Pan,
    Gst,
    SignatoryName,
    SignatoryDesignation,
    BankAccountName,
    BankAccountNo,
    BankIfsc,
    BankName,
    BankBranch,
    RegistrationNo,
}

impl ContractorProfile {
    #[must_use]
    pub fn new(yoj_id: impl Into<String>) -> Self {
        Self {
            yoj_id: yoj_id.into(),
            ..Self::default()
        }
    }

    /// Read the value behind a direct profile mapping.
    #[must_use]
    pub fn field_value(&self, field: ProfileField) -> String {
        match field {
            ProfileField::FirmName => self.firm_name.clone(),
            ProfileField::FirmType => self.firm_type.clone(),
            ProfileField::ProprietorName => self.proprietor_name.clone(),
            ProfileField::AddressOneLine => self.address.one_line(),
            ProfileField::City => self.address.city.clone(),
            ProfileField::District => self.address.district.clone(),
            ProfileField::State => self.address.state.clone(),
            ProfileField::Pincode => self.address.pincode.clone(),
            ProfileField::Mobile => self.contact.mobile.clone(),
            ProfileField::Email => self.contact.email.clone(),
            ProfileField::Pan => self.tax.pan.clone(),
            ProfileField::Gst => self.tax.gst.clone(),
            ProfileField::SignatoryName => self.signatory.name.clone(),
            ProfileField::SignatoryDesignation => self.signatory.designation.clone(),
            ProfileField::BankAccountName => self.bank.account_name.clone(),
            ProfileField::BankAccountNo => self.bank.account_no.clone(),
            ProfileField::BankIfsc => self.bank.ifsc.clone(),
            ProfileField::BankName => self.bank.bank_name.clone(),
            ProfileField::BankBranch => self.bank.branch.clone(),
            ProfileField::RegistrationNo => self.registration_no.clone(),
        }
    }

    /// Write a value through a direct profile mapping.
    ///
    /// `AddressOneLine` is derived and lands in `address.line1`.
    pub fn set_field_value(&mut self, field: ProfileField, value: String) {
        let slot = match field {
            ProfileField::FirmName => &mut self.firm_name,
            ProfileField::FirmType => &mut self.firm_type,
            ProfileField::ProprietorName => &mut self.proprietor_name,
            ProfileField::AddressOneLine => &mut self.address.line1,
            ProfileField::City => &mut self.address.city,
            ProfileField::District => &mut self.address.district,
            ProfileField::State => &mut self.address.state,
            ProfileField::Pincode => &mut self.address.pincode,
            ProfileField::Mobile => &mut self.contact.mobile,
            ProfileField::Email => &mut self.contact.email,
            ProfileField::Pan => &mut self.tax.pan,
            ProfileField::Gst => &mut self.tax.gst,
            ProfileField::SignatoryName => &mut self.signatory.name,
            ProfileField::SignatoryDesignation => &mut self.signatory.designation,
            ProfileField::BankAccountName => &mut self.bank.account_name,
            ProfileField::BankAccountNo => &mut self.bank.account_no,
            ProfileField::BankIfsc => &mut self.bank.ifsc,
            ProfileField::BankName => &mut self.bank.bank_name,
            ProfileField::BankBranch => &mut self.bank.branch,
            ProfileField::RegistrationNo => &mut self.registration_no,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_address_skips_blanks() {
        let address = Address {
            line1: "12 Station Road".into(),
            line2: "  ".into(),
            city: "Jaipur".into(),
            district: String::new(),
            state: "Rajasthan".into(),
            pincode: "302001".into(),
        };
        assert_eq!(
            address.one_line(),
            "12 Station Road, Jaipur, Rajasthan, PIN 302001"
        );
    }

    #[test]
    fn field_value_roundtrips_through_setter() {
        let mut profile = ContractorProfile::new("YOJ1");
        profile.set_field_value(ProfileField::Gst, "08ABCDE1234F1Z5".into());
        profile.set_field_value(ProfileField::BankIfsc, "SBIN0001234".into());
        assert_eq!(profile.field_value(ProfileField::Gst), "08ABCDE1234F1Z5");
        assert_eq!(profile.tax.gst, "08ABCDE1234F1Z5");
        assert_eq!(profile.bank.ifsc, "SBIN0001234");
    }
}
