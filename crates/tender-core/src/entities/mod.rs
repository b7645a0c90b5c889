//! Entity structs for every persisted record.
//!
//! Each entity is stored as one JSON document in the record store (see
//! `tender-store`). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema`; optional fields default explicitly so older documents with
//! missing keys still load.

mod index;
mod memory;
mod pack;
mod print;
mod profile;
mod template;
mod tender;
mod vault;

pub use index::IndexEntry;
pub use memory::{ProfileMemory, ProfileMemoryEntry};
pub use pack::{
    Annexure, AttachmentMapping, ChecklistItem, FileRef, GeneratedDoc, Pack, PackItem, PackSource,
    PrintPrefs,
};
pub use print::PrintSettings;
pub use profile::{Address, BankDetails, Contact, ContractorProfile, ProfileField, Signatory, TaxIds};
pub use template::{TableColumn, TableRow, Template, TemplateTable};
pub use tender::{ExtractedFields, TenderKind, TenderRecord};
pub use vault::VaultFile;
