//! Status enums, entity types, and option enums.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with a documented flow expose `allowed_next_states()` for UI
//! hints; whether a caller enforces them is the caller's decision.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role of the acting user, as reported by the auth collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Contractor,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contractor => "contractor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChecklistStatus
// ---------------------------------------------------------------------------

/// Status of a checklist item inside a pack.
///
/// ```text
/// pending → uploaded  → done
///         → generated → done
/// done → pending (manual rollback)
/// ```
///
/// Transitions are contractor driven; nothing expires automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    #[default]
    Pending,
    Uploaded,
    Generated,
    Done,
}

impl ChecklistStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Uploaded, Self::Generated, Self::Done];

    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Uploaded, Self::Generated],
            Self::Uploaded | Self::Generated => &[Self::Done],
            Self::Done => &[Self::Pending],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Parse a raw status, falling back to `Pending` for anything unknown.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Uploaded => "uploaded",
            Self::Generated => "generated",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ChecklistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ItemSource
// ---------------------------------------------------------------------------

/// Where a checklist item definition came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    /// Always present in every pack (cover letter, index).
    Fixed,
    /// Suggested but removable.
    Optional,
    /// Supplied by the tendering department.
    Official,
    /// Typed in by the contractor.
    #[default]
    Contractor,
}

impl ItemSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Optional => "optional",
            Self::Official => "official",
            Self::Contractor => "contractor",
        }
    }
}

impl fmt::Display for ItemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TemplateScope / BodyFormat
// ---------------------------------------------------------------------------

/// Visibility and ownership of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TemplateScope {
    /// Shared, read-only for contractors.
    Global,
    /// Owned and editable by one contractor.
    Contractor,
}

impl TemplateScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Contractor => "contractor",
        }
    }
}

impl fmt::Display for TemplateScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markup of a template body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BodyFormat {
    #[default]
    Text,
    Html,
}

impl BodyFormat {
    #[must_use]
    pub const fn is_html(self) -> bool {
        matches!(self, Self::Html)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PackStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a pack.
///
/// ```text
/// draft → in_progress → ready → submitted
/// any → archived
/// ```
///
/// Packs are never hard-deleted; archival is status-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PackStatus {
    #[default]
    Draft,
    InProgress,
    Ready,
    Submitted,
    Archived,
}

impl PackStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Ready => "ready",
            Self::Submitted => "submitted",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for PackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TenderStatus
// ---------------------------------------------------------------------------

/// Provenance of the last write to an offline tender or workorder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    #[default]
    Draft,
    /// Fields were edited by hand.
    Editing,
    /// Fields came from a successful AI extraction.
    AiExtracted,
    /// The last AI extraction failed and the reset policy was applied.
    AiFailed,
    Archived,
}

impl TenderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Editing => "editing",
            Self::AiExtracted => "ai_extracted",
            Self::AiFailed => "ai_failed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldType / MemorySource
// ---------------------------------------------------------------------------

/// Input type of a placeholder field; drives validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Date,
    Number,
    Email,
    Phone,
    Pan,
    Gst,
    Ifsc,
    Pincode,
}

impl FieldType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Date => "date",
            Self::Number => "number",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Pan => "pan",
            Self::Gst => "gst",
            Self::Ifsc => "ifsc",
            Self::Pincode => "pincode",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a remembered profile value was captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MemorySource {
    /// Typed into the memory screen directly.
    #[default]
    Manual,
    /// Saved while filling a document ("save for future").
    Document,
    Import,
}

impl MemorySource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Document => "document",
            Self::Import => "import",
        }
    }
}

impl fmt::Display for MemorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DocSelector / SectionKind
// ---------------------------------------------------------------------------

/// Which part of a pack to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocSelector {
    Index,
    Checklist,
    Annexures,
    Templates,
    Full,
}

impl DocSelector {
    /// Section kinds produced for this selector, in print order.
    #[must_use]
    pub const fn section_kinds(self) -> &'static [SectionKind] {
        match self {
            Self::Index => &[SectionKind::Index],
            Self::Checklist => &[SectionKind::Checklist],
            Self::Annexures => &[SectionKind::Annexure],
            Self::Templates => &[SectionKind::Template],
            Self::Full => &[
                SectionKind::Index,
                SectionKind::Checklist,
                SectionKind::Annexure,
                SectionKind::Template,
            ],
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Checklist => "checklist",
            Self::Annexures => "annexures",
            Self::Templates => "templates",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for DocSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a composed print section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Index,
    Checklist,
    Annexure,
    Template,
}

impl SectionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Checklist => "checklist",
            Self::Annexure => "annexure",
            Self::Template => "template",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PageSize / Orientation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    #[default]
    A4,
    Legal,
    Letter,
}

impl PageSize {
    /// Name used in CSS `@page { size: ... }`.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::Legal => "legal",
            Self::Letter => "letter",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A4 => "a4",
            Self::Legal => "legal",
            Self::Letter => "letter",
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ResetPolicy
// ---------------------------------------------------------------------------

/// What to do with previously extracted tender fields when AI extraction fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Discard every extracted field and start from defaults.
    #[default]
    ResetToDefaults,
    /// Keep whatever was there before the failed attempt.
    KeepPrevious,
}

impl ResetPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ResetToDefaults => "reset_to_defaults",
            Self::KeepPrevious => "keep_previous",
        }
    }
}

impl fmt::Display for ResetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of persisted record, used by the trail and the record store layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Profile,
    Memory,
    Template,
    Pack,
    Tender,
    Workorder,
    Vault,
    PrintSettings,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Memory => "memory",
            Self::Template => "template",
            Self::Pack => "pack",
            Self::Tender => "tender",
            Self::Workorder => "workorder",
            Self::Vault => "vault",
            Self::PrintSettings => "print_settings",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TrailOp
// ---------------------------------------------------------------------------

/// Operation type recorded in JSONL trail files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrailOp {
    Create,
    Update,
    Delete,
    Transition,
}

impl TrailOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Transition => "transition",
        }
    }
}

impl fmt::Display for TrailOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
