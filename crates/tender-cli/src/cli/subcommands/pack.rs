use clap::{Args, Subcommand};

use super::FillValues;
use super::tender::KindArg;

/// Arguments for `tndr pack generate`.
#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    pub pack_id: String,
    #[arg(long)]
    pub template: String,
    /// Annexure the document fulfils.
    #[arg(long)]
    pub annexure: Option<String>,
    /// Checklist item the document is evidence for.
    #[arg(long)]
    pub item: Option<String>,
    #[command(flatten)]
    pub values: FillValues,
    /// Remember the typed values for later documents.
    #[arg(long)]
    pub save_for_future: bool,
}

/// Pack commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PackCommands {
    /// Create a pack, empty or seeded from a tender/workorder.
    Create {
        #[arg(long, required_unless_present = "from")]
        title: Option<String>,
        /// Seed checklist and annexures from this record.
        #[arg(long)]
        from: Option<String>,
        #[arg(long, value_enum, default_value = "tender")]
        kind: KindArg,
    },
    /// List packs.
    List {
        #[arg(long)]
        archived: bool,
    },
    /// Show one pack.
    Show { id: String },
    /// Set a checklist item's status, or the pack status without `--item`.
    Status {
        id: String,
        status: String,
        #[arg(long)]
        item: Option<String>,
    },
    /// Add a checklist item.
    Item {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long = "item-id")]
        item_id: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        optional: bool,
    },
    /// Add an annexure by label (`Annexure-C: Affidavit`).
    Annexure { id: String, label: String },
    /// Map a vault file to a checklist item.
    Attach {
        id: String,
        item: String,
        file: String,
    },
    /// Record an uploaded file against a checklist item.
    Upload {
        id: String,
        item: String,
        #[arg(long)]
        path: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Replace the checklist with the department's official list.
    Official {
        id: String,
        /// JSON array of checklist items.
        #[arg(long)]
        file: String,
    },
    /// Required items that still lack evidence.
    Missing { id: String },
    /// Checklist counts.
    Summary { id: String },
    /// Vault files that look like evidence for open items.
    Suggest { id: String },
    /// Fill a template into the pack.
    Generate(GenerateArgs),
    /// Page setup for this pack.
    Prefs {
        id: String,
        #[arg(long)]
        page_size: Option<String>,
        #[arg(long)]
        orientation: Option<String>,
        #[arg(long)]
        letterhead: Option<bool>,
        #[arg(long)]
        checklist_notes: Option<bool>,
    },
    /// Compose the pack for printing.
    Print {
        id: String,
        /// index, checklist, annexures, templates or full.
        #[arg(long, default_value = "full")]
        select: String,
        /// Write the rendered page here instead of stdout.
        #[arg(long)]
        out: Option<String>,
    },
    /// Archive a pack.
    Archive { id: String },
}
