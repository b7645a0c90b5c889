use clap::{Subcommand, ValueEnum};

/// Which record kind a tender command works on.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum KindArg {
    #[default]
    Tender,
    Workorder,
}

/// Offline tender and workorder commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TenderCommands {
    /// Create a record for an offline notice or workorder.
    Create {
        #[arg(long)]
        title: String,
        /// Name or path of the scanned notice.
        #[arg(long)]
        source_file: Option<String>,
        #[arg(long, value_enum, default_value = "tender")]
        kind: KindArg,
    },
    /// List records.
    List {
        #[arg(long, value_enum, default_value = "tender")]
        kind: KindArg,
        /// Include archived records.
        #[arg(long)]
        archived: bool,
    },
    /// Show one record.
    Show {
        id: String,
        #[arg(long, value_enum, default_value = "tender")]
        kind: KindArg,
    },
    /// Edit extracted fields by hand.
    Set {
        id: String,
        #[arg(long, value_enum, default_value = "tender")]
        kind: KindArg,
        #[arg(long)]
        title: Option<String>,
        /// Scalar field (`emd=25000`, repeatable).
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
        /// Replace the eligibility documents (repeatable).
        #[arg(long = "eligibility-doc")]
        eligibility_docs: Vec<String>,
        /// Replace the annexure list (repeatable).
        #[arg(long = "annexure")]
        annexures: Vec<String>,
    },
    /// Read fields off the notice text with the extraction service.
    Extract {
        id: String,
        #[arg(long, value_enum, default_value = "tender")]
        kind: KindArg,
        /// File holding the notice text.
        #[arg(long, conflicts_with = "text")]
        notice_file: Option<String>,
        /// Notice text given inline.
        #[arg(long)]
        text: Option<String>,
    },
    /// Archive a record.
    Archive {
        id: String,
        #[arg(long, value_enum, default_value = "tender")]
        kind: KindArg,
    },
}
