use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    FieldCommands, IndexCommands, MemoryCommands, PackCommands, PrintSettingsCommands,
    ProfileCommands, TemplateCommands, TenderCommands, VaultCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create `.tender/` for a project.
    Init(InitArgs),
    /// Contractor profile.
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Values remembered from earlier documents.
    Memory {
        #[command(subcommand)]
        action: MemoryCommands,
    },
    /// Placeholder keys and their resolved values.
    Field {
        #[command(subcommand)]
        action: FieldCommands,
    },
    /// Document templates.
    Template {
        #[command(subcommand)]
        action: TemplateCommands,
    },
    /// Offline tenders and workorders.
    Tender {
        #[command(subcommand)]
        action: TenderCommands,
    },
    /// Paperwork packs.
    Pack {
        #[command(subcommand)]
        action: PackCommands,
    },
    /// Document vault.
    Vault {
        #[command(subcommand)]
        action: VaultCommands,
    },
    /// Letterhead and page reservations.
    #[command(name = "print-settings")]
    PrintSettings {
        #[command(subcommand)]
        action: PrintSettingsCommands,
    },
    /// Collection index consistency.
    Index {
        #[command(subcommand)]
        action: IndexCommands,
    },
    /// Dump JSON schema for a stored record type.
    Schema(SchemaArgs),
}

/// Arguments for `tndr init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Contractor the project acts as by default.
    #[arg(long)]
    pub yoj_id: Option<String>,
    /// Overwrite an existing `.tender/config.toml`.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `tndr schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Record type name; omit to list the registered names.
    pub type_name: Option<String>,
}
