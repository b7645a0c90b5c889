use clap::Subcommand;

/// Vault commands.
#[derive(Clone, Debug, Subcommand)]
pub enum VaultCommands {
    /// Register a stored file.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        doc_type: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Where the file is kept.
        #[arg(long)]
        path: String,
    },
    /// List vault files.
    List {
        /// Include soft-deleted files.
        #[arg(long)]
        deleted: bool,
    },
    /// Soft-delete a vault file.
    Delete { id: String },
}
