use clap::Subcommand;

/// Collection index commands.
#[derive(Clone, Debug, Subcommand)]
pub enum IndexCommands {
    /// Report drift between an index and its detail records.
    Check { collection: String },
    /// Rewrite an index from its detail records.
    Rebuild { collection: String },
}
