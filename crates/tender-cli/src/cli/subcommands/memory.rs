use clap::Subcommand;

/// Profile memory commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MemoryCommands {
    /// List remembered values.
    List,
    /// Remember a value for a placeholder key.
    Save { key: String, value: String },
    /// Forget a remembered value.
    Delete { key: String },
}
