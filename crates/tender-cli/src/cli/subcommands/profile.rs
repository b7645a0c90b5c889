use clap::Subcommand;

/// Contractor profile commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show the acting contractor's profile.
    Show,
    /// Set one profile field by its placeholder key (e.g. `firm.name`).
    Set { key: String, value: String },
}
