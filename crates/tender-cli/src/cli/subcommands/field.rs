use clap::Subcommand;

use super::FillValues;

/// Field registry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FieldCommands {
    /// List the known placeholder keys.
    List,
    /// Resolve keys against overrides, memory, profile and request context.
    Resolve {
        #[arg(required = true)]
        keys: Vec<String>,
        #[command(flatten)]
        values: FillValues,
    },
}
