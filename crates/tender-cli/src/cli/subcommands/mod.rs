mod field;
mod index;
mod memory;
mod pack;
mod print_settings;
mod profile;
mod template;
mod tender;
mod vault;

pub use field::FieldCommands;
pub use index::IndexCommands;
pub use memory::MemoryCommands;
pub use pack::{GenerateArgs, PackCommands};
pub use print_settings::PrintSettingsCommands;
pub use profile::ProfileCommands;
pub use template::{TemplateArgs, TemplateCommands};
pub use tender::{KindArg, TenderCommands};
pub use vault::VaultCommands;

use clap::Args;

/// Values typed for one fill: `--set key=value` and a JSON file of table rows.
#[derive(Clone, Debug, Default, Args)]
pub struct FillValues {
    /// Override a placeholder value (`key=value`, repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
    /// JSON object of table key to row list.
    #[arg(long)]
    pub tables_file: Option<String>,
}
