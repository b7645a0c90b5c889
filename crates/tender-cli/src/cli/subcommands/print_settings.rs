use clap::Subcommand;

/// Print settings commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PrintSettingsCommands {
    /// Show the acting contractor's print settings.
    Show,
    /// Change print settings.
    Set {
        #[arg(long)]
        letterhead: Option<bool>,
        #[arg(long)]
        header_html: Option<String>,
        #[arg(long)]
        footer_html: Option<String>,
        #[arg(long)]
        header_mm: Option<u32>,
        #[arg(long)]
        footer_mm: Option<u32>,
    },
}
