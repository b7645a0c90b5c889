use clap::{Args, Subcommand};

use super::FillValues;

/// Editable template attributes shared by create and update.
#[derive(Clone, Debug, Default, Args)]
pub struct TemplateArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Body text with `{{key}}` placeholders.
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,
    /// Read the body from a file.
    #[arg(long)]
    pub body_file: Option<String>,
    /// Body format: html or text.
    #[arg(long = "body-format")]
    pub body_format: Option<String>,
    /// JSON array of table definitions.
    #[arg(long)]
    pub tables_file: Option<String>,
}

/// Template commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TemplateCommands {
    /// List own and global templates.
    List,
    /// Show one template.
    Show { id: String },
    /// Create a template.
    Create {
        #[command(flatten)]
        args: TemplateArgs,
        /// Create a global template (admin only).
        #[arg(long)]
        global: bool,
    },
    /// Update a template.
    Update {
        id: String,
        #[command(flatten)]
        args: TemplateArgs,
    },
    /// Delete a template.
    Delete { id: String },
    /// Preview a filled template without saving it.
    Fill {
        id: String,
        /// Use this pack's tender for context values.
        #[arg(long)]
        pack: Option<String>,
        #[command(flatten)]
        values: FillValues,
    },
}
