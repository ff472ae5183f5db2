//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    add::AddArgs, completions::CompletionsArgs, config::ConfigCommands, delete::DeleteArgs,
    form::FormArgs, init::InitArgs, list::ListArgs, update::UpdateArgs,
};

#[derive(Parser)]
#[command(name = "parts")]
#[command(author, version, about = "Spare parts inventory")]
#[command(long_about = "Manage an inventory of automotive spare parts: add, list, update and delete records kept in a document collection.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .parts/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new inventory project
    Init(InitArgs),

    /// Open the interactive inventory form
    Form(FormArgs),

    /// Add a spare part
    Add(AddArgs),

    /// List every spare part
    #[command(alias = "view")]
    List(ListArgs),

    /// Replace the fields of an existing spare part
    Update(UpdateArgs),

    /// Delete a spare part by ID
    Delete(DeleteArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (list lines for list, yaml for config)
    #[default]
    Auto,
    /// List view lines: "ID | name | model | price | stock"
    Lines,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just part IDs, one per line
    Id,
}
