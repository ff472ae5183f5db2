//! Shared helper functions for CLI commands
//!
//! Project discovery, store opening and the styled messages every command
//! prints live here so the command modules stay thin.

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::controller::{FormError, InventoryForm, Notice};
use crate::core::list_view::Renderer;
use crate::core::{Config, Project};
use crate::store::{self, RecordStore};

/// The controller every command works through
pub type Form = InventoryForm<Box<dyn RecordStore>>;

/// Find the project from `--project` or the working directory
pub fn discover_project(global: &GlobalOpts) -> Result<Project> {
    let project = match global.project {
        Some(ref root) => Project::discover_from(root),
        None => Project::discover(),
    };
    project.map_err(|e| miette::miette!("{}", e))
}

/// Open the configured store and load the list view
pub fn open_form(global: &GlobalOpts) -> Result<Form> {
    let project = discover_project(global)?;
    let config = Config::load(Some(&project));
    let store = store::open(&config, &project)?;
    let form = InventoryForm::open(store, Renderer::new(config.currency()))?;
    Ok(form)
}

/// Print an operation outcome (green check or yellow warning)
pub fn print_notice(notice: &Notice, quiet: bool) {
    if notice.is_warning() {
        println!("{} {}", style("!").yellow(), style(notice).yellow());
    } else if !quiet {
        println!("{} {}", style("✓").green(), notice);
    }
}

/// Print a recoverable form error without leaving the session
pub fn print_form_error(err: &FormError) {
    eprintln!("{} {}", style("✗").red(), style(err).red());
    if let Some(help) = miette::Diagnostic::help(err) {
        eprintln!("  {} {}", style("help:").dim(), help);
    }
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
