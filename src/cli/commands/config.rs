//! `parts config` command - Inspect configuration

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::discover_project;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (all layers merged, defaults filled in)
    Show,

    /// Show where configuration files are read from
    Path,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(global),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    // Outside a project only the global and environment layers apply
    let project = discover_project(global).ok();
    let effective = Config::load(project.as_ref()).effective();

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&effective).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            let yaml = serde_yml::to_string(&effective).into_diagnostic()?;
            print!("{}", yaml);
        }
    }
    Ok(())
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    match Config::global_config_path() {
        Some(path) => println!("{:<8} {}", style("global").bold(), path.display()),
        None => println!("{:<8} {}", style("global").bold(), style("(unavailable)").dim()),
    }

    match discover_project(global) {
        Ok(project) => println!(
            "{:<8} {}",
            style("project").bold(),
            project.config_path().display()
        ),
        Err(_) => println!("{:<8} {}", style("project").bold(), style("(not in a project)").dim()),
    }
    Ok(())
}
