//! `parts init` command - Initialize a new inventory project

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::config::StoreBackend;
use crate::core::project::{Project, ProjectError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Storage backend written to the project config
    #[arg(long, short = 'b', value_enum, default_value = "yaml")]
    pub backend: StoreBackend,

    /// Force initialization even if .parts/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = if args.force {
        Project::init_force(&path, args.backend)
    } else {
        Project::init(&path, args.backend)
    };

    match project {
        Ok(project) => {
            println!(
                "{} Initialized inventory project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!("  backend: {}", style(args.backend).cyan());
            println!();
            println!("Next steps:");
            println!("  {} Open the inventory form", style("parts form").yellow());
            println!(
                "  {} Add a part from the command line",
                style("parts add --id P1 --name \"Brake Pad\" --model Civic --price 500 --stock 10")
                    .yellow()
            );
            println!("  {} List every part", style("parts list").yellow());
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} Inventory project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!("Use {} to reinitialize", style("parts init --force").yellow());
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
