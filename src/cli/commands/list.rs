//! `parts list` command - Show the list view (the form's View button)

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, open_form, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::list_view::{format_price, ListView};
use crate::entities::SparePart;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show only count
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let form = open_form(global)?;
    let list = form.list();

    if args.count {
        println!("{}", list.len());
        return Ok(());
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Lines,
        f => f,
    };

    if list.is_empty() && !matches!(format, OutputFormat::Json | OutputFormat::Yaml) {
        if !global.quiet {
            println!("No spare parts found.");
        }
        return Ok(());
    }

    let parts: Vec<&SparePart> = list.entries().iter().map(|e| &e.part).collect();

    match format {
        OutputFormat::Lines | OutputFormat::Auto => {
            for line in list.lines() {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&parts).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&parts).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            println!("part_id,name,car_model,price,stock");
            for part in &parts {
                println!(
                    "{},{},{},{},{}",
                    escape_csv(&part.part_id),
                    escape_csv(&part.name),
                    escape_csv(&part.car_model),
                    format_price(part.price),
                    part.stock
                );
            }
        }
        OutputFormat::Tsv => print_table(list, form.renderer().currency(), global.quiet),
        OutputFormat::Md => {
            let mut builder = Builder::default();
            builder.push_record(["Part ID", "Name", "Car Model", "Price", "Stock"]);
            for part in &parts {
                builder.push_record([
                    part.part_id.clone(),
                    part.name.clone(),
                    part.car_model.clone(),
                    format_price(part.price),
                    part.stock.to_string(),
                ]);
            }
            println!("{}", builder.build().with(Style::markdown()));
        }
        OutputFormat::Id => {
            for part in &parts {
                println!("{}", part.part_id);
            }
        }
    }

    Ok(())
}

fn print_table(list: &ListView, currency: &str, quiet: bool) {
    println!(
        "{:<12} {:<24} {:<20} {:>12} {:>8}",
        style("PART ID").bold(),
        style("NAME").bold(),
        style("CAR MODEL").bold(),
        style("PRICE").bold(),
        style("STOCK").bold()
    );
    println!("{}", "-".repeat(80));

    for entry in list.entries() {
        let part = &entry.part;
        let stock = if part.stock <= 0 {
            style(part.stock.to_string()).red()
        } else {
            style(part.stock.to_string())
        };
        println!(
            "{:<12} {:<24} {:<20} {:>12} {:>8}",
            style(truncate_str(&part.part_id, 12)).cyan(),
            truncate_str(&part.name, 24),
            truncate_str(&part.car_model, 20),
            format!("{}{}", currency, format_price(part.price)),
            stock
        );
    }

    if !quiet {
        println!();
        println!("{} spare part(s) found.", style(list.len()).cyan());
    }
}
