//! `parts update` command - Replace a spare part's fields (the form's Update button)

use miette::Result;

use crate::cli::commands::add::FieldArgs;
use crate::cli::commands::form::prompt_fields;
use crate::cli::helpers::{open_form, print_notice};
use crate::cli::GlobalOpts;
use crate::core::controller::Selection;
use crate::core::form::Field;

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Interactive mode (prompt for fields, pre-filled from the stored part)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

pub fn run(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let mut form = open_form(global)?;

    // Start from the stored record, as if it had been selected in the list,
    // then overwrite whatever was given on the command line.
    if let Some(part_id) = args.fields.part_id.as_deref() {
        let stored = form.list().find_part(part_id.trim()).map(|e| e.part.clone());
        if let Some(part) = stored {
            form.select(Selection::Part(part));
        }
    }
    args.fields.apply(form.form_mut());

    if args.interactive {
        prompt_fields(form.form_mut(), &Field::ALL)?;
    }

    let notice = form.update()?;
    print_notice(&notice, global.quiet);
    Ok(())
}
