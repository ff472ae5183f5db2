//! `parts delete` command - Delete a spare part (the form's Delete button)

use miette::Result;

use crate::cli::helpers::{open_form, print_notice};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Part ID to delete
    pub part_id: String,
}

pub fn run(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let mut form = open_form(global)?;
    form.form_mut().part_id = args.part_id;

    let notice = form.delete()?;
    print_notice(&notice, global.quiet);
    Ok(())
}
