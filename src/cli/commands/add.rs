//! `parts add` command - Add a spare part (the form's Add button)

use miette::Result;

use crate::cli::commands::form::prompt_fields;
use crate::cli::helpers::{open_form, print_notice};
use crate::cli::GlobalOpts;
use crate::core::form::{Field, FormState};

/// The five form fields as command-line options
///
/// Values are raw text; parsing and validation happen in the form controller.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Part ID (unique key)
    #[arg(long = "id", short = 'p')]
    pub part_id: Option<String>,

    /// Part name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Compatible car model
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// Unit price (decimal)
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,

    /// Stock quantity (integer)
    #[arg(long, short = 's', allow_hyphen_values = true)]
    pub stock: Option<String>,
}

impl FieldArgs {
    /// Copy every given option into the form, leaving the rest untouched
    pub fn apply(&self, form: &mut FormState) {
        let given = [
            (Field::PartId, &self.part_id),
            (Field::Name, &self.name),
            (Field::CarModel, &self.model),
            (Field::Price, &self.price),
            (Field::Stock, &self.stock),
        ];
        for (field, value) in given {
            if let Some(value) = value {
                form.set(field, value.clone());
            }
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Interactive mode (prompt for fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut form = open_form(global)?;
    args.fields.apply(form.form_mut());

    if args.interactive {
        prompt_fields(form.form_mut(), &Field::ALL)?;
    }

    let notice = form.create()?;
    print_notice(&notice, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_only_given_fields() {
        let mut form = FormState::new("P1", "Brake Pad", "Civic", "500", "10");
        let args = FieldArgs {
            price: Some("450".into()),
            model: Some("Jazz".into()),
            ..FieldArgs::default()
        };
        args.apply(&mut form);

        assert_eq!(form, FormState::new("P1", "Brake Pad", "Jazz", "450", "10"));
    }
}
