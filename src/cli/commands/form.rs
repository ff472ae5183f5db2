//! `parts form` command - Interactive inventory form
//!
//! The terminal counterpart of the desktop window: the five fields, the
//! command buttons and the selectable list. Each menu choice becomes one
//! [`Command`] for the controller; recoverable errors are shown and the
//! session continues, store failures end it.

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::fmt;

use crate::cli::helpers::{open_form, print_form_error, print_notice, Form};
use crate::cli::GlobalOpts;
use crate::core::controller::{Command, Selection};
use crate::core::form::{Field, FormState};

#[derive(clap::Args, Debug)]
pub struct FormArgs {
    /// Do not clear the screen between actions
    #[arg(long)]
    pub no_clear: bool,
}

/// Menu entries, in button order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    View,
    Update,
    Delete,
    Clear,
    Select,
    Quit,
}

impl Action {
    const ALL: [Action; 7] = [
        Action::Add,
        Action::View,
        Action::Update,
        Action::Delete,
        Action::Clear,
        Action::Select,
        Action::Quit,
    ];

    /// Fields the user fills in before the action runs
    fn fields(&self) -> &'static [Field] {
        match self {
            Action::Add | Action::Update => &Field::ALL,
            Action::Delete => &[Field::PartId],
            _ => &[],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add => write!(f, "Add"),
            Action::View => write!(f, "View"),
            Action::Update => write!(f, "Update"),
            Action::Delete => write!(f, "Delete"),
            Action::Clear => write!(f, "Clear"),
            Action::Select => write!(f, "Select from list"),
            Action::Quit => write!(f, "Quit"),
        }
    }
}

pub fn run(args: FormArgs, global: &GlobalOpts) -> Result<()> {
    let mut form = open_form(global)?;
    let theme = ColorfulTheme::default();
    let term = Term::stdout();

    loop {
        if !args.no_clear {
            term.clear_screen().into_diagnostic()?;
        }
        render(&form);

        let choice = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&Action::ALL)
            .default(0)
            .interact_opt()
            .into_diagnostic()?;

        // Esc / q leaves the session
        let Some(action) = choice.map(|i| Action::ALL[i]) else {
            break;
        };

        let command = match action {
            Action::Quit => break,
            Action::Add => Command::Create,
            Action::View => Command::ReadAll,
            Action::Update => Command::Update,
            Action::Delete => Command::Delete,
            Action::Clear => Command::ClearForm,
            Action::Select => match pick_entry(&form, &theme)? {
                Some(index) => Command::Select(Selection::Index(index)),
                None => continue,
            },
        };

        prompt_fields_with(form.form_mut(), action.fields(), &theme)?;

        match form.dispatch(command) {
            Ok(Some(notice)) => print_notice(&notice, global.quiet),
            Ok(None) => {}
            Err(err) if err.is_fatal() => return Err(err.into()),
            Err(err) => print_form_error(&err),
        }

        if !args.no_clear {
            pause(&term)?;
        }
    }

    Ok(())
}

/// Prompt for each field, pre-filled with its current value
pub fn prompt_fields(form: &mut FormState, fields: &[Field]) -> Result<()> {
    prompt_fields_with(form, fields, &ColorfulTheme::default())
}

fn prompt_fields_with(form: &mut FormState, fields: &[Field], theme: &ColorfulTheme) -> Result<()> {
    for field in fields {
        let value: String = Input::with_theme(theme)
            .with_prompt(field.label())
            .with_initial_text(form.get(*field))
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;
        form.set(*field, value);
    }
    Ok(())
}

fn pick_entry(form: &Form, theme: &ColorfulTheme) -> Result<Option<usize>> {
    let list = form.list();
    if list.is_empty() {
        println!("{} The list is empty.", style("!").yellow());
        return Ok(None);
    }

    let lines: Vec<&str> = list.lines().collect();
    Select::with_theme(theme)
        .with_prompt("Select a part")
        .items(&lines)
        .default(0)
        .interact_opt()
        .into_diagnostic()
}

fn render(form: &Form) {
    println!("{}", style("Car Spare Part Management").bold());
    println!("{}", style("─".repeat(50)).dim());

    let state = form.form();
    for field in Field::ALL {
        let value = state.get(field);
        let shown = if value.is_empty() {
            style("-".to_string()).dim()
        } else {
            style(value.to_string()).cyan()
        };
        println!("  {:<22} {}", field.label(), shown);
    }

    println!("{}", style("─".repeat(50)).dim());
    if form.list().is_empty() {
        println!("  {}", style("(no spare parts)").dim());
    }
    for line in form.list().lines() {
        println!("  {}", line);
    }
    println!();
}

fn pause(term: &Term) -> Result<()> {
    println!();
    println!("{}", style("Press any key to continue").dim());
    term.read_key().into_diagnostic()?;
    Ok(())
}
