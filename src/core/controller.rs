//! Inventory form controller
//!
//! Mediates between the form fields, the list view and the record store.
//! Every operation reads the form, optionally changes the store, and then
//! reloads the whole list from the store. Operations run one at a time to
//! completion; shells call them directly or through [`InventoryForm::dispatch`].

use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

use crate::core::form::{FormState, ValidationError};
use crate::core::list_view::{ListView, Renderer};
use crate::entities::SparePart;
use crate::store::{RecordStore, StoreError};

/// User-visible outcome of an operation that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Added { part_id: String },
    Updated { part_id: String },
    Deleted { part_id: String },
    /// Update matched nothing, or matched a record that already held these values
    NotFoundOrNoOp { part_id: String },
    /// Delete matched nothing
    NotFound { part_id: String },
}

impl Notice {
    /// Warnings are reported, but the form is still cleared and the list reloaded
    pub fn is_warning(&self) -> bool {
        matches!(self, Notice::NotFoundOrNoOp { .. } | Notice::NotFound { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Added { part_id } => write!(f, "Spare part {} added successfully", part_id),
            Notice::Updated { part_id } => write!(f, "Spare part {} updated successfully", part_id),
            Notice::Deleted { part_id } => write!(f, "Spare part {} deleted successfully", part_id),
            Notice::NotFoundOrNoOp { part_id } => {
                write!(f, "No changes made or part {} not found", part_id)
            }
            Notice::NotFound { part_id } => write!(f, "Part {} not found", part_id),
        }
    }
}

/// Errors that abort an operation before anything is written
#[derive(Debug, Error, Diagnostic)]
pub enum FormError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("a part with ID '{part_id}' already exists")]
    #[diagnostic(
        code(parts::form::duplicate),
        help("use update to change an existing part")
    )]
    DuplicateKey { part_id: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),
}

impl FormError {
    /// Store failures have no recovery; everything else can be fixed in the form
    pub fn is_fatal(&self) -> bool {
        matches!(self, FormError::Store(_))
    }
}

/// What the user picked in the list
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Position in the current list view
    Index(usize),
    /// The typed record itself
    Part(SparePart),
    /// A rendered line, parsed back into fields
    Line(String),
}

/// A UI action, one per button plus list selection
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create,
    ReadAll,
    Update,
    Delete,
    ClearForm,
    Select(Selection),
}

/// The inventory form: form state, list view and an injected store
pub struct InventoryForm<S: RecordStore> {
    store: S,
    form: FormState,
    list: ListView,
    renderer: Renderer,
}

impl<S: RecordStore> InventoryForm<S> {
    /// Create a controller with an empty list; call [`read_all`](Self::read_all) to load it
    pub fn new(store: S, renderer: Renderer) -> Self {
        Self {
            store,
            form: FormState::default(),
            list: ListView::default(),
            renderer,
        }
    }

    /// Create a controller and perform the initial list load
    pub fn open(store: S, renderer: Renderer) -> Result<Self, FormError> {
        let mut controller = Self::new(store, renderer);
        controller.read_all()?;
        Ok(controller)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn set_form(&mut self, form: FormState) {
        self.form = form;
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Run one command; `None` means it produced nothing to report
    pub fn dispatch(&mut self, command: Command) -> Result<Option<Notice>, FormError> {
        tracing::debug!(?command, "dispatch");
        match command {
            Command::Create => self.create().map(Some),
            Command::ReadAll => self.read_all().map(|_| None),
            Command::Update => self.update().map(Some),
            Command::Delete => self.delete().map(Some),
            Command::ClearForm => {
                self.clear_form();
                Ok(None)
            }
            Command::Select(selection) => {
                self.select(selection);
                Ok(None)
            }
        }
    }

    /// Add the record in the form
    ///
    /// Every field is required and numbers must parse before the store is
    /// touched. The uniqueness check and the insert are separate calls.
    pub fn create(&mut self) -> Result<Notice, FormError> {
        let part = self.form.to_new_part()?;

        if self.store.exists(&part.part_id)? {
            return Err(FormError::DuplicateKey {
                part_id: part.part_id,
            });
        }

        self.store.insert(&part)?;
        tracing::info!(part_id = %part.part_id, "spare part added");

        self.finish()?;
        Ok(Notice::Added {
            part_id: part.part_id,
        })
    }

    /// Reload the list view from the store
    pub fn read_all(&mut self) -> Result<&ListView, FormError> {
        let parts = self.store.find_all()?;
        tracing::debug!(count = parts.len(), "list reloaded");
        self.list.replace(parts, &self.renderer);
        Ok(&self.list)
    }

    /// Replace every field of the record whose id is in the form
    pub fn update(&mut self) -> Result<Notice, FormError> {
        let part = self.form.to_replacement()?;
        let outcome = self.store.update(&part.part_id, &part)?;
        tracing::info!(
            part_id = %part.part_id,
            matched = outcome.matched,
            modified = outcome.modified,
            "spare part update"
        );

        self.finish()?;
        let part_id = part.part_id;
        Ok(if outcome.modified > 0 {
            Notice::Updated { part_id }
        } else {
            Notice::NotFoundOrNoOp { part_id }
        })
    }

    /// Delete the record whose id is in the form
    pub fn delete(&mut self) -> Result<Notice, FormError> {
        let part_id = self.form.key("delete")?.to_string();
        let removed = self.store.delete(&part_id)?;
        tracing::info!(%part_id, removed, "spare part delete");

        self.finish()?;
        Ok(if removed > 0 {
            Notice::Deleted { part_id }
        } else {
            Notice::NotFound { part_id }
        })
    }

    /// Empty the form; the store is not touched
    pub fn clear_form(&mut self) {
        self.form.clear();
    }

    /// Populate the form from a list selection
    ///
    /// Returns false, leaving the form untouched, when nothing was selected.
    pub fn select(&mut self, selection: Selection) -> bool {
        let form = match selection {
            Selection::Index(index) => self.list.get(index).map(|e| FormState::from_part(&e.part)),
            Selection::Part(part) => Some(FormState::from_part(&part)),
            Selection::Line(line) => self.renderer.parse(&line),
        };

        match form {
            Some(form) => {
                self.form = form;
                true
            }
            None => false,
        }
    }

    fn finish(&mut self) -> Result<(), FormError> {
        self.clear_form();
        self.read_all()?;
        Ok(())
    }
}
