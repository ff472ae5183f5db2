//! Core module - form controller, list view and project plumbing

pub mod config;
pub mod controller;
pub mod form;
pub mod identity;
pub mod list_view;
pub mod project;

pub use config::{Config, StoreBackend};
pub use controller::{Command, FormError, InventoryForm, Notice, Selection};
pub use form::{Field, FormState, ValidationError};
pub use identity::{DocumentId, IdParseError};
pub use list_view::{ListEntry, ListView, Renderer};
pub use project::{Project, ProjectError};
