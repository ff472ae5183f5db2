//! Spare parts inventory
//!
//! Manage automotive spare parts kept in a document collection through a
//! five-field form and a list view. The form controller works against any
//! [`store::RecordStore`]; the CLI and the interactive session are thin
//! shells over it.

pub mod cli;
pub mod core;
pub mod entities;
pub mod store;
pub mod yaml;
