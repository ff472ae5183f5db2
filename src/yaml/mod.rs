//! YAML helpers shared by the document store and configuration

pub mod diagnostics;

pub use diagnostics::DocumentSyntaxError;
