//! Entity type definitions
//!
//! - [`SparePart`] - An automotive spare part kept in inventory

pub mod spare_part;

pub use spare_part::SparePart;
