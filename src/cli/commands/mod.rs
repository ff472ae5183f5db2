//! CLI command implementations

pub mod add;
pub mod completions;
pub mod config;
pub mod delete;
pub mod form;
pub mod init;
pub mod list;
pub mod update;
