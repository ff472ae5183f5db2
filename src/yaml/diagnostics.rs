//! YAML document diagnostics
//!
//! Wraps serde_yml failures with the offending source so miette can point
//! at the broken line of a stored document or config file.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// YAML parse error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(parts::yaml::syntax))]
pub struct DocumentSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl DocumentSyntaxError {
    /// Build from a serde_yml error and the text that failed to parse
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let offset = line_col_to_offset(source, line, column);
        let message = err.to_string();
        let help = suggest_fix(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Convert a 1-based line/column pair to a byte offset, clamped to the source
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>();

    if line_start >= source.len() {
        return source.len().saturating_sub(1);
    }

    let line_text = source[line_start..].lines().next().unwrap_or("");
    let within = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(line_text.len());

    line_start + within
}

fn suggest_fix(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("missing field") {
        return Some(
            "documents need part_id, name, car_model, price and stock fields".to_string(),
        );
    }

    if msg.contains("invalid type") {
        return Some("price must be a number and stock an integer".to_string());
    }

    if msg.contains("tab") {
        return Some("YAML indentation uses spaces, not tabs".to_string());
    }

    if msg.contains("mapping values are not allowed") {
        return Some("values containing ':' must be quoted".to_string());
    }

    None
}
