//! List view - the rendered projection of every stored record
//!
//! Each entry keeps the typed record next to its display line, so selecting
//! an entry hands the record back directly. The line format is
//!
//! ```text
//! <id> | <name> | <model> | <currency><price> | Stock: <stock>
//! ```
//!
//! and [`Renderer::parse`] reverses it for lines that were copied out of an
//! earlier listing.

use crate::core::form::FormState;
use crate::entities::SparePart;

/// Column separator in rendered lines
pub const SEPARATOR: &str = " | ";

/// Label placed in front of the stock quantity
pub const STOCK_LABEL: &str = "Stock: ";

/// Currency prefix used when none is configured
pub const DEFAULT_CURRENCY: &str = "Rs.";

/// Format a price for display
///
/// Whole values keep one decimal place (`500.0`, not `500`) so that a
/// rendered price reads as a decimal and parses back to the same value.
/// Very large or small magnitudes switch to exponent form (`1e16`).
pub fn format_price(price: f64) -> String {
    format!("{:?}", price)
}

/// Renders records into list lines and parses them back
#[derive(Debug, Clone)]
pub struct Renderer {
    currency: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl Renderer {
    /// Create a renderer with the given currency prefix
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// The configured currency prefix
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Render a record as a single list line
    pub fn render(&self, part: &SparePart) -> String {
        [
            part.part_id.clone(),
            part.name.clone(),
            part.car_model.clone(),
            format!("{}{}", self.currency, format_price(part.price)),
            format!("{}{}", STOCK_LABEL, part.stock),
        ]
        .join(SEPARATOR)
    }

    /// Parse a rendered line back into form fields
    ///
    /// Returns `None` when the line has fewer than five columns. A name that
    /// itself contains the separator is rejoined, since the id and the three
    /// trailing columns are positional. Model names containing the separator
    /// cannot be recovered.
    pub fn parse(&self, line: &str) -> Option<FormState> {
        let columns: Vec<&str> = line.split(SEPARATOR).collect();
        if columns.len() < 5 {
            return None;
        }

        let last = columns.len() - 1;
        let price = columns[last - 1];
        let stock = columns[last];

        Some(FormState {
            part_id: columns[0].to_string(),
            name: columns[1..last - 2].join(SEPARATOR),
            car_model: columns[last - 2].to_string(),
            price: price.strip_prefix(self.currency.as_str()).unwrap_or(price).to_string(),
            stock: stock.strip_prefix(STOCK_LABEL).unwrap_or(stock).to_string(),
        })
    }
}

/// One row of the list view
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub part: SparePart,
    pub line: String,
}

/// The full list projection, rebuilt from scratch on every reload
#[derive(Debug, Clone, Default)]
pub struct ListView {
    entries: Vec<ListEntry>,
}

impl ListView {
    /// Replace every entry with a fresh rendering of `parts`, keeping order
    pub fn replace(&mut self, parts: Vec<SparePart>, renderer: &Renderer) {
        self.entries = parts
            .into_iter()
            .map(|part| ListEntry {
                line: renderer.render(&part),
                part,
            })
            .collect();
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ListEntry> {
        self.entries.get(index)
    }

    /// Iterate the rendered lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.line.as_str())
    }

    /// Find the first entry with the given part id
    pub fn find_part(&self, part_id: &str) -> Option<&ListEntry> {
        self.entries.iter().find(|e| e.part.part_id == part_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
