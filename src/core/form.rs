//! Form state - the five editable input fields
//!
//! Fields hold raw text exactly as typed. Conversion into a [`SparePart`]
//! trims surrounding whitespace and applies the create or update rules.

use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

use crate::core::list_view::format_price;
use crate::entities::SparePart;

/// One of the form's input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PartId,
    Name,
    CarModel,
    Price,
    Stock,
}

impl Field {
    /// All fields in display order
    pub const ALL: [Field; 5] = [
        Field::PartId,
        Field::Name,
        Field::CarModel,
        Field::Price,
        Field::Stock,
    ];

    /// The label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::PartId => "Part ID",
            Field::Name => "Part Name",
            Field::CarModel => "Compatible Car Model",
            Field::Price => "Price",
            Field::Stock => "Stock Quantity",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Errors raised while turning form text into a record
#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum ValidationError {
    #[error("all fields are required (missing: {})", list_fields(.0))]
    #[diagnostic(
        code(parts::form::required),
        help("fill in Part ID, Part Name, Compatible Car Model, Price and Stock Quantity")
    )]
    MissingFields(Vec<Field>),

    #[error("Part ID is required for {action}")]
    #[diagnostic(code(parts::form::key_required))]
    MissingKey { action: &'static str },

    #[error("price must be a number, got '{0}'")]
    #[diagnostic(code(parts::form::price), help("use a decimal value such as 500 or 12.50"))]
    InvalidPrice(String),

    #[error("stock must be an integer, got '{0}'")]
    #[diagnostic(code(parts::form::stock), help("use a whole number such as 10"))]
    InvalidStock(String),
}

fn list_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Current values of the five input fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub part_id: String,
    pub name: String,
    pub car_model: String,
    pub price: String,
    pub stock: String,
}

impl FormState {
    /// Build form state from raw field text
    pub fn new(
        part_id: impl Into<String>,
        name: impl Into<String>,
        car_model: impl Into<String>,
        price: impl Into<String>,
        stock: impl Into<String>,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            name: name.into(),
            car_model: car_model.into(),
            price: price.into(),
            stock: stock.into(),
        }
    }

    /// Populate the fields from a stored record
    pub fn from_part(part: &SparePart) -> Self {
        Self {
            part_id: part.part_id.clone(),
            name: part.name.clone(),
            car_model: part.car_model.clone(),
            price: format_price(part.price),
            stock: part.stock.to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::PartId => &self.part_id,
            Field::Name => &self.name,
            Field::CarModel => &self.car_model,
            Field::Price => &self.price,
            Field::Stock => &self.stock,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::PartId => self.part_id = value,
            Field::Name => self.name = value,
            Field::CarModel => self.car_model = value,
            Field::Price => self.price = value,
            Field::Stock => self.stock = value,
        }
    }

    /// Empty every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// The trimmed lookup key, required for update and delete
    pub fn key(&self, action: &'static str) -> Result<&str, ValidationError> {
        let key = self.part_id.trim();
        if key.is_empty() {
            return Err(ValidationError::MissingKey { action });
        }
        Ok(key)
    }

    /// Convert into a new record: every field required, numbers must parse
    pub fn to_new_part(&self) -> Result<SparePart, ValidationError> {
        let missing: Vec<Field> = Field::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        self.to_part()
    }

    /// Convert into a full replacement for `update`
    ///
    /// Only the key is required. Name and model are taken as typed (possibly
    /// empty); price and stock must still parse.
    pub fn to_replacement(&self) -> Result<SparePart, ValidationError> {
        self.key("update")?;
        self.to_part()
    }

    fn to_part(&self) -> Result<SparePart, ValidationError> {
        Ok(SparePart {
            part_id: self.part_id.trim().to_string(),
            name: self.name.trim().to_string(),
            car_model: self.car_model.trim().to_string(),
            price: parse_price(&self.price)?,
            stock: parse_stock(&self.stock)?,
        })
    }
}

/// Parse a price; NaN and infinities are rejected
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    raw.parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| ValidationError::InvalidPrice(raw.to_string()))
}

/// Parse a stock quantity
pub fn parse_stock(raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidStock(raw.to_string()))
}
