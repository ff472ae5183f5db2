//! Spare part entity type - one inventory record

use serde::{Deserialize, Serialize};

/// A SparePart entity - one line of inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparePart {
    /// User-supplied identifier, unique across the collection
    pub part_id: String,

    /// Part name
    pub name: String,

    /// Compatible car model
    pub car_model: String,

    /// Unit price
    pub price: f64,

    /// Quantity in stock
    pub stock: i64,
}

impl SparePart {
    /// Create a new spare part
    pub fn new(
        part_id: impl Into<String>,
        name: impl Into<String>,
        car_model: impl Into<String>,
        price: f64,
        stock: i64,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            name: name.into(),
            car_model: car_model.into(),
            price,
            stock,
        }
    }
}
