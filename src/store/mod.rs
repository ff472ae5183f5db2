//! Record store - the persistent collection of spare part documents
//!
//! Stores address records by `part_id`, the application-chosen key, and
//! never by their native document id. Every backend returns records from
//! `find_all` in insertion order.

mod memory;
mod sqlite;
mod yaml;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use yaml::YamlStore;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::config::{Config, StoreBackend};
use crate::core::identity::DocumentId;
use crate::core::project::Project;
use crate::entities::SparePart;
use crate::yaml::DocumentSyntaxError;

/// Result of a keyed update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents whose `part_id` matched
    pub matched: u64,
    /// Documents whose stored values actually changed
    pub modified: u64,
}

/// The operations the inventory form needs from a collection
pub trait RecordStore {
    /// Whether any document has this `part_id`
    fn exists(&self, part_id: &str) -> Result<bool, StoreError>;

    /// Insert one document
    fn insert(&mut self, part: &SparePart) -> Result<(), StoreError>;

    /// Replace every field of the first document matching `part_id`
    ///
    /// `part_id` itself is kept. A replacement identical to the stored
    /// values counts as matched but not modified.
    fn update(&mut self, part_id: &str, replacement: &SparePart)
        -> Result<UpdateOutcome, StoreError>;

    /// Delete the first document matching `part_id`, returning the count removed
    fn delete(&mut self, part_id: &str) -> Result<u64, StoreError>;

    /// Every document, in insertion order
    fn find_all(&self) -> Result<Vec<SparePart>, StoreError>;
}

impl<T: RecordStore + ?Sized> RecordStore for Box<T> {
    fn exists(&self, part_id: &str) -> Result<bool, StoreError> {
        (**self).exists(part_id)
    }

    fn insert(&mut self, part: &SparePart) -> Result<(), StoreError> {
        (**self).insert(part)
    }

    fn update(
        &mut self,
        part_id: &str,
        replacement: &SparePart,
    ) -> Result<UpdateOutcome, StoreError> {
        (**self).update(part_id, replacement)
    }

    fn delete(&mut self, part_id: &str) -> Result<u64, StoreError> {
        (**self).delete(part_id)
    }

    fn find_all(&self) -> Result<Vec<SparePart>, StoreError> {
        (**self).find_all()
    }
}

/// Errors raised by store backends
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("cannot access {}: {source}", path.display())]
    #[diagnostic(code(parts::store::io))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("corrupt document {}", path.display())]
    #[diagnostic(code(parts::store::corrupt))]
    Corrupt {
        path: PathBuf,
        #[diagnostic_source]
        source: DocumentSyntaxError,
    },

    #[error("document {id} has an unreadable body: {message}")]
    #[diagnostic(code(parts::store::body))]
    Body { id: String, message: String },

    #[error("failed to encode document: {0}")]
    #[diagnostic(code(parts::store::encode))]
    Encode(String),

    #[error("invalid collection name '{0}'")]
    #[diagnostic(
        code(parts::store::collection),
        help("collection names may only contain letters, digits and '_'")
    )]
    InvalidCollection(String),

    #[error("database error: {0}")]
    #[diagnostic(code(parts::store::database))]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// On-disk shape of a record: the native key plus the entity fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StoredPart {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub part_id: String,
    pub name: String,
    pub car_model: String,
    pub price: f64,
    pub stock: i64,
}

impl StoredPart {
    pub fn new(id: DocumentId, part: &SparePart) -> Self {
        Self {
            id,
            part_id: part.part_id.clone(),
            name: part.name.clone(),
            car_model: part.car_model.clone(),
            price: part.price,
            stock: part.stock,
        }
    }

    pub fn to_part(&self) -> SparePart {
        SparePart {
            part_id: self.part_id.clone(),
            name: self.name.clone(),
            car_model: self.car_model.clone(),
            price: self.price,
            stock: self.stock,
        }
    }
}

/// Apply a full-field replacement, keeping `part_id`
///
/// Returns the new values and whether anything changed.
pub(crate) fn replace_fields(current: &SparePart, replacement: &SparePart) -> (SparePart, bool) {
    let next = SparePart {
        part_id: current.part_id.clone(),
        ..replacement.clone()
    };
    let changed = next != *current;
    (next, changed)
}

/// Collection names are spliced into file paths and SQL identifiers
pub(crate) fn check_collection_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}

/// Open the store configured for a project
///
/// The store is opened once and held for the life of the process.
pub fn open(config: &Config, project: &Project) -> Result<Box<dyn RecordStore>, StoreError> {
    let database = config.database();
    let collection = config.collection();

    let store: Box<dyn RecordStore> = match config.backend() {
        StoreBackend::Yaml => {
            check_collection_name(&collection)?;
            Box::new(YamlStore::open(project.collection_dir(&database, &collection))?)
        }
        StoreBackend::Sqlite => {
            Box::new(SqliteStore::open(project.database_file(&database), &collection)?)
        }
        StoreBackend::Memory => Box::new(MemoryStore::new()),
    };

    tracing::debug!(backend = %config.backend(), %database, %collection, "opened record store");
    Ok(store)
}
