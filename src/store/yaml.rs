//! YAML document collection
//!
//! A collection is a directory holding one `<_id>.yaml` file per record.
//! Document ids are ULIDs, so sorting file names gives insertion order.
//! Every operation rescans the directory; there is no index.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::identity::DocumentId;
use crate::entities::SparePart;
use crate::yaml::DocumentSyntaxError;

use super::{replace_fields, RecordStore, StoreError, StoredPart, UpdateOutcome};

const EXTENSION: &str = "yaml";

#[derive(Debug)]
pub struct YamlStore {
    dir: PathBuf,
}

impl YamlStore {
    /// Open a collection directory, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        Ok(Self { dir })
    }

    fn document_path(&self, id: DocumentId) -> PathBuf {
        self.dir.join(format!("{}.{}", id, EXTENSION))
    }

    /// Paths of every document file, oldest first
    fn document_paths(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(self.dir.as_path()).to_path_buf();
                StoreError::io(path, e.into())
            })?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|e| e == EXTENSION) {
                paths.push(path.to_path_buf());
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Load every document, oldest first
    fn documents(&self) -> Result<Vec<(PathBuf, StoredPart)>, StoreError> {
        self.document_paths()?
            .into_iter()
            .map(|path| {
                let doc = read_document(&path)?;
                Ok((path, doc))
            })
            .collect()
    }

    fn find(&self, part_id: &str) -> Result<Option<(PathBuf, StoredPart)>, StoreError> {
        Ok(self
            .documents()?
            .into_iter()
            .find(|(_, doc)| doc.part_id == part_id))
    }

    fn newest_id(&self) -> Result<Option<DocumentId>, StoreError> {
        Ok(self
            .document_paths()?
            .last()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .and_then(|s| DocumentId::parse(s).ok()))
    }

    fn write_document(&self, path: &Path, doc: &StoredPart) -> Result<(), StoreError> {
        let yaml = serde_yml::to_string(doc).map_err(|e| StoreError::Encode(e.to_string()))?;
        fs::write(path, yaml).map_err(|e| StoreError::io(path, e))
    }
}

fn read_document(path: &Path) -> Result<StoredPart, StoreError> {
    let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_yml::from_str(&content).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "unreadable document");
        StoreError::Corrupt {
            path: path.to_path_buf(),
            source: DocumentSyntaxError::from_serde_error(&e, &content, &path.display().to_string()),
        }
    })
}

impl RecordStore for YamlStore {
    fn exists(&self, part_id: &str) -> Result<bool, StoreError> {
        tracing::debug!(part_id, "yaml exists");
        Ok(self.find(part_id)?.is_some())
    }

    fn insert(&mut self, part: &SparePart) -> Result<(), StoreError> {
        let id = DocumentId::after(self.newest_id()?);
        let path = self.document_path(id);
        tracing::debug!(part_id = %part.part_id, %id, "yaml insert");
        self.write_document(&path, &StoredPart::new(id, part))
    }

    fn update(
        &mut self,
        part_id: &str,
        replacement: &SparePart,
    ) -> Result<UpdateOutcome, StoreError> {
        let Some((path, doc)) = self.find(part_id)? else {
            tracing::debug!(part_id, "yaml update matched nothing");
            return Ok(UpdateOutcome::default());
        };

        let (next, changed) = replace_fields(&doc.to_part(), replacement);
        if changed {
            self.write_document(&path, &StoredPart::new(doc.id, &next))?;
        }
        tracing::debug!(part_id, changed, "yaml update");

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    fn delete(&mut self, part_id: &str) -> Result<u64, StoreError> {
        let Some((path, _)) = self.find(part_id)? else {
            return Ok(0);
        };
        fs::remove_file(&path).map_err(|e| StoreError::io(&path, e))?;
        tracing::debug!(part_id, path = %path.display(), "yaml delete");
        Ok(1)
    }

    fn find_all(&self) -> Result<Vec<SparePart>, StoreError> {
        Ok(self
            .documents()?
            .into_iter()
            .map(|(_, doc)| doc.to_part())
            .collect())
    }
}
