//! In-process record store
//!
//! Holds documents in a `Vec` in insertion order. Nothing is persisted;
//! used by tests and the `memory` backend.

use crate::core::identity::DocumentId;
use crate::entities::SparePart;

use super::{replace_fields, RecordStore, StoreError, StoredPart, UpdateOutcome};

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Vec<StoredPart>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with records, in the given order
    pub fn with_parts(parts: impl IntoIterator<Item = SparePart>) -> Self {
        let mut store = Self::new();
        for part in parts {
            store.push(&part);
        }
        store
    }

    fn push(&mut self, part: &SparePart) {
        let id = DocumentId::after(self.documents.last().map(|d| d.id));
        self.documents.push(StoredPart::new(id, part));
    }

    fn position(&self, part_id: &str) -> Option<usize> {
        self.documents.iter().position(|d| d.part_id == part_id)
    }
}

impl RecordStore for MemoryStore {
    fn exists(&self, part_id: &str) -> Result<bool, StoreError> {
        tracing::debug!(part_id, "memory exists");
        Ok(self.position(part_id).is_some())
    }

    fn insert(&mut self, part: &SparePart) -> Result<(), StoreError> {
        tracing::debug!(part_id = %part.part_id, "memory insert");
        self.push(part);
        Ok(())
    }

    fn update(
        &mut self,
        part_id: &str,
        replacement: &SparePart,
    ) -> Result<UpdateOutcome, StoreError> {
        let Some(index) = self.position(part_id) else {
            tracing::debug!(part_id, "memory update matched nothing");
            return Ok(UpdateOutcome::default());
        };

        let doc = &mut self.documents[index];
        let (next, changed) = replace_fields(&doc.to_part(), replacement);
        if changed {
            *doc = StoredPart::new(doc.id, &next);
        }
        tracing::debug!(part_id, changed, "memory update");

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    fn delete(&mut self, part_id: &str) -> Result<u64, StoreError> {
        let removed = match self.position(part_id) {
            Some(index) => {
                self.documents.remove(index);
                1
            }
            None => 0,
        };
        tracing::debug!(part_id, removed, "memory delete");
        Ok(removed)
    }

    fn find_all(&self) -> Result<Vec<SparePart>, StoreError> {
        tracing::debug!(count = self.documents.len(), "memory find_all");
        Ok(self.documents.iter().map(StoredPart::to_part).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Collects formatted log output in memory
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_every_call_logs_debug_event() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut store = MemoryStore::new();
            let part = SparePart::new("P1", "Pad", "Civic", 5.0, 1);
            store.exists("P1").unwrap();
            store.insert(&part).unwrap();
            store.update("P1", &part).unwrap();
            store.delete("P1").unwrap();
            store.find_all().unwrap();
        });

        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        for event in [
            "memory exists",
            "memory insert",
            "memory update",
            "memory delete",
            "memory find_all",
        ] {
            assert!(logs.contains(event), "missing '{}' in:\n{}", event, logs);
        }
    }

    #[test]
    fn test_insert_and_find_all_in_order() {
        let mut store = MemoryStore::new();
        store.insert(&SparePart::new("B", "Belt", "Swift", 40.0, 3)).unwrap();
        store.insert(&SparePart::new("A", "Air Filter", "City", 15.0, 8)).unwrap();

        let ids: Vec<String> = store.find_all().unwrap().into_iter().map(|p| p.part_id).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_update_counts() {
        let mut store = MemoryStore::with_parts([SparePart::new("P1", "Pad", "Civic", 5.0, 1)]);

        let same = store.update("P1", &SparePart::new("P1", "Pad", "Civic", 5.0, 1)).unwrap();
        assert_eq!(same, UpdateOutcome { matched: 1, modified: 0 });

        let changed = store.update("P1", &SparePart::new("P1", "Pad", "Civic", 6.0, 1)).unwrap();
        assert_eq!(changed, UpdateOutcome { matched: 1, modified: 1 });
        assert_eq!(store.find_all().unwrap()[0].price, 6.0);

        let missing = store.update("P2", &SparePart::new("P2", "Pad", "Civic", 6.0, 1)).unwrap();
        assert_eq!(missing, UpdateOutcome::default());
    }

    #[test]
    fn test_delete_removes_first_match_only() {
        let mut store = MemoryStore::with_parts([
            SparePart::new("P1", "First", "Civic", 1.0, 1),
            SparePart::new("P1", "Second", "Civic", 2.0, 2),
        ]);

        assert_eq!(store.delete("P1").unwrap(), 1);
        let rest = store.find_all().unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "Second");

        assert_eq!(store.delete("nope").unwrap(), 0);
    }
}
