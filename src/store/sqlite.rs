//! SQLite-backed document collection
//!
//! One table per collection. Each row keeps the native `_id`, the
//! `part_id` lookup key and the JSON document body. The `seq` column
//! fixes insertion order.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::core::identity::DocumentId;
use crate::entities::SparePart;

use super::{check_collection_name, replace_fields, RecordStore, StoreError, UpdateOutcome};

pub struct SqliteStore {
    conn: Connection,
    table: String,
}

impl SqliteStore {
    /// Open or create a database file and its collection table
    pub fn open(path: impl AsRef<Path>, collection: &str) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::with_connection(conn, collection)
    }

    /// Open a private in-memory database
    pub fn open_in_memory(collection: &str) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, collection)
    }

    fn with_connection(conn: Connection, collection: &str) -> Result<Self, StoreError> {
        check_collection_name(collection)?;
        let store = Self {
            conn,
            table: collection.to_string(),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS "{table}" (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                _id TEXT NOT NULL UNIQUE,
                part_id TEXT NOT NULL,
                body TEXT NOT NULL
            );
            "#,
            table = self.table
        ))?;
        Ok(())
    }

    /// First row matching `part_id`: (seq, _id, body)
    fn find(&self, part_id: &str) -> Result<Option<(i64, String, String)>, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!(
                    r#"SELECT seq, _id, body FROM "{}" WHERE part_id = ?1 ORDER BY seq LIMIT 1"#,
                    self.table
                ),
                params![part_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        Ok(row)
    }
}

fn decode(id: &str, body: &str) -> Result<SparePart, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Body {
        id: id.to_string(),
        message: e.to_string(),
    })
}

fn encode(part: &SparePart) -> Result<String, StoreError> {
    serde_json::to_string(part).map_err(|e| StoreError::Encode(e.to_string()))
}

impl RecordStore for SqliteStore {
    fn exists(&self, part_id: &str) -> Result<bool, StoreError> {
        tracing::debug!(part_id, table = %self.table, "sqlite exists");
        Ok(self.find(part_id)?.is_some())
    }

    fn insert(&mut self, part: &SparePart) -> Result<(), StoreError> {
        let id = DocumentId::new();
        self.conn.execute(
            &format!(
                r#"INSERT INTO "{}" (_id, part_id, body) VALUES (?1, ?2, ?3)"#,
                self.table
            ),
            params![id.to_string(), part.part_id, encode(part)?],
        )?;
        tracing::debug!(part_id = %part.part_id, %id, "sqlite insert");
        Ok(())
    }

    fn update(
        &mut self,
        part_id: &str,
        replacement: &SparePart,
    ) -> Result<UpdateOutcome, StoreError> {
        let Some((seq, id, body)) = self.find(part_id)? else {
            return Ok(UpdateOutcome::default());
        };

        let (next, changed) = replace_fields(&decode(&id, &body)?, replacement);
        if changed {
            self.conn.execute(
                &format!(r#"UPDATE "{}" SET body = ?1 WHERE seq = ?2"#, self.table),
                params![encode(&next)?, seq],
            )?;
        }
        tracing::debug!(part_id, changed, "sqlite update");

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    fn delete(&mut self, part_id: &str) -> Result<u64, StoreError> {
        let Some((seq, _, _)) = self.find(part_id)? else {
            return Ok(0);
        };
        let removed = self.conn.execute(
            &format!(r#"DELETE FROM "{}" WHERE seq = ?1"#, self.table),
            params![seq],
        )?;
        tracing::debug!(part_id, removed, "sqlite delete");
        Ok(removed as u64)
    }

    fn find_all(&self) -> Result<Vec<SparePart>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!(r#"SELECT _id, body FROM "{}" ORDER BY seq"#, self.table))?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut parts = Vec::new();
        for row in rows {
            let (id, body) = row?;
            parts.push(decode(&id, &body)?);
        }
        Ok(parts)
    }
}
