//! Local storage module for Recipe Manager
//! Durable key/value storage backed by SQLite, one text value per well-known key

use crate::error::StorageError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

pub struct LocalStorage {
    conn: Connection,
}

impl LocalStorage {
    /// Open or create storage at the given path
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.init_schema()?;
        debug!(path = %path.display(), "Local storage opened");
        Ok(storage)
    }

    /// Storage that lives only as long as this value
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let storage = Self {
            conn: Connection::open_in_memory()?,
        };
        storage.init_schema()?;
        Ok(storage)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get the value stored under `key`, if any
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM storage WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_key_is_none() {
        let storage = LocalStorage::open_in_memory().unwrap();
        assert_eq!(storage.get_item("recipes").unwrap(), None);
    }

    #[test]
    fn set_replaces_and_remove_clears() {
        let storage = LocalStorage::open_in_memory().unwrap();
        storage.set_item("recipes", "[]").unwrap();
        storage.set_item("recipes", "[1]").unwrap();
        assert_eq!(storage.get_item("recipes").unwrap().as_deref(), Some("[1]"));

        storage.remove_item("recipes").unwrap();
        assert_eq!(storage.get_item("recipes").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.db");
        {
            let storage = LocalStorage::open(&path).unwrap();
            storage.set_item("recipes", r#"[{"id":"1"}]"#).unwrap();
        }
        let storage = LocalStorage::open(&path).unwrap();
        assert_eq!(
            storage.get_item("recipes").unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );
    }
}
