//! SQLite-backed key-value storage over the `kv_store` table.
//!
//! # Invariants
//! - Writes are single-statement upserts, so they are atomic per key.
//! - Connections must come from `crate::db` (migrations applied).

use super::{KvStorage, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteKvStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KvStorage for SqliteKvStorage<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKvStorage;
    use crate::db::open_db_in_memory;
    use crate::storage::KvStorage;

    #[test]
    fn missing_key_reads_as_none() {
        let conn = open_db_in_memory().unwrap();
        let storage = SqliteKvStorage::new(&conn);
        assert_eq!(storage.get("absent").unwrap(), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let conn = open_db_in_memory().unwrap();
        let storage = SqliteKvStorage::new(&conn);

        storage.set("slot", "[1]").unwrap();
        storage.set("slot", "[2]").unwrap();
        assert_eq!(storage.get("slot").unwrap().as_deref(), Some("[2]"));

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
