//! Key-value repository contract with SQLite and in-memory backends.

use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// String-keyed, string-valued local store.
pub trait KvRepository {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    /// Inserts or replaces one value.
    fn put(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Inserts or replaces several values atomically.
    fn put_many(&self, entries: &[(&str, String)]) -> RepoResult<()>;
    /// Removes a key. Returns whether it existed.
    fn remove(&self, key: &str) -> RepoResult<bool>;
}

const UPSERT_SQL: &str = "INSERT INTO kv_entries (key, value, updated_at)
     VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
     ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at;";

/// SQLite-backed store over the `kv_entries` table.
///
/// Borrows a migrated connection, so several repositories can share one.
#[derive(Debug, Clone, Copy)]
pub struct SqliteKvRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `RepoError::MissingRequiredTable` when migrations were not applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'kv_entries'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable("kv_entries"));
        }
        Ok(Self { conn })
    }
}

impl KvRepository for SqliteKvRepository<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(UPSERT_SQL, params![key, value])?;
        Ok(())
    }

    fn put_many(&self, entries: &[(&str, String)]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            tx.execute(UPSERT_SQL, params![key, value])?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

/// Process-local store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvRepository {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryKvRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvRepository for MemoryKvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn put_many(&self, entries: &[(&str, String)]) -> RepoResult<()> {
        let mut map = self.entries.borrow_mut();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        Ok(self.entries.borrow_mut().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::{KvRepository, MemoryKvRepository, SqliteKvRepository};
    use crate::db::open_db_in_memory;
    use crate::repo::RepoError;
    use rusqlite::Connection;

    #[test]
    fn sqlite_put_replaces_existing_value() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let repo = SqliteKvRepository::try_new(&conn).expect("table should exist");

        assert_eq!(repo.get("theme").unwrap(), None);
        repo.put("theme", "dark").unwrap();
        repo.put("theme", "light").unwrap();
        assert_eq!(repo.get("theme").unwrap().as_deref(), Some("light"));

        assert!(repo.remove("theme").unwrap());
        assert!(!repo.remove("theme").unwrap());
        assert_eq!(repo.get("theme").unwrap(), None);
    }

    #[test]
    fn sqlite_put_many_writes_every_entry() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let repo = SqliteKvRepository::try_new(&conn).expect("table should exist");

        repo.put_many(&[("a", "1".to_string()), ("b", "2".to_string())])
            .unwrap();
        assert_eq!(repo.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(repo.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn sqlite_repo_rejects_unmigrated_connection() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteKvRepository::try_new(&conn).unwrap_err();
        assert!(matches!(err, RepoError::MissingRequiredTable("kv_entries")));
    }

    #[test]
    fn memory_clones_share_entries() {
        let repo = MemoryKvRepository::new();
        let other = repo.clone();
        repo.put("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(other.len(), 1);
    }
}
