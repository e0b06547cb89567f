use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

fn storage<E: std::fmt::Display>(e: E) -> KVError {
    KVError::Storage(e.to_string())
}

/// RedbStore is a KVStore implementation backed by redb, a pure-Rust embedded
/// key-value database. One database file holds every collection.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let db = Database::create(path).map_err(storage)?;

        // Ensure the table exists by doing a write transaction.
        let write_txn = db.begin_write().map_err(storage)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)?;

        debug!("RedbStore: opened {:?}", path);
        Ok(Self { db: Arc::new(db) })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(storage(e)),
        }
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;

        let mut results = Vec::new();
        let iter = table.range(prefix..).map_err(storage)?;

        for entry in iter {
            let entry = entry.map_err(storage)?;
            let key = entry.0.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            let value = entry.1.value().to_vec();
            results.push((key, value));
        }

        Ok(results)
    }

    fn insert_new(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        let conflict = {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            let mut conflict = None;
            for (key, _) in entries {
                if table.get(*key).map_err(storage)?.is_some() {
                    conflict = Some(key.to_string());
                    break;
                }
            }
            if conflict.is_none() {
                for (key, value) in entries {
                    table.insert(*key, *value).map_err(storage)?;
                }
            }
            conflict
        };

        // Check all keys before writing: no partial inserts.
        if let Some(key) = conflict {
            write_txn.abort().map_err(storage)?;
            return Err(KVError::KeyExists(key));
        }
        write_txn.commit().map_err(storage)?;
        Ok(())
    }

    fn replace(&self, key: &str, value: &[u8]) -> Result<bool, KVError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        let exists = {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            let exists = table.get(key).map_err(storage)?.is_some();
            if exists {
                table.insert(key, value).map_err(storage)?;
            }
            exists
        };

        if !exists {
            write_txn.abort().map_err(storage)?;
            return Ok(false);
        }
        write_txn.commit().map_err(storage)?;
        Ok(true)
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            for (key, value) in entries {
                table.insert(*key, *value).map_err(storage)?;
            }
        }
        write_txn.commit().map_err(storage)?;
        Ok(())
    }

    fn batch_delete(&self, keys: &[&str]) -> Result<usize, KVError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        let mut removed = 0;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            for key in keys {
                if table.remove(*key).map_err(storage)?.is_some() {
                    removed += 1;
                }
            }
        }
        write_txn.commit().map_err(storage)?;
        Ok(removed)
    }
}
