use crate::error::KVError;

/// KVStore provides the key-value interface the document layer is built on.
///
/// Keys follow a namespaced convention: `tasks:{id}` for documents,
/// `users#email:{value}` for unique index entries. Every method that writes
/// runs as a single transaction.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Scan all keys matching a prefix. Returns (key, value) pairs sorted by key.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;

    /// Insert all entries, or none of them.
    ///
    /// Fails with `KVError::KeyExists` naming the first key that is already
    /// present; in that case nothing is written.
    fn insert_new(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError>;

    /// Overwrite the value of an existing key.
    ///
    /// Returns false, without writing, when the key does not exist.
    fn replace(&self, key: &str, value: &[u8]) -> Result<bool, KVError>;

    /// Set several key-value pairs unconditionally.
    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError>;

    /// Delete several keys. Returns how many of them existed.
    fn batch_delete(&self, keys: &[&str]) -> Result<usize, KVError>;
}
