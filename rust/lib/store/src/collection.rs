//! `Collection<T>`: async CRUD over one document collection.
//!
//! redb transactions are blocking, so every operation runs on tokio's
//! blocking pool and the calling handler just awaits it.

use std::marker::PhantomData;
use std::sync::Arc;

use taskhub_core::ServiceError;
use taskhub_kv::{KVError, KVStore};

use crate::document::Document;

/// CRUD operations for one `Document` type. Holds a reference to the KV backend.
pub struct Collection<T: Document> {
    kv: Arc<dyn KVStore>,
    _phantom: PhantomData<T>,
}

impl<T: Document> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.kv))
    }
}

impl<T: Document> Collection<T> {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            kv,
            _phantom: PhantomData,
        }
    }

    fn prefix() -> String {
        format!("{}:", T::COLLECTION)
    }

    fn doc_key(id: &str) -> String {
        format!("{}:{}", T::COLLECTION, id)
    }

    // `#` sorts outside the `{collection}:` prefix, so scans never see index entries.
    fn index_key(field: &str, value: &str) -> String {
        format!("{}#{}:{}", T::COLLECTION, field, value)
    }

    fn kv_err(e: KVError) -> ServiceError {
        ServiceError::Storage(e.to_string())
    }

    fn decode(bytes: &[u8]) -> Result<T, ServiceError> {
        serde_json::from_slice(bytes)
            .map_err(|e| ServiceError::Internal(format!("deserialize {}: {}", T::COLLECTION, e)))
    }

    fn encode(doc: &T) -> Result<Vec<u8>, ServiceError> {
        serde_json::to_vec(doc)
            .map_err(|e| ServiceError::Internal(format!("serialize {}: {}", T::COLLECTION, e)))
    }

    fn scan_all(kv: &dyn KVStore) -> Result<Vec<T>, ServiceError> {
        let entries = kv.scan(&Self::prefix()).map_err(Self::kv_err)?;
        entries.iter().map(|(_, bytes)| Self::decode(bytes)).collect()
    }

    fn get_doc(kv: &dyn KVStore, id: &str) -> Result<Option<T>, ServiceError> {
        match kv.get(&Self::doc_key(id)).map_err(Self::kv_err)? {
            Some(bytes) => Self::decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    async fn run<R, F>(&self, op: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&dyn KVStore) -> Result<R, ServiceError> + Send + 'static,
        R: Send + 'static,
    {
        let kv = Arc::clone(&self.kv);
        tokio::task::spawn_blocking(move || op(kv.as_ref()))
            .await
            .map_err(|e| ServiceError::Internal(format!("store task failed: {e}")))?
    }

    /// All documents in the collection, in key order.
    pub async fn find_all(&self) -> Result<Vec<T>, ServiceError> {
        self.run(|kv| Self::scan_all(kv)).await
    }

    /// All documents matching a predicate.
    pub async fn find_where<P>(&self, predicate: P) -> Result<Vec<T>, ServiceError>
    where
        P: Fn(&T) -> bool + Send + 'static,
    {
        self.run(move |kv| {
            Ok(Self::scan_all(kv)?
                .into_iter()
                .filter(|doc| predicate(doc))
                .collect())
        })
        .await
    }

    /// Get a document by id. Returns None if not found.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<T>, ServiceError> {
        let id = id.to_string();
        self.run(move |kv| Self::get_doc(kv, &id)).await
    }

    /// Look a document up through one of its unique keys.
    pub async fn find_by_unique(
        &self,
        field: &'static str,
        value: &str,
    ) -> Result<Option<T>, ServiceError> {
        let index = Self::index_key(field, value);
        self.run(move |kv| {
            let Some(id) = kv.get(&index).map_err(Self::kv_err)? else {
                return Ok(None);
            };
            let id = String::from_utf8(id)
                .map_err(|e| ServiceError::Internal(format!("corrupt index {index}: {e}")))?;
            Self::get_doc(kv, &id)
        })
        .await
    }

    /// Number of documents in the collection.
    pub async fn count(&self) -> Result<usize, ServiceError> {
        let prefix = Self::prefix();
        self.run(move |kv| Ok(kv.scan(&prefix).map_err(Self::kv_err)?.len()))
            .await
    }

    /// Insert a new document together with its unique index entries.
    ///
    /// Fails with `Conflict` if the id or any unique value is taken;
    /// nothing is written in that case.
    pub async fn insert(&self, doc: T) -> Result<T, ServiceError> {
        self.run(move |kv| {
            let doc_key = Self::doc_key(doc.id());
            let bytes = Self::encode(&doc)?;
            let unique = doc.unique_keys();
            let index_keys: Vec<String> = unique
                .iter()
                .map(|(field, value)| Self::index_key(field, value))
                .collect();

            let mut entries: Vec<(&str, &[u8])> = vec![(doc_key.as_str(), bytes.as_slice())];
            for key in &index_keys {
                entries.push((key.as_str(), doc.id().as_bytes()));
            }

            match kv.insert_new(&entries) {
                Ok(()) => Ok(doc.clone()),
                Err(KVError::KeyExists(key)) if key == doc_key => Err(ServiceError::Conflict(
                    format!("{} '{}' already exists", T::COLLECTION, doc.id()),
                )),
                Err(KVError::KeyExists(key)) => {
                    let (field, value) = index_keys
                        .iter()
                        .position(|k| *k == key)
                        .map(|i| unique[i].clone())
                        .unwrap_or(("key", key));
                    Err(ServiceError::Conflict(format!("{field} '{value}' already exists")))
                }
                Err(e) => Err(Self::kv_err(e)),
            }
        })
        .await
    }

    /// Replace an existing document wholesale.
    ///
    /// Returns false, without writing, if no document has that id.
    /// Unique index entries are not rewritten.
    pub async fn replace(&self, doc: T) -> Result<bool, ServiceError> {
        self.run(move |kv| {
            let bytes = Self::encode(&doc)?;
            kv.replace(&Self::doc_key(doc.id()), &bytes)
                .map_err(Self::kv_err)
        })
        .await
    }

    /// Delete a document and its index entries. Returns whether it existed.
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let id = id.to_string();
        self.run(move |kv| {
            let Some(doc) = Self::get_doc(kv, &id)? else {
                return Ok(false);
            };
            let mut keys = vec![Self::doc_key(&id)];
            for (field, value) in doc.unique_keys() {
                keys.push(Self::index_key(field, &value));
            }
            let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            let removed = kv.batch_delete(&refs).map_err(Self::kv_err)?;
            Ok(removed > 0)
        })
        .await
    }

    /// Apply `mutate` to every document matching `predicate` and write them
    /// back in one batch. Returns the number of documents touched.
    pub async fn update_where<P, M>(&self, predicate: P, mutate: M) -> Result<usize, ServiceError>
    where
        P: Fn(&T) -> bool + Send + 'static,
        M: Fn(&mut T) + Send + 'static,
    {
        self.run(move |kv| {
            let mut changed = Vec::new();
            for mut doc in Self::scan_all(kv)? {
                if predicate(&doc) {
                    mutate(&mut doc);
                    changed.push((Self::doc_key(doc.id()), Self::encode(&doc)?));
                }
            }
            if changed.is_empty() {
                return Ok(0);
            }
            let entries: Vec<(&str, &[u8])> = changed
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_slice()))
                .collect();
            kv.batch_set(&entries).map_err(Self::kv_err)?;
            Ok(changed.len())
        })
        .await
    }
}
