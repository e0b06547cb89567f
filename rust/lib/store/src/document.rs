use serde::Serialize;
use serde::de::DeserializeOwned;

/// Trait implemented by stored records to declare where they live.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name. Documents are stored under `"{COLLECTION}:{id}"`.
    const COLLECTION: &'static str;

    /// The document's identifier.
    fn id(&self) -> &str;

    /// Secondary values that must be unique across the collection,
    /// as `(field, value)` pairs. Defaults to none.
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}
