use thiserror::Error;

#[derive(Error, Debug)]
pub enum KVError {
    /// A conditional insert found the key already present.
    #[error("key already exists: {0}")]
    KeyExists(String),

    #[error("storage error: {0}")]
    Storage(String),
}
