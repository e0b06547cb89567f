//! Typed document collections over a [`taskhub_kv::KVStore`].
//!
//! A model implements [`Document`] to name its collection and id.
//! [`Collection<T>`] provides the get/insert/replace/delete/scan operations
//! repositories are written against.

pub mod collection;
pub mod document;

pub use collection::Collection;
pub use document::Document;
