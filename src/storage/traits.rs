use async_trait::async_trait;

use super::error::StorageError;
use crate::models::note::NoteRecord;

/// Key-value store holding one record per note.
///
/// Single-record reads and writes are atomic at the backend, but a
/// get-then-put sequence is not: concurrent writers to the same note can
/// lose updates. That race is accepted (see README).
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert or replace the record stored under `note.id`.
    async fn put(&self, note: &NoteRecord) -> Result<(), StorageError>;

    /// Fetch the record for a note id.
    async fn get(&self, id: &str) -> Result<Option<NoteRecord>, StorageError>;

    /// Read every record. Unbounded, with no ordering guarantee.
    async fn scan(&self) -> Result<Vec<NoteRecord>, StorageError>;

    /// Delete the record for `id`. Deleting an absent id is not an error.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}

/// Object store holding image bytes under note-scoped keys.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key` with the given content type.
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<(), StorageError>;

    /// Delete the object under `key`.
    ///
    /// Returns `true` if an object was deleted, `false` if none existed.
    /// Backends that cannot report prior existence return `true`.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// Generate a time-limited access URL for `key`.
    async fn presigned_url(&self, key: &str) -> Result<String, StorageError>;

    /// Static URL for `key` derived from the bucket/key naming convention.
    ///
    /// Used as a fallback when presigning fails; the target is only
    /// reachable if the bucket happens to be publicly readable.
    fn public_url(&self, key: &str) -> String;
}
