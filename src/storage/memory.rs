use async_trait::async_trait;
use dashmap::DashMap;

use super::error::StorageError;
use super::traits::{BlobStore, MetadataStore};
use crate::models::note::NoteRecord;

/// In-memory metadata store for tests and local development.
#[derive(Default)]
pub struct MemoryMetadataStore {
    notes: DashMap<String, NoteRecord>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn put(&self, note: &NoteRecord) -> Result<(), StorageError> {
        self.notes.insert(note.id.clone(), note.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<NoteRecord>, StorageError> {
        Ok(self.notes.get(id).map(|entry| entry.clone()))
    }

    async fn scan(&self) -> Result<Vec<NoteRecord>, StorageError> {
        Ok(self.notes.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.notes.remove(id);
        Ok(())
    }
}

/// In-memory blob store for tests and local development.
///
/// Presigned URLs are synthetic `memory://` URLs; presigning a missing key
/// fails, which exercises the static-URL fallback on reads.
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: DashMap<String, (Vec<u8>, String)>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Content type recorded for `key`, if present.
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects.get(key).map(|entry| entry.value().1.clone())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<(), StorageError> {
        self.objects
            .insert(key.to_string(), (data.to_vec(), content_type.to_string()));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.objects.remove(key).is_some())
    }

    async fn presigned_url(&self, key: &str) -> Result<String, StorageError> {
        if !self.objects.contains_key(key) {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(format!("memory://{key}?sig=local"))
    }

    fn public_url(&self, key: &str) -> String {
        format!("memory://{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> NoteRecord {
        NoteRecord::new(format!("title-{id}"), "content".to_string())
    }

    #[tokio::test]
    async fn metadata_put_get_round_trip() {
        let store = MemoryMetadataStore::new();
        let note = record("a");
        store.put(&note).await.unwrap();

        let fetched = store.get(&note.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, note.id);
        assert_eq!(fetched.title, note.title);
    }

    #[tokio::test]
    async fn metadata_get_missing_is_none() {
        let store = MemoryMetadataStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn metadata_scan_returns_all_records() {
        let store = MemoryMetadataStore::new();
        store.put(&record("a")).await.unwrap();
        store.put(&record("b")).await.unwrap();

        let all = store.scan().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn metadata_delete_is_idempotent() {
        let store = MemoryMetadataStore::new();
        let note = record("a");
        store.put(&note).await.unwrap();

        store.delete(&note.id).await.unwrap();
        assert!(store.get(&note.id).await.unwrap().is_none());
        // Deleting again is not an error.
        store.delete(&note.id).await.unwrap();
    }

    #[tokio::test]
    async fn blob_put_delete_reports_existence() {
        let store = MemoryBlobStore::new();
        store.put("k", b"bytes", "image/png").await.unwrap();
        assert_eq!(store.content_type("k").as_deref(), Some("image/png"));

        assert!(store.delete("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn blob_presign_missing_key_fails() {
        let store = MemoryBlobStore::new();
        let result = store.presigned_url("gone").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}
