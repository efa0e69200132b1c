use std::sync::Arc;

use crate::config::{AppConfig, BlobBackend, MetadataBackend};
use crate::storage::{
    BlobStore, MemoryBlobStore, MemoryMetadataStore, MetadataStore, RedisMetadataStore,
    S3BlobStore, StorageError,
};

/// Shared application state: client handles for the two external stores.
///
/// The service itself holds no other mutable state; all persistence lives
/// behind these handles.
#[derive(Clone)]
pub struct AppState {
    pub metadata: Arc<dyn MetadataStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub config: AppConfig,
}

impl AppState {
    /// Construct backend clients per configuration.
    pub async fn from_config(config: AppConfig) -> Result<Self, StorageError> {
        let metadata: Arc<dyn MetadataStore> = match config.metadata.backend {
            MetadataBackend::Redis => Arc::new(
                RedisMetadataStore::connect(&config.metadata.url, &config.metadata.table).await?,
            ),
            MetadataBackend::Memory => Arc::new(MemoryMetadataStore::new()),
        };

        let blobs: Arc<dyn BlobStore> = match config.storage.backend {
            BlobBackend::S3 => Arc::new(S3BlobStore::new(&config.storage)?),
            BlobBackend::Memory => Arc::new(MemoryBlobStore::new()),
        };

        Ok(Self {
            metadata,
            blobs,
            config,
        })
    }
}
