mod error;
mod traits;

pub mod memory;
pub mod redis;
pub mod s3;

pub use error::StorageError;
pub use memory::{MemoryBlobStore, MemoryMetadataStore};
pub use redis::RedisMetadataStore;
pub use s3::S3BlobStore;
pub use traits::{BlobStore, MetadataStore};
