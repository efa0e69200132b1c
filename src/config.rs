use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetadataBackend {
    Redis,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetadataConfig {
    pub backend: MetadataBackend,
    pub url: String,
    /// Key namespace; records live under `{table}:{note_id}`.
    pub table: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlobBackend {
    S3,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: BlobBackend,
    pub bucket: String,
    pub region: String,
    /// Custom S3-compatible endpoint (MinIO, R2). AWS when unset.
    pub endpoint: Option<String>,
    pub presign_expiry_secs: u32,
    pub max_upload_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub metadata: MetadataConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.cors.allow_origins", vec!["*"])?
            .set_default("server.cors.max_age", 3600)?
            .set_default("metadata.backend", "redis")?
            .set_default("metadata.url", "redis://127.0.0.1:6379")?
            .set_default("metadata.table", "notes")?
            .set_default("storage.backend", "s3")?
            .set_default("storage.bucket", "notes-images")?
            .set_default("storage.region", "us-east-1")?
            .set_default("storage.presign_expiry_secs", 3600)?
            .set_default("storage.max_upload_size", 32 * 1024 * 1024)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., NOTES__STORAGE__BUCKET)
            .add_source(Environment::with_prefix("NOTES").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_file_or_env() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.metadata.table, "notes");
        assert_eq!(config.storage.bucket, "notes-images");
        assert_eq!(config.storage.presign_expiry_secs, 3600);
        assert_eq!(config.metadata.backend, MetadataBackend::Redis);
        assert_eq!(config.storage.backend, BlobBackend::S3);
        assert!(config.storage.endpoint.is_none());
    }
}
