use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use super::error::StorageError;
use super::traits::MetadataStore;
use crate::models::note::NoteRecord;

/// Redis-backed metadata store.
///
/// Each note is stored as one JSON value under `{table}:{note_id}`. Listing
/// walks the namespace with cursor `SCAN` and fetches the batch with `MGET`,
/// so it is an unbounded full scan by design.
pub struct RedisMetadataStore {
    conn: ConnectionManager,
    table: String,
}

impl RedisMetadataStore {
    /// Connect to Redis and verify the connection is usable.
    pub async fn connect(url: &str, table: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(url)
            .map_err(|e| StorageError::Config(format!("invalid redis url: {e}")))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| StorageError::Config(format!("redis connection failed: {e}")))?;
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    fn record_key(&self, id: &str) -> String {
        format!("{}:{}", self.table, id)
    }
}

#[async_trait]
impl MetadataStore for RedisMetadataStore {
    async fn put(&self, note: &NoteRecord) -> Result<(), StorageError> {
        let payload =
            serde_json::to_string(note).map_err(|e| StorageError::Write(e.to_string()))?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .set(self.record_key(&note.id), payload)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<NoteRecord>, StorageError> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn
            .get(self.record_key(id))
            .await
            .map_err(|e| StorageError::Read(e.to_string()))?;
        payload
            .map(|p| {
                serde_json::from_str(&p)
                    .map_err(|e| StorageError::Read(format!("corrupt record for {id}: {e}")))
            })
            .transpose()
    }

    async fn scan(&self) -> Result<Vec<NoteRecord>, StorageError> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}:*", self.table);

        let mut keys: Vec<String> = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
                .map_err(|e| StorageError::Read(e.to_string()))?;
            keys.extend(batch);
            cursor = next;
            if cursor == 0 {
                break;
            }
        }

        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let payloads: Vec<Option<String>> = conn
            .mget(&keys)
            .await
            .map_err(|e| StorageError::Read(e.to_string()))?;

        // Keys deleted between SCAN and MGET come back as nil; skip them.
        let mut notes = Vec::with_capacity(payloads.len());
        for payload in payloads.into_iter().flatten() {
            notes.push(
                serde_json::from_str(&payload)
                    .map_err(|e| StorageError::Read(format!("corrupt record: {e}")))?,
            );
        }
        Ok(notes)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        let _: u64 = conn
            .del(self.record_key(id))
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;
        Ok(())
    }
}
