use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Persisted note metadata. Image URLs are derived per read, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Blob-store keys of attached images, in upload order.
    pub images: Vec<String>,
}

impl NoteRecord {
    /// Fresh record with a generated id, matching timestamps, and no images.
    pub fn new(title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            content,
            created_at: now,
            updated_at: now,
            images: Vec::new(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

/// Partial update; absent fields are left unchanged.
#[derive(Deserialize, Default, ToSchema)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct NoteResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub images: Vec<String>,
    /// One time-limited access URL per key in `images`, in order.
    pub image_urls: Vec<String>,
}

impl NoteResponse {
    pub fn from_record(record: NoteRecord, image_urls: Vec<String>) -> Self {
        Self {
            id: record.id,
            title: record.title,
            content: record.content,
            created_at: record.created_at,
            updated_at: record.updated_at,
            images: record.images,
            image_urls,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ImageUploadResponse {
    pub message: String,
    /// Blob-store key of the uploaded image, scoped under the owning note.
    pub image_key: String,
}
