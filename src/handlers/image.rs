use axum::Json;
use axum::extract::{Multipart, Path, State};
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::handlers::note::find_note;
use crate::models::note::{ImageUploadResponse, MessageResponse};
use crate::state::AppState;
use crate::storage::BlobStore;

/// Fallback extension when the client supplies no usable filename.
const DEFAULT_EXTENSION: &str = "jpg";

#[utoipa::path(
    post,
    path = "/notes/{id}/images",
    tag = "Images",
    operation_id = "uploadImage",
    summary = "Attach an image to a note",
    description = "Uploads the `file` multipart field to blob storage under \
        `notes/{note_id}/{uuid}.{ext}` and appends the key to the note's image list. \
        The extension derives from the client filename, defaulting to `jpg`.",
    params(("id" = String, Path, description = "Note ID")),
    request_body(content_type = "multipart/form-data", description = "Image upload in the `file` field"),
    responses(
        (status = 200, description = "Image uploaded", body = ImageUploadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Note not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ImageUploadResponse>, AppError> {
    let mut record = find_note(&state, &id).await?;

    let mut file_bytes = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("file") => {
                file_name = field.file_name().map(|s| s.to_string());
                content_type = field.content_type().map(|s| s.to_string());
                file_bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?,
                );
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let data = file_bytes.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let extension = file_extension(file_name.as_deref());
    let key = format!("notes/{id}/{}.{extension}", Uuid::new_v4());

    let content_type = content_type
        .or_else(|| {
            file_name
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first().map(|m| m.to_string()))
        })
        .unwrap_or_else(|| "application/octet-stream".to_string());

    state.blobs.put(&key, &data, &content_type).await?;

    // If the metadata write below fails, the blob stays orphaned; accepted.
    record.images.push(key.clone());
    record.updated_at = Utc::now();
    state.metadata.put(&record).await?;

    Ok(Json(ImageUploadResponse {
        message: "Image uploaded successfully".into(),
        image_key: key,
    }))
}

#[utoipa::path(
    delete,
    path = "/notes/{id}/images/{image_key}",
    tag = "Images",
    operation_id = "deleteImage",
    summary = "Detach an image from a note",
    description = "Deletes the blob and removes the key from the note's image list. \
        The key may contain `/`.",
    params(
        ("id" = String, Path, description = "Note ID"),
        ("image_key" = String, Path, description = "Blob-store key of the image"),
    ),
    responses(
        (status = 200, description = "Image deleted", body = MessageResponse),
        (status = 404, description = "Note or image not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_image(
    State(state): State<AppState>,
    Path((id, image_key)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut record = find_note(&state, &id).await?;

    if !record.images.iter().any(|k| k == &image_key) {
        return Err(AppError::NotFound("Image not found in note".into()));
    }

    state
        .blobs
        .delete(&image_key)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    // If the metadata write below fails, the key dangles; accepted.
    record.images.retain(|k| k != &image_key);
    record.updated_at = Utc::now();
    state.metadata.put(&record).await?;

    Ok(Json(MessageResponse {
        message: "Image deleted successfully".into(),
    }))
}

/// One access URL per image key, in order. A failed presign falls back to
/// the static URL for that key; it never fails the read.
pub(crate) async fn signed_image_urls(blobs: &dyn BlobStore, keys: &[String]) -> Vec<String> {
    let mut urls = Vec::with_capacity(keys.len());
    for key in keys {
        match blobs.presigned_url(key).await {
            Ok(url) => urls.push(url),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "presign failed, falling back to static URL");
                urls.push(blobs.public_url(key));
            }
        }
    }
    urls
}

/// Text after the last `.` in the filename; `jpg` when there is no filename
/// or no dot.
fn file_extension(filename: Option<&str>) -> &str {
    match filename {
        Some(name) if name.contains('.') => name.rsplit('.').next().unwrap_or(DEFAULT_EXTENSION),
        _ => DEFAULT_EXTENSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_from_simple_filename() {
        assert_eq!(file_extension(Some("a.png")), "png");
    }

    #[test]
    fn extension_uses_last_dot() {
        assert_eq!(file_extension(Some("archive.tar.gz")), "gz");
    }

    #[test]
    fn extension_defaults_without_dot() {
        assert_eq!(file_extension(Some("README")), "jpg");
    }

    #[test]
    fn extension_defaults_without_filename() {
        assert_eq!(file_extension(None), "jpg");
    }
}
