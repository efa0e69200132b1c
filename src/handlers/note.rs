use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::image::signed_image_urls;
use crate::models::note::{
    CreateNoteRequest, MessageResponse, NoteRecord, NoteResponse, UpdateNoteRequest,
};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/notes",
    tag = "Notes",
    operation_id = "createNote",
    summary = "Create a new note",
    description = "Creates a note with the given title and content. Both fields are required; \
        empty strings are permitted.",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_note(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let record = NoteRecord::new(payload.title, payload.content);
    state.metadata.put(&record).await?;

    Ok((
        StatusCode::CREATED,
        Json(NoteResponse::from_record(record, Vec::new())),
    ))
}

#[utoipa::path(
    get,
    path = "/notes",
    tag = "Notes",
    operation_id = "listNotes",
    summary = "List all notes",
    description = "Returns every note with freshly generated image URLs. Unbounded scan with \
        no ordering guarantee and no pagination.",
    responses(
        (status = 200, description = "All notes", body = [NoteResponse]),
        (status = 500, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<NoteResponse>>, AppError> {
    let records = state.metadata.scan().await?;

    let mut notes = Vec::with_capacity(records.len());
    for record in records {
        let image_urls = signed_image_urls(state.blobs.as_ref(), &record.images).await;
        notes.push(NoteResponse::from_record(record, image_urls));
    }

    Ok(Json(notes))
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    tag = "Notes",
    operation_id = "getNote",
    summary = "Get a note by id",
    params(("id" = String, Path, description = "Note ID")),
    responses(
        (status = 200, description = "The note", body = NoteResponse),
        (status = 404, description = "Note not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NoteResponse>, AppError> {
    let record = find_note(&state, &id).await?;
    let image_urls = signed_image_urls(state.blobs.as_ref(), &record.images).await;
    Ok(Json(NoteResponse::from_record(record, image_urls)))
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    tag = "Notes",
    operation_id = "updateNote",
    summary = "Update a note",
    description = "Partial update: only supplied fields change. `updated_at` is refreshed \
        even when both fields are absent.",
    params(("id" = String, Path, description = "Note ID")),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "The updated note, re-read from storage", body = NoteResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Note not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateNoteRequest>,
) -> Result<Json<NoteResponse>, AppError> {
    let mut record = find_note(&state, &id).await?;

    if let Some(title) = payload.title {
        record.title = title;
    }
    if let Some(content) = payload.content {
        record.content = content;
    }
    // A no-op update still bumps the timestamp.
    record.updated_at = Utc::now();

    state.metadata.put(&record).await?;

    // Re-read so the response reflects stored state, not the input.
    let stored = find_note(&state, &id).await?;
    let image_urls = signed_image_urls(state.blobs.as_ref(), &stored.images).await;
    Ok(Json(NoteResponse::from_record(stored, image_urls)))
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    tag = "Notes",
    operation_id = "deleteNote",
    summary = "Delete a note and its images",
    description = "Deletes every attached image blob best-effort, then removes the metadata \
        record. A failed blob deletion is logged and never aborts the delete.",
    params(("id" = String, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Note deleted", body = MessageResponse),
        (status = 404, description = "Note not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let record = find_note(&state, &id).await?;

    for key in &record.images {
        if let Err(err) = state.blobs.delete(key).await {
            tracing::warn!(key = %key, error = %err, "failed to delete image blob during note deletion");
        }
    }

    state.metadata.delete(&id).await?;

    Ok(Json(MessageResponse {
        message: "Note deleted successfully".into(),
    }))
}

/// Fetch a note or fail with `NOT_FOUND`.
pub(crate) async fn find_note(state: &AppState, id: &str) -> Result<NoteRecord, AppError> {
    state
        .metadata
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Note not found".into()))
}
