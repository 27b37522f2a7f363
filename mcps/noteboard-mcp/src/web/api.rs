//! REST API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::NoteStore;
use crate::types::{ClearResponse, DeleteResponse, ListResponse, Note};
use crate::validation::{validate_new, validate_patch, ValidationError};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

fn bad_request(err: ValidationError) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string())))
}

fn not_found(id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!("note not found: {id}"))),
    )
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub notes: usize,
}

pub async fn health_check(State(store): State<NoteStore>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        notes: store.len().await,
    })
}

pub async fn list_notes(State(store): State<NoteStore>) -> Json<ListResponse> {
    Json(ListResponse::from(store.list().await))
}

/// Create note request
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub description: String,
    pub author: String,
}

pub async fn create_note(
    State(store): State<NoteStore>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let new = validate_new(&req.title, &req.description, &req.author).map_err(bad_request)?;
    let note = store.create(&new.title, &new.description, &new.author).await;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Update note request; omitted fields are kept
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

pub async fn update_note(
    State(store): State<NoteStore>,
    Path(id): Path<String>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    let patch = validate_patch(req.title, req.description, req.author).map_err(bad_request)?;
    store
        .update(&id, patch)
        .await
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

pub async fn delete_note(
    State(store): State<NoteStore>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if store.delete(&id).await {
        Ok(Json(DeleteResponse { id, deleted: true }))
    } else {
        Err(not_found(&id))
    }
}

pub async fn clear_notes(State(store): State<NoteStore>) -> Json<ClearResponse> {
    Json(ClearResponse {
        cleared: store.clear().await,
    })
}

pub async fn snapshot(State(store): State<NoteStore>) -> String {
    store.snapshot().await
}
