//! Handlers for the current-user resource area
//!
//! Thin pass-through layer: every handler extracts the authenticated
//! principal, delegates to a service or store contract, and maps typed
//! errors onto HTTP outcomes.

use super::auth::AuthUser;
use super::handlers::AppError;
use crate::history::{HistoryEntryInfo, HistoryEntryPatch};
use crate::media::MediaUpload;
use crate::notes::NoteMetadata;
use crate::users::UserInfo;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// GET /api/me — the caller's own user info.
pub async fn get_me(AuthUser(principal): AuthUser) -> Json<UserInfo> {
    Json(UserInfo::from(&principal))
}

/// GET /api/me/history — all history entries, most recently visited first.
pub async fn get_user_history(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<Vec<HistoryEntryInfo>>, AppError> {
    let entries = state.history.list_entries(&principal).await?;
    let mut infos = Vec::with_capacity(entries.len());
    for entry in &entries {
        infos.push(state.history.entry_info(&principal, entry).await?);
    }
    Ok(Json(infos))
}

/// GET /api/me/history/{note} — one entry by note ID or alias.
pub async fn get_history_entry(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(note): Path<String>,
) -> Result<Json<HistoryEntryInfo>, AppError> {
    let entry = state.history.get_entry(&principal, &note).await?;
    let info = state.history.entry_info(&principal, &entry).await?;
    Ok(Json(info))
}

/// PUT /api/me/history/{note} — upsert the entry's pin state and refresh
/// its last-visited timestamp.
pub async fn update_history_entry(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(note): Path<String>,
    Json(patch): Json<HistoryEntryPatch>,
) -> Result<Json<HistoryEntryInfo>, AppError> {
    let entry = state.history.update_entry(&principal, &note, patch).await?;
    let info = state.history.entry_info(&principal, &entry).await?;
    Ok(Json(info))
}

/// DELETE /api/me/history/{note} — remove the entry.
pub async fn delete_history_entry(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(note): Path<String>,
) -> Result<StatusCode, AppError> {
    state.history.delete_entry(&principal, &note).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/me/notes — metadata of the caller's own notes.
pub async fn get_my_notes(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<Vec<NoteMetadata>>, AppError> {
    let notes = state.notes.list_owned_by(&principal).await?;
    Ok(Json(notes.iter().map(NoteMetadata::from).collect()))
}

/// GET /api/me/media — the caller's media uploads.
pub async fn get_my_media(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<Vec<MediaUpload>>, AppError> {
    Ok(Json(state.media.list_by_owner(&principal).await?))
}
