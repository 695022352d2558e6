//! Canonical note record and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical note record.
///
/// The stable identifier is `id`; the `alias` is a human-chosen name that can
/// be renamed at any time. Everything that needs a durable reference to a
/// note (history entries, media attachments) stores the `id`, never the
/// alias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub alias: Option<String>,
    pub title: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(owner_id: Uuid, title: impl Into<String>, alias: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            alias,
            title: title.into(),
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Note metadata projection for the owned-notes listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteMetadata {
    pub id: Uuid,
    pub alias: Option<String>,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Note> for NoteMetadata {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            alias: note.alias.clone(),
            title: note.title.clone(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}
