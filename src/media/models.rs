//! Media upload record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A file uploaded by a user, optionally attached to a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaUpload {
    pub id: Uuid,
    pub filename: String,
    pub url: String,
    pub owner_id: Uuid,
    /// Note the upload is attached to; detached uploads keep None.
    pub note_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl MediaUpload {
    pub fn new(owner_id: Uuid, filename: impl Into<String>, note_id: Option<Uuid>) -> Self {
        let id = Uuid::new_v4();
        let filename = filename.into();
        Self {
            id,
            url: format!("/media/{}/{}", id, filename),
            filename,
            owner_id,
            note_id,
            created_at: Utc::now(),
        }
    }
}
