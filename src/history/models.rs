//! History entry models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One principal's interaction state with one note.
///
/// Invariant: at most one entry exists per (owner_id, note_id) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Owning principal.
    pub owner_id: Uuid,
    /// Canonical note identifier. Never an alias.
    pub note_id: Uuid,
    pub pinned: bool,
    pub last_visited_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(owner_id: Uuid, note_id: Uuid) -> Self {
        Self {
            owner_id,
            note_id,
            pinned: false,
            last_visited_at: Utc::now(),
        }
    }
}

/// Partial update of a history entry. Absent fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HistoryEntryPatch {
    pub pinned: Option<bool>,
}

/// Whether an upsert created a new entry or mutated an existing one.
///
/// The public contract returns one entry type either way; the tagged outcome
/// keeps the create-vs-mutate branch observable for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// A history entry joined with its note's display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryInfo {
    pub note_id: Uuid,
    pub alias: Option<String>,
    pub title: String,
    pub pinned: bool,
    pub last_visited_at: DateTime<Utc>,
}
