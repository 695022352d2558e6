//! HistoryStore contract

use super::models::{HistoryEntry, HistoryEntryPatch, UpsertOutcome};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Persistent mapping from (principal, note) to a history entry.
///
/// The backing store is the sole source of truth for concurrent mutation
/// ordering: `upsert` must apply the whole read-modify-write atomically so
/// that two concurrent upserts of the same (owner, note) pair never lose an
/// update. The service layer holds no locks of its own.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Look up the entry for (owner, note), if any.
    async fn find(&self, owner_id: Uuid, note_id: Uuid) -> Result<Option<HistoryEntry>>;

    /// Create-or-update the entry for (owner, note).
    ///
    /// If an entry exists, apply the patch and set `last_visited_at` to
    /// `visited_at`; otherwise create one seeded from the patch (pin defaults
    /// to false). Returns the resulting entry and which branch was taken.
    async fn upsert(
        &self,
        owner_id: Uuid,
        note_id: Uuid,
        patch: &HistoryEntryPatch,
        visited_at: DateTime<Utc>,
    ) -> Result<(HistoryEntry, UpsertOutcome)>;

    /// Remove the entry for (owner, note). Returns true if one was removed.
    async fn delete(&self, owner_id: Uuid, note_id: Uuid) -> Result<bool>;

    /// All entries owned by the principal, in no particular order.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<HistoryEntry>>;
}
