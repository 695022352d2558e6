//! History service — list/get/update/delete by note reference

use super::models::{HistoryEntry, HistoryEntryInfo, HistoryEntryPatch, UpsertOutcome};
use super::policy::{HistoryPolicy, OwnerPolicy};
use super::store::HistoryStore;
use crate::notes::{Note, NoteResolver};
use crate::users::Principal;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

/// Failures of the history operations.
///
/// Storage failures pass through unmodified; retry policy belongs to the
/// storage collaborator, not here.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The reference did not resolve to a note, or no history entry exists
    /// for the resolved note. Callers see one kind for both: either way
    /// there is no history to show.
    #[error("no note or history entry matches {0:?}")]
    NotFound(String),

    /// The configured policy refused the mutation.
    #[error("operation not permitted for this user")]
    Forbidden,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Orchestrates note-reference resolution and the history store.
pub struct HistoryService {
    resolver: Arc<dyn NoteResolver>,
    store: Arc<dyn HistoryStore>,
    policy: Arc<dyn HistoryPolicy>,
}

impl HistoryService {
    /// Create a new HistoryService with the default owner-only policy.
    pub fn new(resolver: Arc<dyn NoteResolver>, store: Arc<dyn HistoryStore>) -> Self {
        Self {
            resolver,
            store,
            policy: Arc::new(OwnerPolicy),
        }
    }

    /// Replace the mutation policy (builder pattern).
    pub fn with_policy(mut self, policy: Arc<dyn HistoryPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// All history entries owned by the principal, most recently visited
    /// first. An empty list is a valid result.
    pub async fn list_entries(
        &self,
        principal: &Principal,
    ) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = self.store.list_by_owner(principal.id).await?;
        entries.sort_by(|a, b| b.last_visited_at.cmp(&a.last_visited_at));
        Ok(entries)
    }

    /// Look up the principal's history entry for a note reference.
    pub async fn get_entry(
        &self,
        principal: &Principal,
        reference: &str,
    ) -> Result<HistoryEntry, HistoryError> {
        let note = self.resolve(principal, reference).await?;
        self.store
            .find(principal.id, note.id)
            .await?
            .ok_or_else(|| HistoryError::NotFound(reference.to_string()))
    }

    /// Create-or-update the principal's history entry for a note reference.
    ///
    /// An existing entry gets the patch applied and its last-visited
    /// timestamp refreshed; a missing entry is created seeded from the patch.
    /// There is no separate create operation.
    pub async fn update_entry(
        &self,
        principal: &Principal,
        reference: &str,
        patch: HistoryEntryPatch,
    ) -> Result<HistoryEntry, HistoryError> {
        let note = self.resolve(principal, reference).await?;

        if let Some(existing) = self.store.find(principal.id, note.id).await? {
            if !self.policy.may_modify(principal, &existing) {
                return Err(HistoryError::Forbidden);
            }
        }

        let (entry, outcome) = self
            .store
            .upsert(principal.id, note.id, &patch, Utc::now())
            .await?;

        tracing::debug!(
            user = %principal.username,
            note_id = %note.id,
            created = matches!(outcome, UpsertOutcome::Created),
            pinned = entry.pinned,
            "history entry upserted"
        );

        Ok(entry)
    }

    /// Delete the principal's history entry for a note reference.
    ///
    /// Fails with [`HistoryError::NotFound`] when the reference does not
    /// resolve or no entry exists — deleting the same entry twice is an
    /// error the second time, not a silent success.
    pub async fn delete_entry(
        &self,
        principal: &Principal,
        reference: &str,
    ) -> Result<(), HistoryError> {
        let note = self.resolve(principal, reference).await?;

        let entry = self
            .store
            .find(principal.id, note.id)
            .await?
            .ok_or_else(|| HistoryError::NotFound(reference.to_string()))?;
        if !self.policy.may_modify(principal, &entry) {
            return Err(HistoryError::Forbidden);
        }

        if self.store.delete(principal.id, note.id).await? {
            Ok(())
        } else {
            Err(HistoryError::NotFound(reference.to_string()))
        }
    }

    /// Join an entry with its note's display metadata.
    pub async fn entry_info(
        &self,
        principal: &Principal,
        entry: &HistoryEntry,
    ) -> Result<HistoryEntryInfo, HistoryError> {
        let note = self
            .resolve(principal, &entry.note_id.to_string())
            .await?;
        Ok(HistoryEntryInfo {
            note_id: note.id,
            alias: note.alias,
            title: note.title,
            pinned: entry.pinned,
            last_visited_at: entry.last_visited_at,
        })
    }

    /// Resolve a reference, mapping "absent" to [`HistoryError::NotFound`].
    async fn resolve(
        &self,
        principal: &Principal,
        reference: &str,
    ) -> Result<Note, HistoryError> {
        self.resolver
            .resolve(reference, principal)
            .await?
            .ok_or_else(|| HistoryError::NotFound(reference.to_string()))
    }
}
