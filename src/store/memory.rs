//! In-memory implementation of the store contracts
//!
//! Backs the demo server and the test suite with
//! `tokio::sync::RwLock<HashMap>` collections. The maps are public so tests
//! can seed and inspect state directly.

use crate::history::{HistoryEntry, HistoryEntryPatch, HistoryStore, UpsertOutcome};
use crate::media::{MediaStore, MediaUpload};
use crate::notes::{Note, NoteResolver, NoteStore};
use crate::users::{Principal, UserDirectory};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory backend implementing every store contract of the crate.
#[derive(Default)]
pub struct MemoryStore {
    pub users: RwLock<HashMap<Uuid, Principal>>,
    /// Opaque access token → user id.
    pub tokens: RwLock<HashMap<String, Uuid>>,
    pub notes: RwLock<HashMap<Uuid, Note>>,
    /// Alias → note id. Aliases are unique across the store.
    pub aliases: RwLock<HashMap<String, Uuid>>,
    /// (owner id, note id) → entry. The composite key is what enforces the
    /// one-entry-per-pair invariant.
    pub history: RwLock<HashMap<(Uuid, Uuid), HistoryEntry>>,
    pub media: RwLock<HashMap<Uuid, MediaUpload>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Seed helpers
    // ========================================================================

    /// Register a principal together with an access token for it.
    pub async fn add_user(&self, principal: Principal, token: &str) {
        self.tokens
            .write()
            .await
            .insert(token.to_string(), principal.id);
        self.users.write().await.insert(principal.id, principal);
    }

    /// Register a note, indexing its alias if present.
    pub async fn add_note(&self, note: Note) {
        if let Some(alias) = &note.alias {
            self.aliases.write().await.insert(alias.clone(), note.id);
        }
        self.notes.write().await.insert(note.id, note);
    }

    pub async fn add_media(&self, upload: MediaUpload) {
        self.media.write().await.insert(upload.id, upload);
    }

    /// Look up a note id by alias (test inspection).
    pub async fn note_id_for_alias(&self, alias: &str) -> Option<Uuid> {
        self.aliases.read().await.get(alias).copied()
    }
}

// ============================================================================
// Notes
// ============================================================================

#[async_trait]
impl NoteResolver for MemoryStore {
    async fn resolve(&self, reference: &str, _principal: &Principal) -> Result<Option<Note>> {
        // Canonical IDs resolve directly; anything else is tried as an
        // alias. Visibility rules beyond that belong to the real note
        // storage component.
        let note_id = match Uuid::parse_str(reference) {
            Ok(id) => Some(id),
            Err(_) => self.aliases.read().await.get(reference).copied(),
        };
        let Some(note_id) = note_id else {
            return Ok(None);
        };
        Ok(self.notes.read().await.get(&note_id).cloned())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn list_owned_by(&self, principal: &Principal) -> Result<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .notes
            .read()
            .await
            .values()
            .filter(|n| n.owner_id == principal.id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }
}

// ============================================================================
// History
// ============================================================================

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn find(&self, owner_id: Uuid, note_id: Uuid) -> Result<Option<HistoryEntry>> {
        Ok(self.history.read().await.get(&(owner_id, note_id)).cloned())
    }

    async fn upsert(
        &self,
        owner_id: Uuid,
        note_id: Uuid,
        patch: &HistoryEntryPatch,
        visited_at: DateTime<Utc>,
    ) -> Result<(HistoryEntry, UpsertOutcome)> {
        // The whole read-modify-write happens under one write lock, which is
        // the atomicity the HistoryStore contract requires.
        let mut history = self.history.write().await;
        match history.entry((owner_id, note_id)) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if let Some(pinned) = patch.pinned {
                    entry.pinned = pinned;
                }
                entry.last_visited_at = visited_at;
                Ok((entry.clone(), UpsertOutcome::Updated))
            }
            Entry::Vacant(vacant) => {
                let entry = HistoryEntry {
                    owner_id,
                    note_id,
                    pinned: patch.pinned.unwrap_or(false),
                    last_visited_at: visited_at,
                };
                vacant.insert(entry.clone());
                Ok((entry, UpsertOutcome::Created))
            }
        }
    }

    async fn delete(&self, owner_id: Uuid, note_id: Uuid) -> Result<bool> {
        Ok(self
            .history
            .write()
            .await
            .remove(&(owner_id, note_id))
            .is_some())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<HistoryEntry>> {
        Ok(self
            .history
            .read()
            .await
            .values()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Media
// ============================================================================

#[async_trait]
impl MediaStore for MemoryStore {
    async fn list_by_owner(&self, principal: &Principal) -> Result<Vec<MediaUpload>> {
        let mut uploads: Vec<MediaUpload> = self
            .media
            .read()
            .await
            .values()
            .filter(|m| m.owner_id == principal.id)
            .cloned()
            .collect();
        uploads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(uploads)
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<Principal>> {
        let Some(user_id) = self.tokens.read().await.get(token).copied() else {
            return Ok(None);
        };
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_alice() -> (MemoryStore, Principal) {
        let store = MemoryStore::new();
        let alice = Principal::new("alice", "Alice");
        store.add_user(alice.clone(), "token-alice").await;
        (store, alice)
    }

    #[tokio::test]
    async fn test_resolve_by_id_and_alias() {
        let (store, alice) = store_with_alice().await;
        let note = Note::new(alice.id, "My note", Some("my-note".to_string()));
        let note_id = note.id;
        store.add_note(note).await;

        let by_alias = store.resolve("my-note", &alice).await.unwrap().unwrap();
        assert_eq!(by_alias.id, note_id);

        let by_id = store
            .resolve(&note_id.to_string(), &alice)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_id.id, note_id);

        assert!(store.resolve("missing", &alice).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_reports_outcome() {
        let (store, alice) = store_with_alice().await;
        let note_id = Uuid::new_v4();

        let (entry, outcome) = store
            .upsert(alice.id, note_id, &HistoryEntryPatch::default(), Utc::now())
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Created);
        assert!(!entry.pinned);

        let (entry, outcome) = store
            .upsert(
                alice.id,
                note_id,
                &HistoryEntryPatch { pinned: Some(true) },
                Utc::now(),
            )
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert!(entry.pinned);

        assert_eq!(store.history.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_keep_one_entry() {
        let (store, alice) = store_with_alice().await;
        let store = std::sync::Arc::new(store);
        let note_id = Uuid::new_v4();

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                let owner = alice.id;
                tokio::spawn(async move {
                    store
                        .upsert(
                            owner,
                            note_id,
                            &HistoryEntryPatch {
                                pinned: Some(i % 2 == 0),
                            },
                            Utc::now(),
                        )
                        .await
                        .unwrap()
                })
            })
            .collect();
        futures::future::join_all(tasks).await;

        let entries = crate::history::store::HistoryStore::list_by_owner(&*store, alice.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let (store, alice) = store_with_alice().await;
        let note_id = Uuid::new_v4();

        store
            .upsert(alice.id, note_id, &HistoryEntryPatch::default(), Utc::now())
            .await
            .unwrap();

        assert!(store.delete(alice.id, note_id).await.unwrap());
        assert!(!store.delete(alice.id, note_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_token_lookup() {
        let (store, alice) = store_with_alice().await;

        let found = store.find_by_token("token-alice").await.unwrap().unwrap();
        assert_eq!(found.id, alice.id);
        assert!(store.find_by_token("bogus").await.unwrap().is_none());

        let by_name = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, alice.id);
    }
}
