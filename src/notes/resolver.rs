//! Note lookup contracts

use super::models::Note;
use crate::users::Principal;
use anyhow::Result;
use async_trait::async_trait;

/// Resolves a caller-supplied note reference to the canonical record.
///
/// A reference is either the note's stable ID or one of its aliases.
/// Resolution happens on every call that takes a reference, so alias renames
/// never orphan records that store the canonical ID.
#[async_trait]
pub trait NoteResolver: Send + Sync {
    /// Resolve a reference for the given principal.
    ///
    /// Returns `None` when no note matches the reference (or the principal
    /// may not see it). Storage failures are passed through unmodified.
    async fn resolve(&self, reference: &str, principal: &Principal) -> Result<Option<Note>>;
}

/// Full note lookup surface consumed by the current-user resource area.
#[async_trait]
pub trait NoteStore: NoteResolver {
    /// All notes owned by the principal.
    async fn list_owned_by(&self, principal: &Principal) -> Result<Vec<Note>>;
}
