//! Authorization policy hook for history mutations

use super::models::HistoryEntry;
use crate::users::Principal;

/// Decides whether a principal may pin or delete a history entry.
///
/// The store already scopes entries to their owner; the hook exists so a
/// deployment can layer stricter rules (e.g. note-visibility checks) on top
/// without touching the service.
pub trait HistoryPolicy: Send + Sync {
    fn may_modify(&self, principal: &Principal, entry: &HistoryEntry) -> bool;
}

/// Default policy: the owning principal may modify its own entries.
#[derive(Debug, Default)]
pub struct OwnerPolicy;

impl HistoryPolicy for OwnerPolicy {
    fn may_modify(&self, principal: &Principal, entry: &HistoryEntry) -> bool {
        entry.owner_id == principal.id
    }
}
