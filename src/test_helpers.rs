//! Test helper factories and state builders
//!
//! Convenience functions for seeding the in-memory backend and building an
//! application/router pair for in-process request tests.
#![allow(dead_code)]

use crate::notes::Note;
use crate::store::MemoryStore;
use crate::users::Principal;
use crate::{AppState, Config};
use axum::Router;
use std::sync::Arc;

/// Config with test defaults (no file or env access).
pub fn test_config() -> Config {
    Config {
        server_port: 0,
        pre_release: "dev".to_string(),
    }
}

/// Register a principal named `username` with the token `token-<username>`.
pub async fn seed_principal(store: &MemoryStore, username: &str) -> Principal {
    let display_name = {
        let mut chars = username.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    };
    let principal = Principal::new(username, display_name);
    store
        .add_user(principal.clone(), &format!("token-{username}"))
        .await;
    principal
}

/// Register a note owned by `owner`, optionally aliased.
pub async fn seed_note(
    store: &MemoryStore,
    owner: &Principal,
    title: &str,
    alias: Option<&str>,
) -> Note {
    let note = Note::new(owner.id, title, alias.map(String::from));
    store.add_note(note.clone()).await;
    note
}

/// Build a router over a fresh backend seeded with the principal "alice"
/// (token "token-alice") and her note aliased "my-note".
pub async fn test_app() -> (Router, Arc<MemoryStore>) {
    let backend = Arc::new(MemoryStore::new());
    let alice = seed_principal(&backend, "alice").await;
    seed_note(&backend, &alice, "My note", Some("my-note")).await;

    let state = AppState::with_backend(test_config(), backend.clone());
    (crate::api::create_router(state), backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserDirectory;

    #[tokio::test]
    async fn test_seeded_app_resolves_token() {
        let (_app, store) = test_app().await;
        let alice = store.find_by_token("token-alice").await.unwrap();
        assert!(alice.is_some());
        assert_eq!(alice.unwrap().username, "alice");
    }
}
