//! User directory contract

use super::models::Principal;
use anyhow::Result;
use async_trait::async_trait;

/// Lookup surface of the external identity component.
///
/// Authentication (token issuance, validation, expiry) happens outside this
/// service; the boundary layer only needs to turn an opaque bearer token
/// into a [`Principal`].
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve an opaque access token to the principal it was issued to.
    async fn find_by_token(&self, token: &str) -> Result<Option<Principal>>;

    /// Resolve a username to a principal.
    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>>;
}
