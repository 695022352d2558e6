//! Media upload models and listing contract
//!
//! Media storage itself (upload, backends, deletion) is an external
//! component; the current-user area only needs the owned-uploads listing.

pub mod models;

pub use models::MediaUpload;

use crate::users::Principal;
use anyhow::Result;
use async_trait::async_trait;

/// Listing surface of the external media storage component.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// All uploads owned by the principal.
    async fn list_by_owner(&self, principal: &Principal) -> Result<Vec<MediaUpload>>;
}
