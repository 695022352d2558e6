//! Principal model and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated caller identity.
///
/// Opaque to the history and status subsystems: they use it only as a lookup
/// key and never mutate it. How a request gets one (token guard, session,
/// reverse proxy header) is the authentication layer's concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl Principal {
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            display_name: display_name.into(),
            created_at: Utc::now(),
        }
    }
}

/// Public projection of a principal for the `/api/me` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub display_name: String,
}

impl From<&Principal> for UserInfo {
    fn from(principal: &Principal) -> Self {
        Self {
            username: principal.username.clone(),
            display_name: principal.display_name.clone(),
        }
    }
}
