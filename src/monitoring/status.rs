//! Point-in-time server status snapshots

use super::version::{ServerVersion, VersionCache, VersionError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Scalar gauges sampled for a status snapshot.
///
/// The subsystems that produce these (realtime sessions, note counts) are
/// external collaborators. A deployment without them reports zeros.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounters {
    pub online_notes: u64,
    pub online_users: u64,
    pub distinct_online_users: u64,
    pub registered_users: u64,
    pub notes_count: u64,
}

/// Provider of the status counters.
#[async_trait]
pub trait CounterSource: Send + Sync {
    async fn sample(&self) -> StatusCounters;
}

/// Ephemeral per-request status snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStatus {
    pub server_version: ServerVersion,
    #[serde(flatten)]
    pub counters: StatusCounters,
}

/// Assembles status snapshots from the version cache and counter source.
pub struct StatusService {
    version: Arc<VersionCache>,
    counters: Option<Arc<dyn CounterSource>>,
}

impl StatusService {
    /// Create a StatusService that reports zero counters.
    pub fn new(version: Arc<VersionCache>) -> Self {
        Self {
            version,
            counters: None,
        }
    }

    /// Attach a counter source (builder pattern).
    pub fn with_counter_source(mut self, counters: Arc<dyn CounterSource>) -> Self {
        self.counters = Some(counters);
        self
    }

    /// Build a snapshot. The only failure path is the version cache.
    pub async fn get_status(&self) -> Result<ServerStatus, VersionError> {
        let server_version = self.version.get_or_compute().await?;
        let counters = match &self.counters {
            Some(source) => source.sample().await,
            None => StatusCounters::default(),
        };
        Ok(ServerStatus {
            server_version,
            counters,
        })
    }
}
