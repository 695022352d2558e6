//! Inkpad
//!
//! Core of a collaborative note service's current-user resource area:
//! - Per-user history tracking (pin state, last-visited) keyed by note
//! - Note, media and identity lookup contracts with an in-memory backend
//! - Lazily computed server version and status snapshots
//! - HTTP API for the `/api/me` area and `/api/status`

pub mod api;
pub mod history;
pub mod media;
pub mod monitoring;
pub mod notes;
pub mod store;
pub mod users;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::Result;
use history::HistoryService;
use media::MediaStore;
use monitoring::{BuildMetadataSource, StatusService, VersionCache};
use notes::NoteStore;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use store::MemoryStore;
use users::UserDirectory;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    pub status: StatusYamlConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub port: u16,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Status configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatusYamlConfig {
    /// Pre-release label attached to the reported server version.
    pub pre_release: String,
}

impl Default for StatusYamlConfig {
    fn default() -> Self {
        Self {
            pre_release: "dev".into(),
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub pre_release: String,
}

impl Config {
    /// Load configuration from environment variables only.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env
    /// vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file
    /// doesn't exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        Ok(Self {
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(yaml.server.port),
            pre_release: std::env::var("VERSION_PRE_RELEASE").unwrap_or(yaml.status.pre_release),
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any
    /// failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

// ============================================================================
// Application state
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserDirectory>,
    pub notes: Arc<dyn NoteStore>,
    pub media: Arc<dyn MediaStore>,
    pub history: Arc<HistoryService>,
    pub status: Arc<StatusService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state over a fresh in-memory backend.
    ///
    /// Returns the backend too, so callers (demo seeding, tests) can reach
    /// its seed helpers directly.
    pub fn in_memory(config: Config) -> (Self, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        (Self::with_backend(config, backend.clone()), backend)
    }

    /// Wire services over an existing backend.
    pub fn with_backend(config: Config, backend: Arc<MemoryStore>) -> Self {
        let history = Arc::new(HistoryService::new(backend.clone(), backend.clone()));
        let version = Arc::new(VersionCache::new(
            Arc::new(BuildMetadataSource),
            config.pre_release.clone(),
        ));
        let status = Arc::new(StatusService::new(version));

        Self {
            users: backend.clone(),
            notes: backend.clone(),
            media: backend,
            history,
            status,
            config: Arc::new(config),
        }
    }
}

/// Bind and serve the API until the process is stopped.
pub async fn start_server(config: Config) -> Result<()> {
    let port = config.server_port;
    let (state, _backend) = AppState::in_memory(config);
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
