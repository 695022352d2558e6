//! Lazily computed, process-wide server version
//!
//! The version descriptor is a pure function of static build metadata, so it
//! is computed at most once per process and shared from then on. The cache
//! is an explicit container rather than a module-level global: "uncomputed"
//! is the cell's empty state, not a sentinel value that could be confused
//! with a computed one.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

/// Immutable server version descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Attached by deployment policy, never derived from the version string.
    pub pre_release: String,
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        Ok(())
    }
}

/// Failures of version computation.
///
/// Both variants mean the deployment is misconfigured: surface them at
/// startup (or as a 500 from the status endpoint) instead of retrying.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("malformed server version {raw:?}: expected MAJOR.MINOR.PATCH")]
    Malformed { raw: String },

    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

/// Source of the dotted version string.
#[async_trait]
pub trait VersionMetadataSource: Send + Sync {
    async fn read(&self) -> Result<String>;
}

/// Reads the version baked into the binary at compile time.
#[derive(Debug, Default)]
pub struct BuildMetadataSource;

#[async_trait]
impl VersionMetadataSource for BuildMetadataSource {
    async fn read(&self) -> Result<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }
}

/// Fixed version string, for tests and overrides.
#[derive(Debug)]
pub struct StaticVersionSource(pub String);

#[async_trait]
impl VersionMetadataSource for StaticVersionSource {
    async fn read(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Process-wide container for the lazily computed [`ServerVersion`].
///
/// First computation is serialized by the cell; every caller, including
/// concurrent first callers, observes the same field values. The computation
/// itself is pure, so even redundant recomputation would be harmless — the
/// cell just makes the single-write property explicit.
pub struct VersionCache {
    source: Arc<dyn VersionMetadataSource>,
    pre_release: String,
    cell: OnceCell<ServerVersion>,
}

impl VersionCache {
    pub fn new(source: Arc<dyn VersionMetadataSource>, pre_release: impl Into<String>) -> Self {
        Self {
            source,
            pre_release: pre_release.into(),
            cell: OnceCell::new(),
        }
    }

    /// Return the cached version, computing it on first access.
    pub async fn get_or_compute(&self) -> Result<ServerVersion, VersionError> {
        let version = self
            .cell
            .get_or_try_init(|| async {
                let raw = self.source.read().await?;
                let (major, minor, patch) = parse_components(&raw)?;
                Ok::<_, VersionError>(ServerVersion {
                    major,
                    minor,
                    patch,
                    pre_release: self.pre_release.clone(),
                })
            })
            .await?;
        Ok(version.clone())
    }
}

/// Parse exactly three dot-separated numeric components.
fn parse_components(raw: &str) -> Result<(u64, u64, u64), VersionError> {
    let malformed = || VersionError::Malformed {
        raw: raw.to_string(),
    };

    let mut parts = raw.trim().split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(major), Some(minor), Some(patch), None) => {
            let major = major.parse().map_err(|_| malformed())?;
            let minor = minor.parse().map_err(|_| malformed())?;
            let patch = patch.parse().map_err(|_| malformed())?;
            Ok((major, minor, patch))
        }
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts reads so tests can assert the at-most-once property.
    struct CountingSource {
        version: String,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl VersionMetadataSource for CountingSource {
        async fn read(&self) -> Result<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.version.clone())
        }
    }

    fn cache_for(version: &str) -> VersionCache {
        VersionCache::new(Arc::new(StaticVersionSource(version.to_string())), "dev")
    }

    #[tokio::test]
    async fn test_three_component_string_parses() {
        let version = cache_for("1.9.3").get_or_compute().await.unwrap();
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 9);
        assert_eq!(version.patch, 3);
        assert_eq!(version.pre_release, "dev");
        assert_eq!(version.to_string(), "1.9.3-dev");
    }

    #[tokio::test]
    async fn test_missing_patch_component_is_malformed() {
        let err = cache_for("1.9").get_or_compute().await.unwrap_err();
        assert!(matches!(err, VersionError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_extra_and_non_numeric_components_are_malformed() {
        for raw in ["1.9.3.4", "1.x.3", "", "one.two.three"] {
            let err = cache_for(raw).get_or_compute().await.unwrap_err();
            assert!(matches!(err, VersionError::Malformed { .. }), "raw={raw:?}");
        }
    }

    #[tokio::test]
    async fn test_concurrent_first_access_observes_one_value() {
        let source = Arc::new(CountingSource {
            version: "2.4.6".to_string(),
            reads: AtomicUsize::new(0),
        });
        let cache = Arc::new(VersionCache::new(source.clone(), "dev"));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.get_or_compute().await.unwrap() })
            })
            .collect();

        let versions: Vec<ServerVersion> = futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        let first = &versions[0];
        assert!(versions.iter().all(|v| v == first));
        assert_eq!(source.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_source_keeps_failing() {
        let cache = cache_for("not-a-version");
        assert!(cache.get_or_compute().await.is_err());
        // The cell stays empty after a failed init; later calls fail the
        // same way instead of observing a half-computed value.
        assert!(cache.get_or_compute().await.is_err());
    }
}
