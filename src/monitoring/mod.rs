//! Server monitoring: version cache and status snapshots

pub mod status;
pub mod version;

pub use status::{CounterSource, ServerStatus, StatusCounters, StatusService};
pub use version::{
    BuildMetadataSource, ServerVersion, StaticVersionSource, VersionCache, VersionError,
    VersionMetadataSource,
};
