pub mod config;
pub mod engine;
pub mod error;
pub mod locator;
pub mod path;
pub mod prober;
pub mod versions;

pub use config::{AppConfig, TimestampZone};
pub use engine::VersionFinder;
pub use error::Error;
pub use locator::SnapshotRoot;
pub use prober::{ProbeResult, SnapshotHit};
pub use versions::VersionReport;
