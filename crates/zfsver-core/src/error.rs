use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot resolve file path {}: {source}", .path.display())]
    PathResolution { path: PathBuf, source: io::Error },

    #[error("Cannot find {}", .0.display())]
    NotFound(PathBuf),

    #[error("{} is not a regular file", .0.display())]
    NotRegularFile(PathBuf),

    #[error(
        "{} is not on a snapshotted filesystem (no {} directory above it)",
        .path.display(),
        .marker.display()
    )]
    NoSnapshotRoot { path: PathBuf, marker: PathBuf },

    #[error(
        "could not find path of {} relative to {}",
        .file.display(),
        .root.display()
    )]
    RelativePath { file: PathBuf, root: PathBuf },

    #[error("cannot read snapshot directory {}: {source}", .path.display())]
    SnapshotListing { path: PathBuf, source: io::Error },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
