use crate::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A dataset root and the directory listing its snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRoot {
    pub dataset_root: PathBuf,
    pub listing: PathBuf,
}

/// Walk upward from the directory containing `file` until a directory
/// holding `marker` (e.g. `.zfs/snapshot`) is found.
///
/// The presence of the marker is the only signal used; mount tables are not
/// consulted. The walk ends when a directory is its own parent.
pub fn locate(file: &Path, marker: &Path) -> Result<SnapshotRoot, Error> {
    let mut dir = parent_dir(file);

    loop {
        let listing = dir.join(marker);
        match fs::metadata(&listing) {
            Ok(_) => {
                debug!("Found snapshot listing {}", listing.display());
                return Ok(SnapshotRoot {
                    dataset_root: dir.to_path_buf(),
                    listing,
                });
            }
            Err(err) => trace!("No snapshot listing at {}: {}", listing.display(), err),
        }

        let parent = parent_dir(dir);
        if parent == dir {
            return Err(Error::NoSnapshotRoot {
                path: file.to_path_buf(),
                marker: marker.to_path_buf(),
            });
        }
        dir = parent;
    }
}

/// Parent of `path`, or `path` itself at the filesystem root.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => path,
    }
}
