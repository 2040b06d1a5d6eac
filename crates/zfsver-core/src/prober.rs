use crate::error::Error;
use chrono::{DateTime, SubsecRound, Utc};
use rayon::prelude::*;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// One copy of the target file found inside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHit {
    pub snapshot: OsString,
    /// Modification time truncated to whole seconds.
    pub modified: DateTime<Utc>,
    pub size: u64,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct ProbeResult {
    /// Number of snapshot identifiers listed, hit or not.
    pub snapshot_count: usize,
    pub hits: Vec<SnapshotHit>,
    /// Probes that failed for a reason other than the file being absent.
    pub failed: usize,
}

enum Probe {
    Hit(SnapshotHit),
    Missing,
    Failed,
}

/// Names of the immediate children of the snapshot listing directory.
pub fn list_snapshots(listing: &Path) -> Result<Vec<OsString>, Error> {
    let listing_error = |source: io::Error| Error::SnapshotListing {
        path: listing.to_path_buf(),
        source,
    };

    fs::read_dir(listing)
        .map_err(listing_error)?
        .map(|entry| entry.map(|e| e.file_name()).map_err(listing_error))
        .collect()
}

/// Stat `<listing>/<id>/<relative>` in every snapshot.
///
/// Only a failure to list the snapshots is an error; a failed stat in a
/// single snapshot just leaves that snapshot out of the hits.
pub fn probe_all(listing: &Path, relative: &Path, parallel: bool) -> Result<ProbeResult, Error> {
    let snapshots = list_snapshots(listing)?;
    debug!(
        "Probing {} snapshots under {} for {}",
        snapshots.len(),
        listing.display(),
        relative.display()
    );

    let probes: Vec<Probe> = if parallel {
        snapshots
            .par_iter()
            .map(|id| probe_snapshot(listing, id, relative))
            .collect()
    } else {
        snapshots
            .iter()
            .map(|id| probe_snapshot(listing, id, relative))
            .collect()
    };

    let mut result = ProbeResult {
        snapshot_count: snapshots.len(),
        ..ProbeResult::default()
    };
    for probe in probes {
        match probe {
            Probe::Hit(hit) => result.hits.push(hit),
            Probe::Missing => {}
            Probe::Failed => result.failed += 1,
        }
    }

    Ok(result)
}

fn probe_snapshot(listing: &Path, id: &OsStr, relative: &Path) -> Probe {
    let candidate = listing.join(id).join(relative);

    let metadata = match fs::metadata(&candidate) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            trace!("{} not present", candidate.display());
            return Probe::Missing;
        }
        Err(err) => {
            debug!("Error probing {}: {}", candidate.display(), err);
            return Probe::Failed;
        }
    };

    let modified = match metadata.modified() {
        Ok(modified) => DateTime::<Utc>::from(modified).trunc_subsecs(0),
        Err(err) => {
            debug!("No modification time for {}: {}", candidate.display(), err);
            return Probe::Failed;
        }
    };

    Probe::Hit(SnapshotHit {
        snapshot: id.to_os_string(),
        modified,
        size: metadata.len(),
        path: candidate,
    })
}
