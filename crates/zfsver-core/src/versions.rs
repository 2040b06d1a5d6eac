use crate::config::TimestampZone;
use crate::prober::{ProbeResult, SnapshotHit};
use chrono::{DateTime, Local, Utc};
use std::collections::HashSet;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const CLOCK_FORMAT: &str = "%H:%M:%S";

pub const NOT_FOUND_MESSAGE: &str = "file not found in any snapshots";

impl TimestampZone {
    pub fn format(&self, timestamp: &DateTime<Utc>, fmt: &str) -> String {
        match self {
            TimestampZone::Local => timestamp.with_timezone(&Local).format(fmt).to_string(),
            TimestampZone::Utc => timestamp.format(fmt).to_string(),
        }
    }
}

/// Hits from one probe run, ready to be counted and rendered.
#[derive(Debug)]
pub struct VersionReport {
    hits: Vec<SnapshotHit>,
    snapshot_count: usize,
    zone: TimestampZone,
}

impl VersionReport {
    pub fn new(probe: ProbeResult, zone: TimestampZone) -> Self {
        Self {
            hits: probe.hits,
            snapshot_count: probe.snapshot_count,
            zone,
        }
    }

    pub fn hits(&self) -> &[SnapshotHit] {
        &self.hits
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshot_count
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Key used to decide whether two hits are the same version.
    ///
    /// Only the time of day of the modification time is used; the date, size
    /// and path are ignored. Existing counts depend on this, so copies made at
    /// the same clock time on different days collapse into one version.
    pub fn version_key(&self, hit: &SnapshotHit) -> String {
        self.zone.format(&hit.modified, CLOCK_FORMAT)
    }

    pub fn distinct_versions(&self) -> usize {
        self.hits
            .iter()
            .map(|hit| self.version_key(hit))
            .collect::<HashSet<_>>()
            .len()
    }

    /// `<timestamp> <size> <path>`
    pub fn render_hit(&self, hit: &SnapshotHit) -> String {
        format!(
            "{} {} {}",
            self.zone.format(&hit.modified, TIMESTAMP_FORMAT),
            hit.size,
            hit.path.display()
        )
    }

    /// Every hit rendered, sorted by the rendered text.
    pub fn listing(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.hits.iter().map(|hit| self.render_hit(hit)).collect();
        lines.sort();
        lines
    }

    pub fn summary(&self) -> String {
        format!(
            "found {} versions of file in {} snapshots.",
            self.distinct_versions(),
            self.snapshot_count
        )
    }

    /// Output lines for a run: the not-found message, the summary line, or
    /// the full listing when `verbose`.
    pub fn render(&self, verbose: bool) -> Vec<String> {
        if self.is_empty() {
            vec![NOT_FOUND_MESSAGE.to_string()]
        } else if verbose {
            self.listing()
        } else {
            vec![self.summary()]
        }
    }
}
