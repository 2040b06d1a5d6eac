use crate::config::AppConfig;
use crate::error::Error;
use crate::locator;
use crate::path;
use crate::prober;
use crate::versions::VersionReport;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

pub struct VersionFinder {
    config: AppConfig,
}

impl VersionFinder {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the full lookup for one file:
    /// 1. Resolve the path to an existing regular file
    /// 2. Walk upward to the dataset root holding the snapshot listing
    /// 3. Map the file to a path relative to that root
    /// 4. Stat the relative path inside every snapshot
    pub fn find(&self, target: &Path) -> Result<VersionReport, Error> {
        let file = path::normalize(target)?;
        debug!("Resolved {} to {}", target.display(), file.display());

        let root = locator::locate(&file, &self.config.listing_marker())?;
        info!("Dataset root: {}", root.dataset_root.display());

        let relative = path::relative_to(&root.dataset_root, &file)?;
        debug!("Relative path: {}", relative.display());

        let probe_start = Instant::now();
        let probe = prober::probe_all(&root.listing, &relative, self.config.parallel_probe)?;
        debug!(
            "Probed {} snapshots in {:.2}s: {} hits, {} failed probes",
            probe.snapshot_count,
            probe_start.elapsed().as_secs_f64(),
            probe.hits.len(),
            probe.failed,
        );

        Ok(VersionReport::new(probe, self.config.timestamps))
    }
}
