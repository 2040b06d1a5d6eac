use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Zone used when rendering snapshot modification times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampZone {
    #[default]
    Local,
    Utc,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Hidden per-dataset directory, e.g. `.zfs`.
    pub snapshot_dir: String,
    /// Directory under `snapshot_dir` holding one entry per snapshot.
    pub snapshot_subdir: String,
    pub parallel_probe: bool,
    pub timestamps: TimestampZone,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: ".zfs".to_string(),
            snapshot_subdir: "snapshot".to_string(),
            parallel_probe: false,
            timestamps: TimestampZone::Local,
        }
    }
}

impl AppConfig {
    /// Path, relative to a dataset root, of the snapshot listing directory.
    pub fn listing_marker(&self) -> PathBuf {
        Path::new(&self.snapshot_dir).join(&self.snapshot_subdir)
    }
}

/// Layer built-in defaults, an optional `zfsver.*` file in the working
/// directory, an explicit config file and `ZFSVER_*` environment variables.
pub fn load_configuration(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let mut builder = Config::builder()
        .set_default("snapshot_dir", defaults.snapshot_dir)?
        .set_default("snapshot_subdir", defaults.snapshot_subdir)?
        .set_default("parallel_probe", defaults.parallel_probe)?
        .set_default("timestamps", "local")?
        .add_source(ConfigFile::with_name("zfsver").required(false));

    if let Some(path) = explicit {
        builder = builder.add_source(ConfigFile::from(path).required(true));
    }

    builder
        .add_source(Environment::with_prefix("ZFSVER"))
        .build()?
        .try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_listing_marker() {
        let config = AppConfig::default();
        assert_eq!(config.listing_marker(), PathBuf::from(".zfs/snapshot"));
        assert_eq!(config.timestamps, TimestampZone::Local);
        assert!(!config.parallel_probe);
    }

    #[test]
    fn test_load_explicit_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("custom.toml");
        fs::write(
            &file,
            "snapshot_dir = \".snapshots\"\nparallel_probe = true\ntimestamps = \"utc\"\n",
        )
        .unwrap();

        let config = load_configuration(Some(&file)).unwrap();
        assert_eq!(config.snapshot_dir, ".snapshots");
        assert_eq!(config.snapshot_subdir, "snapshot");
        assert!(config.parallel_probe);
        assert_eq!(config.timestamps, TimestampZone::Utc);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_configuration(Some(&missing)).is_err());
    }
}
