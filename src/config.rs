use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use serde::Deserialize;
use url::Url;

/// Environment variable that overrides `database.url` from the config file.
pub const DATABASE_URL_ENV: &str = "NOVELPRESS_DATABASE_URL";

/// Worker count used when the configured concurrency is zero or negative.
/// Jobs are I/O-bound, so the default is sized for tens of thousands of
/// pages rather than for CPU cores.
pub const DEFAULT_CONCURRENCY: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Output root for the generated tree. Cleaned on every run.
    pub output_dir: PathBuf,
    /// Absolute site URL, used for sitemap `<loc>` entries.
    pub base_url: String,
    /// Directory of static files copied verbatim to `<output_dir>/assets`.
    pub assets_dir: PathBuf,
    /// Number of render workers. Zero or negative falls back to
    /// [`DEFAULT_CONCURRENCY`].
    pub concurrency: i64,
    /// Capacity of the bounded job queue; the feeder blocks when full.
    pub queue_capacity: usize,
    /// Progress log cadence in seconds. Zero disables the monitor.
    pub progress_interval_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            base_url: "http://localhost".to_string(),
            assets_dir: PathBuf::from("public/assets"),
            concurrency: 0,
            queue_capacity: 256,
            progress_interval_secs: 1,
        }
    }
}

impl SiteConfig {
    pub fn workers(&self) -> usize {
        if self.concurrency > 0 {
            self.concurrency as usize
        } else {
            DEFAULT_CONCURRENCY
        }
    }

    pub fn progress_interval(&self) -> Option<Duration> {
        (self.progress_interval_secs > 0).then(|| Duration::from_secs(self.progress_interval_secs))
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let mut config: Config = serde_yaml::from_str(&raw)
            .with_context(|| format!("parse config file: {}", path.display()))?;

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.database.url = url;
            }
        }
        if config.database.url.trim().is_empty() {
            anyhow::bail!("database.url is empty (set it in the config or via {DATABASE_URL_ENV})");
        }

        Url::parse(&config.site.base_url)
            .with_context(|| format!("invalid site.base_url: {}", config.site.base_url))?;
        while config.site.base_url.ends_with('/') {
            config.site.base_url.pop();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let config: Config = serde_yaml::from_str("database:\n  url: mysql://db/novels\n").unwrap();
        assert_eq!(config.site.output_dir, PathBuf::from("dist"));
        assert_eq!(config.site.queue_capacity, 256);
        assert_eq!(config.site.workers(), DEFAULT_CONCURRENCY);
        assert_eq!(
            config.site.progress_interval(),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn zero_or_negative_concurrency_falls_back_to_default() {
        let mut site = SiteConfig::default();
        site.concurrency = 0;
        assert_eq!(site.workers(), DEFAULT_CONCURRENCY);
        site.concurrency = -3;
        assert_eq!(site.workers(), DEFAULT_CONCURRENCY);
        site.concurrency = 8;
        assert_eq!(site.workers(), 8);
    }

    #[test]
    fn zero_progress_interval_disables_monitor() {
        let mut site = SiteConfig::default();
        site.progress_interval_secs = 0;
        assert_eq!(site.progress_interval(), None);
    }

    #[test]
    fn load_trims_trailing_slash_from_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "database:\n  url: mysql://db/novels\nsite:\n  base_url: https://novels.example.org/\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.site.base_url, "https://novels.example.org");
    }

    #[test]
    fn load_rejects_missing_database_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "database:\n  url: \"\"\n").unwrap();

        let err = Config::load(&path).unwrap_err().to_string();
        assert!(err.contains("database.url is empty"));
    }
}
