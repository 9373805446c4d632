use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_log_path")]
    pub log_path: String,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_root_mount")]
    pub root_mount: String,
    #[serde(default)]
    pub probe: ProbeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_url")]
    pub url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_total_timeout_secs")]
    pub total_timeout_secs: u64,
    #[serde(default = "default_watchdog_timeout_secs")]
    pub watchdog_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            iterations: default_iterations(),
            interval_secs: default_interval_secs(),
            root_mount: default_root_mount(),
            probe: ProbeConfig::default(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: default_probe_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            total_timeout_secs: default_total_timeout_secs(),
            watchdog_timeout_secs: default_watchdog_timeout_secs(),
        }
    }
}

impl ProbeConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn total_timeout(&self) -> Duration {
        Duration::from_secs(self.total_timeout_secs)
    }

    pub fn watchdog_timeout(&self) -> Duration {
        Duration::from_secs(self.watchdog_timeout_secs)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse YAML in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        let cfg: Config = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path_display,
            source,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "log_path must not be empty".to_string(),
            ));
        }
        if self.iterations < 1 {
            return Err(ConfigError::Validation(
                "iterations must be >= 1".to_string(),
            ));
        }
        if self.interval_secs < 1 {
            return Err(ConfigError::Validation(
                "interval_secs must be >= 1".to_string(),
            ));
        }
        if self.root_mount.trim().is_empty() {
            return Err(ConfigError::Validation(
                "root_mount must not be empty".to_string(),
            ));
        }

        validate_probe(&self.probe)
    }

    pub fn example_yaml() -> &'static str {
        include_str!("../config.yaml.example")
    }
}

fn validate_probe(probe: &ProbeConfig) -> Result<(), ConfigError> {
    if probe.url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "probe.url must not be empty".to_string(),
        ));
    }
    if probe.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "probe.connect_timeout_secs must be > 0".to_string(),
        ));
    }
    if probe.total_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "probe.total_timeout_secs must be > 0".to_string(),
        ));
    }
    // The watchdog only helps when it can outlive the transport's own limit.
    if probe.watchdog_timeout_secs <= probe.total_timeout_secs {
        return Err(ConfigError::Validation(
            "probe.watchdog_timeout_secs must exceed probe.total_timeout_secs".to_string(),
        ));
    }
    Ok(())
}

const fn default_iterations() -> u32 {
    5
}

const fn default_interval_secs() -> u64 {
    10
}

fn default_log_path() -> String {
    "log.csv".to_string()
}

fn default_root_mount() -> String {
    "/".to_string()
}

fn default_probe_url() -> String {
    "http://www.google.com".to_string()
}

const fn default_connect_timeout_secs() -> u64 {
    3
}

const fn default_total_timeout_secs() -> u64 {
    5
}

const fn default_watchdog_timeout_secs() -> u64 {
    6
}
