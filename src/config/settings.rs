use crate::error::Result;
use crate::simulation::history::DEFAULT_HISTORY_CAPACITY;
use crate::simulation::Scenario;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/ids_sim.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tick_interval_ms: u64,
    pub history_capacity: usize,
    pub default_scenario: Scenario,
    /// Fixed seed for a reproducible feed; entropy-seeded when absent
    pub seed: Option<u64>,
    pub views: ViewLimits,
}

/// How many rows or points each view projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewLimits {
    pub dashboard_recent: usize,
    pub live_feed_len: usize,
    pub series_buckets: usize,
    pub suspicious_sources: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 800,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_scenario: Scenario::Mixed,
            seed: None,
            views: ViewLimits::default(),
        }
    }
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            dashboard_recent: 7,
            live_feed_len: 15,
            series_buckets: 20,
            suspicious_sources: 5,
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

pub fn load_settings(config_path: &Path) -> Settings {
    if config_path.exists() {
        match fs::read_to_string(config_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    log::info!("Loaded configuration from {}", config_path.display());
                    return settings;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}. Using defaults.", e);
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file: {}. Using defaults.", e);
            }
        }
    }

    log::info!("Using default configuration");
    Settings::default()
}

pub fn save_settings(settings: &Settings, config_path: &Path) -> Result<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(config_path, content)?;
    Ok(())
}
