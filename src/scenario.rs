use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    config::{FounderConfig, SimConfig},
    events::{EventCatalog, EventKind},
    world::Calendar,
};

fn default_years() -> u32 {
    10
}

fn default_map_size() -> usize {
    20
}

fn default_civilizations() -> usize {
    2
}

fn default_days_per_season() -> u32 {
    91
}

fn default_event_scale() -> f64 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_years")]
    pub years: u32,
    #[serde(default = "default_map_size")]
    pub map_size: usize,
    #[serde(default = "default_civilizations")]
    pub civilizations: usize,
    #[serde(default = "default_days_per_season")]
    pub days_per_season: u32,
    #[serde(default)]
    pub founders: Vec<FounderConfig>,
    #[serde(default)]
    pub events: EventSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scales the whole catalog, then pins individual odds.
#[derive(Debug, Clone, Deserialize)]
pub struct EventSettings {
    #[serde(default = "default_event_scale")]
    pub scale: f64,
    #[serde(default)]
    pub overrides: Vec<EventOverride>,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            scale: default_event_scale(),
            overrides: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventOverride {
    pub kind: EventKind,
    pub probability: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn to_config(&self) -> SimConfig {
        let mut events = EventCatalog::standard().scaled(self.events.scale);
        for pinned in &self.events.overrides {
            events.set_probability(pinned.kind, pinned.probability);
        }
        SimConfig {
            years: self.years,
            seed: self.seed,
            quiet: false,
            map_size: self.map_size,
            civilizations: self.civilizations,
            founders: self.founders.clone(),
            calendar: Calendar {
                days_per_season: self.days_per_season,
            },
            events,
        }
    }
}
