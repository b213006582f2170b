use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::civilization::{Trait, MAX_CIVILIZATIONS};
use crate::events::EventCatalog;
use crate::world::Calendar;

/// Smallest grid that leaves room for founding at least two capitals.
pub const MIN_MAP_SIZE: usize = 8;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("years to simulate must be positive")]
    InvalidYears,
    #[error("map size must be at least {min}, got {got}")]
    InvalidMapSize { min: usize, got: usize },
    #[error("civilization count must be between 2 and {max}, got {got}")]
    InvalidCivilizationCount { max: usize, got: usize },
    #[error("{founders} founders configured for only {civilizations} civilizations")]
    TooManyFounders { founders: usize, civilizations: usize },
    #[error("days per season must be positive")]
    InvalidSeasonLength,
    #[error("event {kind} has invalid odds or magnitude")]
    InvalidEvent { kind: String },
}

/// Optional overrides for one founding civilization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FounderConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "trait")]
    pub temperament: Option<Trait>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub years: u32,
    /// Chosen at random (and reported) when absent.
    pub seed: Option<u64>,
    /// Keeps yearly progress out of the info log.
    pub quiet: bool,
    pub map_size: usize,
    pub civilizations: usize,
    pub founders: Vec<FounderConfig>,
    pub calendar: Calendar,
    pub events: EventCatalog,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            years: 10,
            seed: None,
            quiet: false,
            map_size: 20,
            civilizations: 2,
            founders: Vec::new(),
            calendar: Calendar::default(),
            events: EventCatalog::standard(),
        }
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_years(mut self, years: u32) -> Self {
        self.years = years;
        self
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn with_events(mut self, events: EventCatalog) -> Self {
        self.events = events;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.years == 0 {
            return Err(ConfigError::InvalidYears);
        }
        if self.map_size < MIN_MAP_SIZE {
            return Err(ConfigError::InvalidMapSize {
                min: MIN_MAP_SIZE,
                got: self.map_size,
            });
        }
        if !(2..=MAX_CIVILIZATIONS).contains(&self.civilizations) {
            return Err(ConfigError::InvalidCivilizationCount {
                max: MAX_CIVILIZATIONS,
                got: self.civilizations,
            });
        }
        if self.founders.len() > self.civilizations {
            return Err(ConfigError::TooManyFounders {
                founders: self.founders.len(),
                civilizations: self.civilizations,
            });
        }
        if self.calendar.days_per_season == 0 {
            return Err(ConfigError::InvalidSeasonLength);
        }
        for spec in self.events.entries() {
            let odds_ok = spec.probability.is_finite() && (0.0..=1.0).contains(&spec.probability);
            let magnitude_ok = spec.magnitude_min.is_finite()
                && spec.magnitude_max.is_finite()
                && spec.magnitude_min >= 0.0
                && spec.magnitude_min <= spec.magnitude_max;
            if !odds_ok || !magnitude_ok {
                return Err(ConfigError::InvalidEvent {
                    kind: spec.kind.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Ticks in a full run.
    pub fn total_days(&self) -> u64 {
        u64::from(self.years) * self.calendar.days_per_year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        assert_eq!(config.years, 10);
        assert_eq!(config.map_size, 20);
        assert_eq!(config.civilizations, 2);
        assert!(config.validate().is_ok());
        assert_eq!(config.total_days(), 10 * 364);
    }

    #[test]
    fn rejects_non_positive_values() {
        assert_eq!(
            SimConfig::default().with_years(0).validate(),
            Err(ConfigError::InvalidYears)
        );
        assert!(matches!(
            SimConfig::default().with_map_size(0).validate(),
            Err(ConfigError::InvalidMapSize { .. })
        ));
        let mut config = SimConfig::default();
        config.civilizations = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCivilizationCount { .. })
        ));
        let mut config = SimConfig::default();
        config.calendar.days_per_season = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidSeasonLength));
    }

    #[test]
    fn smallest_map_fits_two_capitals() {
        assert_eq!(
            SimConfig::default().with_map_size(MIN_MAP_SIZE - 1).validate(),
            Err(ConfigError::InvalidMapSize {
                min: 8,
                got: 7
            })
        );
        assert!(SimConfig::default().with_map_size(MIN_MAP_SIZE).validate().is_ok());
    }

    #[test]
    fn rejects_impossible_event_odds() {
        let mut events = EventCatalog::standard();
        events.set_probability(EventKind::Plague, 1.5);
        let config = SimConfig::default().with_events(events);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidEvent { .. })));
    }
}
