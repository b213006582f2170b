//! Catalog of random world and civilization events.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::civilization::{CivId, Civilization, EffectKind};
use crate::rng::RngExt;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Drought,
    BountifulHarvest,
    Plague,
    TechDiscovery,
    MoraleCrisis,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Drought,
        EventKind::BountifulHarvest,
        EventKind::Plague,
        EventKind::TechDiscovery,
        EventKind::MoraleCrisis,
    ];

    pub fn scope(self) -> EventScope {
        match self {
            EventKind::Drought | EventKind::BountifulHarvest => EventScope::World,
            EventKind::Plague | EventKind::TechDiscovery | EventKind::MoraleCrisis => {
                EventScope::Civilization
            }
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Drought => "Drought",
            EventKind::BountifulHarvest => "Bountiful Harvest",
            EventKind::Plague => "Plague",
            EventKind::TechDiscovery => "Technological Discovery",
            EventKind::MoraleCrisis => "Morale Crisis",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventScope {
    World,
    Civilization,
}

/// One catalog entry. Magnitude is drawn uniformly from
/// `magnitude_min..=magnitude_max` each time the event fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    pub kind: EventKind,
    pub probability: f64,
    pub magnitude_min: f64,
    pub magnitude_max: f64,
    pub duration_days: u32,
}

impl EventSpec {
    pub fn scope(&self) -> EventScope {
        self.kind.scope()
    }

    fn standard(kind: EventKind) -> Self {
        let (probability, magnitude_min, magnitude_max, duration_days) = match kind {
            EventKind::Drought => (0.001, 0.6, 0.6, 60),
            EventKind::BountifulHarvest => (0.002, 0.5, 0.5, 30),
            EventKind::Plague => (0.0005, 0.1, 0.3, 0),
            EventKind::TechDiscovery => (0.001, 0.25, 0.25, 90),
            EventKind::MoraleCrisis => (0.0003, 0.3, 0.3, 60),
        };
        Self {
            kind,
            probability,
            magnitude_min,
            magnitude_max,
            duration_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCatalog {
    entries: Vec<EventSpec>,
}

impl EventCatalog {
    pub fn new(entries: Vec<EventSpec>) -> Self {
        Self { entries }
    }

    /// Every event at its default odds.
    pub fn standard() -> Self {
        Self::new(EventKind::ALL.into_iter().map(EventSpec::standard).collect())
    }

    /// Same entries, none of which can fire.
    pub fn silent() -> Self {
        Self::standard().scaled(0.0)
    }

    pub fn scaled(mut self, factor: f64) -> Self {
        for entry in &mut self.entries {
            entry.probability = (entry.probability * factor).clamp(0.0, 1.0);
        }
        self
    }

    pub fn set_probability(&mut self, kind: EventKind, probability: f64) {
        for entry in self.entries.iter_mut().filter(|entry| entry.kind == kind) {
            entry.probability = probability;
        }
    }

    pub fn get(&self, kind: EventKind) -> Option<&EventSpec> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    pub fn entries(&self) -> &[EventSpec] {
        &self.entries
    }
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Outcome of an event that actually took effect.
#[derive(Debug, Clone, PartialEq)]
pub struct FiredEvent {
    pub kind: EventKind,
    pub magnitude: f64,
    pub target: Option<CivId>,
    pub major: bool,
    pub description: String,
}

const PLAGUE_MORALE_LOSS: f64 = 20.0;
const DISCOVERY_MORALE_GAIN: f64 = 10.0;
const HARVEST_MORALE_GAIN: f64 = 3.0;
const CRISIS_MORALE_LOSS: std::ops::RangeInclusive<u32> = 5..=15;

const DISCOVERIES: [&str; 5] = [
    "improved farming techniques",
    "better hunting tools",
    "advanced construction methods",
    "new preservation methods",
    "improved irrigation",
];

const CRISES: [&str; 4] = [
    "religious schism",
    "political scandal",
    "failed harvest celebration",
    "disputed succession",
];

fn pick_living<R: Rng>(civilizations: &[Civilization], rng: &mut R) -> Option<usize> {
    let living: Vec<usize> = civilizations
        .iter()
        .enumerate()
        .filter(|(_, civ)| civ.is_alive())
        .map(|(index, _)| index)
        .collect();
    if living.is_empty() {
        return None;
    }
    Some(living[rng.gen_range(0..living.len())])
}

/// Applies a fired catalog entry. Returns `None` when the event has
/// nothing to act on, such as a plague with no living civilization.
pub fn apply<R: Rng>(
    spec: &EventSpec,
    world: &mut World,
    civilizations: &mut [Civilization],
    rng: &mut R,
) -> Option<FiredEvent> {
    let target = match spec.scope() {
        EventScope::World => None,
        EventScope::Civilization => Some(pick_living(civilizations, rng)?),
    };
    let magnitude = rng.between(spec.magnitude_min, spec.magnitude_max);
    let percent = (magnitude * 100.0).round();

    let (major, description) = match (spec.kind, target) {
        (EventKind::Drought, _) => {
            world.add_regen_modifier(spec.kind, 1.0 - magnitude, spec.duration_days);
            (
                false,
                format!(
                    "A terrible drought grips the land; regrowth falls by {percent}% for {} days.",
                    spec.duration_days
                ),
            )
        }
        (EventKind::BountifulHarvest, _) => {
            world.add_regen_modifier(spec.kind, 1.0 + magnitude, spec.duration_days);
            for civ in civilizations.iter_mut().filter(|civ| civ.is_alive()) {
                civ.adjust_morale(HARVEST_MORALE_GAIN);
            }
            (
                false,
                format!(
                    "The lands enjoy a bountiful harvest; \
                     regrowth rises by {percent}% for {} days.",
                    spec.duration_days
                ),
            )
        }
        (EventKind::Plague, Some(index)) => {
            let civ = &mut civilizations[index];
            let deaths = (f64::from(civ.population()) * magnitude).floor() as u32;
            let died = civ.lose(deaths);
            civ.adjust_morale(-PLAGUE_MORALE_LOSS);
            (
                true,
                format!(
                    "A plague devastates {}, killing {died} people ({percent}% of the population)!",
                    civ.name()
                ),
            )
        }
        (EventKind::TechDiscovery, Some(index)) => {
            let discovery = DISCOVERIES[rng.gen_range(0..DISCOVERIES.len())];
            let civ = &mut civilizations[index];
            civ.advance_tech();
            civ.adjust_morale(DISCOVERY_MORALE_GAIN);
            civ.add_effect(EffectKind::TechBonus, magnitude, spec.duration_days);
            (
                false,
                format!(
                    "{} discovers {discovery}! (Tech Level: {}, +{percent}% yields for {} days)",
                    civ.name(),
                    civ.tech_level(),
                    spec.duration_days
                ),
            )
        }
        (EventKind::MoraleCrisis, Some(index)) => {
            let crisis = CRISES[rng.gen_range(0..CRISES.len())];
            let loss = rng.gen_range(CRISIS_MORALE_LOSS);
            let civ = &mut civilizations[index];
            civ.add_effect(EffectKind::MoraleCrisis, magnitude, spec.duration_days);
            civ.adjust_morale(-f64::from(loss));
            (
                false,
                format!(
                    "A {crisis} causes unrest in {}. Morale drops by {loss}; \
                     diplomacy and expansion suffer by {percent}% for {} days.",
                    civ.name(),
                    spec.duration_days
                ),
            )
        }
        (_, None) => return None,
    };

    Some(FiredEvent {
        kind: spec.kind,
        magnitude,
        target: target.map(|index| civilizations[index].id()),
        major,
        description,
    })
}
