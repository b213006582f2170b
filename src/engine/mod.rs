//! Tick loop, system pipeline and the end-of-run report.

mod founding;

use std::fmt;

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    chronicle::{Chronicle, Significance},
    civilization::{CivId, Civilization},
    config::{ConfigError, SimConfig},
    rng::SimRng,
    systems::{
        CivilizationSystem, ClimateSystem, EventSystem, PopulationSystem, ResourceSystem,
    },
    world::{Date, World},
};

pub use founding::{found_civilizations, STARTING_FOOD};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could only place {placed} of {wanted} civilizations on the map")]
    Placement { placed: usize, wanted: usize },
    #[error("simulation already finished: {0}")]
    Terminated(Termination),
    #[error("system {system} failed")]
    System {
        system: String,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    YearsElapsed,
    SoleSurvivor(CivId),
    AllExtinct,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::YearsElapsed => f.write_str("the configured years have elapsed"),
            Termination::SoleSurvivor(id) => write!(f, "{id} is the last civilization standing"),
            Termination::AllExtinct => f.write_str("every civilization has fallen"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Initializing,
    Running,
    Terminated(Termination),
}

/// A chronicle line produced during a tick, flushed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub significance: Significance,
    pub text: String,
}

/// Per-tick scratch space handed to every system.
#[derive(Debug)]
pub struct TickContext {
    date: Date,
    notes: Vec<Note>,
}

impl TickContext {
    pub fn new(date: Date) -> Self {
        Self {
            date,
            notes: Vec::new(),
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.push(Significance::Notable, text.into());
    }

    pub fn major(&mut self, text: impl Into<String>) {
        self.push(Significance::Major, text.into());
    }

    fn push(&mut self, significance: Significance, text: String) {
        debug!(date = %self.date, "{text}");
        self.notes.push(Note { significance, text });
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    fn into_notes(self) -> Vec<Note> {
        self.notes
    }
}

/// Everything the systems may mutate.
#[derive(Debug, Clone)]
pub struct SimState {
    pub world: World,
    pub civilizations: Vec<Civilization>,
}

impl SimState {
    pub fn living(&self) -> impl Iterator<Item = &Civilization> {
        self.civilizations.iter().filter(|civ| civ.is_alive())
    }

    pub fn total_population(&self) -> u64 {
        self.living().map(|civ| u64::from(civ.population())).sum()
    }
}

pub trait System {
    fn name(&self) -> &str;
    fn run(&mut self, ctx: &mut TickContext, state: &mut SimState, rng: &mut SimRng) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct TickSummary {
    /// Days elapsed once this tick finished.
    pub day: u64,
    pub date: Date,
    pub living: usize,
    pub total_population: u64,
    pub new_entries: usize,
    pub termination: Option<Termination>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalReport {
    pub seed: u64,
    pub days_elapsed: u64,
    pub termination: Option<Termination>,
    pub world: World,
    pub civilizations: Vec<Civilization>,
    pub chronicle: Chronicle,
}

impl FinalReport {
    pub fn survivors(&self) -> impl Iterator<Item = &Civilization> {
        self.civilizations.iter().filter(|civ| civ.is_alive())
    }

    /// Surviving civilization holding the most territory, lowest id on ties.
    pub fn dominant(&self) -> Option<&Civilization> {
        self.survivors().fold(None, |best: Option<&Civilization>, civ| match best {
            Some(top) if top.territory().len() >= civ.territory().len() => Some(top),
            _ => Some(civ),
        })
    }
}

pub struct Engine {
    phase: EnginePhase,
    rng: SimRng,
    state: SimState,
    chronicle: Chronicle,
    systems: Vec<Box<dyn System>>,
    total_days: u64,
    quiet: bool,
}

impl Engine {
    /// Validates the configuration, generates the map and founds the
    /// civilizations. The returned engine has not ticked yet.
    pub fn new(config: &SimConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = SimRng::new(seed);
        info!(
            seed,
            map_size = config.map_size,
            civilizations = config.civilizations,
            years = config.years,
            "starting simulation"
        );

        let mut world = World::generate(config.map_size, config.calendar, &mut rng);
        let civilizations = found_civilizations(&mut world, config, &mut rng)?;

        let mut chronicle = Chronicle::new();
        let date = world.date();
        for civ in &civilizations {
            chronicle.record(
                date,
                Significance::Major,
                format!(
                    "{} ({}) is founded at {} with {} people.",
                    civ.name(),
                    civ.temperament(),
                    civ.capital(),
                    civ.population()
                ),
            );
        }

        Ok(Self {
            phase: EnginePhase::Initializing,
            rng,
            state: SimState {
                world,
                civilizations,
            },
            chronicle,
            systems: default_pipeline(config),
            total_days: config.total_days(),
            quiet: config.quiet,
        })
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn world(&self) -> &World {
        &self.state.world
    }

    pub fn civilizations(&self) -> &[Civilization] {
        &self.state.civilizations
    }

    pub fn chronicle(&self) -> &Chronicle {
        &self.chronicle
    }

    /// Advances the simulation by one day.
    pub fn tick(&mut self) -> Result<TickSummary, EngineError> {
        if let EnginePhase::Terminated(reason) = self.phase {
            return Err(EngineError::Terminated(reason));
        }
        self.phase = EnginePhase::Running;

        let date = self.state.world.date();
        let mut ctx = TickContext::new(date);
        for system in &mut self.systems {
            system
                .run(&mut ctx, &mut self.state, &mut self.rng)
                .map_err(|source| EngineError::System {
                    system: system.name().to_string(),
                    source,
                })?;
        }

        let notes = ctx.into_notes();
        let mut new_entries = notes.len();
        for note in notes {
            self.chronicle.record(date, note.significance, note.text);
        }

        self.state.world.advance_day();
        let day = self.state.world.day();
        let living = self.state.living().count();
        let total_population = self.state.total_population();

        if day % self.state.world.calendar().days_per_year().max(1) == 0 {
            if self.quiet {
                debug!(year = date.year, living, total_population, "year complete");
            } else {
                info!(year = date.year, living, total_population, "year complete");
            }
        }

        let termination = self.check_termination(day);
        if let Some(reason) = termination {
            if let Some(text) = self.closing_entry(reason) {
                self.chronicle.record(date, Significance::Major, text);
                new_entries += 1;
            }
            info!(day, %reason, "simulation finished");
            self.phase = EnginePhase::Terminated(reason);
        }

        Ok(TickSummary {
            day,
            date,
            living,
            total_population,
            new_entries,
            termination,
        })
    }

    /// Last words for a world that ended early.
    fn closing_entry(&self, reason: Termination) -> Option<String> {
        match reason {
            Termination::YearsElapsed => None,
            Termination::AllExtinct => {
                Some("All civilizations have perished. The world falls silent.".to_string())
            }
            Termination::SoleSurvivor(id) => self
                .state
                .civilizations
                .get(id.index())
                .map(|civ| format!("{} stands alone as the last civilization.", civ.name())),
        }
    }

    fn check_termination(&self, day: u64) -> Option<Termination> {
        let mut living = self.state.living();
        match (living.next(), living.next()) {
            (None, _) => Some(Termination::AllExtinct),
            (Some(last), None) => Some(Termination::SoleSurvivor(last.id())),
            _ if day >= self.total_days => Some(Termination::YearsElapsed),
            _ => None,
        }
    }

    /// Ticks until a terminal condition, calling `hook` after every tick.
    pub fn run_with_hook<F>(&mut self, mut hook: F) -> Result<(), EngineError>
    where
        F: FnMut(&TickSummary),
    {
        while !matches!(self.phase, EnginePhase::Terminated(_)) {
            let summary = self.tick()?;
            hook(&summary);
        }
        Ok(())
    }

    pub fn run(&mut self) -> Result<(), EngineError> {
        self.run_with_hook(|_| {})
    }

    pub fn into_report(self) -> FinalReport {
        let termination = match self.phase {
            EnginePhase::Terminated(reason) => Some(reason),
            _ => None,
        };
        FinalReport {
            seed: self.rng.seed(),
            days_elapsed: self.state.world.day(),
            termination,
            world: self.state.world,
            civilizations: self.state.civilizations,
            chronicle: self.chronicle,
        }
    }
}

fn default_pipeline(config: &SimConfig) -> Vec<Box<dyn System>> {
    vec![
        Box::new(ClimateSystem::new()),
        Box::new(ResourceSystem::new()),
        Box::new(CivilizationSystem::new()),
        Box::new(EventSystem::new(config.events.clone())),
        Box::new(PopulationSystem::new()),
    ]
}

/// Runs a whole simulation and returns its report.
pub fn run(config: &SimConfig) -> Result<FinalReport, EngineError> {
    let mut engine = Engine::new(config)?;
    engine.run()?;
    Ok(engine.into_report())
}
