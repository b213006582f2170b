use anyhow::Result;
use tracing::{debug, warn};

use crate::{
    civilization::{release_territory, Civilization, DAILY_RATION},
    engine::{SimState, System, TickContext},
    rng::{RngExt, SimRng},
    world::World,
};

/// Share of unfed people who die each day.
const STARVATION_MORTALITY: f64 = 0.1;
/// Food per person kept back before any surplus counts toward births.
const SURPLUS_RESERVE: f64 = 2.0;
const BIRTHS_PER_SURPLUS: f64 = 0.02;
/// Births per day never exceed this share of the population.
const MAX_GROWTH_RATE: f64 = 0.01;
/// Births only happen while morale is above this.
const BIRTH_MORALE_THRESHOLD: f64 = 50.0;
const STARVATION_MORALE_LOSS: f64 = 3.0;
const NATURAL_DEATH_CHANCE: f64 = 0.1;
const NATURAL_DEATH_RATE: f64 = 0.002;

/// Births, deaths and collapse, once per living civilization.
pub struct PopulationSystem;

impl PopulationSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PopulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PopulationSystem {
    fn name(&self) -> &str {
        "population"
    }

    fn run(&mut self, ctx: &mut TickContext, state: &mut SimState, rng: &mut SimRng) -> Result<()> {
        let SimState {
            world,
            civilizations,
        } = state;

        for civ in civilizations.iter_mut().filter(|civ| civ.is_alive()) {
            let deficit = civ.starvation_deficit();
            if deficit > 0.0 {
                let deaths = (deficit / DAILY_RATION * STARVATION_MORTALITY).ceil() as u32;
                let died = civ.lose(deaths);
                civ.adjust_morale(-STARVATION_MORALE_LOSS);
                debug!(civ = civ.name(), died, deficit, "starvation");
                if died > 0 {
                    ctx.note(format!("{died} of {}'s people starve to death.", civ.name()));
                }
            } else if civ.morale() > BIRTH_MORALE_THRESHOLD {
                let population = f64::from(civ.population());
                let surplus = civ.food() - SURPLUS_RESERVE * population;
                if surplus > 0.0 {
                    let cap = (population * MAX_GROWTH_RATE).ceil();
                    let births = (surplus * BIRTHS_PER_SURPLUS).floor().min(cap) as u32;
                    civ.grow(births);
                }
            }

            if rng.chance(NATURAL_DEATH_CHANCE) {
                let natural = (f64::from(civ.population()) * NATURAL_DEATH_RATE).floor() as u32;
                civ.lose(natural);
            }

            if civ.population() == 0 {
                let cause = if deficit > 0.0 { "famine" } else { "decline" };
                fall(ctx, world, civ, cause);
            }
            civ.tick_effects();
        }
        Ok(())
    }
}

fn fall(ctx: &mut TickContext, world: &mut World, civ: &mut Civilization, cause: &str) {
    let held = civ.territory().len();
    for err in release_territory(world, civ) {
        warn!(civ = civ.name(), error = %err, "could not release territory");
    }
    civ.collapse(ctx.date(), cause);
    let text = match held {
        0 => format!("{} has fallen to {cause}, leaving no land behind.", civ.name()),
        1 => format!("{} has fallen to {cause}; its last cell returns to the wild.", civ.name()),
        _ => format!(
            "{} has fallen to {cause}; its {held} cells return to the wild.",
            civ.name()
        ),
    };
    ctx.major(text);
}
