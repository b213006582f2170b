use std::collections::BTreeSet;

use anyhow::Result;
use tracing::{debug, warn};

use crate::{
    cell::Coord,
    civilization::{
        decide, set_mutual_relation, transfer_territory, CivId, CivState, Civilization,
        Observation, HOSTILITY_THRESHOLD, INTERACTION_RANGE, NEUTRAL_RELATION,
    },
    engine::{SimState, System, TickContext},
    rng::{RngExt, SimRng},
    world::World,
};

const BASE_EXPANSION_CHANCE: f64 = 0.5;
const EXPANSION_COST: f64 = 10.0;
const FIRST_CONTACT_SPREAD: f64 = 15.0;
/// First-contact relation below which the meeting is recorded as tense.
const TENSE_CONTACT: f64 = 20.0;
const MORALE_DIPLOMACY_PENALTY: f64 = 10.0;
const BASE_CONFLICT_CHANCE: f64 = 0.05;
const CONFLICT_RELATION_HIT: f64 = 10.0;
/// Morale lost by the side that gives up a cell in a clash.
const CLASH_MORALE_LOSS: f64 = 2.0;

/// Runs observe, decide and act for every living civilization in id order.
pub struct CivilizationSystem;

impl CivilizationSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CivilizationSystem {
    fn default() -> Self {
        Self::new()
    }
}

struct Surroundings {
    observation: Observation,
    candidate: Option<Coord>,
    neighbors: BTreeSet<CivId>,
}

fn observe(world: &World, civilizations: &[Civilization], civ: &Civilization) -> Surroundings {
    let candidate =
        world.find_expandable_cell(civ.territory(), civ.temperament().expansion_preference());
    let neighbors: BTreeSet<CivId> = world
        .civilizations_in_range(civ.territory(), INTERACTION_RANGE, civ.id())
        .into_iter()
        .filter(|id| civilizations.get(id.index()).is_some_and(Civilization::is_alive))
        .collect();
    Surroundings {
        observation: Observation {
            food_per_capita: civ.food_per_capita(),
            expansion_available: candidate.is_some(),
            neighbor_in_range: !neighbors.is_empty(),
        },
        candidate,
        neighbors,
    }
}

impl System for CivilizationSystem {
    fn name(&self) -> &str {
        "civilizations"
    }

    fn run(&mut self, ctx: &mut TickContext, state: &mut SimState, rng: &mut SimRng) -> Result<()> {
        let SimState {
            world,
            civilizations,
        } = state;

        for index in 0..civilizations.len() {
            if !civilizations[index].is_alive() {
                continue;
            }
            let surroundings = observe(world, civilizations, &civilizations[index]);
            let next = decide(&surroundings.observation);
            let civ = &mut civilizations[index];
            if next != civ.state() {
                debug!(civ = civ.name(), from = %civ.state(), to = %next, "state change");
            }
            civ.set_state(next);

            match next {
                CivState::Hunting => {
                    let food = civ.hunt(world);
                    debug!(civ = civ.name(), food, "hunted");
                }
                CivState::Gathering => {
                    let (food, mined) = civ.gather(world);
                    debug!(civ = civ.name(), food, ?mined, "gathered");
                }
                CivState::Expanding => {
                    if let Some(coord) = surroundings.candidate {
                        expand(ctx, world, civilizations, index, coord, rng);
                    }
                }
                CivState::Diplomacy => {
                    for other in surroundings.neighbors {
                        negotiate(ctx, world, civilizations, index, other, rng);
                    }
                }
            }
            civilizations[index].eat_rations();
        }
        Ok(())
    }
}

fn expand(
    ctx: &mut TickContext,
    world: &mut World,
    civilizations: &mut [Civilization],
    index: usize,
    coord: Coord,
    rng: &mut SimRng,
) {
    let chance = civilizations[index].expansion_chance(BASE_EXPANSION_CHANCE);
    if !rng.chance(chance) {
        return;
    }
    let id = civilizations[index].id();
    match transfer_territory(world, civilizations, coord, None, id) {
        Ok(()) => {
            let civ = &mut civilizations[index];
            civ.spend_food(EXPANSION_COST);
            let terrain = world
                .cell(coord)
                .map(|cell| cell.terrain().label())
                .unwrap_or("unknown land");
            ctx.note(format!(
                "{} expands into the {} at {coord}.",
                civ.name(),
                terrain.to_lowercase()
            ));
        }
        Err(err) => warn!(civ = %id, error = %err, "expansion aborted"),
    }
}

fn negotiate(
    ctx: &mut TickContext,
    world: &mut World,
    civilizations: &mut [Civilization],
    index: usize,
    other: CivId,
    rng: &mut SimRng,
) {
    let Some(rival) = civilizations.get(other.index()) else {
        return;
    };
    if !rival.is_alive() {
        return;
    }
    let rival_name = rival.name().to_string();
    let rival_trait = rival.temperament();
    let actor = &civilizations[index];
    let id = actor.id();
    let temperament = actor.temperament();

    match actor.relation(other) {
        None => {
            let seeded = NEUTRAL_RELATION
                + temperament.compatibility(rival_trait)
                + rng.between(-FIRST_CONTACT_SPREAD, FIRST_CONTACT_SPREAD);
            set_mutual_relation(civilizations, id, other, seeded);
            let relation = civilizations[index].relation(other).unwrap_or(NEUTRAL_RELATION);
            let name = civilizations[index].name();
            if relation > NEUTRAL_RELATION {
                ctx.note(format!("{name} and {rival_name} establish friendly relations."));
            } else if relation < TENSE_CONTACT {
                ctx.note(format!("Tensions rise as {name} meets {rival_name}."));
            }
        }
        Some(current) => {
            let shift = temperament.modifiers().diplomacy_bias
                - MORALE_DIPLOMACY_PENALTY * actor.morale_penalty();
            set_mutual_relation(civilizations, id, other, current + shift);
        }
    }

    let relation = civilizations[index].relation(other).unwrap_or(NEUTRAL_RELATION);
    let aggression = temperament.modifiers().aggression_bias;
    if relation < HOSTILITY_THRESHOLD && rng.chance(BASE_CONFLICT_CHANCE * aggression) {
        border_conflict(ctx, world, civilizations, index, other, &rival_name);
    }
}

fn border_conflict(
    ctx: &mut TickContext,
    world: &mut World,
    civilizations: &mut [Civilization],
    index: usize,
    other: CivId,
    rival_name: &str,
) {
    let id = civilizations[index].id();
    let Some(coord) = world.contested_cell(civilizations[index].territory(), other) else {
        return;
    };
    match transfer_territory(world, civilizations, coord, Some(other), id) {
        Ok(()) => {
            let relation = civilizations[index].relation(other).unwrap_or(NEUTRAL_RELATION);
            set_mutual_relation(civilizations, id, other, relation - CONFLICT_RELATION_HIT);
            if let Some(rival) = civilizations.get_mut(other.index()) {
                rival.adjust_morale(-CLASH_MORALE_LOSS);
            }
            ctx.note(format!(
                "{} seizes {coord} from {rival_name} in a border clash.",
                civilizations[index].name()
            ));
        }
        Err(err) => warn!(civ = %id, rival = %other, error = %err, "border conflict aborted"),
    }
}
