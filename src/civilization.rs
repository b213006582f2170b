//! Civilizations and their finite-state decision making.
//!
//! Deciding is a pure function of an [`Observation`]; acting is split into
//! the self-contained harvest/ration methods here and the world-touching
//! actions driven by `systems::civilizations`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cell::{Coord, Mineral};
use crate::world::{Date, ExpansionPreference, TransferError, World};

/// Food per person below which a civilization hunts.
pub const CRITICAL_FOOD_PER_CAPITA: f64 = 1.0;
/// Food per person below which a civilization gathers instead of expanding.
pub const LOW_FOOD_PER_CAPITA: f64 = 3.0;
/// Food eaten per person per day.
pub const DAILY_RATION: f64 = 0.1;
/// Chebyshev distance at which two territories notice each other.
pub const INTERACTION_RANGE: usize = 2;

pub const NEUTRAL_RELATION: f64 = 50.0;
pub const MIN_RELATION: f64 = 0.0;
pub const MAX_RELATION: f64 = 100.0;
/// Relations below this may boil over into border conflict.
pub const HOSTILITY_THRESHOLD: f64 = 25.0;

pub const MIN_MORALE: f64 = 0.0;
pub const MAX_MORALE: f64 = 100.0;
pub const STARTING_MORALE: f64 = 80.0;
/// Morale regained by a day's hunting or gathering that brought food home.
const MORALE_PER_HARVEST: f64 = 1.0;

const HUNT_YIELD_PER_CAPITA: f64 = 0.4;
const HUNT_TAKE_PER_CELL: f64 = 20.0;
const GATHER_YIELD_PER_CAPITA: f64 = 0.25;
const GATHER_TAKE_PER_CELL: f64 = 12.0;
const MINED_PER_GATHER: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CivId(pub u32);

impl CivId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CivId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "civ#{}", self.0)
    }
}

/// Numeric knobs a trait feeds into the shared decision functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitModifiers {
    /// Multiplies the base expansion chance.
    pub expansion_bias: f64,
    /// Relation change per diplomacy action.
    pub diplomacy_bias: f64,
    /// Multiplies the base border-conflict chance.
    pub aggression_bias: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    Aggressive,
    Peaceful,
    Expansionist,
    Isolationist,
    Trading,
}

impl Trait {
    pub const ALL: [Trait; 5] = [
        Trait::Aggressive,
        Trait::Peaceful,
        Trait::Expansionist,
        Trait::Isolationist,
        Trait::Trading,
    ];

    pub fn modifiers(self) -> TraitModifiers {
        let (expansion_bias, diplomacy_bias, aggression_bias) = match self {
            Trait::Aggressive => (1.3, -3.0, 2.0),
            Trait::Peaceful => (0.9, 4.0, 0.2),
            Trait::Expansionist => (1.6, 1.0, 1.2),
            Trait::Isolationist => (0.4, 0.5, 0.5),
            Trait::Trading => (1.0, 5.0, 0.5),
        };
        TraitModifiers {
            expansion_bias,
            diplomacy_bias,
            aggression_bias,
        }
    }

    pub fn expansion_preference(self) -> ExpansionPreference {
        match self {
            Trait::Aggressive | Trait::Expansionist => ExpansionPreference::Mineral,
            _ => ExpansionPreference::Food,
        }
    }

    /// How well two temperaments get along at first contact.
    pub fn compatibility(self, other: Trait) -> f64 {
        use Trait::*;
        match (self, other) {
            (Peaceful, Peaceful) => 30.0,
            (Peaceful, Trading) | (Trading, Peaceful) => 25.0,
            (Trading, Trading) => 20.0,
            (Isolationist, Isolationist) => 10.0,
            (Aggressive, Peaceful) | (Peaceful, Aggressive) => -10.0,
            (Expansionist, Expansionist) => -20.0,
            (Aggressive, Aggressive) => -30.0,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trait::Aggressive => "aggressive",
            Trait::Peaceful => "peaceful",
            Trait::Expansionist => "expansionist",
            Trait::Isolationist => "isolationist",
            Trait::Trading => "trading",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CivState {
    Hunting,
    Gathering,
    Expanding,
    Diplomacy,
}

impl fmt::Display for CivState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CivState::Hunting => "hunting",
            CivState::Gathering => "gathering",
            CivState::Expanding => "expanding",
            CivState::Diplomacy => "diplomacy",
        };
        f.write_str(name)
    }
}

/// Everything the state machine is allowed to look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub food_per_capita: f64,
    pub expansion_available: bool,
    pub neighbor_in_range: bool,
}

/// The transition rule.
pub fn decide(observation: &Observation) -> CivState {
    let fpc = observation.food_per_capita;
    if fpc < CRITICAL_FOOD_PER_CAPITA {
        CivState::Hunting
    } else if fpc < LOW_FOOD_PER_CAPITA {
        CivState::Gathering
    } else if observation.expansion_available {
        CivState::Expanding
    } else if observation.neighbor_in_range {
        CivState::Diplomacy
    } else {
        CivState::Gathering
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Improves harvests and expansion.
    TechBonus,
    /// Hurts diplomacy and expansion.
    MoraleCrisis,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub magnitude: f64,
    pub days_left: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Fall {
    pub date: Date,
    pub cause: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Civilization {
    id: CivId,
    name: String,
    #[serde(rename = "trait")]
    temperament: Trait,
    capital: Coord,
    population: u32,
    food: f64,
    territory: BTreeSet<Coord>,
    state: CivState,
    relations: BTreeMap<CivId, f64>,
    alive: bool,
    tech_level: u32,
    morale: f64,
    stockpile: BTreeMap<Mineral, u32>,
    effects: Vec<ActiveEffect>,
    starvation_deficit: f64,
    fall: Option<Fall>,
}

impl Civilization {
    /// A new civilization with no territory yet.
    pub fn new(
        id: CivId,
        name: impl Into<String>,
        temperament: Trait,
        capital: Coord,
        population: u32,
        food: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            temperament,
            capital,
            population,
            food: food.max(0.0),
            territory: BTreeSet::new(),
            state: CivState::Gathering,
            relations: BTreeMap::new(),
            alive: population > 0,
            tech_level: 1,
            morale: STARTING_MORALE,
            stockpile: BTreeMap::new(),
            effects: Vec::new(),
            starvation_deficit: 0.0,
            fall: None,
        }
    }

    pub fn id(&self) -> CivId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn temperament(&self) -> Trait {
        self.temperament
    }

    pub fn capital(&self) -> Coord {
        self.capital
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    pub fn food(&self) -> f64 {
        self.food
    }

    pub fn territory(&self) -> &BTreeSet<Coord> {
        &self.territory
    }

    pub fn state(&self) -> CivState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn tech_level(&self) -> u32 {
        self.tech_level
    }

    /// Overall contentment, 0..=100.
    pub fn morale(&self) -> f64 {
        self.morale
    }

    pub fn stockpile(&self) -> &BTreeMap<Mineral, u32> {
        &self.stockpile
    }

    pub fn effects(&self) -> &[ActiveEffect] {
        &self.effects
    }

    pub fn starvation_deficit(&self) -> f64 {
        self.starvation_deficit
    }

    pub fn fall(&self) -> Option<&Fall> {
        self.fall.as_ref()
    }

    pub fn relations(&self) -> &BTreeMap<CivId, f64> {
        &self.relations
    }

    pub fn relation(&self, other: CivId) -> Option<f64> {
        self.relations.get(&other).copied()
    }

    pub fn food_per_capita(&self) -> f64 {
        self.food / f64::from(self.population.max(1))
    }

    fn effect_total(&self, kind: EffectKind) -> f64 {
        self.effects
            .iter()
            .filter(|effect| effect.kind == kind)
            .map(|effect| effect.magnitude)
            .sum()
    }

    /// Multiplier on harvest and expansion outcomes from discoveries.
    pub fn tech_multiplier(&self) -> f64 {
        1.0 + self.effect_total(EffectKind::TechBonus)
    }

    /// 0..=1 penalty from morale crises.
    pub fn morale_penalty(&self) -> f64 {
        self.effect_total(EffectKind::MoraleCrisis).clamp(0.0, 1.0)
    }

    pub fn expansion_chance(&self, base: f64) -> f64 {
        let bias = self.temperament.modifiers().expansion_bias;
        (base * bias * self.tech_multiplier() * (1.0 - self.morale_penalty())).clamp(0.0, 1.0)
    }

    pub(crate) fn set_state(&mut self, state: CivState) {
        self.state = state;
    }

    pub(crate) fn set_relation(&mut self, other: CivId, value: f64) {
        self.relations
            .insert(other, value.clamp(MIN_RELATION, MAX_RELATION));
    }

    pub(crate) fn spend_food(&mut self, amount: f64) -> f64 {
        let spent = amount.max(0.0).min(self.food);
        self.food -= spent;
        spent
    }

    pub(crate) fn add_food(&mut self, amount: f64) {
        self.food += amount.max(0.0);
    }

    pub(crate) fn claim(&mut self, coord: Coord) {
        self.territory.insert(coord);
    }

    pub(crate) fn cede(&mut self, coord: Coord) {
        self.territory.remove(&coord);
    }

    pub(crate) fn advance_tech(&mut self) {
        self.tech_level += 1;
    }

    pub(crate) fn add_effect(&mut self, kind: EffectKind, magnitude: f64, days: u32) {
        if days > 0 {
            self.effects.push(ActiveEffect {
                kind,
                magnitude,
                days_left: days,
            });
        }
    }

    pub(crate) fn adjust_morale(&mut self, delta: f64) {
        self.morale = (self.morale + delta).clamp(MIN_MORALE, MAX_MORALE);
    }

    pub(crate) fn tick_effects(&mut self) {
        for effect in &mut self.effects {
            effect.days_left = effect.days_left.saturating_sub(1);
        }
        self.effects.retain(|effect| effect.days_left > 0);
    }

    pub(crate) fn grow(&mut self, births: u32) {
        self.population = self.population.saturating_add(births);
    }

    /// Removes up to `deaths` people; returns how many actually died.
    pub(crate) fn lose(&mut self, deaths: u32) -> u32 {
        let lost = deaths.min(self.population);
        self.population -= lost;
        lost
    }

    pub(crate) fn collapse(&mut self, date: Date, cause: impl Into<String>) {
        self.alive = false;
        self.fall = Some(Fall {
            date,
            cause: cause.into(),
        });
    }

    /// Hunting: takes food from owned cells, richest grounds first.
    /// Returns the amount brought home.
    pub fn hunt(&mut self, world: &mut World) -> f64 {
        let target = f64::from(self.population) * HUNT_YIELD_PER_CAPITA * self.tech_multiplier();
        let mut grounds: Vec<(u8, Coord)> = self
            .territory
            .iter()
            .filter_map(|coord| {
                world
                    .cell(*coord)
                    .map(|cell| (cell.terrain().hunting_priority(), *coord))
            })
            .collect();
        grounds.sort();
        let coords: Vec<Coord> = grounds.into_iter().map(|(_, coord)| coord).collect();
        let harvested = harvest(world, &coords, target, HUNT_TAKE_PER_CELL);
        self.add_food(harvested);
        if harvested > 0.0 {
            self.adjust_morale(MORALE_PER_HARVEST);
        }
        harvested
    }

    /// Gathering: a smaller, safer take from owned plains and desert, plus a
    /// little mining. Never changes ownership.
    pub fn gather(&mut self, world: &mut World) -> (f64, Option<(Mineral, u32)>) {
        let target =
            f64::from(self.population) * GATHER_YIELD_PER_CAPITA * self.tech_multiplier();
        let coords: Vec<Coord> = self
            .territory
            .iter()
            .copied()
            .filter(|coord| {
                world
                    .cell(*coord)
                    .is_some_and(|cell| cell.terrain().is_gathering_ground())
            })
            .collect();
        let harvested = harvest(world, &coords, target, GATHER_TAKE_PER_CELL);
        self.add_food(harvested);
        if harvested > 0.0 {
            self.adjust_morale(MORALE_PER_HARVEST);
        }

        let richest = self
            .territory
            .iter()
            .filter_map(|coord| world.cell(*coord))
            .filter(|cell| cell.mineral_total() > 0)
            .max_by(|a, b| {
                a.mineral_total()
                    .cmp(&b.mineral_total())
                    .then(b.coord().cmp(&a.coord()))
            })
            .map(|cell| cell.coord());
        let mined = richest
            .and_then(|coord| world.cell_mut(coord))
            .and_then(|cell| cell.extract_mineral(MINED_PER_GATHER));
        if let Some((mineral, qty)) = mined {
            *self.stockpile.entry(mineral).or_insert(0) += qty;
        }
        (harvested, mined)
    }

    /// Eats today's rations; whatever cannot be covered becomes the
    /// starvation deficit applied at the population step.
    pub fn eat_rations(&mut self) -> f64 {
        let need = f64::from(self.population) * DAILY_RATION;
        let eaten = self.spend_food(need);
        self.starvation_deficit = need - eaten;
        self.starvation_deficit
    }
}

fn harvest(world: &mut World, coords: &[Coord], target: f64, per_cell: f64) -> f64 {
    let mut remaining = target.max(0.0);
    let mut total = 0.0;
    for coord in coords {
        if remaining <= 0.0 {
            break;
        }
        if let Some(cell) = world.cell_mut(*coord) {
            let taken = cell.harvest(remaining.min(per_cell));
            remaining -= taken;
            total += taken;
        }
    }
    total
}

/// Moves one cell between civilizations (or from the unowned pool) and
/// keeps both territory sets in step with the grid. The grid is validated
/// first, so on error neither side has changed.
pub fn transfer_territory(
    world: &mut World,
    civilizations: &mut [Civilization],
    coord: Coord,
    from: Option<CivId>,
    to: CivId,
) -> Result<(), TransferError> {
    for id in from.into_iter().chain(Some(to)) {
        if id.index() >= civilizations.len() {
            return Err(TransferError::UnknownCivilization(id));
        }
    }
    world.transfer_cell(coord, from, to)?;
    if let Some(from) = from {
        civilizations[from.index()].cede(coord);
    }
    civilizations[to.index()].claim(coord);
    Ok(())
}

/// Returns every cell of a fallen civilization to the unowned pool.
pub fn release_territory(world: &mut World, civilization: &mut Civilization) -> Vec<TransferError> {
    let mut errors = Vec::new();
    let owned: Vec<Coord> = civilization.territory.iter().copied().collect();
    for coord in owned {
        match world.release_cell(coord, civilization.id) {
            Ok(()) => civilization.cede(coord),
            Err(err) => errors.push(err),
        }
    }
    errors
}

/// Writes the same relation value on both sides.
pub fn set_mutual_relation(civilizations: &mut [Civilization], a: CivId, b: CivId, value: f64) {
    if let Some(civ) = civilizations.get_mut(a.index()) {
        civ.set_relation(b, value);
    }
    if let Some(civ) = civilizations.get_mut(b.index()) {
        civ.set_relation(a, value);
    }
}

const CULTURES: [&str; 6] = ["Elves", "Dwarves", "Humans", "Orcs", "Goblins", "Gnomes"];
const PREFIXES: [&str; 6] = ["The", "Clan", "House", "Kingdom of", "Tribe of", "Order of"];
const SUFFIXES: [&str; 6] = [
    "of the North",
    "of the Mountains",
    "of the Plains",
    "of the Forest",
    "the Brave",
    "the Wise",
];

/// Most civilizations a run can name without reusing a culture.
pub const MAX_CIVILIZATIONS: usize = CULTURES.len();

/// Draws a founding name from a culture not yet in `used`.
pub fn founding_name<R: Rng>(rng: &mut R, used: &mut BTreeSet<&'static str>) -> String {
    let free: Vec<&'static str> = CULTURES
        .iter()
        .copied()
        .filter(|culture| !used.contains(culture))
        .collect();
    let culture = if free.is_empty() {
        CULTURES[rng.gen_range(0..CULTURES.len())]
    } else {
        free[rng.gen_range(0..free.len())]
    };
    used.insert(culture);
    if rng.gen_bool(0.5) {
        format!("{} {}", PREFIXES[rng.gen_range(0..PREFIXES.len())], culture)
    } else {
        format!("{} {}", culture, SUFFIXES[rng.gen_range(0..SUFFIXES.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, Terrain};
    use crate::rng::SimRng;
    use crate::world::Calendar;

    fn observe(fpc: f64, expansion: bool, neighbor: bool) -> Observation {
        Observation {
            food_per_capita: fpc,
            expansion_available: expansion,
            neighbor_in_range: neighbor,
        }
    }

    fn settled(world: &mut World, population: u32, food: f64) -> Civilization {
        let mut civ = Civilization::new(
            CivId(0),
            "Clan Dwarves",
            Trait::Peaceful,
            Coord::new(1, 1),
            population,
            food,
        );
        for coord in [Coord::new(1, 1), Coord::new(1, 2)] {
            world.transfer_cell(coord, None, civ.id()).unwrap();
            civ.claim(coord);
        }
        civ
    }

    #[test]
    fn starving_civilizations_hunt() {
        let state = decide(&observe(0.4 * CRITICAL_FOOD_PER_CAPITA, true, true));
        assert_eq!(state, CivState::Hunting);
    }

    #[test]
    fn transition_table() {
        let mid = (CRITICAL_FOOD_PER_CAPITA + LOW_FOOD_PER_CAPITA) / 2.0;
        assert_eq!(decide(&observe(mid, true, true)), CivState::Gathering);
        assert_eq!(decide(&observe(LOW_FOOD_PER_CAPITA, true, true)), CivState::Expanding);
        assert_eq!(decide(&observe(LOW_FOOD_PER_CAPITA + 5.0, true, false)), CivState::Expanding);
        assert_eq!(decide(&observe(LOW_FOOD_PER_CAPITA, false, true)), CivState::Diplomacy);
        assert_eq!(decide(&observe(LOW_FOOD_PER_CAPITA, false, false)), CivState::Gathering);
    }

    #[test]
    fn food_per_capita_never_divides_by_zero() {
        let civ = Civilization::new(
            CivId(3),
            "Gnomes the Wise",
            Trait::Trading,
            Coord::new(0, 0),
            0,
            12.0,
        );
        assert_eq!(civ.food_per_capita(), 12.0);
        assert!(!civ.is_alive());
    }

    #[test]
    fn hunting_prefers_water_then_forest() {
        let mut world = World::filled(4, Calendar::default(), Terrain::Plains, 50.0);
        let mut civ = settled(&mut world, 100, 0.0);
        let water = Coord::new(2, 2);
        *world.cell_mut(water).unwrap() = Cell::with_terrain(water, Terrain::Water, 100.0);
        world.transfer_cell(water, None, civ.id()).unwrap();
        civ.claim(water);

        let harvested = civ.hunt(&mut world);
        assert_eq!(harvested, 40.0);
        // Water cell gives its per-cell maximum first.
        assert_eq!(world.cell(water).unwrap().food(), 80.0);
        assert_eq!(world.cell(Coord::new(1, 1)).unwrap().food(), 30.0);
    }

    #[test]
    fn productive_days_lift_morale_within_bounds() {
        let mut world = World::filled(4, Calendar::default(), Terrain::Plains, 50.0);
        let mut civ = settled(&mut world, 100, 0.0);
        assert_eq!(civ.morale(), STARTING_MORALE);
        civ.gather(&mut world);
        assert_eq!(civ.morale(), STARTING_MORALE + 1.0);

        civ.adjust_morale(500.0);
        assert_eq!(civ.morale(), MAX_MORALE);
        civ.adjust_morale(-500.0);
        assert_eq!(civ.morale(), MIN_MORALE);

        let mut barren = World::filled(4, Calendar::default(), Terrain::Plains, 0.0);
        let mut idle = settled(&mut barren, 100, 0.0);
        idle.hunt(&mut barren);
        assert_eq!(idle.morale(), STARTING_MORALE);
    }

    #[test]
    fn rations_cap_at_supply_and_record_deficit() {
        let mut world = World::filled(4, Calendar::default(), Terrain::Plains, 50.0);
        let mut civ = settled(&mut world, 100, 4.0);
        let deficit = civ.eat_rations();
        assert_eq!(civ.food(), 0.0);
        assert!((deficit - 6.0).abs() < 1e-9);
    }

    #[test]
    fn gathering_only_touches_plains_and_desert() {
        let mut world = World::filled(4, Calendar::default(), Terrain::Forest, 100.0);
        let mut civ = settled(&mut world, 100, 0.0);
        let (harvested, mined) = civ.gather(&mut world);
        assert_eq!(harvested, 0.0);
        assert!(mined.is_none());
        assert_eq!(civ.territory().len(), 2);
    }

    #[test]
    fn transfer_keeps_both_sides_consistent() {
        let mut world = World::filled(5, Calendar::default(), Terrain::Plains, 50.0);
        let mut civs = vec![
            Civilization::new(CivId(0), "A", Trait::Aggressive, Coord::new(0, 0), 10, 0.0),
            Civilization::new(CivId(1), "B", Trait::Peaceful, Coord::new(4, 4), 10, 0.0),
        ];
        let coord = Coord::new(2, 2);
        transfer_territory(&mut world, &mut civs, coord, None, CivId(0)).unwrap();
        transfer_territory(&mut world, &mut civs, coord, Some(CivId(0)), CivId(1)).unwrap();
        assert!(civs[0].territory().is_empty());
        assert!(civs[1].territory().contains(&coord));

        let err = transfer_territory(&mut world, &mut civs, coord, Some(CivId(0)), CivId(0));
        assert!(err.is_err());
        assert!(civs[1].territory().contains(&coord));
        assert_eq!(world.cell(coord).unwrap().owner(), Some(CivId(1)));

        let released = release_territory(&mut world, &mut civs[1]);
        assert!(released.is_empty());
        assert!(civs[1].territory().is_empty());
        assert_eq!(world.cell(coord).unwrap().owner(), None);
    }

    #[test]
    fn trait_biases_shape_expansion_chance() {
        let civ = |t| Civilization::new(CivId(0), "X", t, Coord::new(0, 0), 10, 0.0);
        let chance = |t| civ(t).expansion_chance(0.5);
        assert!(chance(Trait::Expansionist) > chance(Trait::Peaceful));
        assert!(chance(Trait::Aggressive) > chance(Trait::Trading));
        assert!(chance(Trait::Isolationist) < chance(Trait::Trading));

        let mut shaken = civ(Trait::Trading);
        shaken.add_effect(EffectKind::MoraleCrisis, 0.3, 2);
        assert!((shaken.expansion_chance(0.5) - 0.35).abs() < 1e-9);
        shaken.tick_effects();
        shaken.tick_effects();
        assert!(shaken.effects().is_empty());
    }

    #[test]
    fn founding_names_use_distinct_cultures() {
        let mut rng = SimRng::new(5);
        let mut used = BTreeSet::new();
        let names: Vec<String> = (0..MAX_CIVILIZATIONS)
            .map(|_| founding_name(&mut rng, &mut used))
            .collect();
        assert_eq!(used.len(), MAX_CIVILIZATIONS);
        assert_eq!(names.len(), MAX_CIVILIZATIONS);
    }
}
