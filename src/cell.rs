use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::civilization::CivId;
use crate::rng::RngExt;

/// Grid position. Ordering is row-major, which is the tie-break used
/// everywhere a choice between equally good cells has to be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Plains,
    Forest,
    Mountain,
    Water,
    Desert,
}

impl Terrain {
    pub const ALL: [Terrain; 5] = [
        Terrain::Plains,
        Terrain::Forest,
        Terrain::Mountain,
        Terrain::Water,
        Terrain::Desert,
    ];

    /// Range a fresh cell's food capacity is drawn from.
    fn capacity_range(self) -> (f64, f64) {
        match self {
            Terrain::Plains => (50.0, 100.0),
            Terrain::Forest => (80.0, 150.0),
            Terrain::Mountain => (10.0, 30.0),
            Terrain::Water => (60.0, 120.0),
            Terrain::Desert => (5.0, 20.0),
        }
    }

    /// Ceiling no cell of this terrain may exceed.
    pub fn max_food(self) -> f64 {
        self.capacity_range().1
    }

    /// Fraction of a cell's capacity restored per day.
    pub fn regen_rate(self) -> f64 {
        match self {
            Terrain::Plains => 0.10,
            Terrain::Forest => 0.08,
            Terrain::Mountain => 0.03,
            Terrain::Water => 0.05,
            Terrain::Desert => 0.04,
        }
    }

    pub fn is_passable(self) -> bool {
        !matches!(self, Terrain::Water | Terrain::Mountain)
    }

    /// Lower is hunted first.
    pub fn hunting_priority(self) -> u8 {
        match self {
            Terrain::Water => 0,
            Terrain::Forest => 1,
            Terrain::Plains => 2,
            Terrain::Desert => 3,
            Terrain::Mountain => 4,
        }
    }

    pub fn is_gathering_ground(self) -> bool {
        matches!(self, Terrain::Plains | Terrain::Desert)
    }

    pub fn glyph(self) -> char {
        match self {
            Terrain::Plains => '.',
            Terrain::Forest => 'T',
            Terrain::Mountain => '^',
            Terrain::Water => '~',
            Terrain::Desert => ':',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Terrain::Plains => "Plains",
            Terrain::Forest => "Forest",
            Terrain::Mountain => "Mountain",
            Terrain::Water => "Water",
            Terrain::Desert => "Desert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mineral {
    Iron,
    Gold,
    Copper,
    Stone,
}

impl Mineral {
    pub const ALL: [Mineral; 4] = [Mineral::Iron, Mineral::Gold, Mineral::Copper, Mineral::Stone];
}

impl fmt::Display for Mineral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mineral::Iron => "iron",
            Mineral::Gold => "gold",
            Mineral::Copper => "copper",
            Mineral::Stone => "stone",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    coord: Coord,
    terrain: Terrain,
    altitude: u8,
    base_temperature: i32,
    temperature: i32,
    minerals: BTreeMap<Mineral, u32>,
    food: f64,
    capacity: f64,
    owner: Option<CivId>,
}

impl Cell {
    /// Procedurally generates a cell. Draw order is fixed so a seed always
    /// yields the same map.
    pub fn generate<R: Rng>(coord: Coord, rng: &mut R) -> Self {
        let altitude: u8 = rng.gen_range(0..=100);
        let base_temperature: i32 = rng.gen_range(-20..=40);
        let terrain = if altitude > 80 {
            Terrain::Mountain
        } else if altitude < 10 {
            Terrain::Water
        } else if base_temperature > 35 {
            Terrain::Desert
        } else if rng.chance(0.3) {
            Terrain::Forest
        } else {
            Terrain::Plains
        };

        let mut minerals = BTreeMap::new();
        match terrain {
            Terrain::Mountain => {
                let mineral = Mineral::ALL[rng.gen_range(0..Mineral::ALL.len())];
                minerals.insert(mineral, rng.gen_range(20..=80));
            }
            Terrain::Plains if rng.chance(0.1) => {
                minerals.insert(Mineral::Stone, rng.gen_range(10..=40));
            }
            _ => {}
        }

        let (low, high) = terrain.capacity_range();
        let capacity = rng.between(low, high).round();

        Self {
            coord,
            terrain,
            altitude,
            base_temperature,
            temperature: base_temperature,
            minerals,
            food: capacity,
            capacity,
            owner: None,
        }
    }

    /// Builds a cell with explicit properties; mostly for fixtures.
    pub fn with_terrain(coord: Coord, terrain: Terrain, capacity: f64) -> Self {
        let capacity = capacity.clamp(0.0, terrain.max_food());
        Self {
            coord,
            terrain,
            altitude: 50,
            base_temperature: 15,
            temperature: 15,
            minerals: BTreeMap::new(),
            food: capacity,
            capacity,
            owner: None,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn altitude(&self) -> u8 {
        self.altitude
    }

    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    pub fn base_temperature(&self) -> i32 {
        self.base_temperature
    }

    pub fn minerals(&self) -> &BTreeMap<Mineral, u32> {
        &self.minerals
    }

    pub fn mineral_total(&self) -> u32 {
        self.minerals.values().sum()
    }

    pub fn food(&self) -> f64 {
        self.food
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn owner(&self) -> Option<CivId> {
        self.owner
    }

    pub fn is_passable(&self) -> bool {
        self.terrain.is_passable()
    }

    pub(crate) fn set_owner(&mut self, owner: Option<CivId>) {
        self.owner = owner;
    }

    pub(crate) fn apply_climate(&mut self, offset: i32) {
        self.temperature = self.base_temperature + offset;
    }

    /// Restores food toward capacity; `factor` scales the terrain rate.
    pub fn regenerate(&mut self, factor: f64) {
        let growth = self.capacity * self.terrain.regen_rate() * factor.max(0.0);
        self.food = (self.food + growth).min(self.capacity);
    }

    /// Takes up to `amount` food and returns what was actually taken.
    pub fn harvest(&mut self, amount: f64) -> f64 {
        let taken = amount.max(0.0).min(self.food);
        self.food -= taken;
        taken
    }

    /// Mines up to `amount` units from the richest deposit.
    pub fn extract_mineral(&mut self, amount: u32) -> Option<(Mineral, u32)> {
        let (&mineral, &available) = self
            .minerals
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))?;
        let taken = amount.min(available);
        let remaining = available - taken;
        if remaining == 0 {
            self.minerals.remove(&mineral);
        } else {
            self.minerals.insert(mineral, remaining);
        }
        Some((mineral, taken))
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: f64) {
        self.food = food.clamp(0.0, self.capacity);
    }

    #[cfg(test)]
    pub(crate) fn insert_mineral(&mut self, mineral: Mineral, qty: u32) {
        self.minerals.insert(mineral, qty);
    }
}
