use std::collections::BTreeSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::{Cell, Coord, Terrain};
use crate::civilization::CivId;
use crate::events::EventKind;

/// Seasonal temperature swing either side of a cell's base temperature.
const SEASON_SWING: i32 = 15;
/// Offset at or below which regeneration slows to the winter rate.
const HARSH_WINTER_OFFSET: i32 = -10;
const WINTER_REGEN_FACTOR: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    fn from_index(index: u64) -> Self {
        match index % 4 {
            0 => Season::Winter,
            1 => Season::Spring,
            2 => Season::Summer,
            _ => Season::Autumn,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
        };
        f.write_str(name)
    }
}

/// Fixed calendar: four seasons of `days_per_season` days each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub days_per_season: u32,
}

impl Calendar {
    pub const SEASONS_PER_YEAR: u32 = 4;

    pub fn days_per_year(&self) -> u64 {
        u64::from(self.days_per_season) * u64::from(Self::SEASONS_PER_YEAR)
    }

    pub fn date(&self, day: u64) -> Date {
        let per_year = self.days_per_year().max(1);
        let day_of_year = day % per_year;
        let season_index = day_of_year / u64::from(self.days_per_season.max(1));
        Date {
            year: (day / per_year) as u32 + 1,
            day: day_of_year as u32 + 1,
            season: Season::from_index(season_index),
        }
    }

    /// Temperature offset for an absolute day: climbs out of winter, peaks
    /// at the start of summer, and falls back through autumn.
    pub fn temperature_offset(&self, day: u64) -> i32 {
        let per_season = u64::from(self.days_per_season.max(1));
        let day_of_year = day % (per_season * u64::from(Self::SEASONS_PER_YEAR));
        let within = day_of_year % per_season;
        let ramp = (within * SEASON_SWING as u64 / per_season) as i32;
        match Season::from_index(day_of_year / per_season) {
            Season::Winter => -SEASON_SWING + ramp,
            Season::Spring => ramp,
            Season::Summer => SEASON_SWING - ramp,
            Season::Autumn => -ramp,
        }
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            days_per_season: 91,
        }
    }
}

/// Simulated date; `day` is the 1-based day of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    pub year: u32,
    pub day: u32,
    pub season: Season,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Year {}, Day {} ({})", self.year, self.day, self.season)
    }
}

/// World-wide multiplier on food regeneration with a countdown.
#[derive(Debug, Clone, Serialize)]
pub struct RegenModifier {
    pub source: EventKind,
    pub factor: f64,
    pub days_left: u32,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransferError {
    #[error("cell {0} lies outside the world")]
    OutOfBounds(Coord),
    #[error("invalid transfer of {coord} from {from:?} to {to:?}: current owner is {owner:?}")]
    InvalidTransfer {
        coord: Coord,
        from: Option<CivId>,
        to: Option<CivId>,
        owner: Option<CivId>,
    },
    #[error("civilization {0} is not part of this run")]
    UnknownCivilization(CivId),
}

/// What a civilization looks for when it grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpansionPreference {
    Food,
    Mineral,
}

#[derive(Debug, Clone, Serialize)]
pub struct World {
    size: usize,
    calendar: Calendar,
    day: u64,
    season: Season,
    temperature_offset: i32,
    cells: Vec<Cell>,
    modifiers: Vec<RegenModifier>,
}

impl World {
    /// Generates an `size`×`size` map cell by cell in row-major order.
    pub fn generate<R: Rng>(size: usize, calendar: Calendar, rng: &mut R) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell::generate(Coord::new(row, col), rng));
            }
        }
        Self::from_cells(size, calendar, cells)
    }

    /// Map where every cell has the same terrain and capacity.
    pub fn filled(size: usize, calendar: Calendar, terrain: Terrain, capacity: f64) -> Self {
        let cells = (0..size * size)
            .map(|i| Cell::with_terrain(Coord::new(i / size, i % size), terrain, capacity))
            .collect();
        Self::from_cells(size, calendar, cells)
    }

    fn from_cells(size: usize, calendar: Calendar, cells: Vec<Cell>) -> Self {
        let mut world = Self {
            size,
            calendar,
            day: 0,
            season: Season::Winter,
            temperature_offset: 0,
            cells,
            modifiers: Vec::new(),
        };
        world.advance_climate();
        world
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Days elapsed since the world was created.
    pub fn day(&self) -> u64 {
        self.day
    }

    pub fn date(&self) -> Date {
        self.calendar.date(self.day)
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn temperature_offset(&self) -> i32 {
        self.temperature_offset
    }

    pub fn modifiers(&self) -> &[RegenModifier] {
        &self.modifiers
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        (coord.row < self.size && coord.col < self.size).then(|| coord.row * self.size + coord.col)
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).map(|i| &self.cells[i])
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.index(coord).map(move |i| &mut self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// In-bounds 8-directional neighbours of `coord`.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.within(coord, 1).filter(move |c| *c != coord)
    }

    /// In-bounds cells within Chebyshev distance `range`, row-major.
    fn within(&self, coord: Coord, range: usize) -> impl Iterator<Item = Coord> + '_ {
        let last = self.size.saturating_sub(1);
        let rows = coord.row.saturating_sub(range)..=(coord.row + range).min(last);
        let cols = coord.col.saturating_sub(range)..=(coord.col + range).min(last);
        rows.flat_map(move |row| cols.clone().map(move |col| Coord::new(row, col)))
    }

    /// Recomputes season and temperature from the day counter.
    pub fn advance_climate(&mut self) {
        self.season = self.calendar.date(self.day).season;
        self.temperature_offset = self.calendar.temperature_offset(self.day);
        let offset = self.temperature_offset;
        for cell in &mut self.cells {
            cell.apply_climate(offset);
        }
    }

    /// Multiplier applied to every cell's regeneration this tick.
    pub fn regen_factor(&self) -> f64 {
        let seasonal = if self.temperature_offset <= HARSH_WINTER_OFFSET {
            WINTER_REGEN_FACTOR
        } else {
            1.0
        };
        self.modifiers
            .iter()
            .fold(seasonal, |factor, modifier| factor * modifier.factor)
    }

    /// Grows food in every cell toward its capacity, then ages modifiers.
    pub fn regenerate_resources(&mut self) {
        let factor = self.regen_factor();
        for cell in &mut self.cells {
            cell.regenerate(factor);
        }
        for modifier in &mut self.modifiers {
            modifier.days_left = modifier.days_left.saturating_sub(1);
        }
        self.modifiers.retain(|modifier| modifier.days_left > 0);
    }

    pub fn add_regen_modifier(&mut self, source: EventKind, factor: f64, days: u32) {
        if days == 0 {
            return;
        }
        self.modifiers.push(RegenModifier {
            source,
            factor: factor.max(0.0),
            days_left: days,
        });
    }

    pub fn advance_day(&mut self) {
        self.day += 1;
    }

    /// Cells owned by `civ`, row-major.
    pub fn territory_query(&self, civ: CivId) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|cell| cell.owner() == Some(civ))
            .map(Cell::coord)
            .collect()
    }

    /// Moves `coord` from `from` (None = unowned) to `to`. Nothing changes
    /// unless the cell is owned by `from` and not already by `to`.
    pub fn transfer_cell(
        &mut self,
        coord: Coord,
        from: Option<CivId>,
        to: CivId,
    ) -> Result<(), TransferError> {
        self.reassign(coord, from, Some(to))
    }

    /// Returns a cell owned by `from` to the unowned pool.
    pub fn release_cell(&mut self, coord: Coord, from: CivId) -> Result<(), TransferError> {
        self.reassign(coord, Some(from), None)
    }

    fn reassign(
        &mut self,
        coord: Coord,
        from: Option<CivId>,
        to: Option<CivId>,
    ) -> Result<(), TransferError> {
        let cell = self
            .cell_mut(coord)
            .ok_or(TransferError::OutOfBounds(coord))?;
        let owner = cell.owner();
        if owner != from || owner == to {
            return Err(TransferError::InvalidTransfer {
                coord,
                from,
                to,
                owner,
            });
        }
        cell.set_owner(to);
        Ok(())
    }

    /// Unowned cells adjacent to an owned passable cell.
    fn frontier(&self, territory: &BTreeSet<Coord>) -> BTreeSet<Coord> {
        territory
            .iter()
            .filter(|coord| self.cell(**coord).is_some_and(Cell::is_passable))
            .flat_map(|coord| self.neighbors(*coord))
            .filter(|coord| self.cell(*coord).is_some_and(|cell| cell.owner().is_none()))
            .collect()
    }

    /// Best unowned cell reachable from `territory`, ties broken by lowest
    /// row then lowest column.
    pub fn find_expandable_cell(
        &self,
        territory: &BTreeSet<Coord>,
        preference: ExpansionPreference,
    ) -> Option<Coord> {
        let mut best: Option<(Coord, (f64, f64))> = None;
        for coord in self.frontier(territory) {
            let Some(cell) = self.cell(coord) else {
                continue;
            };
            let score = match preference {
                ExpansionPreference::Food => (cell.capacity(), 0.0),
                ExpansionPreference::Mineral => (f64::from(cell.mineral_total()), cell.capacity()),
            };
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((coord, score));
            }
        }
        best.map(|(coord, _)| coord)
    }

    /// Owners other than `me` of any cell within `range` of the territory.
    pub fn civilizations_in_range(
        &self,
        territory: &BTreeSet<Coord>,
        range: usize,
        me: CivId,
    ) -> BTreeSet<CivId> {
        territory
            .iter()
            .flat_map(|coord| self.within(*coord, range))
            .filter_map(|coord| self.cell(coord).and_then(Cell::owner))
            .filter(|owner| *owner != me)
            .collect()
    }

    /// Rival-owned cell bordering the territory, lowest row/column first.
    pub fn contested_cell(&self, territory: &BTreeSet<Coord>, rival: CivId) -> Option<Coord> {
        territory
            .iter()
            .flat_map(|coord| self.neighbors(*coord))
            .filter(|coord| self.cell(*coord).and_then(Cell::owner) == Some(rival))
            .min()
    }
}
