use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;

use super::EngineError;
use crate::{
    cell::Coord,
    civilization::{founding_name, CivId, Civilization, Trait},
    config::SimConfig,
    rng::SimRng,
    world::World,
};

pub const STARTING_FOOD: f64 = 200.0;
const STARTING_POPULATION: std::ops::RangeInclusive<u32> = 30..=60;
/// Capitals keep at least this Manhattan distance when they can.
const CAPITAL_SPACING: usize = 6;
const PLACEMENT_ATTEMPTS: usize = 100;
/// Capitals stay this far from the map edge.
const EDGE_MARGIN: usize = 2;

/// Places every configured civilization, claims the 3x3 block around its
/// capital and returns them in id order.
pub fn found_civilizations(
    world: &mut World,
    config: &SimConfig,
    rng: &mut SimRng,
) -> Result<Vec<Civilization>, EngineError> {
    let mut used_cultures = BTreeSet::new();
    let mut capitals: Vec<Coord> = Vec::with_capacity(config.civilizations);
    let mut civilizations = Vec::with_capacity(config.civilizations);

    for index in 0..config.civilizations {
        let capital = pick_capital(world, &capitals, rng).ok_or(EngineError::Placement {
            placed: index,
            wanted: config.civilizations,
        })?;
        capitals.push(capital);

        let founder = config.founders.get(index);
        let name = match founder.and_then(|f| f.name.clone()) {
            Some(name) => name,
            None => founding_name(rng, &mut used_cultures),
        };
        let temperament = match founder.and_then(|f| f.temperament) {
            Some(temperament) => temperament,
            None => Trait::ALL[rng.gen_range(0..Trait::ALL.len())],
        };
        let population = rng.gen_range(STARTING_POPULATION);

        let id = CivId(index as u32);
        let mut civ = Civilization::new(id, name, temperament, capital, population, STARTING_FOOD);
        let block: Vec<Coord> = std::iter::once(capital)
            .chain(world.neighbors(capital))
            .collect();
        for coord in block {
            let unowned = world.cell(coord).is_some_and(|cell| cell.owner().is_none());
            if unowned && world.transfer_cell(coord, None, id).is_ok() {
                civ.claim(coord);
            }
        }
        debug!(%id, name = civ.name(), %capital, population, "founded civilization");
        civilizations.push(civ);
    }
    Ok(civilizations)
}

fn placement_range(world: &World) -> Option<std::ops::RangeInclusive<usize>> {
    let high = world.size().checked_sub(EDGE_MARGIN + 1)?;
    (high >= EDGE_MARGIN).then_some(EDGE_MARGIN..=high)
}

fn is_site(world: &World, coord: Coord) -> bool {
    world
        .cell(coord)
        .is_some_and(|cell| cell.is_passable() && cell.owner().is_none())
}

fn pick_capital(world: &World, capitals: &[Coord], rng: &mut SimRng) -> Option<Coord> {
    let range = placement_range(world)?;
    for _ in 0..PLACEMENT_ATTEMPTS {
        let coord = Coord::new(rng.gen_range(range.clone()), rng.gen_range(range.clone()));
        if is_site(world, coord) && capitals.iter().all(|c| c.manhattan(coord) >= CAPITAL_SPACING) {
            return Some(coord);
        }
    }

    // Random placement failed: take the site farthest from every capital.
    let mut best: Option<(Coord, usize)> = None;
    for row in range.clone() {
        for col in range.clone() {
            let coord = Coord::new(row, col);
            if !is_site(world, coord) {
                continue;
            }
            let spread = capitals
                .iter()
                .map(|c| c.manhattan(coord))
                .min()
                .unwrap_or(usize::MAX);
            if spread > 0 && best.map_or(true, |(_, top)| spread > top) {
                best = Some((coord, spread));
            }
        }
    }
    best.map(|(coord, _)| coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Terrain;
    use crate::config::FounderConfig;
    use crate::world::Calendar;

    #[test]
    fn capitals_are_spaced_and_claim_their_block() {
        let mut world = World::filled(12, Calendar::default(), Terrain::Plains, 80.0);
        let config = SimConfig {
            civilizations: 3,
            ..SimConfig::default()
        };
        let civs = found_civilizations(&mut world, &config, &mut SimRng::new(8)).unwrap();
        assert_eq!(civs.len(), 3);
        for civ in &civs {
            assert_eq!(civ.territory().len(), 9);
            let capital = civ.capital();
            assert!((2..=9).contains(&capital.row) && (2..=9).contains(&capital.col));
            assert!((30..=60).contains(&civ.population()));
            assert_eq!(civ.food(), STARTING_FOOD);
        }
        assert!(civs[0].capital().manhattan(civs[1].capital()) >= CAPITAL_SPACING);
    }

    #[test]
    fn founder_overrides_win() {
        let mut world = World::filled(10, Calendar::default(), Terrain::Forest, 100.0);
        let config = SimConfig {
            founders: vec![FounderConfig {
                name: Some("The Ashen Court".into()),
                temperament: Some(Trait::Isolationist),
            }],
            ..SimConfig::default()
        };
        let civs = found_civilizations(&mut world, &config, &mut SimRng::new(2)).unwrap();
        assert_eq!(civs[0].name(), "The Ashen Court");
        assert_eq!(civs[0].temperament(), Trait::Isolationist);
        assert_ne!(civs[1].name(), "The Ashen Court");
    }

    #[test]
    fn impassable_maps_cannot_host_capitals() {
        let mut world = World::filled(10, Calendar::default(), Terrain::Water, 80.0);
        let err = found_civilizations(&mut world, &SimConfig::default(), &mut SimRng::new(1));
        assert!(matches!(err, Err(EngineError::Placement { placed: 0, wanted: 2 })));
    }

    #[test]
    fn crowded_maps_fall_back_to_the_widest_gap() {
        let mut world = World::filled(8, Calendar::default(), Terrain::Plains, 80.0);
        let config = SimConfig {
            map_size: 8,
            ..SimConfig::default()
        };
        let civs = found_civilizations(&mut world, &config, &mut SimRng::new(4)).unwrap();
        assert_eq!(civs.len(), 2);
        assert_ne!(civs[0].capital(), civs[1].capital());
        let owned: usize = civs.iter().map(|civ| civ.territory().len()).sum();
        assert_eq!(owned, world.cells().filter(|c| c.owner().is_some()).count());
    }
}
