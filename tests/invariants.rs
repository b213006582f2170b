use proptest::prelude::*;
use realms::{
    civilization::{MAX_RELATION, MIN_RELATION},
    engine::{Engine, EnginePhase},
    events::EventCatalog,
    SimConfig,
};

fn config(seed: u64, map_size: usize, civilizations: usize) -> SimConfig {
    let mut config = SimConfig {
        years: 2,
        seed: Some(seed),
        map_size,
        civilizations,
        events: EventCatalog::standard().scaled(50.0),
        ..SimConfig::default()
    };
    config.calendar.days_per_season = 15;
    config
}

fn check(engine: &Engine) -> Result<(), TestCaseError> {
    let world = engine.world();
    let civs = engine.civilizations();

    for cell in world.cells() {
        prop_assert!(cell.food() >= 0.0 && cell.food() <= cell.capacity() + 1e-9);
        prop_assert!(cell.capacity() <= cell.terrain().max_food());
        if let Some(owner) = cell.owner() {
            let civ = &civs[owner.index()];
            prop_assert!(civ.is_alive());
            prop_assert!(civ.territory().contains(&cell.coord()));
        }
    }
    for civ in civs {
        for coord in civ.territory() {
            prop_assert_eq!(world.cell(*coord).and_then(|c| c.owner()), Some(civ.id()));
        }
        prop_assert_eq!(civ.is_alive(), civ.population() > 0);
        prop_assert!(civ.food() >= 0.0);
        for (other, relation) in civ.relations() {
            prop_assert!((MIN_RELATION..=MAX_RELATION).contains(relation));
            prop_assert_eq!(civs[other.index()].relation(civ.id()), Some(*relation));
        }
    }
    Ok(())
}

fn mineral_total(engine: &Engine) -> u64 {
    engine
        .world()
        .cells()
        .map(|cell| u64::from(cell.mineral_total()))
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn world_invariants_hold_every_tick(
        seed in any::<u64>(),
        map_size in 10usize..=14,
        civilizations in 2usize..=3,
    ) {
        let mut engine = Engine::new(&config(seed, map_size, civilizations)).unwrap();
        check(&engine)?;
        let mut minerals = mineral_total(&engine);
        while !matches!(engine.phase(), EnginePhase::Terminated(_)) {
            engine.tick().unwrap();
            check(&engine)?;
            let now = mineral_total(&engine);
            prop_assert!(now <= minerals);
            minerals = now;
        }
    }

    #[test]
    fn runs_are_reproducible(seed in any::<u64>()) {
        let a = realms::run(&config(seed, 10, 2)).unwrap();
        let b = realms::run(&config(seed, 10, 2)).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
