use anyhow::Result;
use rand::Rng;
use tracing::debug;

use crate::{
    engine::{SimState, System, TickContext},
    events::{self, EventCatalog},
    rng::SimRng,
};

/// Rolls every catalog entry once per day; several may fire together.
pub struct EventSystem {
    catalog: EventCatalog,
}

impl EventSystem {
    pub fn new(catalog: EventCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new(EventCatalog::standard())
    }
}

impl System for EventSystem {
    fn name(&self) -> &str {
        "events"
    }

    fn run(&mut self, ctx: &mut TickContext, state: &mut SimState, rng: &mut SimRng) -> Result<()> {
        for spec in self.catalog.entries() {
            let roll: f64 = rng.gen();
            if roll >= spec.probability {
                continue;
            }
            let Some(fired) = events::apply(spec, &mut state.world, &mut state.civilizations, rng)
            else {
                debug!(kind = %spec.kind, "event had no target");
                continue;
            };
            debug!(
                kind = %fired.kind,
                magnitude = fired.magnitude,
                target = ?fired.target,
                "event fired"
            );
            if fired.major {
                ctx.major(fired.description);
            } else {
                ctx.note(fired.description);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Coord, Terrain};
    use crate::chronicle::Significance;
    use crate::civilization::{CivId, Civilization, Trait};
    use crate::events::EventKind;
    use crate::world::{Calendar, World};

    fn state() -> SimState {
        SimState {
            world: World::filled(6, Calendar::default(), Terrain::Plains, 80.0),
            civilizations: vec![Civilization::new(
                CivId(0),
                "Tribe of Goblins",
                Trait::Aggressive,
                Coord::new(2, 2),
                200,
                100.0,
            )],
        }
    }

    #[test]
    fn silent_catalog_never_fires() {
        let mut state = state();
        let mut system = EventSystem::new(EventCatalog::silent());
        let mut rng = SimRng::new(5);
        for _ in 0..1_000 {
            let mut ctx = TickContext::new(state.world.date());
            system.run(&mut ctx, &mut state, &mut rng).unwrap();
            assert!(ctx.notes().is_empty());
        }
        assert_eq!(state.civilizations[0].population(), 200);
    }

    #[test]
    fn certain_plague_is_a_major_entry() {
        let mut state = state();
        let mut catalog = EventCatalog::silent();
        catalog.set_probability(EventKind::Plague, 1.0);
        let mut system = EventSystem::new(catalog);
        let mut ctx = TickContext::new(state.world.date());
        system.run(&mut ctx, &mut state, &mut SimRng::new(5)).unwrap();
        assert_eq!(ctx.notes().len(), 1);
        assert_eq!(ctx.notes()[0].significance, Significance::Major);
        assert!(state.civilizations[0].population() < 200);
    }

    #[test]
    fn every_firing_event_writes_one_entry() {
        let mut state = state();
        let catalog = EventCatalog::standard().scaled(10_000.0);
        let mut system = EventSystem::new(catalog);
        let mut ctx = TickContext::new(state.world.date());
        system.run(&mut ctx, &mut state, &mut SimRng::new(5)).unwrap();
        assert_eq!(ctx.notes().len(), EventKind::ALL.len());
        assert_eq!(state.world.modifiers().len(), 2);
    }
}
