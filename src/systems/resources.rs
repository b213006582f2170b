use anyhow::Result;

use crate::{
    engine::{SimState, System, TickContext},
    rng::SimRng,
};

/// Regrows food in every cell and ages the world-wide modifiers.
pub struct ResourceSystem;

impl ResourceSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResourceSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ResourceSystem {
    fn name(&self) -> &str {
        "resources"
    }

    fn run(
        &mut self,
        _ctx: &mut TickContext,
        state: &mut SimState,
        _rng: &mut SimRng,
    ) -> Result<()> {
        state.world.regenerate_resources();
        Ok(())
    }
}
