use anyhow::Result;
use tracing::debug;

use crate::{
    engine::{SimState, System, TickContext},
    rng::SimRng,
};

/// Sets season and temperatures for the current day.
pub struct ClimateSystem;

impl ClimateSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClimateSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ClimateSystem {
    fn name(&self) -> &str {
        "climate"
    }

    fn run(
        &mut self,
        ctx: &mut TickContext,
        state: &mut SimState,
        _rng: &mut SimRng,
    ) -> Result<()> {
        let previous = state.world.season();
        state.world.advance_climate();
        let season = state.world.season();
        if season != previous {
            debug!(
                date = %ctx.date(),
                %season,
                offset = state.world.temperature_offset(),
                "season changed"
            );
        }
        Ok(())
    }
}
