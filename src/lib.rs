pub mod cell;
pub mod chronicle;
pub mod civilization;
pub mod config;
pub mod engine;
pub mod events;
pub mod render;
pub mod rng;
pub mod scenario;
pub mod systems;
pub mod world;

pub use config::{ConfigError, SimConfig};
pub use engine::{run, Engine, EngineError, FinalReport, TickSummary};
pub use scenario::{Scenario, ScenarioLoader};
