mod civilizations;
mod climate;
mod events;
mod population;
mod resources;

pub use civilizations::CivilizationSystem;
pub use climate::ClimateSystem;
pub use events::EventSystem;
pub use population::PopulationSystem;
pub use resources::ResourceSystem;
