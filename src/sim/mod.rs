mod cities;
mod conflicts;
mod context;
mod culture;
mod demographics;
mod diplomacy;
mod disasters;
mod economy;
mod military;
pub mod names;
mod runner;
mod system;
mod technology;
mod territory;
pub mod trade;
mod world_events;

pub use cities::CityGrowthSystem;
pub use conflicts::ConflictSystem;
pub use context::TickContext;
pub use culture::CultureSystem;
pub use demographics::{DemographicsSystem, growth_rate};
pub use diplomacy::DiplomacySystem;
pub use disasters::DisasterSystem;
pub use economy::{EconomySystem, economy_strength};
pub use military::MilitarySystem;
pub use runner::{
    SimConfig, Simulation, YearOutcome, dispatch_systems, run, standard_systems,
};
pub use system::{SimSystem, SystemScope};
pub use technology::TechnologySystem;
pub use territory::{TerritorySystem, claim_chance};
pub use trade::{RouteEnd, RouteKind, TradeRoute, trade_routes};
pub use world_events::WorldEventSystem;
