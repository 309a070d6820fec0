pub mod id;
#[macro_use]
pub mod model;
pub mod session;
pub mod sim;
pub mod worldgen;

#[cfg(test)]
pub(crate) mod testutil;

pub use id::{CityId, CivId, EventId, IdGenerator, ResourceId, WarId};
pub use model::{
    Civilization, EventCategory, EventKind, EventLog, HistoricalEvent, Resource, World,
    query_events,
};
pub use session::{Session, SessionConfig, SessionError, SessionHandle};
pub use sim::{SimConfig, Simulation, YearOutcome};
pub use worldgen::{WorldGenConfig, generate_civilizations, generate_world, place_resources};
