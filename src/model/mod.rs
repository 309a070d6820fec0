#[macro_use]
mod macros;

pub mod civilization;
pub mod event;
pub mod resource;
pub mod terrain;
pub mod world;

pub use civilization::{
    ArmyUnit, City, Civilization, Hsl, Relation, RelationStatus, UnitKind, War,
};
pub use event::{
    DisasterKind, EventCategory, EventKind, EventLog, HistoricalEvent, Season, query_events,
};
pub use resource::{Resource, ResourceKind};
pub use terrain::{Biome, Terrain};
pub use world::{GridPos, Position, Tile, World};
