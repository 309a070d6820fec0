use serde::{Deserialize, Serialize};

use super::world::GridPos;
use crate::id::ResourceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ResourceKind {
    Food,
    Mineral,
    Luxury,
}

string_enum!(ResourceKind {
    Food => "food",
    Mineral => "mineral",
    Luxury => "luxury",
});

/// A deposit placed on one tile. Immutable once placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub kind: ResourceKind,
    pub value: f64,
    pub rarity: f64,
    pub location: GridPos,
}

/// Look up a resource by handle. Handles are sequential indices, but the
/// lookup still checks the id so a foreign handle yields `None`.
pub fn find_resource(resources: &[Resource], id: ResourceId) -> Option<&Resource> {
    resources.get(id.index()).filter(|r| r.id == id)
}
