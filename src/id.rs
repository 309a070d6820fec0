use std::fmt;

use serde::{Deserialize, Serialize};

/// Monotonic ID generator for wars and historical events.
/// Both kinds draw from one sequence, so no war shares a number with an event.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn starting_from(start: u64) -> Self {
        Self { next: start }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn next_war(&mut self) -> WarId {
        WarId(self.next_id())
    }

    pub fn next_event(&mut self) -> EventId {
        EventId(self.next_id())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident($inner:ty), $prefix:expr) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            pub fn raw(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }
    };
}

handle!(
    /// Index of a civilization in the simulation's civilization list.
    /// Civilizations are never removed, so an index stays valid for a whole run.
    CivId(usize),
    "civ"
);

impl CivId {
    pub fn index(self) -> usize {
        self.0
    }
}

handle!(
    /// Index into the resource list produced by resource placement.
    ResourceId(usize),
    "resource"
);

impl ResourceId {
    pub fn index(self) -> usize {
        self.0
    }
}

handle!(
    /// Position of a city inside its owning civilization's city list.
    CityId(u32),
    "city"
);

handle!(WarId(u64), "war");

handle!(EventId(u64), "event");
