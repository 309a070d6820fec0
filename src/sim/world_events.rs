use rand::Rng;

use super::context::TickContext;
use super::system::{SimSystem, SystemScope};
use crate::model::EventKind;

const OMEN_CHANCE: f64 = 0.1;

const OMENS: &[&str] = &[
    "A great comet appears in the sky",
    "A solar eclipse darkens the land",
    "Unusual weather patterns affect the entire world",
    "A new star appears in the night sky",
    "Strange lights are seen in the northern sky",
];

/// Global flavor events with no mechanical effect.
pub struct WorldEventSystem;

impl SimSystem for WorldEventSystem {
    fn name(&self) -> &str {
        "world_events"
    }

    fn scope(&self) -> SystemScope {
        SystemScope::World
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        if ctx.rng.random_range(0.0..1.0) >= OMEN_CHANCE {
            return;
        }
        let omen = OMENS[ctx.rng.random_range(0..OMENS.len())];
        ctx.record(EventKind::Omen, omen.to_string(), None, Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventCategory, Terrain};
    use crate::testutil::{flat_world, tick_system};

    #[test]
    fn omens_are_rare_and_global() {
        let mut world = flat_world(4, 4, Terrain::Plains);
        let before = world.clone();
        let mut hits = 0;
        for seed in 0..300 {
            let mut civs = Vec::new();
            let events =
                tick_system(&mut WorldEventSystem, &mut civs, &mut world, &[], None, 4, seed);
            for event in &events {
                hits += 1;
                assert_eq!(event.category(), EventCategory::World);
                assert_eq!(event.civilization, None);
                assert!(OMENS.contains(&event.description.as_str()));
            }
        }
        assert_eq!(world, before);
        assert!((10..=60).contains(&hits), "{hits} omens");
    }
}
