use rand::Rng;

use super::context::TickContext;
use super::system::{SimSystem, SystemScope};
use crate::model::EventKind;

/// Discovery chance at economy strength 10.
const BASE_DISCOVERY_CHANCE: f64 = 0.1;

pub struct TechnologySystem;

impl SimSystem for TechnologySystem {
    fn name(&self) -> &str {
        "technology"
    }

    fn scope(&self) -> SystemScope {
        SystemScope::Civilization
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let Some(focus) = ctx.focus else { return };
        let Some(civ) = ctx.civilizations.get_mut(focus.index()) else {
            return;
        };

        let chance = BASE_DISCOVERY_CHANCE * (civ.economy_strength / 10.0);
        if ctx.rng.random_range(0.0..1.0) >= chance {
            return;
        }
        civ.technology_level += 1;
        let level = civ.technology_level;
        let description = format!("{} advances to technology level {level}", civ.name);

        ctx.record(
            EventKind::Discovery {
                technology_level: level,
            },
            description,
            Some(focus),
            Vec::new(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::CivId;
    use crate::model::EventCategory;
    use crate::testutil::{civ_with_cities, tick_civ_system};

    #[test]
    fn strong_economy_eventually_discovers() {
        let mut discoveries = 0;
        for seed in 0..200 {
            let mut civ = civ_with_cities(CivId(0), &[5000]);
            civ.economy_strength = 10.0;
            civ.technology_level = 2;
            let (civs, events) = tick_civ_system(&mut TechnologySystem, vec![civ], CivId(0), 4, seed);
            if civs[0].technology_level == 3 {
                discoveries += 1;
                assert_eq!(events.len(), 1);
                assert_eq!(events[0].category(), EventCategory::Discovery);
                assert_eq!(events[0].civilization, Some(CivId(0)));
                assert_eq!(events[0].year, 4);
                assert!(events[0].description.ends_with("technology level 3"));
            } else {
                assert!(events.is_empty());
            }
        }
        // 10% per tick over 200 trials.
        assert!((5..=45).contains(&discoveries), "{discoveries} discoveries");
    }
}
