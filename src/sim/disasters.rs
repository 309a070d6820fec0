use rand::Rng;

use super::context::TickContext;
use super::system::{SimSystem, SystemScope};
use crate::model::{DisasterKind, EventKind};

const DISASTER_CHANCE: f64 = 0.05;
/// Share of the population lost, drawn uniformly.
const LOSS_RANGE: std::ops::Range<f64> = 0.05..0.15;
/// Happiness and health lost to a disaster.
const MORALE_LOSS: f64 = 2.0;

pub struct DisasterSystem;

impl SimSystem for DisasterSystem {
    fn name(&self) -> &str {
        "disasters"
    }

    fn scope(&self) -> SystemScope {
        SystemScope::Civilization
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let Some(focus) = ctx.focus else { return };
        let Some(civ) = ctx.civilizations.get_mut(focus.index()) else {
            return;
        };
        if ctx.rng.random_range(0.0..1.0) >= DISASTER_CHANCE {
            return;
        }

        let disaster = DisasterKind::ALL[ctx.rng.random_range(0..DisasterKind::ALL.len())];
        let share = ctx.rng.random_range(LOSS_RANGE);
        let loss = (civ.population as f64 * share).floor() as u64;
        let lost = civ.apply_population_loss(loss);
        civ.happiness = (civ.happiness - MORALE_LOSS).max(1.0);
        civ.health = (civ.health - MORALE_LOSS).max(1.0);

        tracing::trace!(civ = %focus, %disaster, lost, "disaster");
        let description = format!("A devastating {disaster} strikes {}", civ.name);
        ctx.record(
            EventKind::Disaster { disaster },
            description,
            Some(focus),
            Vec::new(),
        );
    }
}
