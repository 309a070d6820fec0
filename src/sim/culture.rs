use rand::Rng;

use super::context::TickContext;
use super::system::{SimSystem, SystemScope};
use crate::model::EventKind;

const CULTURAL_EVENT_CHANCE: f64 = 0.1;

pub struct CultureSystem;

impl SimSystem for CultureSystem {
    fn name(&self) -> &str {
        "culture"
    }

    fn scope(&self) -> SystemScope {
        SystemScope::Civilization
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let Some(focus) = ctx.focus else { return };
        let Some(civ) = ctx.civilizations.get_mut(focus.index()) else {
            return;
        };
        if ctx.rng.random_range(0.0..1.0) >= CULTURAL_EVENT_CHANCE {
            return;
        }

        let name = &civ.name;
        let description = match ctx.rng.random_range(0..5) {
            0 => format!("{name} celebrates a grand festival"),
            1 => format!("A new artistic movement emerges in {name}"),
            2 => format!("{} commissions a great monument in {name}", civ.ruler),
            3 => format!("Religious reforms sweep through {name}"),
            _ => format!("A new philosophical school is founded in {name}"),
        };
        civ.happiness = (civ.happiness + 1.0).min(10.0);

        ctx.record(EventKind::Cultural, description, Some(focus), Vec::new());
    }
}
