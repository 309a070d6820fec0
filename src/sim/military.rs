use super::context::TickContext;
use super::system::{SimSystem, SystemScope};

/// Re-levies the army from the current population.
pub struct MilitarySystem;

impl SimSystem for MilitarySystem {
    fn name(&self) -> &str {
        "military"
    }

    fn scope(&self) -> SystemScope {
        SystemScope::Civilization
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        if let Some(civ) = ctx.focused() {
            civ.levy_army();
        }
    }
}
