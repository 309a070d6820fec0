use super::context::TickContext;
use super::system::{SimSystem, SystemScope};
use crate::model::civilization::clamp_stat;
use crate::model::resource::find_resource;
use crate::model::{Civilization, Resource};

/// `5 + Σ value/10 + tech/2 + log10(population)/2`, clamped to `[1, 10]`.
/// Unknown resource handles contribute nothing, as does an empty population.
pub fn economy_strength(civ: &Civilization, resources: &[Resource]) -> f64 {
    let resource_bonus: f64 = civ
        .resources
        .iter()
        .filter_map(|&id| find_resource(resources, id))
        .map(|r| r.value / 10.0)
        .sum();
    let population_bonus = if civ.population > 0 {
        (civ.population as f64).log10() / 2.0
    } else {
        0.0
    };
    clamp_stat(5.0 + resource_bonus + f64::from(civ.technology_level) / 2.0 + population_bonus)
}

pub struct EconomySystem;

impl SimSystem for EconomySystem {
    fn name(&self) -> &str {
        "economy"
    }

    fn scope(&self) -> SystemScope {
        SystemScope::Civilization
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let resources = ctx.resources;
        let Some(civ) = ctx.focused() else { return };
        civ.economy_strength = economy_strength(civ, resources);
        civ.happiness = clamp_stat(civ.happiness + (civ.economy_strength - 5.0) / 10.0);
    }
}
