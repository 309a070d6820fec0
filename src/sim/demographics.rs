use super::context::TickContext;
use super::system::{SimSystem, SystemScope};
use crate::model::Civilization;

/// Yearly fractional growth: the base rate scaled by happiness and health,
/// both relative to a neutral 5.
pub fn growth_rate(civ: &Civilization) -> f64 {
    (civ.population_growth / 100.0) * (civ.happiness / 5.0) * (civ.health / 5.0)
}

/// Grow every city and move the civilization total by exactly the sum of
/// the city deltas.
pub fn grow_population(civ: &mut Civilization) {
    let rate = growth_rate(civ);
    for city in &mut civ.cities {
        let before = city.population;
        city.population = (before as f64 * (1.0 + rate)).floor().max(0.0) as u64;
        if city.population >= before {
            civ.population += city.population - before;
        } else {
            civ.population = civ.population.saturating_sub(before - city.population);
        }
    }
    civ.size = (civ.population as f64).sqrt() / 10.0;
}

pub struct DemographicsSystem;

impl SimSystem for DemographicsSystem {
    fn name(&self) -> &str {
        "demographics"
    }

    fn scope(&self) -> SystemScope {
        SystemScope::Civilization
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        if let Some(civ) = ctx.focused() {
            grow_population(civ);
        }
    }
}
