use rand::Rng;

use super::context::TickContext;
use super::names::generate_city_name;
use super::system::{SimSystem, SystemScope};
use crate::id::CityId;
use crate::model::{City, EventKind, GridPos};

/// People each existing city must support before another is founded.
const POPULATION_PER_CITY: u64 = 5000;
const FOUNDING_CHANCE: f64 = 0.2;
/// New cities keep at least this far from the civilization's own cities.
const MIN_NEW_CITY_DISTANCE: f64 = 10.0;
const SETTLER_POPULATION: u64 = 1000;

/// Founds new cities inside a crowded civilization's territory.
pub struct CityGrowthSystem;

impl SimSystem for CityGrowthSystem {
    fn name(&self) -> &str {
        "city_growth"
    }

    fn scope(&self) -> SystemScope {
        SystemScope::Civilization
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let Some(focus) = ctx.focus else { return };
        let Some(civ) = ctx.civilizations.get_mut(focus.index()) else {
            return;
        };

        if civ.population <= civ.cities.len() as u64 * POPULATION_PER_CITY
            || ctx.rng.random_range(0.0..1.0) >= FOUNDING_CHANCE
        {
            return;
        }

        let candidates: Vec<GridPos> = ctx
            .world
            .tiles()
            .iter()
            .filter(|t| t.civilization == Some(focus) && !t.is_water())
            .map(|t| t.pos())
            .filter(|pos| {
                civ.cities
                    .iter()
                    .all(|c| c.location.distance(*pos) >= MIN_NEW_CITY_DISTANCE)
            })
            .collect();
        if candidates.is_empty() {
            tracing::trace!(civ = %focus, "no room for a new city");
            return;
        }

        let location = candidates[ctx.rng.random_range(0..candidates.len())];
        let name = generate_city_name(ctx.rng);
        let city = City {
            id: CityId(civ.cities.len() as u32),
            name: name.clone(),
            location,
            position: ctx.world.embed(location, 1.0),
            population: SETTLER_POPULATION,
            is_capital: false,
            founded_year: ctx.year,
        };
        let city_id = city.id;
        civ.cities.push(city);
        civ.population += SETTLER_POPULATION;
        let description = format!("{} founds the city of {name}", civ.name);

        ctx.record(
            EventKind::CityFounded {
                city: city_id,
                name,
            },
            description,
            Some(focus),
            Vec::new(),
        );
    }
}
