use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::id::{CityId, CivId, IdGenerator};
use crate::model::civilization::{military_strength, raise_army};
use crate::model::*;
use crate::sim::names::civilization_name;
use crate::sim::{SimSystem, TickContext};

// ---------------------------------------------------------------------------
// Tick execution helpers
// ---------------------------------------------------------------------------

/// Run a single system tick for `year`. Returns the emitted events.
pub fn tick_system(
    system: &mut dyn SimSystem,
    civilizations: &mut Vec<Civilization>,
    world: &mut World,
    resources: &[Resource],
    focus: Option<CivId>,
    year: u32,
    seed: u64,
) -> Vec<HistoricalEvent> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut ids = IdGenerator::new();
    let mut events = Vec::new();
    let mut ctx = TickContext {
        year,
        civilizations,
        resources,
        world,
        rng: &mut rng,
        events: &mut events,
        ids: &mut ids,
        focus,
    };
    system.tick(&mut ctx);
    events
}

/// Tick a civilization-scoped system on a 40x40 plains world with no
/// resources, focused on `focus`.
pub fn tick_civ_system(
    system: &mut dyn SimSystem,
    mut civilizations: Vec<Civilization>,
    focus: CivId,
    year: u32,
    seed: u64,
) -> (Vec<Civilization>, Vec<HistoricalEvent>) {
    let mut world = flat_world(40, 40, Terrain::Plains);
    let events = tick_system(
        system,
        &mut civilizations,
        &mut world,
        &[],
        Some(focus),
        year,
        seed,
    );
    (civilizations, events)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A `width x height` world where every tile has the given terrain,
/// mid-range climate, temperate biome, fertility 0.5, and no owner.
pub fn flat_world(width: u32, height: u32, terrain: Terrain) -> World {
    let mut tiles = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            tiles.push(Tile {
                x,
                y,
                elevation: 0.5,
                moisture: 0.5,
                temperature: 0.5,
                terrain,
                biome: Biome::Temperate,
                fertility: 0.5,
                resource: None,
                civilization: None,
            });
        }
    }
    World::from_tiles(width, height, 0, tiles)
}

/// A civilization with one city per entry of `populations`, the first
/// being the capital. Cities sit on row 2, three tiles apart.
///
/// Stats are fixed: growth 2%, happiness and health 5, technology 1,
/// economy 5, and an army levied from the total. No relations, wars or
/// resources.
pub fn civ_with_cities(id: CivId, populations: &[u64]) -> Civilization {
    let cities: Vec<City> = populations
        .iter()
        .enumerate()
        .map(|(i, &population)| City {
            id: CityId(i as u32),
            name: format!("City {i}"),
            location: GridPos::new(2 + 3 * i as u32, 2),
            position: Position::default(),
            population,
            is_capital: i == 0,
            founded_year: 1,
        })
        .collect();
    let population: u64 = populations.iter().sum();
    let army = raise_army(population);

    Civilization {
        id,
        name: civilization_name(id.index()),
        color: Hsl::palette(id.index()),
        position: Position::default(),
        size: (population as f64).sqrt() / 10.0,
        population,
        population_growth: 2.0,
        cities,
        ruler: "King Test".to_string(),
        government: "Monarchy".to_string(),
        technology_level: 1,
        military_strength: military_strength(&army, population),
        economy_strength: 5.0,
        happiness: 5.0,
        health: 5.0,
        resources: Vec::new(),
        army,
        wars: Vec::new(),
        relations: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

pub fn assert_approx(actual: f64, expected: f64, msg: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{msg}: expected {expected}, got {actual}"
    );
}
