use rand::Rng;
use rand::RngCore;

use crate::id::{CityId, CivId, ResourceId};
use crate::model::civilization::{military_strength, raise_army};
use crate::model::resource::find_resource;
use crate::model::{City, Civilization, GridPos, Hsl, Relation, RelationStatus, Resource, World};
use crate::sim::names;

use super::sites::SiteSelector;

/// Radius of the square window around a capital whose resources the
/// civilization claims.
const RESOURCE_CLAIM_RADIUS: u32 = 15;
const CAPITAL_TERRITORY_RADIUS: u32 = 10;
const CAPITAL_CITY_RADIUS: u32 = 8;
const CITY_RADIUS: u32 = 5;

/// Chance that a new pair of civilizations starts out neutral.
const NEUTRAL_CHANCE: f64 = 0.7;

/// Place up to `count` civilizations on the world, claiming resources and
/// territory as they go. A civilization with no available capital site is
/// skipped, so fewer than `count` may be returned. Ids are always the
/// civilization's index in the returned list.
pub fn generate_civilizations(
    world: &mut World,
    resources: &[Resource],
    count: usize,
    rng: &mut dyn RngCore,
) -> Vec<Civilization> {
    let selector = SiteSelector::new(world);
    let mut civilizations: Vec<Civilization> = Vec::with_capacity(count);
    let mut settled: Vec<GridPos> = Vec::new();

    for attempt in 0..count {
        let Some(capital) = selector.best_location(world, &settled, rng) else {
            tracing::trace!(attempt, "no site left for a capital");
            continue;
        };
        settled.push(capital.pos);

        let id = CivId(civilizations.len());
        let mut cities = vec![found_city(
            world,
            CityId(0),
            names::generate_capital_name(rng),
            capital.pos,
            5000 + rng.random_range(0..5000),
            true,
        )];

        let target_cities = rng.random_range(2..=4);
        for _ in 1..target_cities {
            let Some(site) = selector.best_location(world, &settled, rng) else {
                tracing::trace!(civ = %id, "no site left for a city");
                continue;
            };
            settled.push(site.pos);
            cities.push(found_city(
                world,
                CityId(cities.len() as u32),
                names::generate_city_name(rng),
                site.pos,
                2000 + rng.random_range(0..3000),
                false,
            ));
        }

        let population: u64 = cities.iter().map(|c| c.population).sum();
        let army = raise_army(population);
        let owned = claim_resources(world, resources, capital.pos, id);
        let relations = seed_relations(&mut civilizations, id, rng);

        let civ = Civilization {
            id,
            name: names::civilization_name(id.index()),
            color: Hsl::palette(id.index()),
            position: world.embed(capital.pos, 1.0),
            size: (population as f64).sqrt() / 10.0,
            population,
            population_growth: rng.random_range(1.0..3.0),
            ruler: names::generate_ruler_name(rng),
            government: names::generate_government(rng),
            technology_level: 1 + rng.random_range(0..3),
            military_strength: military_strength(&army, population),
            economy_strength: f64::from(3 + rng.random_range(0..7u32)),
            happiness: f64::from(5 + rng.random_range(0..5u32)),
            health: f64::from(5 + rng.random_range(0..5u32)),
            resources: owned,
            army,
            wars: Vec::new(),
            relations,
            cities,
        };

        claim_territory(world, &civ, capital.pos);
        civilizations.push(civ);
    }

    tracing::debug!(
        requested = count,
        placed = civilizations.len(),
        "civilizations placed"
    );
    civilizations
}

fn found_city(
    world: &World,
    id: CityId,
    name: String,
    location: GridPos,
    population: u64,
    is_capital: bool,
) -> City {
    City {
        id,
        name,
        location,
        position: world.embed(location, 0.0),
        population,
        is_capital,
        founded_year: 1,
    }
}

/// Collect every resource in the window around `capital` and mark its tile
/// as owned by `civ`. Dangling resource handles are ignored.
fn claim_resources(
    world: &mut World,
    resources: &[Resource],
    capital: GridPos,
    civ: CivId,
) -> Vec<ResourceId> {
    let window: Vec<GridPos> = world.window(capital, RESOURCE_CLAIM_RADIUS).collect();
    let mut owned = Vec::new();
    for pos in window {
        let tile = &mut world[pos];
        let Some(id) = tile.resource else { continue };
        if find_resource(resources, id).is_none() || owned.contains(&id) {
            continue;
        }
        owned.push(id);
        tile.civilization = Some(civ);
    }
    owned
}

/// Roll a starting relation with every earlier civilization and record it
/// on both sides.
fn seed_relations(
    earlier: &mut [Civilization],
    id: CivId,
    rng: &mut dyn RngCore,
) -> Vec<Relation> {
    let mut relations = Vec::with_capacity(earlier.len());
    for other in earlier.iter_mut() {
        let status = if rng.random_range(0.0..1.0) < NEUTRAL_CHANCE {
            RelationStatus::Neutral
        } else if rng.random_range(0.0..1.0) < 0.5 {
            RelationStatus::Ally
        } else {
            RelationStatus::Enemy
        };
        // Each range lies strictly inside its status band.
        let value = match status {
            RelationStatus::Ally => 100.0 - rng.random_range(0.0..50.0),
            RelationStatus::Enemy => -100.0 + rng.random_range(0.0..50.0),
            RelationStatus::Neutral => rng.random_range(-50.0..50.0),
        };
        relations.push(Relation {
            civilization: other.id,
            status,
            value,
        });
        other.relations.push(Relation {
            civilization: id,
            status,
            value,
        });
    }
    relations
}

/// Initial borders: a wide circle around the capital, then a circle around
/// every city. Water is never claimed, and later civilizations overwrite
/// earlier ones.
fn claim_territory(world: &mut World, civ: &Civilization, capital: GridPos) {
    world.claim_circle(capital, CAPITAL_TERRITORY_RADIUS, civ.id);
    for city in &civ.cities {
        let radius = if city.is_capital {
            CAPITAL_CITY_RADIUS
        } else {
            CITY_RADIUS
        };
        world.claim_circle(city.location, radius, civ.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Terrain;
    use crate::testutil::flat_world;
    use crate::worldgen::sites::MIN_CITY_DISTANCE;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn generate(seed: u64, count: usize) -> (World, Vec<Civilization>) {
        let mut world = flat_world(120, 120, Terrain::Plains);
        let mut rng = SmallRng::seed_from_u64(seed);
        let civs = generate_civilizations(&mut world, &[], count, &mut rng);
        (world, civs)
    }

    #[test]
    fn ids_are_contiguous_indices() {
        let (_, civs) = generate(1, 4);
        assert_eq!(civs.len(), 4);
        for (i, civ) in civs.iter().enumerate() {
            assert_eq!(civ.id, CivId(i));
            assert_eq!(civ.color, Hsl::palette(i));
        }
    }

    #[test]
    fn starting_stats_in_range() {
        let (_, civs) = generate(2, 4);
        for civ in &civs {
            assert!((2..=4).contains(&civ.cities.len()) || civ.cities.len() == 1);
            assert_eq!(civ.population, civ.city_population());
            assert!((1.0..3.0).contains(&civ.population_growth));
            assert!((1..=3).contains(&civ.technology_level));
            assert!((3.0..=9.0).contains(&civ.economy_strength));
            assert!((5.0..=9.0).contains(&civ.happiness));
            assert!((5.0..=9.0).contains(&civ.health));
            assert!(civ.military_strength <= 10);
            let capital = civ.capital().unwrap();
            assert!((5000..10_000).contains(&capital.population));
            for city in civ.cities.iter().filter(|c| !c.is_capital) {
                assert!((2000..5000).contains(&city.population));
            }
        }
    }

    #[test]
    fn settlements_keep_their_distance() {
        let (_, civs) = generate(3, 5);
        let all: Vec<GridPos> = civs
            .iter()
            .flat_map(|c| c.cities.iter().map(|city| city.location))
            .collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(a.distance(*b) >= MIN_CITY_DISTANCE, "{a:?} and {b:?} too close");
            }
        }
    }

    #[test]
    fn relations_are_symmetric_and_consistent() {
        let (_, civs) = generate(4, 5);
        for civ in &civs {
            assert_eq!(civ.relations.len(), civs.len() - 1);
            for rel in &civ.relations {
                assert_eq!(rel.status, RelationStatus::from_value(rel.value));
                let mirror = civs[rel.civilization.index()].relation(civ.id).unwrap();
                assert_eq!(mirror.value, rel.value);
                assert_eq!(mirror.status, rel.status);
            }
        }
    }

    #[test]
    fn capital_territory_is_claimed() {
        let (world, civs) = generate(5, 3);
        for civ in &civs {
            let capital = civ.capital().unwrap().location;
            // A later civilization may overwrite, but never within the
            // exclusion distance of this capital's own tile.
            assert_eq!(world[capital].civilization, Some(civ.id));
            assert!(world.owned_tile_count(civ.id) > 0);
        }
    }

    #[test]
    fn resources_near_capital_are_claimed() {
        let mut world = flat_world(60, 60, Terrain::Plains);
        let mut rng = SmallRng::seed_from_u64(6);
        let mut resources = Vec::new();
        for (i, pos) in [GridPos::new(30, 30), GridPos::new(5, 5)].into_iter().enumerate() {
            world[pos].resource = Some(ResourceId(i));
            resources.push(Resource {
                id: ResourceId(i),
                name: "Gold".into(),
                kind: crate::model::ResourceKind::Mineral,
                value: 10.0,
                rarity: 0.8,
                location: pos,
            });
        }
        let civs = generate_civilizations(&mut world, &resources, 1, &mut rng);
        let civ = &civs[0];
        let capital = civ.capital().unwrap().location;
        for r in &resources {
            let in_window = r.location.x.abs_diff(capital.x) <= RESOURCE_CLAIM_RADIUS
                && r.location.y.abs_diff(capital.y) <= RESOURCE_CLAIM_RADIUS;
            assert_eq!(civ.resources.contains(&r.id), in_window);
        }
    }

    #[test]
    fn all_water_world_places_nobody() {
        let mut world = flat_world(40, 40, Terrain::Water);
        let mut rng = SmallRng::seed_from_u64(7);
        assert!(generate_civilizations(&mut world, &[], 3, &mut rng).is_empty());
    }
}
