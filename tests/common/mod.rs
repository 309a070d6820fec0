#![allow(dead_code)]

use civgen::model::{Civilization, RelationStatus, Resource, World};
use civgen::worldgen::{self, WorldGenConfig};
use rand::SeedableRng;
use rand::rngs::SmallRng;

pub fn config(seed: u64, width: u32, height: u32, civilizations: usize) -> WorldGenConfig {
    WorldGenConfig {
        seed: Some(seed as i64),
        width,
        height,
        num_civilizations: civilizations,
    }
}

/// Terrain, resources and civilizations for `config`, all drawn from one
/// rng seeded with `seed`.
pub fn generate(config: &WorldGenConfig, seed: u64) -> (World, Vec<Resource>, Vec<Civilization>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut world = worldgen::generate_world(config, &mut rng);
    let resources = worldgen::place_resources(&mut world, &mut rng);
    let civs =
        worldgen::generate_civilizations(&mut world, &resources, config.num_civilizations, &mut rng);
    (world, resources, civs)
}

/// Every war entry has exactly one mirror entry on the enemy's side.
pub fn assert_war_symmetry(civs: &[Civilization]) {
    for civ in civs {
        for war in &civ.wars {
            let enemy = &civs[war.enemy.index()];
            let mirrors: Vec<_> = enemy.wars.iter().filter(|w| w.id == war.id).collect();
            assert_eq!(mirrors.len(), 1, "war {} of {} has no single mirror", war.id, civ.id);
            assert_eq!(mirrors[0].enemy, civ.id);
            assert_eq!(mirrors[0].start_year, war.start_year);
            let holders = civs
                .iter()
                .filter(|c| c.wars.iter().any(|w| w.id == war.id))
                .count();
            assert_eq!(holders, 2, "war {} held by {holders} civilizations", war.id);
        }
    }
}

pub fn assert_tile_bounds(world: &World) {
    for tile in world.tiles() {
        for (name, v) in [
            ("elevation", tile.elevation),
            ("moisture", tile.moisture),
            ("temperature", tile.temperature),
            ("fertility", tile.fertility),
        ] {
            assert!((0.0..=1.0).contains(&v), "{name} {v} at ({}, {})", tile.x, tile.y);
        }
    }
}

pub fn assert_civ_bounds(civs: &[Civilization]) {
    for civ in civs {
        assert_eq!(civ.population, civ.city_population(), "{}", civ.name);
        assert!(civ.technology_level >= 1);
        assert!(civ.military_strength <= 10);
        for (name, v) in [
            ("economy", civ.economy_strength),
            ("happiness", civ.happiness),
            ("health", civ.health),
        ] {
            assert!((1.0..=10.0).contains(&v), "{} {name} {v}", civ.name);
        }
        for rel in &civ.relations {
            assert!((-100.0..=100.0).contains(&rel.value));
            assert_eq!(rel.status, RelationStatus::from_value(rel.value));
        }
    }
}
