pub mod civilizations;
pub mod config;
pub mod deposits;
pub mod noise;
pub mod rivers;
pub mod sites;
pub mod terrain;

use rand::Rng;
use rand::RngCore;

use crate::model::World;

pub use civilizations::generate_civilizations;
pub use config::{ConfigError, WorldGenConfig};
pub use deposits::place_resources;
pub use noise::NoiseField;
pub use rivers::RiverPath;
pub use sites::{ScoredLocation, SiteSelector};

/// Generate terrain and carve rivers. With a fixed `config.seed` the tile
/// grid depends only on the seed and on the draws `rng` yields for rivers.
pub fn generate_world(config: &WorldGenConfig, rng: &mut dyn RngCore) -> World {
    let (world, _) = generate_world_with_rivers(config, rng);
    world
}

/// [`generate_world`], also returning the path of every carved river.
pub fn generate_world_with_rivers(
    config: &WorldGenConfig,
    rng: &mut dyn RngCore,
) -> (World, Vec<RiverPath>) {
    let seed = config
        .seed
        .unwrap_or_else(|| rng.random_range(0..1_000_000));
    let (width, height) = (config.width, config.height);
    let layers = terrain::NoiseLayers::new(seed);

    let mut tiles = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            tiles.push(terrain::build_tile(&layers, x, y, width, height));
        }
    }
    let mut world = World::from_tiles(width, height, seed, tiles);

    let rivers = if world.tiles().is_empty() {
        Vec::new()
    } else {
        rivers::carve_rivers(&mut world, config.river_attempts(), rng)
    };

    tracing::debug!(
        seed,
        width,
        height,
        land_ratio = world.land_ratio(),
        rivers = rivers.len(),
        "world generated"
    );
    (world, rivers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn small_config(seed: i64) -> WorldGenConfig {
        WorldGenConfig {
            width: 60,
            height: 40,
            ..WorldGenConfig::seeded(seed)
        }
    }

    #[test]
    fn deterministic_with_same_seed_and_rng() {
        let config = small_config(42);
        let a = generate_world(&config, &mut SmallRng::seed_from_u64(1));
        let b = generate_world(&config, &mut SmallRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn grid_has_requested_shape() {
        let world = generate_world(&small_config(7), &mut SmallRng::seed_from_u64(2));
        assert_eq!(world.tiles().len(), 60 * 40);
        assert_eq!(world.seed, 7);
        for (i, tile) in world.tiles().iter().enumerate() {
            assert_eq!(tile.x as usize, i % 60);
            assert_eq!(tile.y as usize, i / 60);
            assert!(tile.resource.is_none());
            assert!(tile.civilization.is_none());
        }
    }

    #[test]
    fn unseeded_config_draws_seed_from_rng() {
        let config = WorldGenConfig {
            seed: None,
            ..small_config(0)
        };
        let world = generate_world(&config, &mut SmallRng::seed_from_u64(3));
        assert!((0..1_000_000).contains(&world.seed));
    }

    #[test]
    fn empty_map_generates_nothing() {
        let config = WorldGenConfig {
            width: 0,
            ..small_config(1)
        };
        let world = generate_world(&config, &mut SmallRng::seed_from_u64(4));
        assert!(world.tiles().is_empty());
    }

    #[test]
    fn rivers_terminate() {
        let config = WorldGenConfig::seeded(42);
        let (world, rivers) =
            generate_world_with_rivers(&config, &mut SmallRng::seed_from_u64(5));
        for river in &rivers {
            assert!(river.reached_water || river.steps == world.width + world.height);
        }
    }
}
