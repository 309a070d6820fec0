use rand::Rng;
use rand::RngCore;

use crate::id::ResourceId;
use crate::model::{GridPos, Resource, ResourceKind, Terrain, World};

/// Chance that a water tile holds a fishery.
const FISH_CHANCE: f64 = 0.05;
/// Food chance on land, per unit of fertility.
const FOOD_CHANCE_PER_FERTILITY: f64 = 0.2;
const MINERAL_CHANCE: f64 = 0.1;
const LUXURY_CHANCE: f64 = 0.02;

/// Static description of a resource type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceTemplate {
    pub name: &'static str,
    pub value: f64,
    pub rarity: f64,
}

const fn template(name: &'static str, value: f64, rarity: f64) -> ResourceTemplate {
    ResourceTemplate { name, value, rarity }
}

pub const FISH: ResourceTemplate = template("Fish", 6.0, 0.3);

pub const FOOD: [ResourceTemplate; 5] = [
    template("Wheat", 5.0, 0.2),
    FISH,
    template("Cattle", 7.0, 0.4),
    template("Fruit", 6.0, 0.5),
    template("Rice", 5.0, 0.3),
];

pub const MINERALS: [ResourceTemplate; 5] = [
    template("Iron", 8.0, 0.6),
    template("Gold", 10.0, 0.8),
    template("Stone", 4.0, 0.3),
    template("Copper", 7.0, 0.5),
    template("Silver", 9.0, 0.7),
];

pub const LUXURIES: [ResourceTemplate; 5] = [
    template("Gems", 12.0, 0.9),
    template("Spices", 11.0, 0.7),
    template("Silk", 10.0, 0.8),
    template("Dyes", 9.0, 0.6),
    template("Incense", 8.0, 0.5),
];

/// Scatter resources over the world, row-major, recording each placement on
/// its tile. Ids are sequential from zero.
///
/// Per land tile the checks run food, then mineral (mountains only), then
/// luxury; a later hit replaces the tile's earlier one, though both stay in
/// the returned list. Drawing Fish for a land tile ends that tile's checks.
pub fn place_resources(world: &mut World, rng: &mut dyn RngCore) -> Vec<Resource> {
    let mut resources = Vec::new();

    for i in 0..world.tiles().len() {
        let tile = &world.tiles()[i];
        let pos = tile.pos();
        let terrain = tile.terrain;
        let fertility = tile.fertility;

        if terrain.is_water() {
            if rng.random_range(0.0..1.0) < FISH_CHANCE {
                let id = push(&mut resources, FISH, ResourceKind::Food, pos);
                world.tiles_mut()[i].resource = Some(id);
            }
            continue;
        }

        if rng.random_range(0.0..1.0) < fertility * FOOD_CHANCE_PER_FERTILITY {
            let food = FOOD[rng.random_range(0..FOOD.len())];
            if food.name == FISH.name {
                continue;
            }
            let id = push(&mut resources, food, ResourceKind::Food, pos);
            world.tiles_mut()[i].resource = Some(id);
        }

        if terrain == Terrain::Mountains && rng.random_range(0.0..1.0) < MINERAL_CHANCE {
            let mineral = MINERALS[rng.random_range(0..MINERALS.len())];
            let id = push(&mut resources, mineral, ResourceKind::Mineral, pos);
            world.tiles_mut()[i].resource = Some(id);
        }

        if rng.random_range(0.0..1.0) < LUXURY_CHANCE {
            let luxury = LUXURIES[rng.random_range(0..LUXURIES.len())];
            let id = push(&mut resources, luxury, ResourceKind::Luxury, pos);
            world.tiles_mut()[i].resource = Some(id);
        }
    }

    tracing::debug!(
        placed = resources.len(),
        food = resources.iter().filter(|r| r.kind == ResourceKind::Food).count(),
        mineral = resources.iter().filter(|r| r.kind == ResourceKind::Mineral).count(),
        luxury = resources.iter().filter(|r| r.kind == ResourceKind::Luxury).count(),
        "resources placed"
    );
    resources
}

fn push(
    resources: &mut Vec<Resource>,
    template: ResourceTemplate,
    kind: ResourceKind,
    location: GridPos,
) -> ResourceId {
    let id = ResourceId(resources.len());
    resources.push(Resource {
        id,
        name: template.name.to_string(),
        kind,
        value: template.value,
        rarity: template.rarity,
        location,
    });
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::flat_world;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn ids_are_sequential_and_tiles_point_at_them() {
        let mut world = flat_world(60, 60, Terrain::Mountains);
        let mut rng = SmallRng::seed_from_u64(42);
        let resources = place_resources(&mut world, &mut rng);
        assert!(!resources.is_empty());
        for (i, r) in resources.iter().enumerate() {
            assert_eq!(r.id, ResourceId(i));
        }
        for tile in world.tiles() {
            if let Some(id) = tile.resource {
                assert_eq!(resources[id.index()].location, tile.pos());
            }
        }
    }

    #[test]
    fn water_only_holds_fish() {
        let mut world = flat_world(80, 80, Terrain::Water);
        let mut rng = SmallRng::seed_from_u64(7);
        let resources = place_resources(&mut world, &mut rng);
        assert!(!resources.is_empty());
        assert!(resources.iter().all(|r| r.name == "Fish" && r.kind == ResourceKind::Food));
        // 6400 tiles at 5% is about 320.
        assert!((200..450).contains(&resources.len()), "{} fisheries", resources.len());
    }

    #[test]
    fn land_never_holds_fish() {
        let mut world = flat_world(80, 80, Terrain::Plains);
        for tile in world.tiles_mut() {
            tile.fertility = 1.0;
        }
        let mut rng = SmallRng::seed_from_u64(8);
        let resources = place_resources(&mut world, &mut rng);
        assert!(resources.iter().all(|r| r.name != "Fish"));
        assert!(resources.iter().all(|r| r.kind != ResourceKind::Mineral));
    }

    #[test]
    fn minerals_only_in_mountains() {
        let mut world = flat_world(40, 40, Terrain::Forest);
        world[GridPos::new(0, 0)].terrain = Terrain::Mountains;
        let mut rng = SmallRng::seed_from_u64(9);
        let resources = place_resources(&mut world, &mut rng);
        for r in resources.iter().filter(|r| r.kind == ResourceKind::Mineral) {
            assert_eq!(r.location, GridPos::new(0, 0));
        }
    }

    #[test]
    fn barren_land_gets_only_luxuries() {
        let mut world = flat_world(50, 50, Terrain::Desert);
        for tile in world.tiles_mut() {
            tile.fertility = 0.0;
        }
        let mut rng = SmallRng::seed_from_u64(10);
        let resources = place_resources(&mut world, &mut rng);
        assert!(resources.iter().all(|r| r.kind == ResourceKind::Luxury));
    }
}
