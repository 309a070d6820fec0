use rand::Rng;
use rand::RngCore;

use crate::model::{GridPos, Terrain, World};

/// Random probes per river when looking for a mountain source.
const SOURCE_PROBES: u32 = 100;
/// Sources lower than this are rejected.
const MIN_SOURCE_ELEVATION: f64 = 0.6;
const FERTILITY_BOOST: f64 = 0.3;
/// Random jitter added to each neighbour's elevation when choosing the next step.
const FLOW_JITTER: f64 = 0.1;

/// Result of one carved river.
#[derive(Debug, Clone, PartialEq)]
pub struct RiverPath {
    pub source: GridPos,
    /// Every tile the river visited, in order, including the source.
    pub tiles: Vec<GridPos>,
    /// Moves taken that did not end in water.
    pub steps: u32,
    /// Whether the river stopped by flowing into water.
    pub reached_water: bool,
}

/// Carve `attempts` rivers downhill from mountain sources. Attempts that find
/// no source high enough are skipped.
pub fn carve_rivers(world: &mut World, attempts: u32, rng: &mut dyn RngCore) -> Vec<RiverPath> {
    let mut rivers = Vec::new();
    for _ in 0..attempts {
        let Some(source) = find_source(world, rng) else {
            tracing::trace!("river attempt found no source");
            continue;
        };
        rivers.push(flow_from(world, source, rng));
    }
    rivers
}

/// Highest mountain among random probes, if it clears the minimum.
fn find_source(world: &World, rng: &mut dyn RngCore) -> Option<GridPos> {
    let mut best: Option<(GridPos, f64)> = None;
    for _ in 0..SOURCE_PROBES {
        let pos = GridPos::new(
            rng.random_range(0..world.width),
            rng.random_range(0..world.height),
        );
        let tile = &world[pos];
        let best_elevation = best.map_or(0.0, |(_, e)| e);
        if tile.terrain == Terrain::Mountains && tile.elevation > best_elevation {
            best = Some((pos, tile.elevation));
        }
    }
    best.filter(|&(_, e)| e >= MIN_SOURCE_ELEVATION)
        .map(|(pos, _)| pos)
}

fn flow_from(world: &mut World, source: GridPos, rng: &mut dyn RngCore) -> RiverPath {
    let max_steps = world.width + world.height;
    let mut current = source;
    let mut tiles = Vec::new();
    let mut steps = 0;
    let mut reached_water = false;

    while steps < max_steps {
        tiles.push(current);
        let tile = &mut world[current];
        if tile.terrain != Terrain::Water {
            tile.terrain = Terrain::Water;
            tile.fertility = (tile.fertility + FERTILITY_BOOST).min(1.0);
        }

        let neighbors: Vec<GridPos> = world.neighbors8(current).collect();
        let next = neighbors
            .into_iter()
            .map(|pos| (pos, world[pos].elevation + rng.random_range(0.0..FLOW_JITTER)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(pos, _)| pos);
        let Some(next) = next else { break };

        current = next;
        if world[current].is_water() {
            reached_water = true;
            break;
        }
        steps += 1;
    }

    RiverPath {
        source,
        tiles,
        steps,
        reached_water,
    }
}
