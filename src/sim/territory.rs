use rand::Rng;

use super::context::TickContext;
use super::system::{SimSystem, SystemScope};
use crate::model::{Civilization, GridPos};

/// Per-neighbor chance that `civ` claims an unowned border tile this year:
/// `0.01 × (military/10) × (population/10000)`.
pub fn claim_chance(civ: &Civilization) -> f64 {
    0.01 * (f64::from(civ.military_strength) / 10.0) * (civ.population as f64 / 10_000.0)
}

/// Grows every civilization's territory into adjacent unowned land.
///
/// All civilizations are judged against the ownership at the start of the
/// pass, and claims land only once everyone has rolled, so a tile claimed
/// this year cannot seed further claims in the same year.
pub struct TerritorySystem;

impl SimSystem for TerritorySystem {
    fn name(&self) -> &str {
        "territory"
    }

    fn scope(&self) -> SystemScope {
        SystemScope::World
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let snapshot = ctx.world.ownership();
        let width = ctx.world.width as usize;
        let owner_at = |pos: GridPos| snapshot[pos.y as usize * width + pos.x as usize];

        let mut claims = Vec::new();
        for civ in ctx.civilizations.iter() {
            let chance = claim_chance(civ);
            if chance <= 0.0 {
                continue;
            }
            for tile in ctx.world.tiles() {
                if owner_at(tile.pos()) != Some(civ.id) {
                    continue;
                }
                for next in ctx.world.neighbors4(tile.pos()) {
                    if owner_at(next).is_some() || ctx.world[next].is_water() {
                        continue;
                    }
                    if ctx.rng.random_range(0.0..1.0) < chance {
                        claims.push((next, civ.id));
                    }
                }
            }
        }

        let claimed = claims.len();
        for (pos, civ) in claims {
            if let Some(tile) = ctx.world.tile_mut(pos) {
                tile.civilization = Some(civ);
            }
        }
        if claimed > 0 {
            tracing::trace!(year = ctx.year, claimed, "territory expanded");
        }
    }
}
