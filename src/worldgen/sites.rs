use std::f64::consts::PI;

use rand::Rng;
use rand::RngCore;

use crate::model::{GridPos, Terrain, World};

/// No two settlements, capitals included, are placed closer than this.
pub const MIN_CITY_DISTANCE: f64 = 15.0;
/// Intended spacing between capitals. Site selection only enforces
/// [`MIN_CITY_DISTANCE`]; this is exported for callers that want the
/// stricter rule.
pub const CAPITAL_MIN_DISTANCE: f64 = 25.0;
/// Radius of the neighbourhood a site is scored on.
pub const SITE_RADIUS: u32 = 5;
/// Width of the uniform noise added to scores when ranking.
const RANK_JITTER: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredLocation {
    pub pos: GridPos,
    pub score: f64,
}

/// Ranks settlement sites. Scores depend only on terrain and resources, so
/// they are computed once per world; ownership and exclusions are checked
/// per query.
#[derive(Debug, Clone)]
pub struct SiteSelector {
    /// Row-major; `None` for water.
    scores: Vec<Option<f64>>,
}

impl SiteSelector {
    pub fn new(world: &World) -> Self {
        let scores = world
            .tiles()
            .iter()
            .map(|tile| (!tile.is_water()).then(|| site_score(world, tile.pos())))
            .collect();
        Self { scores }
    }

    pub fn score(&self, world: &World, pos: GridPos) -> Option<f64> {
        if !world.in_bounds(pos) {
            return None;
        }
        self.scores[pos.y as usize * world.width as usize + pos.x as usize]
    }

    /// Unowned land tiles at least [`MIN_CITY_DISTANCE`] from every excluded
    /// point, best first. Each candidate's rank gets `U(0, 5)` of noise so
    /// close scores shuffle between calls.
    pub fn find_suitable_locations(
        &self,
        world: &World,
        excluded: &[GridPos],
        rng: &mut dyn RngCore,
    ) -> Vec<ScoredLocation> {
        let mut ranked: Vec<(f64, ScoredLocation)> = world
            .tiles()
            .iter()
            .zip(&self.scores)
            .filter_map(|(tile, score)| {
                let score = (*score)?;
                if tile.civilization.is_some() {
                    return None;
                }
                let pos = tile.pos();
                if excluded.iter().any(|p| p.distance(pos) < MIN_CITY_DISTANCE) {
                    return None;
                }
                Some(ScoredLocation { pos, score })
            })
            .map(|loc| (loc.score + rng.random_range(0.0..RANK_JITTER), loc))
            .collect();

        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.into_iter().map(|(_, loc)| loc).collect()
    }

    /// Top-ranked location, if any tile qualifies.
    pub fn best_location(
        &self,
        world: &World,
        excluded: &[GridPos],
        rng: &mut dyn RngCore,
    ) -> Option<ScoredLocation> {
        self.find_suitable_locations(world, excluded, rng)
            .into_iter()
            .next()
    }
}

/// Fertility plus proximity-weighted bonuses for water, resources,
/// mountains and open land within [`SITE_RADIUS`].
pub fn site_score(world: &World, pos: GridPos) -> f64 {
    let radius = f64::from(SITE_RADIUS);
    let mut score = world[pos].fertility * 10.0;

    let mut near_water = false;
    let mut near_resources = 0;
    let mut near_mountains = 0;
    let mut open_land = 0;

    for other in world.circle(pos, SITE_RADIUS) {
        let tile = &world[other];
        let weight = 1.0 - pos.distance(other) / radius;

        if tile.is_water() {
            near_water = true;
            score += 2.0 * weight;
        }
        if tile.resource.is_some() {
            near_resources += 1;
            score += 3.0 * weight;
        }
        if tile.terrain == Terrain::Mountains {
            near_mountains += 1;
            score += weight;
        }
        if tile.terrain.is_expansion_land() {
            open_land += 1;
            score += weight;
        }
    }

    if near_water && near_resources > 0 && near_mountains > 0 {
        score *= 1.5;
    }

    score + f64::from(open_land) / (PI * radius * radius) * 5.0
}
