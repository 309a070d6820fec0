use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::terrain::{Biome, Terrain};
use crate::id::{CivId, ResourceId};

/// Integer grid coordinates of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in tile units.
    pub fn distance(self, other: GridPos) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// One cell of the world grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub elevation: f64,
    pub moisture: f64,
    pub temperature: f64,
    pub terrain: Terrain,
    pub biome: Biome,
    pub fertility: f64,
    pub resource: Option<ResourceId>,
    pub civilization: Option<CivId>,
}

impl Tile {
    pub fn pos(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    pub fn is_water(&self) -> bool {
        self.terrain.is_water()
    }
}

/// The tile grid. Owned by the caller and mutated in place by resource
/// placement, territory claims and river carving; never copied per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: u32,
    pub height: u32,
    pub seed: i64,
    tiles: Vec<Tile>,
}

/// 8-connected neighbourhood, in the order rivers probe it.
const NEIGHBORS_8: [(i64, i64); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

const NEIGHBORS_4: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl World {
    /// Assemble a world from a row-major tile list.
    ///
    /// # Panics
    /// Panics if `tiles.len() != width * height`.
    pub fn from_tiles(width: u32, height: u32, seed: i64, tiles: Vec<Tile>) -> Self {
        assert_eq!(
            tiles.len(),
            width as usize * height as usize,
            "tile count does not match {width}x{height}"
        );
        Self {
            width,
            height,
            seed,
            tiles,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn tile(&self, pos: GridPos) -> Option<&Tile> {
        self.index_of(pos).map(|i| &self.tiles[i])
    }

    pub fn tile_mut(&mut self, pos: GridPos) -> Option<&mut Tile> {
        self.index_of(pos).map(move |i| &mut self.tiles[i])
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn index_of(&self, pos: GridPos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// `pos` shifted by `(dx, dy)`, if still on the map.
    pub fn offset(&self, pos: GridPos, dx: i64, dy: i64) -> Option<GridPos> {
        let x = i64::from(pos.x) + dx;
        let y = i64::from(pos.y) + dy;
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(GridPos::new(x as u32, y as u32))
    }

    pub fn neighbors8(&self, pos: GridPos) -> impl Iterator<Item = GridPos> + '_ {
        NEIGHBORS_8
            .iter()
            .filter_map(move |&(dx, dy)| self.offset(pos, dx, dy))
    }

    pub fn neighbors4(&self, pos: GridPos) -> impl Iterator<Item = GridPos> + '_ {
        NEIGHBORS_4
            .iter()
            .filter_map(move |&(dx, dy)| self.offset(pos, dx, dy))
    }

    /// Tiles in the square window `center ± radius`, clipped to the map, row-major.
    pub fn window(&self, center: GridPos, radius: u32) -> impl Iterator<Item = GridPos> + '_ {
        let min_x = center.x.saturating_sub(radius);
        let min_y = center.y.saturating_sub(radius);
        let max_x = center.x.saturating_add(radius).min(self.width.saturating_sub(1));
        let max_y = center.y.saturating_add(radius).min(self.height.saturating_sub(1));
        (min_y..=max_y)
            .flat_map(move |y| (min_x..=max_x).map(move |x| GridPos::new(x, y)))
            .filter(move |pos| self.in_bounds(*pos))
    }

    /// Tiles within Euclidean `radius` of `center`.
    pub fn circle(&self, center: GridPos, radius: u32) -> impl Iterator<Item = GridPos> + '_ {
        self.window(center, radius)
            .filter(move |pos| pos.distance(center) <= f64::from(radius))
    }

    /// Mark every non-water tile within `radius` of `center` as owned by `civ`.
    /// Returns how many tiles were written.
    pub fn claim_circle(&mut self, center: GridPos, radius: u32, civ: CivId) -> usize {
        let targets: Vec<GridPos> = self.circle(center, radius).collect();
        let mut claimed = 0;
        for pos in targets {
            let tile = &mut self[pos];
            if !tile.is_water() {
                tile.civilization = Some(civ);
                claimed += 1;
            }
        }
        claimed
    }

    /// Positions owned by `civ`, row-major.
    pub fn territory_of(&self, civ: CivId) -> Vec<GridPos> {
        self.tiles
            .iter()
            .filter(|t| t.civilization == Some(civ))
            .map(Tile::pos)
            .collect()
    }

    pub fn owned_tile_count(&self, civ: CivId) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.civilization == Some(civ))
            .count()
    }

    /// Row-major copy of tile ownership.
    pub fn ownership(&self) -> Vec<Option<CivId>> {
        self.tiles.iter().map(|t| t.civilization).collect()
    }

    /// Fraction of tiles that are not water.
    pub fn land_ratio(&self) -> f64 {
        if self.tiles.is_empty() {
            return 0.0;
        }
        let land = self.tiles.iter().filter(|t| !t.is_water()).count();
        land as f64 / self.tiles.len() as f64
    }

    /// 3D embedding used by the presentation layer: the grid is centred on
    /// the origin and height is elevation scaled by 10.
    pub fn embed(&self, pos: GridPos, lift: f64) -> Position {
        let elevation = self.tile(pos).map(|t| t.elevation).unwrap_or(0.0);
        Position {
            x: f64::from(pos.x) - f64::from(self.width) / 2.0,
            y: elevation * 10.0 + lift,
            z: f64::from(pos.y) - f64::from(self.height) / 2.0,
        }
    }
}

impl Index<GridPos> for World {
    type Output = Tile;

    fn index(&self, pos: GridPos) -> &Tile {
        let i = pos.y as usize * self.width as usize + pos.x as usize;
        &self.tiles[i]
    }
}

impl IndexMut<GridPos> for World {
    fn index_mut(&mut self, pos: GridPos) -> &mut Tile {
        let i = pos.y as usize * self.width as usize + pos.x as usize;
        &mut self.tiles[i]
    }
}

/// Point in the presentation layer's 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
