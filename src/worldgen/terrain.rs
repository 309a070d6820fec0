use crate::model::{Biome, Terrain, Tile};

use super::config::CHUNK_SIZE;
use super::noise::NoiseField;

/// The five independent noise fields a world is built from, seeded
/// `seed..=seed + 4`.
#[derive(Debug, Clone, Copy)]
pub struct NoiseLayers {
    elevation: NoiseField,
    moisture: NoiseField,
    temperature: NoiseField,
    continent: NoiseField,
    detail: NoiseField,
}

impl NoiseLayers {
    pub fn new(seed: i64) -> Self {
        Self {
            elevation: NoiseField::new(seed),
            moisture: NoiseField::new(seed.wrapping_add(1)),
            temperature: NoiseField::new(seed.wrapping_add(2)),
            continent: NoiseField::new(seed.wrapping_add(3)),
            detail: NoiseField::new(seed.wrapping_add(4)),
        }
    }
}

/// Raw climate values for one tile, clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Climate {
    pub elevation: f64,
    pub moisture: f64,
    pub temperature: f64,
}

pub fn sample_climate(layers: &NoiseLayers, x: u32, y: u32, width: u32, height: u32) -> Climate {
    let nx = f64::from(x) / f64::from(width) - 0.5;
    let ny = f64::from(y) / f64::from(height) - 0.5;

    let chunk_x = f64::from(x / CHUNK_SIZE);
    let chunk_z = f64::from(y / CHUNK_SIZE);
    let local_x = f64::from(x % CHUNK_SIZE);
    let local_z = f64::from(y % CHUNK_SIZE);
    let chunk = f64::from(CHUNK_SIZE);

    let chunk_variation = (chunk_x * 0.5).sin() * (chunk_z * 0.5).cos() * 0.1;

    let c = |s: f64| layers.continent.sample(nx * s, ny * s);
    let continent = (c(2.0) * 0.5 + c(4.0) * 0.3 + c(8.0) * 0.2) * 0.5 + 0.5;

    let e = |s: f64| layers.elevation.sample(nx * s, ny * s);
    let detail = layers.detail.sample(nx * 24.0, ny * 24.0);
    let mut elevation =
        (e(3.0) * 0.4 + e(6.0) * 0.3 + e(12.0) * 0.2 + detail * 0.1) * continent + chunk_variation;

    let blend = smoothstep_range(local_x, 0.0, chunk)
        * smoothstep_range(local_z, 0.0, chunk)
        * smoothstep_range(chunk - local_x, 0.0, chunk)
        * smoothstep_range(chunk - local_z, 0.0, chunk);
    elevation *= 0.8 + blend * 0.2;

    let m = |s: f64| layers.moisture.sample(nx * s, ny * s);
    let moisture = (m(4.0) * 0.5 + m(8.0) * 0.3 + m(16.0) * 0.2) * 0.5 + 0.5;

    let latitude = 1.0 - (ny * 2.0).abs();
    let temperature =
        latitude * 0.8 + layers.temperature.sample(nx * 5.0, ny * 5.0) * 0.2 - elevation * 0.3;

    Climate {
        elevation: elevation.clamp(0.0, 1.0),
        moisture: moisture.clamp(0.0, 1.0),
        temperature: temperature.clamp(0.0, 1.0),
    }
}

fn smoothstep_range(x: f64, min: f64, max: f64) -> f64 {
    let t = ((x - min) / (max - min)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn classify_terrain(elevation: f64, moisture: f64) -> Terrain {
    if elevation < 0.3 {
        Terrain::Water
    } else if elevation < 0.4 {
        // Coastline
        if moisture > 0.6 {
            Terrain::Plains
        } else {
            Terrain::Desert
        }
    } else if elevation < 0.6 {
        if moisture > 0.6 {
            Terrain::Forest
        } else if moisture > 0.3 {
            Terrain::Plains
        } else {
            Terrain::Desert
        }
    } else {
        Terrain::Mountains
    }
}

pub fn classify_biome(temperature: f64, moisture: f64) -> Biome {
    if temperature < 0.2 {
        Biome::Cold
    } else if temperature < 0.4 {
        if moisture > 0.5 { Biome::Temperate } else { Biome::Cold }
    } else if temperature < 0.7 {
        if moisture > 0.3 { Biome::Temperate } else { Biome::Arid }
    } else if moisture > 0.4 {
        Biome::Tropical
    } else {
        Biome::Arid
    }
}

pub fn fertility(terrain: Terrain, biome: Biome, climate: &Climate) -> f64 {
    let base = match terrain {
        Terrain::Plains => climate.moisture * 0.7 + climate.temperature * 0.3,
        Terrain::Forest => climate.moisture * 0.8 + climate.temperature * 0.2,
        Terrain::Mountains => climate.moisture * 0.3 * (1.0 - climate.elevation),
        Terrain::Water => 0.2,
        Terrain::Desert => climate.moisture * 0.1,
    };
    (base * biome.fertility_multiplier()).clamp(0.0, 1.0)
}

/// Build the fully classified tile at `(x, y)`.
pub fn build_tile(layers: &NoiseLayers, x: u32, y: u32, width: u32, height: u32) -> Tile {
    let climate = sample_climate(layers, x, y, width, height);
    let terrain = classify_terrain(climate.elevation, climate.moisture);
    let biome = classify_biome(climate.temperature, climate.moisture);
    Tile {
        x,
        y,
        elevation: climate.elevation,
        moisture: climate.moisture,
        temperature: climate.temperature,
        terrain,
        biome,
        fertility: fertility(terrain, biome, &climate),
        resource: None,
        civilization: None,
    }
}
