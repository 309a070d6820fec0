use thiserror::Error;

/// Side length of the legacy terrain blocks whose seams the elevation
/// blend softens.
pub const CHUNK_SIZE: u32 = 50;

/// Configuration for world generation.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldGenConfig {
    /// Noise seed. `None` draws a fresh seed from the generation RNG.
    pub seed: Option<i64>,
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Civilizations to attempt to place.
    pub num_civilizations: usize,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: None,
            width: CHUNK_SIZE * 4,
            height: CHUNK_SIZE * 4,
            num_civilizations: 10,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("world must have at least one tile (got {width}x{height})")]
    EmptyMap { width: u32, height: u32 },
}

impl WorldGenConfig {
    pub fn seeded(seed: i64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyMap {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// River sources to attempt: one per twenty tiles of combined edge length.
    pub fn river_attempts(&self) -> u32 {
        (self.width + self.height) / 20
    }
}
