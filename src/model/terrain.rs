use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Terrain {
    Water,
    Plains,
    Forest,
    Mountains,
    Desert,
}

string_enum!(Terrain {
    Water => "water",
    Plains => "plains",
    Forest => "forest",
    Mountains => "mountains",
    Desert => "desert",
});

impl Terrain {
    pub fn is_water(self) -> bool {
        self == Terrain::Water
    }

    /// Open land a civilization can grow into.
    pub fn is_expansion_land(self) -> bool {
        matches!(self, Terrain::Plains | Terrain::Forest)
    }
}

// ---------------------------------------------------------------------------
// Biome
// ---------------------------------------------------------------------------

/// Climate classification, independent of terrain shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Biome {
    Temperate,
    Tropical,
    Arid,
    Cold,
}

string_enum!(Biome {
    Temperate => "temperate",
    Tropical => "tropical",
    Arid => "arid",
    Cold => "cold",
});

impl Biome {
    /// Multiplier applied to a tile's terrain fertility.
    pub fn fertility_multiplier(self) -> f64 {
        match self {
            Biome::Cold => 0.4,
            Biome::Arid => 0.2,
            Biome::Tropical => 1.3,
            Biome::Temperate => 1.0,
        }
    }
}
