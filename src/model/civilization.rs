use std::fmt;

use serde::{Deserialize, Serialize};

use super::world::{GridPos, Position};
use crate::id::{CityId, CivId, ResourceId, WarId};

/// Display color, kept as HSL components so the presentation layer can
/// restyle it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    /// Palette slot `index`: hues spaced 45 degrees apart, 70% saturation,
    /// 50% lightness. Slots repeat after eight civilizations.
    pub fn palette(index: usize) -> Self {
        Self {
            hue: ((index * 360) as f64 / 8.0) % 360.0,
            saturation: 70.0,
            lightness: 50.0,
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub location: GridPos,
    pub position: Position,
    pub population: u64,
    pub is_capital: bool,
    pub founded_year: u32,
}

// ---------------------------------------------------------------------------
// Army
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum UnitKind {
    Infantry,
    Cavalry,
    Archers,
}

string_enum!(UnitKind {
    Infantry => "infantry",
    Cavalry => "cavalry",
    Archers => "archers",
});

impl UnitKind {
    /// Share of the population under arms.
    pub fn levy_fraction(self) -> f64 {
        match self {
            UnitKind::Infantry => 0.01,
            UnitKind::Cavalry => 0.005,
            UnitKind::Archers => 0.008,
        }
    }

    pub fn strength(self) -> f64 {
        match self {
            UnitKind::Infantry => 1.0,
            UnitKind::Cavalry => 2.0,
            UnitKind::Archers => 1.5,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            UnitKind::Infantry => "Infantry",
            UnitKind::Cavalry => "Cavalry",
            UnitKind::Archers => "Archers",
        }
    }

    pub fn levy(self, population: u64) -> u64 {
        (population as f64 * self.levy_fraction()).floor() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmyUnit {
    pub kind: UnitKind,
    pub name: String,
    pub count: u64,
    pub strength: f64,
}

impl ArmyUnit {
    pub fn raise(kind: UnitKind, population: u64) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
            count: kind.levy(population),
            strength: kind.strength(),
        }
    }
}

/// One unit of each kind, sized from `population`.
pub fn raise_army(population: u64) -> Vec<ArmyUnit> {
    UnitKind::ALL
        .iter()
        .map(|&kind| ArmyUnit::raise(kind, population))
        .collect()
}

/// `min(10, floor(Σ count·strength / population · 100))`; zero for an
/// empty civilization.
pub fn military_strength(army: &[ArmyUnit], population: u64) -> u32 {
    if population == 0 {
        return 0;
    }
    let power: f64 = army.iter().map(|u| u.count as f64 * u.strength).sum();
    ((power / population as f64) * 100.0).floor().clamp(0.0, 10.0) as u32
}

// ---------------------------------------------------------------------------
// Diplomacy
// ---------------------------------------------------------------------------

/// One side's record of a war. The opponent holds the mirror entry with the
/// same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct War {
    pub id: WarId,
    pub enemy: CivId,
    pub start_year: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RelationStatus {
    Neutral,
    Ally,
    Enemy,
}

string_enum!(RelationStatus {
    Neutral => "neutral",
    Ally => "ally",
    Enemy => "enemy",
});

pub const ALLY_THRESHOLD: f64 = 50.0;
pub const ENEMY_THRESHOLD: f64 = -50.0;

impl RelationStatus {
    pub fn from_value(value: f64) -> Self {
        if value > ALLY_THRESHOLD {
            RelationStatus::Ally
        } else if value < ENEMY_THRESHOLD {
            RelationStatus::Enemy
        } else {
            RelationStatus::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub civilization: CivId,
    pub status: RelationStatus,
    /// Clamped to [-100, 100].
    pub value: f64,
}

impl Relation {
    pub fn new(civilization: CivId, value: f64) -> Self {
        let value = value.clamp(-100.0, 100.0);
        Self {
            civilization,
            status: RelationStatus::from_value(value),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Civilization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Civilization {
    pub id: CivId,
    pub name: String,
    pub color: Hsl,
    /// Marker position above the capital.
    pub position: Position,
    pub size: f64,
    /// Always the sum of the cities' populations.
    pub population: u64,
    /// Percent per year before happiness and health modifiers.
    pub population_growth: f64,
    pub cities: Vec<City>,
    pub ruler: String,
    pub government: String,
    pub technology_level: u32,
    pub military_strength: u32,
    pub economy_strength: f64,
    pub happiness: f64,
    pub health: f64,
    pub resources: Vec<ResourceId>,
    pub army: Vec<ArmyUnit>,
    pub wars: Vec<War>,
    pub relations: Vec<Relation>,
}

impl Civilization {
    pub fn capital(&self) -> Option<&City> {
        self.cities.iter().find(|c| c.is_capital)
    }

    pub fn city_population(&self) -> u64 {
        self.cities.iter().map(|c| c.population).sum()
    }

    pub fn relation(&self, other: CivId) -> Option<&Relation> {
        self.relations.iter().find(|r| r.civilization == other)
    }

    pub fn relation_mut(&mut self, other: CivId) -> Option<&mut Relation> {
        self.relations.iter_mut().find(|r| r.civilization == other)
    }

    pub fn at_war_with(&self, other: CivId) -> bool {
        self.wars.iter().any(|w| w.enemy == other)
    }

    /// Resize every unit from the current population and recompute
    /// `military_strength`.
    pub fn levy_army(&mut self) {
        let population = self.population;
        for unit in &mut self.army {
            unit.count = unit.kind.levy(population);
        }
        self.refresh_military_strength();
    }

    pub fn refresh_military_strength(&mut self) {
        self.military_strength = military_strength(&self.army, self.population);
    }

    /// Remove `loss` people, split across cities in proportion to their
    /// share of the pre-loss total. Each city's share is floored, and the
    /// civilization total drops by exactly what the cities lost.
    pub fn apply_population_loss(&mut self, loss: u64) -> u64 {
        let total = self.city_population();
        if total == 0 || loss == 0 {
            return 0;
        }
        let loss = loss.min(total);
        let mut removed = 0;
        for city in &mut self.cities {
            let share = city.population as f64 / total as f64;
            let city_loss = ((loss as f64 * share).floor() as u64).min(city.population);
            city.population -= city_loss;
            removed += city_loss;
        }
        self.population = self.population.saturating_sub(removed);
        self.size = (self.population as f64).sqrt() / 10.0;
        removed
    }

    /// Multiply every unit's head count by `factor`, flooring.
    pub fn deplete_army(&mut self, factor: f64) {
        for unit in &mut self.army {
            unit.count = (unit.count as f64 * factor).floor() as u64;
        }
    }
}

pub fn clamp_stat(value: f64) -> f64 {
    value.clamp(1.0, 10.0)
}
