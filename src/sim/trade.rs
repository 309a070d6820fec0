//! Trade links derived from settlement layout and alliances.
//!
//! Routes carry no simulation weight; they are computed on demand from a
//! civilization snapshot for whoever draws or inspects the map.

use serde::{Deserialize, Serialize};

use crate::id::{CityId, CivId};
use crate::model::{City, Civilization, Position, RelationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RouteKind {
    /// Between two cities of the same civilization.
    Domestic,
    /// Between the selected civilization's capital and an ally's.
    Foreign,
    /// Between allied capitals when nothing is selected.
    Major,
}

string_enum!(RouteKind {
    Domestic => "domestic",
    Foreign => "foreign",
    Major => "major",
});

/// One end of a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteEnd {
    pub civilization: CivId,
    pub city: CityId,
    pub position: Position,
}

impl RouteEnd {
    fn at(civ: &Civilization, city: &City) -> Self {
        Self {
            civilization: civ.id,
            city: city.id,
            position: city.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRoute {
    pub from: RouteEnd,
    pub to: RouteEnd,
    pub kind: RouteKind,
}

/// Routes to show for `selected`.
///
/// With a selection: every pair of its cities, then a capital-to-capital
/// route to each civilization that regards it as an ally. Without one:
/// capital-to-capital routes for every allied pair, where the alliance is
/// read from the earlier civilization's side.
pub fn trade_routes(civilizations: &[Civilization], selected: Option<CivId>) -> Vec<TradeRoute> {
    let mut routes = Vec::new();

    let Some(selected) = selected else {
        for (i, a) in civilizations.iter().enumerate() {
            for b in &civilizations[i + 1..] {
                if !regards_as_ally(a, b.id) {
                    continue;
                }
                if let Some(route) = capital_route(a, b, RouteKind::Major) {
                    routes.push(route);
                }
            }
        }
        return routes;
    };

    let Some(civ) = civilizations.iter().find(|c| c.id == selected) else {
        return routes;
    };

    for (i, a) in civ.cities.iter().enumerate() {
        for b in &civ.cities[i + 1..] {
            routes.push(TradeRoute {
                from: RouteEnd::at(civ, a),
                to: RouteEnd::at(civ, b),
                kind: RouteKind::Domestic,
            });
        }
    }

    for ally in civilizations
        .iter()
        .filter(|other| other.id != selected && regards_as_ally(other, selected))
    {
        if let Some(route) = capital_route(civ, ally, RouteKind::Foreign) {
            routes.push(route);
        }
    }

    routes
}

fn regards_as_ally(civ: &Civilization, other: CivId) -> bool {
    civ.relation(other)
        .is_some_and(|r| r.status == RelationStatus::Ally)
}

fn capital_route(a: &Civilization, b: &Civilization, kind: RouteKind) -> Option<TradeRoute> {
    Some(TradeRoute {
        from: RouteEnd::at(a, a.capital()?),
        to: RouteEnd::at(b, b.capital()?),
        kind,
    })
}
