use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::id::{CityId, CivId, EventId, WarId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

string_enum!(Season {
    Spring => "spring",
    Summer => "summer",
    Autumn => "autumn",
    Winter => "winter",
});

impl Season {
    /// The following season; winter wraps to spring.
    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Coarse grouping used for filtering and coloring timelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EventCategory {
    World,
    Civilization,
    War,
    Discovery,
    Disaster,
    Cultural,
}

string_enum!(EventCategory {
    World => "world",
    Civilization => "civilization",
    War => "war",
    Discovery => "discovery",
    Disaster => "disaster",
    Cultural => "cultural",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DisasterKind {
    Earthquake,
    Flood,
    Drought,
    Plague,
    Famine,
}

string_enum!(DisasterKind {
    Earthquake => "earthquake",
    Flood => "flood",
    Drought => "drought",
    Plague => "plague",
    Famine => "famine",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// First entry of every history.
    Dawn,
    Discovery {
        technology_level: u32,
    },
    CityFounded {
        city: CityId,
        name: String,
    },
    Alliance {
        partner: CivId,
    },
    WarDeclared {
        war: WarId,
    },
    WarEnded {
        war: WarId,
        victor: CivId,
    },
    Battle {
        war: WarId,
        victor: CivId,
        defeated: CivId,
    },
    Cultural,
    Disaster {
        disaster: DisasterKind,
    },
    /// Global flavor with no mechanical effect.
    Omen,
}

impl EventKind {
    pub fn category(&self) -> EventCategory {
        match self {
            EventKind::Dawn | EventKind::Omen => EventCategory::World,
            EventKind::CityFounded { .. } | EventKind::Alliance { .. } => {
                EventCategory::Civilization
            }
            EventKind::WarDeclared { .. } | EventKind::WarEnded { .. } | EventKind::Battle { .. } => {
                EventCategory::War
            }
            EventKind::Discovery { .. } => EventCategory::Discovery,
            EventKind::Disaster { .. } => EventCategory::Disaster,
            EventKind::Cultural => EventCategory::Cultural,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    pub id: EventId,
    pub year: u32,
    pub season: Season,
    pub description: String,
    pub kind: EventKind,
    pub civilization: Option<CivId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub involved: Vec<CivId>,
}

impl HistoricalEvent {
    pub fn category(&self) -> EventCategory {
        self.kind.category()
    }

    /// Whether the event belongs to `civ` on a timeline: either it is the
    /// acting civilization, or a war event lists it as a participant.
    pub fn concerns(&self, civ: CivId) -> bool {
        self.civilization == Some(civ)
            || (self.category() == EventCategory::War && self.involved.contains(&civ))
    }
}

/// Append-only history, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<HistoricalEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: HistoricalEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = HistoricalEvent>) {
        self.events.extend(events);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoricalEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[HistoricalEvent] {
        &self.events
    }

    pub fn in_year(&self, year: u32) -> impl Iterator<Item = &HistoricalEvent> {
        self.events.iter().filter(move |e| e.year == year)
    }

    /// Timeline for one civilization, newest year first. Events within a
    /// year keep their insertion order.
    pub fn for_civilization(&self, civ: CivId) -> Vec<&HistoricalEvent> {
        let mut events: Vec<&HistoricalEvent> =
            self.events.iter().filter(|e| e.concerns(civ)).collect();
        events.sort_by(|a, b| b.year.cmp(&a.year));
        events
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a HistoricalEvent;
    type IntoIter = std::slice::Iter<'a, HistoricalEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

pub fn query_events(log: &EventLog, civ: CivId) -> Vec<&HistoricalEvent> {
    log.for_civilization(civ)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: u64, year: u32, kind: EventKind, civ: Option<CivId>, involved: &[CivId]) -> HistoricalEvent {
        HistoricalEvent {
            id: EventId(id),
            year,
            season: Season::Spring,
            description: format!("event {id}"),
            kind,
            civilization: civ,
            involved: involved.to_vec(),
        }
    }

    #[test]
    fn seasons_cycle() {
        assert_eq!(Season::Winter.next(), Season::Spring);
        assert_eq!(Season::Spring.next().next(), Season::Autumn);
    }

    #[test]
    fn categories() {
        assert_eq!(EventKind::Dawn.category(), EventCategory::World);
        assert_eq!(
            EventKind::Battle { war: WarId(1), victor: CivId(0), defeated: CivId(1) }.category(),
            EventCategory::War
        );
        assert_eq!(
            EventKind::Disaster { disaster: DisasterKind::Flood }.category(),
            EventCategory::Disaster
        );
    }

    #[test]
    fn query_includes_wars_and_sorts_descending() {
        let a = CivId(0);
        let b = CivId(1);
        let mut log = EventLog::new();
        log.push(event(1, 3, EventKind::Cultural, Some(a), &[]));
        log.push(event(2, 5, EventKind::WarDeclared { war: WarId(9) }, None, &[a, b]));
        log.push(event(3, 5, EventKind::Cultural, Some(b), &[]));
        log.push(event(4, 1, EventKind::Discovery { technology_level: 2 }, Some(a), &[]));
        log.push(event(5, 5, EventKind::Omen, None, &[]));
        log.push(event(6, 3, EventKind::Alliance { partner: b }, Some(a), &[a, b]));

        let ids: Vec<u64> = query_events(&log, a).iter().map(|e| e.id.raw()).collect();
        assert_eq!(ids, vec![2, 1, 6, 4]);
    }

    #[test]
    fn alliance_only_counts_for_the_acting_civ() {
        let mut log = EventLog::new();
        log.push(event(1, 1, EventKind::Alliance { partner: CivId(1) }, Some(CivId(0)), &[CivId(0), CivId(1)]));
        assert!(log.for_civilization(CivId(1)).is_empty());
    }

    #[test]
    fn event_serializes_with_tagged_kind() {
        let e = event(7, 2, EventKind::Disaster { disaster: DisasterKind::Plague }, Some(CivId(3)), &[]);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["kind"]["type"], "disaster");
        assert_eq!(json["kind"]["disaster"], "plague");
        assert_eq!(json["season"], "spring");
        assert_eq!(json["civilization"], 3);
        assert!(json.get("involved").is_none());
    }
}
