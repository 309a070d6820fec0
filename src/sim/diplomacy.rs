use rand::Rng;

use super::context::TickContext;
use super::system::{SimSystem, SystemScope};
use crate::id::CivId;
use crate::model::{EventKind, RelationStatus, War};

/// Maximum yearly drift of a relation value, either way.
const DRIFT: f64 = 5.0;
/// Chance that turning hostile starts a war.
const WAR_CHANCE: f64 = 0.3;

/// A status change that produces an event.
enum Shift {
    Alliance(CivId),
    War(CivId),
}

/// Drifts the focused civilization's relations, re-derives their status,
/// and turns fresh hostility into war.
pub struct DiplomacySystem;

impl SimSystem for DiplomacySystem {
    fn name(&self) -> &str {
        "diplomacy"
    }

    fn scope(&self) -> SystemScope {
        SystemScope::Civilization
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let Some(focus) = ctx.focus else { return };
        let known = ctx.civilizations.len();
        let Some(civ) = ctx.civilizations.get_mut(focus.index()) else {
            return;
        };

        let mut shifts = Vec::new();
        for i in 0..civ.relations.len() {
            let other = civ.relations[i].civilization;
            if other.index() >= known || other == focus {
                tracing::trace!(civ = %focus, %other, "relation with unknown civilization");
                continue;
            }

            let relation = &mut civ.relations[i];
            relation.value =
                (relation.value + ctx.rng.random_range(-DRIFT..DRIFT)).clamp(-100.0, 100.0);
            let previous = relation.status;
            let status = RelationStatus::from_value(relation.value);
            relation.status = status;

            match status {
                RelationStatus::Ally if previous != RelationStatus::Ally => {
                    shifts.push(Shift::Alliance(other));
                }
                RelationStatus::Enemy if previous != RelationStatus::Enemy => {
                    let roll = ctx.rng.random_range(0.0..1.0);
                    if roll < WAR_CHANCE && !civ.at_war_with(other) {
                        shifts.push(Shift::War(other));
                    }
                }
                _ => {}
            }
        }

        for shift in shifts {
            match shift {
                Shift::Alliance(other) => {
                    let description = format!(
                        "{} and {} form an alliance",
                        ctx.civilizations[focus.index()].name,
                        ctx.civilizations[other.index()].name
                    );
                    ctx.record(
                        EventKind::Alliance { partner: other },
                        description,
                        Some(focus),
                        vec![focus, other],
                    );
                }
                Shift::War(other) => {
                    let war = ctx.ids.next_war();
                    let year = ctx.year;
                    ctx.civilizations[focus.index()].wars.push(War {
                        id: war,
                        enemy: other,
                        start_year: year,
                    });
                    ctx.civilizations[other.index()].wars.push(War {
                        id: war,
                        enemy: focus,
                        start_year: year,
                    });
                    let description = format!(
                        "War breaks out between {} and {}",
                        ctx.civilizations[focus.index()].name,
                        ctx.civilizations[other.index()].name
                    );
                    ctx.record(
                        EventKind::WarDeclared { war },
                        description,
                        None,
                        vec![focus, other],
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventCategory, Relation};
    use crate::testutil::{civ_with_cities, tick_civ_system};

    fn pair(value: f64, status: RelationStatus) -> Vec<crate::model::Civilization> {
        let mut a = civ_with_cities(CivId(0), &[5000]);
        let mut b = civ_with_cities(CivId(1), &[5000]);
        a.relations.push(Relation {
            civilization: CivId(1),
            status,
            value,
        });
        b.relations.push(Relation {
            civilization: CivId(0),
            status,
            value,
        });
        vec![a, b]
    }

    #[test]
    fn forced_hostility_turns_enemy_next_tick() {
        for seed in 0..50 {
            let civs = pair(-60.0, RelationStatus::Neutral);
            let (civs, _) = tick_civ_system(&mut DiplomacySystem, civs, CivId(0), 5, seed);
            let rel = civs[0].relation(CivId(1)).unwrap();
            assert_eq!(rel.status, RelationStatus::Enemy);
            assert!((-65.0..=-55.0).contains(&rel.value));
            // Only the focused side drifts.
            assert_eq!(civs[1].relation(CivId(0)).unwrap().value, -60.0);
        }
    }

    #[test]
    fn war_declaration_is_mirrored() {
        let mut wars = 0;
        for seed in 0..200 {
            let civs = pair(-60.0, RelationStatus::Neutral);
            let (civs, events) = tick_civ_system(&mut DiplomacySystem, civs, CivId(0), 5, seed);
            if civs[0].wars.is_empty() {
                assert!(civs[1].wars.is_empty());
                assert!(events.is_empty());
                continue;
            }
            wars += 1;
            let ours = &civs[0].wars[0];
            let theirs = &civs[1].wars[0];
            assert_eq!(ours.id, theirs.id);
            assert_eq!(ours.enemy, CivId(1));
            assert_eq!(theirs.enemy, CivId(0));
            assert_eq!(ours.start_year, 5);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].category(), EventCategory::War);
            assert_eq!(events[0].civilization, None);
            assert_eq!(events[0].involved, vec![CivId(0), CivId(1)]);
            assert_eq!(events[0].kind, EventKind::WarDeclared { war: ours.id });
        }
        // 30% per trial.
        assert!((30..=90).contains(&wars), "{wars} wars");
    }

    #[test]
    fn already_hostile_does_not_redeclare() {
        for seed in 0..50 {
            let civs = pair(-80.0, RelationStatus::Enemy);
            let (civs, events) = tick_civ_system(&mut DiplomacySystem, civs, CivId(0), 5, seed);
            assert!(civs[0].wars.is_empty());
            assert!(events.is_empty());
        }
    }

    #[test]
    fn warming_relation_forms_alliance() {
        for seed in 0..50 {
            let civs = pair(60.0, RelationStatus::Neutral);
            let (civs, events) = tick_civ_system(&mut DiplomacySystem, civs, CivId(0), 2, seed);
            assert_eq!(civs[0].relation(CivId(1)).unwrap().status, RelationStatus::Ally);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].kind, EventKind::Alliance { partner: CivId(1) });
            assert_eq!(events[0].civilization, Some(CivId(0)));
            assert!(events[0].description.ends_with("form an alliance"));
        }
    }

    #[test]
    fn values_stay_clamped() {
        let civs = pair(-99.0, RelationStatus::Enemy);
        let mut civs = civs;
        for seed in 0..100 {
            let (next, _) = tick_civ_system(&mut DiplomacySystem, civs, CivId(0), 1, seed);
            civs = next;
            let v = civs[0].relation(CivId(1)).unwrap().value;
            assert!((-100.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn dangling_relation_is_skipped() {
        let mut civs = vec![civ_with_cities(CivId(0), &[5000])];
        civs[0].relations.push(Relation {
            civilization: CivId(7),
            status: RelationStatus::Neutral,
            value: -60.0,
        });
        let (civs, events) = tick_civ_system(&mut DiplomacySystem, civs, CivId(0), 1, 1);
        assert_eq!(civs[0].relations[0].value, -60.0);
        assert!(events.is_empty());
    }
}
