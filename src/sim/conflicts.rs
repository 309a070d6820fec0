use rand::Rng;

use super::context::TickContext;
use super::system::{SimSystem, SystemScope};
use crate::id::{CivId, WarId};
use crate::model::{EventKind, Relation, RelationStatus};

// --- Constants ---

const END_BASE_CHANCE: f64 = 0.1;
const END_CHANCE_PER_YEAR: f64 = 0.05;
const BATTLE_CHANCE: f64 = 0.3;
/// Battle roll applied to each side's military strength.
const BATTLE_LUCK: std::ops::Range<f64> = 0.8..1.2;
/// Army left to the loser of a battle.
const LOSER_ARMY_KEPT: f64 = 0.8;
const LOSER_POPULATION_LOSS: f64 = 0.02;
/// Post-war relations land in `[-PEACE_SPREAD, PEACE_SPREAD)`.
const PEACE_SPREAD: f64 = 20.0;

/// Resolves every active war once a year: peace or a battle.
pub struct ConflictSystem;

impl SimSystem for ConflictSystem {
    fn name(&self) -> &str {
        "conflicts"
    }

    fn scope(&self) -> SystemScope {
        SystemScope::World
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        for (war, a, b, start_year) in active_wars(ctx) {
            if b.index() >= ctx.civilizations.len() {
                tracing::trace!(%war, civ = %a, enemy = %b, "war against unknown civilization");
                continue;
            }
            let duration = ctx.year.saturating_sub(start_year);
            let end_chance = END_BASE_CHANCE + END_CHANCE_PER_YEAR * f64::from(duration);
            if ctx.rng.random_range(0.0..1.0) < end_chance {
                end_war(ctx, war, a, b);
            } else if ctx.rng.random_range(0.0..1.0) < BATTLE_CHANCE {
                fight_battle(ctx, war, a, b);
            }
        }
    }
}

/// Every war once, keyed by id, in civilization order.
fn active_wars(ctx: &TickContext) -> Vec<(WarId, CivId, CivId, u32)> {
    let mut seen = Vec::new();
    let mut wars = Vec::new();
    for civ in ctx.civilizations.iter() {
        for war in &civ.wars {
            if seen.contains(&war.id) {
                continue;
            }
            seen.push(war.id);
            wars.push((war.id, civ.id, war.enemy, war.start_year));
        }
    }
    wars
}

fn end_war(ctx: &mut TickContext, war: WarId, a: CivId, b: CivId) {
    let victor = if ctx.civilizations[a.index()].military_strength
        > ctx.civilizations[b.index()].military_strength
    {
        a
    } else {
        b
    };

    for (side, other) in [(a, b), (b, a)] {
        let value = ctx.rng.random_range(-PEACE_SPREAD..PEACE_SPREAD);
        let civ = &mut ctx.civilizations[side.index()];
        civ.wars.retain(|w| w.id != war);
        match civ.relation_mut(other) {
            Some(relation) => {
                relation.value = value;
                relation.status = RelationStatus::Neutral;
            }
            None => civ.relations.push(Relation::new(other, value)),
        }
    }

    let description = format!(
        "The war between {} and {} ends with {} victorious",
        ctx.civilizations[a.index()].name,
        ctx.civilizations[b.index()].name,
        ctx.civilizations[victor.index()].name
    );
    tracing::trace!(%war, %victor, "war ended");
    ctx.record(
        EventKind::WarEnded { war, victor },
        description,
        None,
        vec![a, b],
    );
}

fn fight_battle(ctx: &mut TickContext, war: WarId, a: CivId, b: CivId) {
    let a_roll =
        f64::from(ctx.civilizations[a.index()].military_strength) * ctx.rng.random_range(BATTLE_LUCK);
    let b_roll =
        f64::from(ctx.civilizations[b.index()].military_strength) * ctx.rng.random_range(BATTLE_LUCK);
    let (victor, defeated) = if a_roll > b_roll { (a, b) } else { (b, a) };

    let loser = &mut ctx.civilizations[defeated.index()];
    loser.deplete_army(LOSER_ARMY_KEPT);
    let loss = (loser.population as f64 * LOSER_POPULATION_LOSS).floor() as u64;
    let lost = loser.apply_population_loss(loss);
    tracing::trace!(%war, %victor, %defeated, lost, "battle");

    let description = format!(
        "{} defeats {} in a major battle",
        ctx.civilizations[victor.index()].name,
        ctx.civilizations[defeated.index()].name
    );
    ctx.record(
        EventKind::Battle {
            war,
            victor,
            defeated,
        },
        description,
        None,
        vec![a, b],
    );
}
