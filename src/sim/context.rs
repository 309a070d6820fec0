use rand::RngCore;

use crate::id::{CivId, EventId, IdGenerator};
use crate::model::{Civilization, EventKind, HistoricalEvent, Resource, Season, World};

/// Context passed to each system on every tick.
///
/// Bundled so we can add fields later without changing the `SimSystem`
/// trait signature.
pub struct TickContext<'a> {
    pub year: u32,
    /// The working copy for this year; the caller's list is untouched.
    pub civilizations: &'a mut Vec<Civilization>,
    pub resources: &'a [Resource],
    /// Shared grid, mutated in place.
    pub world: &'a mut World,
    pub rng: &'a mut dyn RngCore,
    /// Events emitted so far this year, in order.
    pub events: &'a mut Vec<HistoricalEvent>,
    pub ids: &'a mut IdGenerator,
    /// Civilization being processed by a civilization-scoped system.
    pub focus: Option<CivId>,
}

impl TickContext<'_> {
    /// Civilization under focus, if any.
    pub fn focused(&mut self) -> Option<&mut Civilization> {
        let focus = self.focus?;
        self.civilizations.get_mut(focus.index())
    }

    /// Append an event in a random season and return its id.
    pub fn record(
        &mut self,
        kind: EventKind,
        description: String,
        civilization: Option<CivId>,
        involved: Vec<CivId>,
    ) -> EventId {
        let id = self.ids.next_event();
        let season = Season::random(self.rng);
        self.events.push(HistoricalEvent {
            id,
            year: self.year,
            season,
            description,
            kind,
            civilization,
            involved,
        });
        id
    }
}
