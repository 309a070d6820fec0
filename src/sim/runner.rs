use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use super::context::TickContext;
use super::system::{SimSystem, SystemScope};
use super::{
    CityGrowthSystem, ConflictSystem, CultureSystem, DemographicsSystem, DiplomacySystem,
    DisasterSystem, EconomySystem, MilitarySystem, TechnologySystem, TerritorySystem,
    WorldEventSystem,
};
use crate::id::{CivId, IdGenerator};
use crate::model::{Civilization, EventLog, HistoricalEvent, Resource, World};

/// Configuration for a batch simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub start_year: u32,
    pub num_years: u32,
    pub seed: u64,
}

impl SimConfig {
    pub fn new(start_year: u32, num_years: u32, seed: u64) -> Self {
        Self {
            start_year,
            num_years,
            seed,
        }
    }
}

/// Everything one yearly step produced.
#[derive(Debug, Clone, PartialEq)]
pub struct YearOutcome {
    pub civilizations: Vec<Civilization>,
    pub resources: Vec<Resource>,
    /// New events, in emission order.
    pub events: Vec<HistoricalEvent>,
}

/// Run one year of every registered system over the given state.
///
/// Civilization-scoped systems run per civilization in list order (all of
/// them for the first civilization, then the second, ...). World-scoped
/// systems then run once each, in registration order. Returns the emitted
/// events.
pub fn dispatch_systems(
    year: u32,
    civilizations: &mut Vec<Civilization>,
    resources: &[Resource],
    world: &mut World,
    systems: &mut [Box<dyn SimSystem>],
    rng: &mut dyn RngCore,
    ids: &mut IdGenerator,
) -> Vec<HistoricalEvent> {
    let mut events = Vec::new();

    for index in 0..civilizations.len() {
        for system in systems.iter_mut() {
            if system.scope() != SystemScope::Civilization {
                continue;
            }
            let mut ctx = TickContext {
                year,
                civilizations,
                resources,
                world,
                rng,
                events: &mut events,
                ids,
                focus: Some(CivId(index)),
            };
            system.tick(&mut ctx);
        }
    }

    for system in systems.iter_mut() {
        if system.scope() != SystemScope::World {
            continue;
        }
        let mut ctx = TickContext {
            year,
            civilizations,
            resources,
            world,
            rng,
            events: &mut events,
            ids,
            focus: None,
        };
        system.tick(&mut ctx);
    }

    events
}

/// The yearly history engine: an ordered system pipeline plus the id
/// sequence shared by wars and events.
pub struct Simulation {
    systems: Vec<Box<dyn SimSystem>>,
    ids: IdGenerator,
}

impl Simulation {
    /// The full pipeline.
    pub fn new() -> Self {
        Self::with_systems(standard_systems())
    }

    pub fn with_systems(systems: Vec<Box<dyn SimSystem>>) -> Self {
        Self {
            systems,
            ids: IdGenerator::new(),
        }
    }

    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Advance history by one year.
    ///
    /// `civilizations` and `resources` are copied and the copies returned;
    /// the caller's slices are never touched. `world` is mutated in place
    /// (territory claims), so callers that keep snapshots of it must clone
    /// before calling.
    pub fn advance_year(
        &mut self,
        year: u32,
        civilizations: &[Civilization],
        resources: &[Resource],
        world: &mut World,
        rng: &mut dyn RngCore,
    ) -> YearOutcome {
        let mut civilizations = civilizations.to_vec();
        let resources = resources.to_vec();
        let events = dispatch_systems(
            year,
            &mut civilizations,
            &resources,
            world,
            &mut self.systems,
            rng,
            &mut self.ids,
        );
        YearOutcome {
            civilizations,
            resources,
            events,
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

/// Pipeline systems in their fixed order.
pub fn standard_systems() -> Vec<Box<dyn SimSystem>> {
    vec![
        Box::new(DemographicsSystem),
        Box::new(TechnologySystem),
        Box::new(CityGrowthSystem),
        Box::new(EconomySystem),
        Box::new(MilitarySystem),
        Box::new(DiplomacySystem),
        Box::new(CultureSystem),
        Box::new(DisasterSystem),
        Box::new(ConflictSystem),
        Box::new(TerritorySystem),
        Box::new(WorldEventSystem),
    ]
}

/// Run the simulation for the configured number of years, appending every
/// event to `log`.
///
/// Creates a deterministic RNG from `config.seed`, so the same seed and the
/// same starting state always produce the same history.
pub fn run(
    simulation: &mut Simulation,
    world: &mut World,
    civilizations: &mut Vec<Civilization>,
    resources: &[Resource],
    log: &mut EventLog,
    config: &SimConfig,
) {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    for year_offset in 0..config.num_years {
        let year = config.start_year + year_offset;
        let outcome = simulation.advance_year(year, civilizations, resources, world, &mut rng);
        *civilizations = outcome.civilizations;
        log.extend(outcome.events);
    }
    tracing::debug!(
        start_year = config.start_year,
        years = config.num_years,
        events = log.len(),
        "batch run finished"
    );
}
