//! A running world: generated state, the history engine, and the log.
//!
//! [`Session`] is what a driver (a UI loop, a CLI, a test) holds. It owns
//! every piece of mutable state and threads it through the yearly step, so
//! callers only ever see finished years. [`SessionHandle`] adds the
//! in-flight guard for drivers that advance from more than one place.

use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::id::{CivId, EventId};
use crate::model::{Civilization, EventKind, EventLog, HistoricalEvent, Resource, Season, World};
use crate::sim::Simulation;
use crate::worldgen::{self, ConfigError, WorldGenConfig};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a yearly advance is already in progress")]
    AdvanceInProgress,
    #[error("session state was poisoned by a panic during an earlier advance")]
    Poisoned,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionConfig {
    pub world: WorldGenConfig,
    /// Seed for every random draw after terrain noise. `None` seeds from
    /// the operating system.
    pub rng_seed: Option<u64>,
}

impl SessionConfig {
    /// Fully reproducible: fixed terrain seed and fixed draw sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            world: WorldGenConfig::seeded(seed as i64),
            rng_seed: Some(seed),
        }
    }
}

pub struct Session {
    config: SessionConfig,
    rng: SmallRng,
    simulation: Simulation,
    world: World,
    resources: Vec<Resource>,
    civilizations: Vec<Civilization>,
    log: EventLog,
    current_year: u32,
    season: Season,
}

impl Session {
    /// Generate a fresh world and open its history at year 1, spring.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.world.validate()?;
        let mut session = Self {
            rng: seeded_rng(config.rng_seed),
            config,
            simulation: Simulation::new(),
            world: World::from_tiles(0, 0, 0, Vec::new()),
            resources: Vec::new(),
            civilizations: Vec::new(),
            log: EventLog::new(),
            current_year: 1,
            season: Season::Spring,
        };
        session.regenerate();
        Ok(session)
    }

    /// Throw everything away and generate again from the stored config.
    /// With a fixed `rng_seed` the result matches a fresh [`Session::new`].
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.config.world.validate()?;
        if let Some(seed) = self.config.rng_seed {
            self.rng = SmallRng::seed_from_u64(seed);
        }
        self.regenerate();
        Ok(())
    }

    fn regenerate(&mut self) {
        let mut world = worldgen::generate_world(&self.config.world, &mut self.rng);
        let resources = worldgen::place_resources(&mut world, &mut self.rng);
        let civilizations = worldgen::generate_civilizations(
            &mut world,
            &resources,
            self.config.world.num_civilizations,
            &mut self.rng,
        );

        self.world = world;
        self.resources = resources;
        self.civilizations = civilizations;
        self.simulation = Simulation::new();
        self.current_year = 1;
        self.season = Season::Spring;
        self.log = EventLog::new();
        self.log.push(HistoricalEvent {
            id: EventId(0),
            year: 1,
            season: Season::Spring,
            description: "The dawn of a new world".to_string(),
            kind: EventKind::Dawn,
            civilization: None,
            involved: Vec::new(),
        });

        tracing::info!(
            seed = self.world.seed,
            width = self.world.width,
            height = self.world.height,
            civilizations = self.civilizations.len(),
            resources = self.resources.len(),
            "session reset"
        );
    }

    /// Run `years` yearly steps. Returns how many events were appended.
    pub fn advance(&mut self, years: u32) -> usize {
        let before = self.log.len();
        for _ in 0..years {
            let year = self.current_year + 1;
            let outcome = self.simulation.advance_year(
                year,
                &self.civilizations,
                &self.resources,
                &mut self.world,
                &mut self.rng,
            );
            self.civilizations = outcome.civilizations;
            self.resources = outcome.resources;
            self.log.extend(outcome.events);
            self.current_year = year;
        }
        let appended = self.log.len() - before;
        tracing::info!(year = self.current_year, years, events = appended, "history advanced");
        appended
    }

    /// Move to the next season. Leaving winter starts a new year, which
    /// runs the yearly step. Returns whether it did.
    pub fn advance_season(&mut self) -> bool {
        self.season = self.season.next();
        if self.season == Season::Spring {
            self.advance(1);
            true
        } else {
            false
        }
    }

    /// Events concerning `civ`, latest year first.
    pub fn events_for(&self, civ: CivId) -> Vec<&HistoricalEvent> {
        self.log.for_civilization(civ)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn civilizations(&self) -> &[Civilization] {
        &self.civilizations
    }

    pub fn civilization(&self, id: CivId) -> Option<&Civilization> {
        self.civilizations.get(id.index())
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn current_year(&self) -> u32 {
        self.current_year
    }

    pub fn season(&self) -> Season {
        self.season
    }

    /// Everyone's people, summed.
    pub fn total_population(&self) -> u64 {
        self.civilizations.iter().map(|c| c.population).sum()
    }
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

/// Shared access to a session with a non-blocking advance.
///
/// A second advance requested while one is running is rejected instead of
/// queued; the driver decides whether to retry on its next tick.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Advance unless another caller holds the session.
    pub fn try_advance(&self, years: u32) -> Result<usize, SessionError> {
        match self.inner.try_lock() {
            Ok(mut session) => Ok(session.advance(years)),
            Err(TryLockError::WouldBlock) => {
                tracing::warn!(years, "advance rejected: another advance is running");
                Err(SessionError::AdvanceInProgress)
            }
            Err(TryLockError::Poisoned(_)) => Err(SessionError::Poisoned),
        }
    }

    /// Block until the session is free and borrow it.
    pub fn lock(&self) -> Result<MutexGuard<'_, Session>, SessionError> {
        self.inner.lock().map_err(|_| SessionError::Poisoned)
    }
}
