use crate::error::SystemFailure;
use crate::system::{StoredSystem, System};
use crate::world::World;

/// A named execution stage of the frame pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Runs once before the first frame.
    Startup,
    /// Runs once per frame.
    Update,
    /// Runs once when the application closes.
    Shutdown,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Startup, Phase::Update, Phase::Shutdown];

    pub(crate) const fn index(self) -> usize {
        match self {
            Phase::Startup => 0,
            Phase::Update => 1,
            Phase::Shutdown => 2,
        }
    }
}

/// An ordered list of systems. Registration order is execution order.
#[derive(Default)]
pub struct Schedule {
    systems: Vec<StoredSystem>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a system.
    pub fn add<S: System>(&mut self, system: S) {
        self.systems.push(StoredSystem::new(system));
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// System names in execution order.
    pub fn system_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.systems.iter().map(StoredSystem::name)
    }

    /// Runs systems in order, stopping at the first failure.
    pub fn run_until_failure(&mut self, world: &mut World) -> Result<(), SystemFailure> {
        for system in &mut self.systems {
            system.run(world)?;
        }
        Ok(())
    }

    /// Runs every system in order and collects the failures.
    pub fn run_all(&mut self, world: &mut World) -> Vec<SystemFailure> {
        let mut failures = Vec::new();
        for system in &mut self.systems {
            if let Err(failure) = system.run(world) {
                log::warn!("{}", failure);
                failures.push(failure);
            }
        }
        failures
    }
}
