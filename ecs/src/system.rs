use crate::error::{SystemError, SystemFailure};
use crate::world::World;

/// A unit of frame work that runs against the whole [`World`].
///
/// Any `FnMut(&mut World) -> Result<(), SystemError>` is a system, so plain
/// functions register directly:
///
/// ```
/// use orbit_ecs::{SystemError, World};
///
/// struct Counter(u32);
///
/// fn count_frames(world: &mut World) -> Result<(), SystemError> {
///     world.resource_mut::<Counter>()?.0 += 1;
///     Ok(())
/// }
/// # let _: &dyn orbit_ecs::System = &count_frames;
/// ```
///
/// Systems receive exclusive access to the world; nothing else runs while
/// a system executes.
pub trait System: 'static {
    fn run(&mut self, world: &mut World) -> Result<(), SystemError>;

    /// Name used in logs and failure reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F> System for F
where
    F: FnMut(&mut World) -> Result<(), SystemError> + 'static,
{
    fn run(&mut self, world: &mut World) -> Result<(), SystemError> {
        self(world)
    }
}

/// A registered system with its diagnostic name captured at registration.
pub(crate) struct StoredSystem {
    system: Box<dyn System>,
    name: &'static str,
}

impl StoredSystem {
    pub fn new<S: System>(system: S) -> Self {
        let name = system.name();
        Self {
            system: Box::new(system),
            name,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn run(&mut self, world: &mut World) -> Result<(), SystemFailure> {
        log::trace!("Running system `{}`", self.name);
        self.system.run(world).map_err(|error| SystemFailure {
            system: self.name,
            error,
        })
    }
}

/// Runs a system once outside any schedule. Useful for tests and one-off
/// invocations.
pub fn run_system<S: System>(system: &mut S, world: &mut World) -> Result<(), SystemError> {
    system.run(world)
}
