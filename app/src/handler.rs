//! Application handler trait.

use orbit_ecs::{Core, ScheduleError};

/// Hooks for application logic around the engine's phases.
///
/// # Lifecycle
///
/// 1. `on_init` - Once, before Startup runs. Register scene systems here.
/// 2. `on_update` - After every Update tick
/// 3. `on_shutdown` - Once, before the Shutdown phase
///
/// # Example
///
/// ```
/// use orbit_app::AppHandler;
/// use orbit_ecs::{Core, Phase, ScheduleError, SystemError, World};
///
/// struct Spinner;
///
/// impl AppHandler for Spinner {
///     fn on_init(&mut self, core: &mut Core) -> Result<(), ScheduleError> {
///         core.register_system(Phase::Update, |_: &mut World| -> Result<(), SystemError> {
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait AppHandler {
    /// Add resources and systems. Runs after the viewer plugin is installed,
    /// so scene startup systems run after the window, graphics and camera exist.
    fn on_init(&mut self, core: &mut Core) -> Result<(), ScheduleError>;

    /// Called after every tick. Return `false` to exit.
    fn on_update(&mut self, _core: &mut Core) -> bool {
        true
    }

    /// Called once before the Shutdown phase.
    fn on_shutdown(&mut self, _core: &mut Core) {}
}
