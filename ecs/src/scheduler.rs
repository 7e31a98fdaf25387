//! The phased scheduler driving a [`World`] through its lifecycle.

use crate::error::{ScheduleError, ShutdownError, StartupError, TickError};
use crate::schedule::{Phase, Schedule};
use crate::system::System;
use crate::time::{Clock, FrameTimer, SystemClock, Time};
use crate::world::World;

/// Lifecycle state of a [`Core`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreState {
    /// Systems may be registered into any phase.
    Uninitialized,
    /// Startup systems are executing.
    Startup,
    /// Startup finished; update ticks may run.
    Update,
    /// Startup failed or [`Core::terminate`] was called.
    Terminated,
}

/// A bundle of resources and systems installed in one call.
pub trait Plugin {
    fn build(&self, core: &mut Core) -> Result<(), ScheduleError>;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Owns the world and runs Startup once, Update per tick and Shutdown at exit.
///
/// ```
/// use orbit_ecs::{Core, Phase, SystemError, World};
///
/// #[derive(Default)]
/// struct Frames(u32);
///
/// let mut core = Core::new();
/// core.world_mut().insert_resource(Frames::default()).unwrap();
/// core.register_system(Phase::Update, |world: &mut World| -> Result<(), SystemError> {
///     world.resource_mut::<Frames>()?.0 += 1;
///     Ok(())
/// })
/// .unwrap();
///
/// core.run_startup().unwrap();
/// core.run_update_tick().unwrap();
/// core.run_update_tick().unwrap();
/// core.terminate().unwrap();
///
/// assert_eq!(core.world().resource::<Frames>().unwrap().0, 2);
/// ```
pub struct Core {
    world: World,
    phases: [Schedule; 3],
    started: [bool; 3],
    state: CoreState,
    timer: FrameTimer,
    delta_time: f32,
}

impl Core {
    /// Creates a core timed by the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }

    /// Creates a core timed by `clock`.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            world: World::new(),
            phases: [Schedule::new(), Schedule::new(), Schedule::new()],
            started: [false; 3],
            state: CoreState::Uninitialized,
            timer: FrameTimer::new(Box::new(clock)),
            delta_time: 0.0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn state(&self) -> CoreState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == CoreState::Terminated
    }

    /// Delta of the last update tick in seconds.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Systems registered into `phase`, in execution order.
    pub fn schedule(&self, phase: Phase) -> &Schedule {
        &self.phases[phase.index()]
    }

    /// Appends a system to `phase`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::PhaseAlreadyStarted`] once the phase has begun executing.
    pub fn register_system<S: System>(
        &mut self,
        phase: Phase,
        system: S,
    ) -> Result<(), ScheduleError> {
        if self.started[phase.index()] {
            return Err(ScheduleError::PhaseAlreadyStarted(phase));
        }
        let name = system.name();
        self.phases[phase.index()].add(system);
        log::debug!("Registered system `{}` into {:?}", name, phase);
        Ok(())
    }

    /// Installs a plugin's resources and systems.
    pub fn add_plugin<P: Plugin>(&mut self, plugin: P) -> Result<&mut Self, ScheduleError> {
        log::debug!("Adding plugin `{}`", plugin.name());
        plugin.build(self)?;
        Ok(self)
    }

    /// Runs every Startup system once, in order.
    ///
    /// The first failing system aborts startup and terminates the core, so
    /// no update tick can follow a failed startup.
    pub fn run_startup(&mut self) -> Result<(), StartupError> {
        if self.state != CoreState::Uninitialized {
            return Err(StartupError::InvalidState(self.state));
        }

        self.state = CoreState::Startup;
        self.started[Phase::Startup.index()] = true;
        self.world.replace_resource(Time::default());

        log::info!(
            "Running {} startup system(s)",
            self.phases[Phase::Startup.index()].len()
        );
        if let Err(failure) =
            self.phases[Phase::Startup.index()].run_until_failure(&mut self.world)
        {
            log::error!("Startup aborted: {}", failure);
            self.state = CoreState::Terminated;
            return Err(StartupError::SystemFailed(failure));
        }

        self.timer.reset();
        self.state = CoreState::Update;
        log::info!("Startup complete");
        Ok(())
    }

    /// Refreshes [`Time`] and runs every Update system once, in order.
    ///
    /// A failing system does not stop the tick; all failures are returned
    /// together after the last system ran.
    pub fn run_update_tick(&mut self) -> Result<(), TickError> {
        if self.state != CoreState::Update {
            return Err(TickError::InvalidState(self.state));
        }
        self.started[Phase::Update.index()] = true;

        let delta = self.timer.tick();
        self.delta_time = delta.as_secs_f32();
        if let Ok(time) = self.world.init_resource::<Time>() {
            time.advance(delta);
        }

        let failures = self.phases[Phase::Update.index()].run_all(&mut self.world);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(TickError::SystemsFailed(failures))
        }
    }

    /// Runs the Shutdown phase once and enters [`CoreState::Terminated`].
    ///
    /// Calling it again is a no-op.
    pub fn terminate(&mut self) -> Result<(), ShutdownError> {
        let shutdown = Phase::Shutdown.index();
        if self.started[shutdown] {
            return Ok(());
        }
        self.started[shutdown] = true;
        self.state = CoreState::Terminated;

        log::info!("Shutting down");
        let failures = self.phases[shutdown].run_all(&mut self.world);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ShutdownError(failures))
        }
    }
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::SystemError;
    use crate::time::ManualClock;

    #[derive(Default)]
    struct Trace(Vec<&'static str>);

    fn record(tag: &'static str) -> impl FnMut(&mut World) -> Result<(), SystemError> {
        move |world| {
            world.resource_mut::<Trace>()?.0.push(tag);
            Ok(())
        }
    }

    fn broken(_: &mut World) -> Result<(), SystemError> {
        Err(SystemError::Initialization("window".into()))
    }

    fn traced_core() -> Core {
        let mut core = Core::with_clock(ManualClock::new());
        core.world_mut().insert_resource(Trace::default()).unwrap();
        core
    }

    fn trace(core: &Core) -> &[&'static str] {
        &core.world().resource::<Trace>().unwrap().0
    }

    #[test]
    fn phases_run_in_order() {
        let mut core = traced_core();
        core.register_system(Phase::Startup, record("window")).unwrap();
        core.register_system(Phase::Startup, record("graphics")).unwrap();
        core.register_system(Phase::Update, record("A")).unwrap();
        core.register_system(Phase::Update, record("B")).unwrap();
        core.register_system(Phase::Update, record("C")).unwrap();
        core.register_system(Phase::Shutdown, record("bye")).unwrap();

        core.run_startup().unwrap();
        core.run_update_tick().unwrap();
        core.run_update_tick().unwrap();
        core.terminate().unwrap();

        assert_eq!(
            trace(&core),
            ["window", "graphics", "A", "B", "C", "A", "B", "C", "bye"]
        );
        assert_eq!(core.state(), CoreState::Terminated);
    }

    #[test]
    fn startup_failure_halts() {
        let mut core = traced_core();
        core.register_system(Phase::Startup, record("first")).unwrap();
        core.register_system(Phase::Startup, broken).unwrap();
        core.register_system(Phase::Startup, record("never")).unwrap();
        core.register_system(Phase::Update, record("tick")).unwrap();

        match core.run_startup() {
            Err(StartupError::SystemFailed(failure)) => {
                assert!(failure.system.ends_with("broken"));
                assert!(matches!(failure.error, SystemError::Initialization(_)));
            }
            other => panic!("expected startup failure, got {other:?}"),
        }
        assert_eq!(core.state(), CoreState::Terminated);
        assert!(matches!(
            core.run_update_tick(),
            Err(TickError::InvalidState(CoreState::Terminated))
        ));
        assert_eq!(trace(&core), ["first"]);
    }

    #[test]
    fn tick_completes_despite_failures() {
        let mut core = traced_core();
        core.register_system(Phase::Update, broken).unwrap();
        core.register_system(Phase::Update, record("after")).unwrap();
        core.register_system(Phase::Update, broken).unwrap();
        core.run_startup().unwrap();

        match core.run_update_tick() {
            Err(TickError::SystemsFailed(failures)) => assert_eq!(failures.len(), 2),
            other => panic!("expected aggregate failure, got {other:?}"),
        }
        assert_eq!(trace(&core), ["after"]);
        // The core stays usable.
        assert_eq!(core.state(), CoreState::Update);
    }

    #[test]
    fn tick_before_startup_is_rejected() {
        let mut core = traced_core();
        assert!(matches!(
            core.run_update_tick(),
            Err(TickError::InvalidState(CoreState::Uninitialized))
        ));
    }

    #[test]
    fn startup_runs_once() {
        let mut core = traced_core();
        core.register_system(Phase::Startup, record("s")).unwrap();
        core.run_startup().unwrap();
        assert!(matches!(
            core.run_startup(),
            Err(StartupError::InvalidState(CoreState::Update))
        ));
        assert_eq!(trace(&core), ["s"]);
    }

    #[test]
    fn registration_into_started_phase_fails() {
        let mut core = traced_core();
        core.run_startup().unwrap();
        assert_eq!(
            core.register_system(Phase::Startup, record("late")),
            Err(ScheduleError::PhaseAlreadyStarted(Phase::Startup))
        );
        // Update has not ticked yet.
        core.register_system(Phase::Update, record("u")).unwrap();
        core.run_update_tick().unwrap();
        assert_eq!(
            core.register_system(Phase::Update, record("late")),
            Err(ScheduleError::PhaseAlreadyStarted(Phase::Update))
        );
    }

    #[test]
    fn deltas_are_monotonic_and_sum_to_span() {
        let clock = ManualClock::new();
        clock.set(Duration::from_millis(1_000));
        let mut core = Core::with_clock(clock.clone());
        core.run_startup().unwrap();

        let mut total = Duration::ZERO;
        for frame in 1..=100u64 {
            clock.advance(Duration::from_micros(500 * frame));
            core.run_update_tick().unwrap();
            let time = *core.world().resource::<Time>().unwrap();
            assert!(core.delta_time() >= 0.0);
            assert_eq!(time.delta(), Duration::from_micros(500 * frame));
            total += time.delta();
        }

        let span = clock.now() - Duration::from_millis(1_000);
        assert_eq!(total, span);
        let time = core.world().resource::<Time>().unwrap();
        assert_eq!(time.elapsed(), span);
        assert_eq!(time.frame_count(), 100);
    }

    #[test]
    fn startup_time_is_excluded_from_first_delta() {
        let clock = ManualClock::new();
        let mut core = Core::with_clock(clock.clone());
        let slow = clock.clone();
        core.register_system(Phase::Startup, move |_: &mut World| -> Result<(), SystemError> {
            slow.advance(Duration::from_secs(10));
            Ok(())
        })
        .unwrap();
        core.run_startup().unwrap();
        clock.advance(Duration::from_millis(16));
        core.run_update_tick().unwrap();
        assert!((core.delta_time() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn terminate_runs_shutdown_once() {
        let mut core = traced_core();
        core.register_system(Phase::Shutdown, record("cleanup")).unwrap();
        core.run_startup().unwrap();
        core.terminate().unwrap();
        core.terminate().unwrap();
        assert_eq!(trace(&core), ["cleanup"]);
        assert!(core.is_terminated());
    }

    #[test]
    fn shutdown_failures_are_reported() {
        let mut core = traced_core();
        core.register_system(Phase::Shutdown, broken).unwrap();
        core.register_system(Phase::Shutdown, record("still runs")).unwrap();
        core.run_startup().unwrap();
        let err = core.terminate().unwrap_err();
        assert_eq!(err.0.len(), 1);
        assert_eq!(trace(&core), ["still runs"]);
    }

    struct TracePlugin;

    impl Plugin for TracePlugin {
        fn build(&self, core: &mut Core) -> Result<(), ScheduleError> {
            core.world_mut()
                .insert_resource(Trace::default())
                .map_err(ScheduleError::plugin::<Self>)?;
            core.register_system(Phase::Startup, record("plugin startup"))?;
            core.register_system(Phase::Update, record("plugin update"))
        }
    }

    #[test]
    fn plugins_install_resources_and_systems() {
        let mut core = Core::with_clock(ManualClock::new());
        core.add_plugin(TracePlugin).unwrap();
        core.run_startup().unwrap();
        core.run_update_tick().unwrap();
        assert_eq!(trace(&core), ["plugin startup", "plugin update"]);

        let mut again = Core::with_clock(ManualClock::new());
        again.add_plugin(TracePlugin).unwrap();
        let err = again.add_plugin(TracePlugin).map(|_| ()).unwrap_err();
        assert!(matches!(err, ScheduleError::Plugin { .. }));
    }
}
