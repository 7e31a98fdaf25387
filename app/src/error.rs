use orbit_ecs::{ScheduleError, ShutdownError, StartupError};

/// Reasons [`App::run`](crate::App::run) can stop with an error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Command line could not be parsed.
    #[error(transparent)]
    Args(#[from] clap::Error),
    /// The handler or a plugin could not register its systems.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Shutdown(#[from] ShutdownError),
}
