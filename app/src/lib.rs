//! # Orbit App
//!
//! Application runner tying the ECS scheduler to the viewer pipeline.
//!
//! ## Overview
//!
//! - [`AppHandler`] - Hooks for registering scene systems and observing ticks
//! - [`AppArgs`] - Trait for parsing command line arguments
//! - [`App`] - Sets up logging and configuration, then runs Startup, the
//!   Update loop and Shutdown
//!
//! ## Example
//!
//! ```no_run
//! use orbit_app::{App, AppArgs, AppHandler, DefaultAppArgs};
//! use orbit_ecs::{Core, ScheduleError};
//!
//! struct MyApp;
//!
//! impl AppHandler for MyApp {
//!     fn on_init(&mut self, _core: &mut Core) -> Result<(), ScheduleError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), orbit_app::AppError> {
//!     App::run(MyApp, DefaultAppArgs::parse())
//! }
//! ```

mod app;
mod args;
mod error;
mod handler;

pub use app::App;
pub use args::{AppArgs, DefaultAppArgs};
pub use error::AppError;
pub use handler::AppHandler;

/// App library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the app version. Called by [`App::run`].
pub fn init() {
    log::info!("Orbit App v{} initialized", VERSION);
}
