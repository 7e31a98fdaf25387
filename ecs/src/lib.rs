//! # Orbit ECS
//!
//! Single-threaded entity-component store and phased frame scheduler.
//!
//! ## Core Types
//!
//! - [`Entity`] - Generational entity identifier
//! - [`World`] - Owns entities, sparse-set component storages and typed resources
//! - [`SparseSet`] - Dense, insertion-ordered storage for one component type
//!
//! ## Systems & Scheduling
//!
//! - [`System`] - A `FnMut(&mut World) -> Result<(), SystemError>` unit of work
//! - [`Schedule`] - Ordered system list of one [`Phase`]
//! - [`Core`] - Runs Startup once, Update per tick and Shutdown at exit
//! - [`Plugin`] - Installs resources and systems into a [`Core`]
//! - [`Time`] / [`Clock`] - Frame timing fed by a wall or manual clock

mod entity;
mod error;
mod resource;
mod schedule;
mod scheduler;
mod sparse_set;
mod system;
pub mod time;
mod world;

pub use entity::Entity;
pub use error::{
    ComponentError, ResourceError, ScheduleError, ShutdownError, StartupError, SystemError,
    SystemFailure, TickError,
};
pub use resource::Resource;
pub use schedule::{Phase, Schedule};
pub use scheduler::{Core, CoreState, Plugin};
pub use sparse_set::SparseSet;
pub use system::{System, run_system};
pub use time::{Clock, ManualClock, SystemClock, Time};
pub use world::World;
