use std::fmt;

use orbit_core::mesh::MeshError;

use crate::entity::Entity;
use crate::schedule::Phase;
use crate::scheduler::CoreState;

/// Failure to access a singleton resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    /// A resource of this type was never inserted (or has been removed).
    #[error("resource `{type_name}` is not registered")]
    ResourceMissing { type_name: &'static str },
    /// `insert_resource` was called for a type that already has an instance.
    #[error("resource `{type_name}` is already registered; use replace_resource to overwrite")]
    AlreadyRegistered { type_name: &'static str },
}

/// Failure to access a component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    /// The entity was despawned or never existed.
    #[error("cannot access component `{type_name}` on dead entity {entity}")]
    DeadEntity {
        entity: Entity,
        type_name: &'static str,
    },
    /// The entity is alive but does not carry the component.
    #[error("entity {entity} has no component `{type_name}`")]
    Missing {
        entity: Entity,
        type_name: &'static str,
    },
}

/// Error returned by a system.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// A window, context or backend could not be brought up.
    #[error("initialization failed: {0}")]
    Initialization(String),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Component(#[from] ComponentError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    /// Any other failure raised by a downstream crate.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl SystemError {
    /// Wrap an arbitrary error as [`SystemError::Other`].
    pub fn other(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other(Box::new(error))
    }
}

/// A system failure tagged with the system that raised it.
#[derive(Debug)]
pub struct SystemFailure {
    pub system: &'static str,
    pub error: SystemError,
}

impl fmt::Display for SystemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system `{}` failed: {}", self.system, self.error)
    }
}

impl std::error::Error for SystemFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Failure to register a system or plugin.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// The phase has already started executing; its system list is frozen.
    #[error("cannot register system into {0:?}: the phase has already started")]
    PhaseAlreadyStarted(Phase),
    /// A plugin failed to add its resources.
    #[error("plugin `{plugin}` failed: {reason}")]
    Plugin { plugin: &'static str, reason: String },
}

impl ScheduleError {
    /// Build a [`ScheduleError::Plugin`] for plugin type `P`.
    pub fn plugin<P: ?Sized>(reason: impl fmt::Display) -> Self {
        Self::Plugin {
            plugin: std::any::type_name::<P>(),
            reason: reason.to_string(),
        }
    }
}

/// Startup did not complete.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Startup was requested outside the `Uninitialized` state.
    #[error("startup requires an uninitialized core, found {0:?}")]
    InvalidState(CoreState),
    /// A startup system failed; the remaining startup systems did not run.
    #[error("startup aborted by `{}`", .0.system)]
    SystemFailed(#[source] SystemFailure),
}

/// An update tick ran but reported problems.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// Ticks only run while the core is in the `Update` state.
    #[error("update tick requires a started core, found {0:?}")]
    InvalidState(CoreState),
    /// Every system ran; these ones failed.
    #[error("{} update system(s) failed: {}", .0.len(), join_failures(.0))]
    SystemsFailed(Vec<SystemFailure>),
}

/// Shutdown systems ran but some of them failed.
#[derive(Debug, thiserror::Error)]
#[error("{} shutdown system(s) failed: {}", .0.len(), join_failures(.0))]
pub struct ShutdownError(pub Vec<SystemFailure>);

fn join_failures(failures: &[SystemFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
