//! Window system abstraction.
//!
//! The engine never talks to a windowing library directly. A [`Platform`]
//! is created during Startup by the [`PlatformLauncher`] resource and stored
//! in the [`Window`] resource.

mod headless;

use glam::UVec2;

use crate::components::PointerSample;
use crate::render::RenderBackend;

pub use headless::{HeadlessPlatform, ScriptedFrame};

/// Errors raised by a platform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("failed to create window: {0}")]
    WindowCreation(String),
    #[error("failed to create graphics context: {0}")]
    ContextCreation(String),
    #[error("event polling failed: {0}")]
    EventLoop(String),
}

/// Window creation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orbit Viewer".into(),
            width: 800,
            height: 600,
        }
    }
}

/// A live window and its input source.
pub trait Platform {
    /// Process pending window events.
    fn poll_events(&mut self) -> Result<(), PlatformError>;

    /// Drawable size in pixels. May be zero while minimized.
    fn viewport_size(&self) -> UVec2;

    /// Current pointer reading, or `None` if the platform could not query it.
    fn pointer_sample(&mut self) -> Option<PointerSample>;

    /// Whether the user asked to close the window.
    fn should_close(&self) -> bool;

    /// Create the graphics backend bound to this window.
    fn create_backend(&mut self) -> Result<Box<dyn RenderBackend>, PlatformError>;
}

type LaunchFn = Box<dyn FnOnce(&WindowConfig) -> Result<Box<dyn Platform>, PlatformError>>;

/// One-shot factory resource consumed by the `create_window` startup system.
pub struct PlatformLauncher {
    launch: LaunchFn,
}

impl PlatformLauncher {
    pub fn new<F, P>(launch: F) -> Self
    where
        F: FnOnce(&WindowConfig) -> Result<P, PlatformError> + 'static,
        P: Platform + 'static,
    {
        Self {
            launch: Box::new(move |config| {
                launch(config).map(|platform| Box::new(platform) as Box<dyn Platform>)
            }),
        }
    }

    /// A launcher that opens a [`HeadlessPlatform`] closing after `max_frames`.
    pub fn headless(max_frames: Option<u64>) -> Self {
        Self::new(move |config: &WindowConfig| {
            Ok(HeadlessPlatform::new(config).with_max_frames(max_frames))
        })
    }

    pub fn launch(self, config: &WindowConfig) -> Result<Box<dyn Platform>, PlatformError> {
        (self.launch)(config)
    }
}

/// Resource holding the open window.
pub struct Window {
    pub platform: Box<dyn Platform>,
    pub title: String,
}

impl Window {
    pub fn new(platform: Box<dyn Platform>, title: impl Into<String>) -> Self {
        Self {
            platform,
            title: title.into(),
        }
    }

    pub fn size(&self) -> UVec2 {
        self.platform.viewport_size()
    }

    pub fn should_close(&self) -> bool {
        self.platform.should_close()
    }
}
