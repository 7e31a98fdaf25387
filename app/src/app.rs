//! Main application struct and run loop.

use orbit_ecs::Core;
use orbit_std::platform::PlatformLauncher;
use orbit_std::systems::window_should_close;
use orbit_std::{CameraSettings, ViewerPlugin};

use crate::args::AppArgs;
use crate::error::AppError;
use crate::handler::AppHandler;

/// Drives a [`Core`] from startup to shutdown.
///
/// The `App` struct is generic over:
/// - `H`: The handler type that implements [`AppHandler`]
/// - `A`: The arguments type that implements [`AppArgs`]
///
/// # Example
///
/// ```no_run
/// use orbit_app::{App, AppArgs, AppHandler, DefaultAppArgs};
/// use orbit_ecs::{Core, ScheduleError};
///
/// struct MyApp;
///
/// impl AppHandler for MyApp {
///     fn on_init(&mut self, _core: &mut Core) -> Result<(), ScheduleError> {
///         Ok(())
///     }
/// }
///
/// fn main() -> Result<(), orbit_app::AppError> {
///     App::run(MyApp, DefaultAppArgs::parse())
/// }
/// ```
pub struct App<H, A>
where
    H: AppHandler,
    A: AppArgs,
{
    handler: H,
    args: A,
    launcher: Option<PlatformLauncher>,
}

impl<H, A> App<H, A>
where
    H: AppHandler,
    A: AppArgs,
{
    /// Create a new application using a headless window.
    pub fn new(handler: H, args: A) -> Self {
        Self {
            handler,
            args,
            launcher: None,
        }
    }

    /// Open the window with `launcher` instead of the headless default.
    pub fn with_launcher(mut self, launcher: PlatformLauncher) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// Initialize logging, then run the application until the window closes.
    pub fn run(handler: H, args: A) -> Result<(), AppError> {
        if let Err(e) =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .try_init()
        {
            log::debug!("Keeping existing logger: {}", e);
        }

        orbit_core::init();
        crate::init();

        let frames = Self::new(handler, args).run_frames()?;
        log::info!("Exited after {} frame(s)", frames);
        Ok(())
    }

    /// Run startup, tick until the window asks to close, then shut down.
    ///
    /// Returns the number of update ticks. Tick failures are logged and the
    /// loop continues. A startup failure still runs the Shutdown phase
    /// before the error is returned.
    pub fn run_frames(mut self) -> Result<u64, AppError> {
        let mut core = self.build_core()?;

        if let Err(e) = core.run_startup() {
            if let Err(shutdown) = core.terminate() {
                log::warn!("Cleanup after failed startup: {}", shutdown);
            }
            return Err(e.into());
        }

        let mut frames = 0;
        while !window_should_close(core.world()) {
            if let Err(e) = core.run_update_tick() {
                log::error!("Frame {}: {}", frames, e);
            }
            frames += 1;
            if !self.handler.on_update(&mut core) {
                log::info!("Handler requested exit");
                break;
            }
        }

        self.handler.on_shutdown(&mut core);
        core.terminate()?;
        Ok(frames)
    }

    fn build_core(&mut self) -> Result<Core, AppError> {
        let mut core = Core::new();
        let launcher = self
            .launcher
            .take()
            .unwrap_or_else(|| PlatformLauncher::headless(self.args.max_frames()));

        let window = self.args.window_config();
        let camera = CameraSettings {
            fov_degrees: self.args.fov_degrees(),
            ..CameraSettings::default()
        };
        log::info!(
            "Configured '{}' ({}x{}, fov {:.1})",
            window.title,
            window.width,
            window.height,
            camera.fov_degrees
        );

        core.world_mut().replace_resource(launcher);
        core.add_plugin(ViewerPlugin::new(window, camera))?;
        self.handler.on_init(&mut core)?;
        Ok(core)
    }
}
