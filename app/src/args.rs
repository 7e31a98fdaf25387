//! Command line arguments trait and default implementation.
//!
//! Uses clap for parsing with help text (`--help`) and validation.

use orbit_std::platform::WindowConfig;

use crate::error::AppError;

/// Trait for parsing command line arguments.
///
/// Every accessor has a default, so an implementation only overrides the
/// options it cares about.
pub trait AppArgs: Sized {
    /// Parse command line arguments.
    fn parse() -> Self;

    /// Initial window width.
    ///
    /// Default: 800
    fn window_width(&self) -> u32 {
        800
    }

    /// Initial window height.
    ///
    /// Default: 600
    fn window_height(&self) -> u32 {
        600
    }

    /// Default: "Orbit Viewer"
    fn window_title(&self) -> &str {
        "Orbit Viewer"
    }

    /// Vertical field of view in degrees.
    ///
    /// Default: 45
    fn fov_degrees(&self) -> f32 {
        45.0
    }

    /// Number of frames after which the window closes.
    ///
    /// Useful for automated runs that only verify startup and rendering.
    ///
    /// Default: `None` (run until the window closes)
    fn max_frames(&self) -> Option<u64> {
        None
    }

    /// Window parameters derived from the arguments.
    fn window_config(&self) -> WindowConfig {
        WindowConfig {
            title: self.window_title().to_owned(),
            width: self.window_width(),
            height: self.window_height(),
        }
    }
}

// ============================================================================
// Default App Args
// ============================================================================

/// Default command line arguments implementation.
///
/// ```bash
/// # Show help
/// ./torus_scene --help
///
/// # Render 100 frames at 1280x720, then exit
/// ./torus_scene --width 1280 --height 720 --max-frames 100
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultAppArgs {
    width: u32,
    height: u32,
    title: String,
    fov: f32,
    max_frames: Option<u64>,
}

impl Default for DefaultAppArgs {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Orbit Viewer".to_string(),
            fov: 45.0,
            max_frames: None,
        }
    }
}

impl DefaultAppArgs {
    /// Create new default args with a custom title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the window size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the maximum number of frames.
    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    /// Set the maximum number of frames unless one was given on the command line.
    pub fn or_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames.get_or_insert(max_frames);
        self
    }

    /// Parse from an explicit argument list (first item is the program name).
    ///
    /// # Errors
    ///
    /// [`AppError::Args`] when clap rejects the list, including `--help`.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        use clap::Parser;
        Ok(native::ClapArgs::try_parse_from(args)?.into())
    }
}

mod native {
    use super::*;
    use clap::Parser;

    /// Orbit Viewer application arguments.
    #[derive(Parser, Debug)]
    #[command(
        name = "Orbit Viewer",
        about = "Lit torus scene with a mouse-driven orbit camera",
        version
    )]
    pub(super) struct ClapArgs {
        /// Initial window width in pixels.
        #[arg(long, default_value = "800", value_parser = clap::value_parser!(u32).range(1..))]
        pub width: u32,

        /// Initial window height in pixels.
        #[arg(long, default_value = "600", value_parser = clap::value_parser!(u32).range(1..))]
        pub height: u32,

        /// Window title.
        #[arg(long, default_value = "Orbit Viewer")]
        pub title: String,

        /// Vertical field of view in degrees.
        #[arg(long, default_value = "45")]
        pub fov: f32,

        /// Exit after rendering N frames (useful for testing).
        #[arg(long)]
        pub max_frames: Option<u64>,
    }

    impl From<ClapArgs> for DefaultAppArgs {
        fn from(args: ClapArgs) -> Self {
            let fov = if args.fov > 0.0 && args.fov < 180.0 {
                args.fov
            } else {
                log::warn!("--fov {} is outside (0, 180); using 45", args.fov);
                45.0
            };
            Self {
                width: args.width,
                height: args.height,
                title: args.title,
                fov,
                max_frames: args.max_frames,
            }
        }
    }
}

impl AppArgs for DefaultAppArgs {
    fn parse() -> Self {
        use clap::Parser;
        native::ClapArgs::parse().into()
    }

    fn window_width(&self) -> u32 {
        self.width
    }

    fn window_height(&self) -> u32 {
        self.height
    }

    fn window_title(&self) -> &str {
        &self.title
    }

    fn fov_degrees(&self) -> f32 {
        self.fov
    }

    fn max_frames(&self) -> Option<u64> {
        self.max_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let args = DefaultAppArgs::try_parse_from(["app"]).unwrap();
        assert_eq!(args, DefaultAppArgs::default());
        assert_eq!(args.window_config(), WindowConfig::default());
    }

    #[test]
    fn parses_all_flags() {
        let args = DefaultAppArgs::try_parse_from([
            "app",
            "--width",
            "1024",
            "--height",
            "768",
            "--title",
            "demo",
            "--fov",
            "60",
            "--max-frames",
            "10",
        ])
        .unwrap();
        assert_eq!(args.window_width(), 1024);
        assert_eq!(args.window_height(), 768);
        assert_eq!(args.window_title(), "demo");
        assert_eq!(args.fov_degrees(), 60.0);
        assert_eq!(args.max_frames(), Some(10));
    }

    #[test]
    fn rejects_zero_width() {
        let err = DefaultAppArgs::try_parse_from(["app", "--width", "0"]).unwrap_err();
        assert!(matches!(err, AppError::Args(_)));
    }

    #[test]
    fn unknown_flag_is_an_args_error() {
        let err = DefaultAppArgs::try_parse_from(["app", "--bogus"]).unwrap_err();
        match err {
            AppError::Args(e) => assert_eq!(e.kind(), clap::error::ErrorKind::UnknownArgument),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_fov_falls_back() {
        let args = DefaultAppArgs::try_parse_from(["app", "--fov", "200"]).unwrap();
        assert_eq!(args.fov_degrees(), 45.0);
    }

    #[test]
    fn command_line_frame_budget_wins() {
        let args = DefaultAppArgs::try_parse_from(["app", "--max-frames", "3"])
            .unwrap()
            .or_max_frames(600);
        assert_eq!(args.max_frames(), Some(3));
        assert_eq!(DefaultAppArgs::default().or_max_frames(600).max_frames(), Some(600));
    }
}
