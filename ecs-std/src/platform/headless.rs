use std::collections::VecDeque;

use glam::{DVec2, UVec2};

use super::{Platform, PlatformError, WindowConfig};
use crate::components::{ButtonSet, PointerSample};
use crate::render::{CommandLog, RecordingBackend, RenderBackend};

/// A frame of scripted input replayed by [`HeadlessPlatform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptedFrame {
    /// Report this pointer reading.
    Pointer(PointerSample),
    /// Fail the pointer query for this frame.
    Unavailable,
    /// Resize the window before the frame.
    Resize(UVec2),
}

/// A window without a display.
///
/// Each [`poll_events`](Platform::poll_events) consumes one scripted frame.
/// When the script runs out the pointer keeps its last reading. The window
/// reports a close request once `max_frames` polls have happened.
pub struct HeadlessPlatform {
    size: UVec2,
    script: VecDeque<ScriptedFrame>,
    current: Option<PointerSample>,
    last_sample: PointerSample,
    frames: u64,
    max_frames: Option<u64>,
    close_requested: bool,
    log: CommandLog,
}

impl HeadlessPlatform {
    pub fn new(config: &WindowConfig) -> Self {
        Self {
            size: UVec2::new(config.width, config.height),
            script: VecDeque::new(),
            current: Some(PointerSample::default()),
            last_sample: PointerSample::default(),
            frames: 0,
            max_frames: None,
            close_requested: false,
            log: CommandLog::default(),
        }
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn with_script(mut self, frames: impl IntoIterator<Item = ScriptedFrame>) -> Self {
        self.script.extend(frames);
        self
    }

    /// Script a left-button drag from `from` to `to` over `steps` frames,
    /// followed by a release frame.
    pub fn with_drag(self, from: DVec2, to: DVec2, steps: u32) -> Self {
        let held = ButtonSet::from(orbit_core::input::MouseButton::Left);
        let steps = steps.max(1);
        let frames = (0..=steps)
            .map(move |i| {
                let t = f64::from(i) / f64::from(steps);
                let p = from.lerp(to, t);
                ScriptedFrame::Pointer(PointerSample::new(p.x, p.y, held))
            })
            .chain(std::iter::once(ScriptedFrame::Pointer(PointerSample::new(
                to.x,
                to.y,
                ButtonSet::EMPTY,
            ))));
        self.with_script(frames)
    }

    /// Commands recorded by any backend this platform creates. The handle
    /// can be taken before the backend exists.
    pub fn command_log(&self) -> CommandLog {
        self.log.clone()
    }

    /// Ask the window to close at the next check.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn frames_polled(&self) -> u64 {
        self.frames
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self) -> Result<(), PlatformError> {
        self.frames += 1;
        self.current = Some(self.last_sample);

        while let Some(frame) = self.script.pop_front() {
            match frame {
                ScriptedFrame::Resize(size) => self.size = size,
                ScriptedFrame::Pointer(sample) => {
                    self.last_sample = sample;
                    self.current = Some(sample);
                    break;
                }
                ScriptedFrame::Unavailable => {
                    self.current = None;
                    break;
                }
            }
        }
        Ok(())
    }

    fn viewport_size(&self) -> UVec2 {
        self.size
    }

    fn pointer_sample(&mut self) -> Option<PointerSample> {
        self.current
    }

    fn should_close(&self) -> bool {
        self.close_requested || self.max_frames.is_some_and(|max| self.frames >= max)
    }

    fn create_backend(&mut self) -> Result<Box<dyn RenderBackend>, PlatformError> {
        Ok(Box::new(RecordingBackend::with_log(self.log.clone())))
    }
}
