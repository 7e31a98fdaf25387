use glam::{DVec2, UVec2, Vec2};
use orbit_core::input::MouseButton;

/// A set of pointer buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: Self = Self(0);

    pub fn insert(&mut self, button: MouseButton) {
        self.0 |= 1 << button.index();
    }

    pub fn remove(&mut self, button: MouseButton) {
        self.0 &= !(1 << button.index());
    }

    pub fn with(mut self, button: MouseButton) -> Self {
        self.insert(button);
        self
    }

    pub fn contains(&self, button: MouseButton) -> bool {
        self.0 & (1 << button.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = MouseButton> + '_ {
        MouseButton::ALL.into_iter().filter(|b| self.contains(*b))
    }
}

impl From<MouseButton> for ButtonSet {
    fn from(button: MouseButton) -> Self {
        Self::EMPTY.with(button)
    }
}

impl FromIterator<MouseButton> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = MouseButton>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for button in iter {
            set.insert(button);
        }
        set
    }
}

/// One frame's pointer reading from the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Cursor position in window pixels.
    pub position: DVec2,
    /// Buttons held down.
    pub buttons: ButtonSet,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, buttons: ButtonSet) -> Self {
        Self {
            position: DVec2::new(x, y),
            buttons,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ButtonState {
    pressed: bool,
    changed: bool,
}

/// Per-frame pointer tracker resource.
///
/// `last_position` is the baseline of the current drag: it is only moved
/// to the cursor on a frame where some button changed state, so
/// [`delta`](PointerState::delta) measures travel since the last transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerState {
    buttons: [ButtonState; 3],
    pub last_position: DVec2,
    pub current_position: DVec2,
    fresh: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one frame's sample. Returns whether any button changed.
    ///
    /// Button edges are computed first, then the cursor moves, then the
    /// baseline follows the cursor if a button changed.
    pub fn update(&mut self, sample: &PointerSample) -> bool {
        let mut any_changed = false;
        for button in MouseButton::ALL {
            let state = &mut self.buttons[button.index()];
            let pressed = sample.buttons.contains(button);
            state.changed = pressed != state.pressed;
            state.pressed = pressed;
            any_changed |= state.changed;
        }

        self.current_position = sample.position;

        if any_changed {
            self.last_position = self.current_position;
        }
        self.fresh = true;
        any_changed
    }

    /// Flag this frame as having no reading. Consumers skip stale frames.
    pub fn mark_stale(&mut self) {
        self.fresh = false;
    }

    /// Whether the last frame produced a reading.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].pressed
    }

    /// Whether `button` changed state on the last update.
    pub fn changed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].changed
    }

    pub fn any_changed(&self) -> bool {
        self.buttons.iter().any(|b| b.changed)
    }

    /// Buttons currently held.
    pub fn held(&self) -> ButtonSet {
        MouseButton::ALL
            .into_iter()
            .filter(|b| self.is_pressed(*b))
            .collect()
    }

    /// Pixel travel since the baseline.
    pub fn delta(&self) -> DVec2 {
        self.current_position - self.last_position
    }

    /// Travel since the baseline as a fraction of the viewport per axis.
    pub fn fractional_delta(&self, viewport: UVec2) -> Vec2 {
        let size = viewport.max(UVec2::ONE).as_dvec2();
        (self.delta() / size).as_vec2()
    }
}
