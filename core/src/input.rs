//! Platform-agnostic input types.
//!
//! Provides a [`MouseButton`] enum that identifies the pointer buttons tracked
//! by the viewer without depending on any windowing crate.

/// Pointer button identifier.
///
/// Platform layers map their native button codes to this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button / wheel click.
    Middle,
}

impl MouseButton {
    /// Every tracked button, in slot order.
    pub const ALL: [MouseButton; 3] = [Self::Left, Self::Right, Self::Middle];

    /// Dense slot index used by per-button state arrays.
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Middle => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_slot_order() {
        for (slot, button) in MouseButton::ALL.iter().enumerate() {
            assert_eq!(button.index(), slot);
        }
    }
}
