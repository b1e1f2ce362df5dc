use crate::input::NavAction;

/// Whether pointer movement currently drives the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    /// Pointer is free; deltas are ignored.
    #[default]
    Unlocked,
    /// Pointer is captured by the navigation surface.
    Locked,
}

impl LockState {
    /// `true` when locked.
    #[must_use]
    pub fn is_locked(self) -> bool {
        self == Self::Locked
    }
}

/// Effective speed after resolving the two modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedMode {
    /// No modifier held.
    #[default]
    Normal,
    /// Slow modifier held (wins over fast).
    Slow,
    /// Fast modifier held and slow not held.
    Fast,
}

/// Movement the user is currently asking for.
///
/// Each axis is one of `-1`, `0`, `1`. The two modifiers are tracked
/// independently and resolved by [`MotionIntent::speed_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionIntent {
    /// `1` forward, `-1` back.
    pub forward_axis: i8,
    /// `1` right, `-1` left.
    pub right_axis: i8,
    /// Slow modifier held.
    pub slow_held: bool,
    /// Fast modifier held.
    pub fast_held: bool,
}

impl MotionIntent {
    /// Resolve the modifiers. Slow takes precedence when both are held.
    // TODO: confirm slow-over-fast precedence with product before changing it.
    #[must_use]
    pub fn speed_mode(self) -> SpeedMode {
        if self.slow_held {
            SpeedMode::Slow
        } else if self.fast_held {
            SpeedMode::Fast
        } else {
            SpeedMode::Normal
        }
    }

    /// No axis set and no modifier held.
    #[must_use]
    pub fn is_neutral(self) -> bool {
        self.forward_axis == 0
            && self.right_axis == 0
            && !self.slow_held
            && !self.fast_held
    }

    /// Back to neutral.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a key transition. The last pressed direction wins; releasing
    /// either key of an axis clears that axis.
    pub fn apply(&mut self, action: NavAction, pressed: bool) {
        match (action, pressed) {
            (NavAction::Forward, true) => self.forward_axis = 1,
            (NavAction::Back, true) => self.forward_axis = -1,
            (NavAction::Forward | NavAction::Back, false) => {
                self.forward_axis = 0;
            }
            (NavAction::Right, true) => self.right_axis = 1,
            (NavAction::Left, true) => self.right_axis = -1,
            (NavAction::Right | NavAction::Left, false) => self.right_axis = 0,
            (NavAction::Slow, held) => self.slow_held = held,
            (NavAction::Fast, held) => self.fast_held = held,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_wins_over_fast() {
        let intent = MotionIntent {
            slow_held: true,
            fast_held: true,
            ..MotionIntent::default()
        };
        assert_eq!(intent.speed_mode(), SpeedMode::Slow);
    }

    #[test]
    fn fast_alone_is_fast() {
        let mut intent = MotionIntent::default();
        intent.apply(NavAction::Fast, true);
        assert_eq!(intent.speed_mode(), SpeedMode::Fast);
        intent.apply(NavAction::Fast, false);
        assert_eq!(intent.speed_mode(), SpeedMode::Normal);
    }

    #[test]
    fn release_clears_axis_even_if_opposite_key_held() {
        let mut intent = MotionIntent::default();
        intent.apply(NavAction::Forward, true);
        intent.apply(NavAction::Back, true);
        assert_eq!(intent.forward_axis, -1);
        intent.apply(NavAction::Back, false);
        assert_eq!(intent.forward_axis, 0);
        assert!(intent.is_neutral());
    }

    #[test]
    fn lateral_axis_tracks_last_key() {
        let mut intent = MotionIntent::default();
        intent.apply(NavAction::Left, true);
        assert_eq!(intent.right_axis, -1);
        intent.apply(NavAction::Right, true);
        assert_eq!(intent.right_axis, 1);
        intent.reset();
        assert!(intent.is_neutral());
    }
}
