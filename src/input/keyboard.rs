use serde::{Deserialize, Serialize};

/// Navigation actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// KeyW = "forward"
/// Space = "slow"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavAction {
    /// Move along the look direction.
    Forward,
    /// Move against the look direction.
    Back,
    /// Strafe left.
    Left,
    /// Strafe right.
    Right,
    /// Slow modifier.
    Slow,
    /// Fast modifier.
    Fast,
}

impl NavAction {
    /// Directional actions, as opposed to the speed modifiers.
    #[must_use]
    pub fn is_movement(self) -> bool {
        matches!(self, Self::Forward | Self::Back | Self::Left | Self::Right)
    }
}
