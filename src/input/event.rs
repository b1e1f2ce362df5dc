use serde::{Deserialize, Serialize};

/// Platform-agnostic input events.
///
/// The browser host and the CLI replay both produce these and feed them to
/// [`NavigationController::handle_event`](crate::camera::NavigationController::handle_event).
///
/// # Example
///
/// ```
/// use noclip::input::InputEvent;
///
/// let event: InputEvent =
///     serde_json::from_str(r#"{"type":"key","code":"KeyW","pressed":true}"#)
///         .unwrap();
/// assert_eq!(
///     event,
///     InputEvent::Key { code: "KeyW".into(), pressed: true }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Relative pointer movement (pointer-lock deltas).
    PointerMoved {
        /// Horizontal delta in pixels, positive to the right.
        dx: f64,
        /// Vertical delta in pixels, positive downward.
        dy: f64,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Physical key pressed or released.
    Key {
        /// Key code in `KeyboardEvent.code` form (`"KeyW"`, `"Space"`).
        code: String,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Host reports that pointer capture was gained or lost.
    LockChanged {
        /// Whether the pointer is now captured.
        locked: bool,
    },
    /// Host could not grant pointer capture.
    LockError,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index.
    #[must_use]
    pub fn from_dom_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}
