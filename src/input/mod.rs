//! Input vocabulary: raw events from the host and the navigation actions
//! keys are bound to.

/// Platform-agnostic input events.
pub mod event;
/// Bindable navigation actions.
pub mod keyboard;

pub use event::{InputEvent, MouseButton};
pub use keyboard::NavAction;
