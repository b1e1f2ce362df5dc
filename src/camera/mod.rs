//! Free-look camera: pose math, the navigation controller, its event
//! channel and the host capabilities it depends on.

/// Navigation controller turning input into pose changes.
pub mod controller;
/// Pose type, direction math and projection.
pub mod core;
/// Typed publish/subscribe channel for navigation events.
pub mod events;
/// Host capability trait and a headless implementation.
pub mod host;
/// Lock state, motion intent and speed resolution.
pub mod intent;

pub use self::controller::NavigationController;
pub use self::core::{
    clamp_pitch, direction_from_pitch_yaw, pitch_yaw_from_direction,
    right_from_yaw, wrap_yaw, Pose, Projection,
};
pub use self::events::{EventBus, EventKind, NavEvent, SubscriptionId};
pub use self::host::{HeadlessHost, NavigationHost, POINTER_LOCK_UNAVAILABLE};
pub use self::intent::{LockState, MotionIntent, SpeedMode};
