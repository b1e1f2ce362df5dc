//! Shared utilities.

/// Frame delta timing.
pub mod frame_timing;

pub use frame_timing::FrameClock;
