//! Mirrors the settled camera pose into the user-visible location.

/// Bridge from settle notifications to history writes.
pub mod bridge;
/// Location read/replace abstraction.
pub mod history;

pub use bridge::{connect, StateSyncBridge, SyncOutcome};
pub use history::{split_url, LocationHistory, MemoryHistory};
