//! Session bootstrap: choosing between the viewer and the intro, reading
//! the map manifest, and placing the camera before the first frame.

/// Map manifest types and spawn conversion.
pub mod manifest;
/// Scripted headless sessions.
pub mod replay;
/// Path routing and starting pose.
pub mod route;

pub use manifest::{
    hammer_to_metres, HammerVec, MapManifest, Spawn, HAMMER_UNITS_PER_METRE,
    PLAYER_EYE_OFFSET,
};
pub use replay::{ReplayReport, ReplayScript, ReplayStep};
pub use route::{
    asset_base_url, initial_pose, intro_link, intro_path, manifest_url,
    route_for_path, Route, FEATURED_ASSET,
};
