//! Shareable location strings.
//!
//! A location pins an asset and, optionally, a camera placement:
//!
//! ```text
//! /{webType}/{orgId}.{assetId}[@{x},{y},{z}[,{pitch},{yaw}]]
//! ```
//!
//! Positions are metres with three decimals, angles are whole degrees in
//! the path and radians in [`LocationState`]. Old links must keep decoding,
//! so the grammar is frozen.

mod codec;
mod state;

pub use codec::{decode, encode};
pub use state::{
    floor_millis, heading_degrees, round_degrees, LocationState, Orientation, Position, WebType,
};

impl std::str::FromStr for LocationState {
    type Err = crate::error::NoclipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl std::fmt::Display for LocationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode(self))
    }
}
