use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::camera::Pose;
use crate::error::NoclipError;

/// Which viewer a location addresses. Only the free-look viewer exists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WebType {
    /// Free-look flight through a map.
    #[default]
    Noclip,
}

impl WebType {
    /// Canonical path segment.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Noclip => "noclip",
        }
    }
}

impl fmt::Display for WebType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebType {
    type Err = NoclipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("noclip") {
            Ok(Self::Noclip)
        } else {
            Err(NoclipError::InvalidLocationFormat(s.to_owned()))
        }
    }
}

/// Position component of a location, metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X.
    pub x: f64,
    /// Y (up).
    pub y: f64,
    /// Z.
    pub z: f64,
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Position> for DVec3 {
    fn from(p: Position) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

/// Orientation component of a location, radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Pitch in radians.
    pub pitch: f64,
    /// Yaw in radians.
    pub yaw: f64,
}

/// Structured form of a location path.
///
/// Values are plain records: build a new one rather than editing one that
/// is shared. `orientation` is only meaningful together with `position`;
/// [`encode`](super::encode) drops an orientation that has no position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationState {
    /// Viewer kind.
    pub web_type: WebType,
    /// Organisation identifier (`[a-z]+`).
    pub org_id: String,
    /// Asset identifier (`[a-z0-9_-]+`).
    pub asset_id: String,
    /// Camera position, if the location pins one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Camera orientation, if the location pins one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
}

/// Snap tolerance, in millimetres, for values already on the 3-decimal grid.
const MILLI_SNAP: f64 = 1e-6;

/// Position component in whole millimetres, floored.
///
/// A value whose scaled form is within a millionth of an integer is taken
/// as that integer, so `1.234` never becomes `1.233` through binary
/// representation error.
#[must_use]
pub fn floor_millis(value: f64) -> i64 {
    let scaled = value * 1000.0;
    let nearest = scaled.round();
    if (scaled - nearest).abs() < MILLI_SNAP {
        nearest as i64
    } else {
        scaled.floor() as i64
    }
}

/// Angle in radians to the nearest whole degree.
#[must_use]
pub fn round_degrees(radians: f64) -> i64 {
    radians.to_degrees().round() as i64
}

/// Yaw in radians to a whole-degree heading in `[0, 360)`. A yaw that
/// rounds up to a full turn is written as `0`.
#[must_use]
pub fn heading_degrees(radians: f64) -> i64 {
    round_degrees(radians).rem_euclid(360)
}

fn millis_to_metres(millis: i64) -> f64 {
    millis as f64 / 1000.0
}

fn degrees_to_radians(degrees: i64) -> f64 {
    (degrees as f64).to_radians()
}

impl LocationState {
    /// Location naming an asset with no camera placement.
    #[must_use]
    pub fn new(org_id: impl Into<String>, asset_id: impl Into<String>) -> Self {
        Self {
            web_type: WebType::Noclip,
            org_id: org_id.into(),
            asset_id: asset_id.into(),
            position: None,
            orientation: None,
        }
    }

    /// Same asset, camera placed at `pose`, at path precision.
    #[must_use]
    pub fn from_pose(
        web_type: WebType,
        org_id: &str,
        asset_id: &str,
        pose: &Pose,
    ) -> Self {
        Self {
            web_type,
            org_id: org_id.to_owned(),
            asset_id: asset_id.to_owned(),
            position: Some(pose.position.into()),
            orientation: Some(Orientation {
                pitch: pose.pitch,
                yaw: pose.yaw,
            }),
        }
        .quantized()
    }

    /// Copy with the position floored to millimetres and the angles
    /// rounded to whole degrees, i.e. exactly what survives a trip through
    /// the path form.
    #[must_use]
    pub fn quantized(&self) -> Self {
        let position = self.position.map(|p| Position {
            x: millis_to_metres(floor_millis(p.x)),
            y: millis_to_metres(floor_millis(p.y)),
            z: millis_to_metres(floor_millis(p.z)),
        });
        let orientation = position.and(self.orientation).map(|o| Orientation {
            pitch: degrees_to_radians(round_degrees(o.pitch)),
            yaw: degrees_to_radians(heading_degrees(o.yaw)),
        });
        Self {
            position,
            orientation,
            ..self.clone()
        }
    }

    /// Overlay `self` on `baseline`: identifiers come from `self`, and the
    /// position and orientation from `self` when present, otherwise from
    /// `baseline`.
    #[must_use]
    pub fn merge_over(&self, baseline: &Self) -> Self {
        Self {
            web_type: self.web_type,
            org_id: self.org_id.clone(),
            asset_id: self.asset_id.clone(),
            position: self.position.or(baseline.position),
            orientation: self.orientation.or(baseline.orientation),
        }
    }

    /// Whether an orientation is present without a position.
    #[must_use]
    pub fn has_orphan_orientation(&self) -> bool {
        self.position.is_none() && self.orientation.is_some()
    }

    /// Pose described by this location, if it pins a position. A missing
    /// orientation leaves the camera level, facing `-Z`.
    #[must_use]
    pub fn pose(&self) -> Option<Pose> {
        let position = self.position?;
        let (pitch, yaw) = self.orientation.map_or((0.0, 0.0), |o| (o.pitch, o.yaw));
        Some(Pose::new(position.into(), pitch, yaw))
    }
}
