use glam::DVec3;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::camera::Pose;
use crate::error::NoclipError;

/// Hammer (source-engine) units per metre.
pub const HAMMER_UNITS_PER_METRE: f64 = 39.37;

/// Height of a player's eyes above a spawn origin, in hammer units.
pub const PLAYER_EYE_OFFSET: f64 = 64.0;

const DEFAULT_NOT_READY: &str =
    "Error occurred when loading map. Please try again later.";

/// Convert hammer units to metres.
#[must_use]
pub fn hammer_to_metres(units: f64) -> f64 {
    units / HAMMER_UNITS_PER_METRE
}

/// A point in hammer coordinates (`z` is up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HammerVec {
    /// X.
    pub x: f64,
    /// Y.
    pub y: f64,
    /// Z (up).
    pub z: f64,
}

/// Player spawn point shipped with a map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Spawn {
    /// Spawn origin in hammer units.
    pub origin: HammerVec,
    /// Euler angles in degrees: `x` pitch, `y` yaw, `z` roll (unused).
    pub angles: HammerVec,
}

impl Spawn {
    /// Camera pose at this spawn, at eye height, in viewer axes.
    #[must_use]
    pub fn pose(&self) -> Pose {
        let position = DVec3::new(
            hammer_to_metres(self.origin.x),
            hammer_to_metres(self.origin.z + PLAYER_EYE_OFFSET),
            hammer_to_metres(self.origin.y),
        );
        Pose::new(
            position,
            self.angles.x.to_radians(),
            self.angles.y.to_radians(),
        )
    }
}

/// Response of the map manifest endpoint (`getMap?id=org.asset`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapManifest {
    /// Whether the map can be loaded now.
    pub is_ready: bool,
    /// Reason when not ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Echo of the organisation identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Echo of the asset identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    /// Model files relative to the asset's media directory.
    pub models: Vec<String>,
    /// Player spawn points.
    pub spawns: Vec<Spawn>,
}

impl MapManifest {
    /// Parse the endpoint's JSON body.
    ///
    /// # Errors
    ///
    /// [`NoclipError::Host`] on malformed JSON.
    pub fn from_json(body: &str) -> Result<Self, NoclipError> {
        serde_json::from_str(body)
            .map_err(|e| NoclipError::Host(format!("bad map manifest: {e}")))
    }

    /// Fail unless the map is ready to load.
    ///
    /// # Errors
    ///
    /// [`NoclipError::MapNotReady`] with the server's message, or a generic
    /// one when it sent none.
    pub fn ensure_ready(&self) -> Result<(), NoclipError> {
        if self.is_ready {
            Ok(())
        } else {
            let message = self
                .message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_NOT_READY.to_owned());
            Err(NoclipError::MapNotReady(message))
        }
    }

    /// Pick a spawn uniformly at random.
    pub fn choose_spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Spawn> {
        self.spawns.choose(rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const BODY: &str = r#"{
        "isReady": true,
        "orgId": "facepunch",
        "assetId": "construct",
        "models": ["construct.glb", "props.gltf"],
        "spawns": [
            {"origin": {"x": 393.7, "y": -787.4, "z": 0.0}, "angles": {"x": 0, "y": 90, "z": 0}}
        ]
    }"#;

    #[test]
    fn parses_endpoint_body() {
        let manifest = MapManifest::from_json(BODY).unwrap();
        assert!(manifest.ensure_ready().is_ok());
        assert_eq!(manifest.models.len(), 2);
        assert_eq!(manifest.org_id.as_deref(), Some("facepunch"));
        assert_eq!(manifest.spawns.len(), 1);
    }

    #[test]
    fn spawn_pose_swaps_axes_and_adds_eye_height() {
        let manifest = MapManifest::from_json(BODY).unwrap();
        let pose = manifest.spawns[0].pose();
        assert!((pose.position.x - 10.0).abs() < 1e-9);
        assert!((pose.position.y - 64.0 / 39.37).abs() < 1e-9);
        assert!((pose.position.z + 20.0).abs() < 1e-9);
        assert!((pose.yaw - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn not_ready_uses_server_message_or_default() {
        let manifest = MapManifest::from_json(r#"{"isReady": false, "message": "compiling"}"#).unwrap();
        let err = manifest.ensure_ready().unwrap_err();
        assert!(matches!(err, NoclipError::MapNotReady(ref m) if m == "compiling"));

        let manifest = MapManifest::from_json(r#"{"isReady": false}"#).unwrap();
        let err = manifest.ensure_ready().unwrap_err();
        assert!(matches!(err, NoclipError::MapNotReady(ref m) if m == DEFAULT_NOT_READY));
    }

    #[test]
    fn malformed_body_is_a_host_error() {
        assert!(matches!(
            MapManifest::from_json("<html>"),
            Err(NoclipError::Host(_))
        ));
    }

    #[test]
    fn choose_spawn_handles_empty_list() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(MapManifest::default().choose_spawn(&mut rng).is_none());
        let manifest = MapManifest::from_json(BODY).unwrap();
        assert!(manifest.choose_spawn(&mut rng).is_some());
    }
}
