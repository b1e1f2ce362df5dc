use std::f64::consts::{FRAC_PI_2, TAU};

use glam::{DMat4, DVec3};

/// Camera position and orientation at an instant.
///
/// `pitch` is kept in `[-π/2, π/2]` and `yaw` in `[0, 2π)`. Use
/// [`Pose::new`] or [`Pose::set_pitch_yaw`] to get those guarantees;
/// the fields are public for readers, writers must keep the ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World-space position in metres.
    pub position: DVec3,
    /// Elevation angle in radians (positive looks up).
    pub pitch: f64,
    /// Heading in radians, counter-clockwise about world up.
    pub yaw: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

impl Pose {
    /// Build a pose, normalizing the angles into range.
    #[must_use]
    pub fn new(position: DVec3, pitch: f64, yaw: f64) -> Self {
        let mut pose = Self {
            position,
            ..Self::default()
        };
        pose.set_pitch_yaw(pitch, yaw);
        pose
    }

    /// Overwrite both angles, clamping pitch and wrapping yaw.
    pub fn set_pitch_yaw(&mut self, pitch: f64, yaw: f64) {
        self.pitch = clamp_pitch(pitch);
        self.yaw = wrap_yaw(yaw);
    }

    /// Unit look direction.
    #[must_use]
    pub fn direction(&self) -> DVec3 {
        direction_from_pitch_yaw(self.pitch, self.yaw)
    }

    /// Unit horizontal right vector.
    #[must_use]
    pub fn right(&self) -> DVec3 {
        right_from_yaw(self.yaw)
    }

    /// Right-handed view matrix looking along [`Pose::direction`].
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_to_rh(self.position, self.direction(), self.up())
    }

    /// Camera up vector, orthogonal to both direction and right.
    #[must_use]
    pub fn up(&self) -> DVec3 {
        self.right().cross(self.direction())
    }
}

/// Look direction for the given angles:
/// `(-cos(pitch)·sin(yaw), sin(pitch), -cos(pitch)·cos(yaw))`.
///
/// At zero pitch and yaw the camera looks down `-Z`.
#[must_use]
pub fn direction_from_pitch_yaw(pitch: f64, yaw: f64) -> DVec3 {
    let (sin_p, cos_p) = pitch.sin_cos();
    let (sin_y, cos_y) = yaw.sin_cos();
    DVec3::new(-cos_p * sin_y, sin_p, -cos_p * cos_y)
}

/// Horizontal right vector: the look direction with pitch dropped, rotated
/// -90° about world up.
#[must_use]
pub fn right_from_yaw(yaw: f64) -> DVec3 {
    let (sin_y, cos_y) = yaw.sin_cos();
    DVec3::new(cos_y, 0.0, -sin_y)
}

/// Recover `(pitch, yaw)` from a look direction. The vector does not need
/// to be normalized. A zero vector maps to `(0, 0)`; a straight up/down
/// vector keeps yaw at 0.
#[must_use]
pub fn pitch_yaw_from_direction(direction: DVec3) -> (f64, f64) {
    let dir = direction.normalize_or_zero();
    if dir == DVec3::ZERO {
        return (0.0, 0.0);
    }
    let pitch = dir.y.clamp(-1.0, 1.0).asin();
    let horizontal = dir.x.hypot(dir.z);
    let yaw = if horizontal <= f64::EPSILON {
        0.0
    } else {
        (-dir.x).atan2(-dir.z)
    };
    (clamp_pitch(pitch), wrap_yaw(yaw))
}

/// Clamp pitch into `[-π/2, π/2]`. NaN maps to 0.
#[must_use]
pub fn clamp_pitch(pitch: f64) -> f64 {
    if pitch.is_nan() {
        return 0.0;
    }
    pitch.clamp(-FRAC_PI_2, FRAC_PI_2)
}

/// Wrap yaw into `[0, 2π)` by whole turns.
///
/// Small excursions are corrected by adding or subtracting `2π` so a value
/// just past either boundary lands next to the other one. Values many
/// turns away are first reduced with `rem_euclid`. Non-finite input maps
/// to 0.
#[must_use]
pub fn wrap_yaw(yaw: f64) -> f64 {
    if !yaw.is_finite() {
        return 0.0;
    }
    let mut yaw = if yaw.abs() > 4.0 * TAU {
        yaw.rem_euclid(TAU)
    } else {
        yaw
    };
    while yaw < 0.0 {
        yaw += TAU;
    }
    while yaw >= TAU {
        yaw -= TAU;
    }
    yaw
}

/// Perspective projection used when mirroring a pose into a rendered view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Viewport aspect ratio (width / height).
    pub aspect: f64,
    /// Vertical field of view in degrees.
    pub fovy: f64,
    /// Near clipping plane distance.
    pub znear: f64,
    /// Far clipping plane distance.
    pub zfar: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            aspect: 16.0 / 9.0,
            fovy: 45.0,
            znear: 0.25,
            zfar: 20_000.0,
        }
    }
}

impl Projection {
    /// Update the aspect ratio after a viewport resize. Zero-height
    /// viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = f64::from(width) / f64::from(height);
        }
    }

    /// Combined view-projection matrix for `pose`.
    #[must_use]
    pub fn build_matrix(&self, pose: &Pose) -> DMat4 {
        let proj = DMat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * pose.view_matrix()
    }
}
