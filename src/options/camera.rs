use serde::{Deserialize, Serialize};

use crate::camera::Projection;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Projection parameters for the rendered view.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f64,
    /// Near clipping plane distance.
    pub znear: f64,
    /// Far clipping plane distance.
    pub zfar: f64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.25,
            zfar: 20_000.0,
        }
    }
}

impl CameraOptions {
    /// Projection for a viewport of the given size.
    #[must_use]
    pub fn projection(&self, width: u32, height: u32) -> Projection {
        let mut projection = Projection {
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
            ..Projection::default()
        };
        projection.resize(width, height);
        projection
    }
}
