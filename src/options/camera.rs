use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Projection and orbit behaviour of the view camera.
///
/// Distances are in scene units; the speeds scale the controller's base
/// rates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clip distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clip distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Orbit radius the view opens with.
    #[schemars(title = "Start Distance", range(min = 0.5, max = 50.0), extend("step" = 0.5))]
    pub start_distance: f32,
    /// Closest the camera may zoom to its focus.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest the camera may zoom from its focus.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Orbit sensitivity.
    #[schemars(title = "Orbit Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Pan sensitivity.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Wheel zoom sensitivity.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
}

impl CameraOptions {
    /// Clamp an orbit radius into the configured zoom range.
    #[must_use]
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        let lo = self.min_distance.max(f32::EPSILON);
        distance.clamp(lo, self.max_distance.max(lo))
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.01,
            zfar: 500.0,
            start_distance: 5.0,
            min_distance: 0.05,
            max_distance: 500.0,
            rotate_speed: 0.5,
            pan_speed: 0.5,
            zoom_speed: 0.1,
        }
    }
}
