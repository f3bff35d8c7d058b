use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Cross Sections", inline)]
#[serde(default)]
/// Cross-section outline and containment parameters.
pub struct SectionOptions {
    /// Outline tube radius.
    #[schemars(title = "Outline Radius", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub outline_radius: f32,
    /// Tubular segments of the outline.
    #[schemars(skip)]
    pub outline_segments: u32,
    /// X-axis slack when testing whether a hole lies on a section.
    #[schemars(title = "Containment Tolerance", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub tolerance: f32,
    /// Emit a compass letter at the section centre.
    #[schemars(title = "Direction Indicator")]
    pub direction_indicator: bool,
    /// Letter shown by the direction indicator.
    #[schemars(skip)]
    pub direction_text: String,
}

impl SectionOptions {
    /// Number of artifacts one rebuild of a section produces.
    #[must_use]
    pub fn generation_len(&self) -> usize {
        if self.direction_indicator {
            8
        } else {
            7
        }
    }
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            outline_radius: 0.01,
            outline_segments: 300,
            tolerance: 0.05,
            direction_indicator: true,
            direction_text: "N".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Markers", inline)]
#[serde(default)]
/// Endpoint marker sizing.
pub struct MarkerOptions {
    /// Marker radius is the camera distance divided by this.
    #[schemars(title = "Distance Divisor", range(min = 10.0, max = 1000.0), extend("step" = 10.0))]
    pub distance_divisor: f32,
}

impl MarkerOptions {
    /// Marker radius for a point `camera_distance` away from the eye.
    #[must_use]
    pub fn radius(&self, camera_distance: f32) -> f32 {
        if self.distance_divisor <= 0.0 {
            return 0.0;
        }
        camera_distance / self.distance_divisor
    }
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            distance_divisor: 100.0,
        }
    }
}
