use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Holes", inline)]
#[serde(default)]
/// Hole ring, cable disc and size label geometry.
pub struct HoleOptions {
    /// Torus tube thickness of the ring.
    #[schemars(title = "Ring Thickness", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub ring_tube: f32,
    /// Radius of the cable disc.
    #[schemars(title = "Cable Radius", range(min = 0.005, max = 0.2), extend("step" = 0.005))]
    pub cable_radius: f32,
    /// The size label sits `diameter / divisor` above the hole centre.
    #[schemars(skip)]
    pub label_offset_divisor: f32,
}

impl HoleOptions {
    /// Vertical label offset for a hole of `diameter_mm`.
    #[must_use]
    pub fn label_offset(&self, diameter_mm: u32) -> f32 {
        if self.label_offset_divisor <= 0.0 {
            return 0.0;
        }
        diameter_mm as f32 / self.label_offset_divisor
    }
}

impl Default for HoleOptions {
    fn default() -> Self {
        Self {
            ring_tube: 0.012,
            cable_radius: 0.03,
            label_offset_divisor: 1300.0,
        }
    }
}
