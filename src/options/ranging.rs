use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Ranging", inline)]
#[serde(default)]
/// Measurement line geometry.
pub struct RangingOptions {
    /// Line tube radius.
    #[schemars(title = "Line Radius", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub tube_radius: f32,
    /// Tubular segments of the line.
    #[schemars(skip)]
    pub segments: u32,
    /// How far below the end point the delete icon sits.
    #[schemars(skip)]
    pub icon_drop: f32,
}

impl Default for RangingOptions {
    fn default() -> Self {
        Self {
            tube_radius: 0.003,
            segments: 40,
            icon_drop: 0.006,
        }
    }
}
