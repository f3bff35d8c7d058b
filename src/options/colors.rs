use serde::{Deserialize, Serialize};

/// Annotation palette, stored as packed `0xRRGGBB` values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Hole ring at rest.
    pub hole_ring: u32,
    /// Hole ring while selected for dragging.
    pub hole_highlight: u32,
    /// Cable disc inside a hole.
    pub cable: u32,
    /// Cross-section outline.
    pub outline: u32,
    /// Endpoint marker spheres.
    pub marker: u32,
    /// Dimension label text.
    pub label: u32,
    /// Direction indicator letter.
    pub direction: u32,
    /// Ranging line and its readout.
    pub ranging: u32,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            hole_ring: 0xffff00,
            hole_highlight: 0x00ffff,
            cable: 0xff0000,
            outline: 0xffff00,
            marker: 0xff0000,
            label: 0xffffff,
            direction: 0xffffff,
            ranging: 0xffff00,
        }
    }
}
