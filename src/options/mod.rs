//! Annotation options with TOML preset support.
//!
//! Every tweakable constant (units, palette, hole, section, marker, ranging
//! and camera parameters) lives here. Options serialize to/from TOML so a
//! host can ship presets alongside its scene files.

mod camera;
mod colors;
mod hole;
mod ranging;
mod section;
mod units;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
pub use hole::HoleOptions;
pub use ranging::RangingOptions;
use schemars::JsonSchema;
pub use section::{MarkerOptions, SectionOptions};
use serde::{Deserialize, Serialize};
pub use units::UnitOptions;

use crate::error::AnnotateError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[hole]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Scene length unit.
    pub units: UnitOptions,
    /// Annotation palette.
    #[schemars(skip)]
    pub colors: ColorOptions,
    /// Hole annotation geometry.
    pub hole: HoleOptions,
    /// Cross-section annotation parameters.
    pub section: SectionOptions,
    /// Endpoint marker sizing.
    pub marker: MarkerOptions,
    /// Measurement line geometry.
    pub ranging: RangingOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, AnnotateError> {
        let content =
            std::fs::read_to_string(path).map_err(AnnotateError::Io)?;
        toml::from_str(&content)
            .map_err(|e| AnnotateError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), AnnotateError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AnnotateError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(AnnotateError::Io)?;
        }
        std::fs::write(path, content).map_err(AnnotateError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
