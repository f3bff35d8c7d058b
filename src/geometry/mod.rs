//! Pure geometry helpers behind the annotation builders.
//!
//! Everything here is side-effect free: rectangle corner derivation,
//! millimetre distances, axis-aligned bounds with the section tolerance, and
//! ray tests used by hit-testing and the drag plane.

mod bounds;
mod ray;

pub use bounds::{box_contains_box, box_contains_point, Aabb};
pub use ray::{ray_aabb_hit_t, Ray};

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Length unit of scene coordinates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    /// One scene unit is one metre.
    #[default]
    Meter,
    /// One scene unit is one centimetre.
    Centimeter,
    /// One scene unit is one millimetre.
    Millimeter,
}

impl LengthUnit {
    /// Millimetres in one scene unit.
    #[must_use]
    pub fn mm_per_unit(self) -> f64 {
        match self {
            Self::Meter => 1000.0,
            Self::Centimeter => 10.0,
            Self::Millimeter => 1.0,
        }
    }

    /// Convert a millimetre length into scene units.
    #[must_use]
    pub fn mm_to_units(self, mm: f64) -> f32 {
        (mm / self.mm_per_unit()) as f32
    }
}

/// Derive the four corners of a rectangle from two opposite corners.
///
/// Returns `[A, D, B, C]` counter-clockwise from `p1`, where `A = p1`,
/// `B = p2`, `C` takes X/Z from `p2` and Y from `p1`, and `D` takes X/Z
/// from `p1` and Y from `p2`.
#[must_use]
pub fn rectangle_corners(p1: Vec3, p2: Vec3) -> [Vec3; 4] {
    let c = Vec3::new(p2.x, p1.y, p2.z);
    let d = Vec3::new(p1.x, p2.y, p1.z);
    [p1, d, p2, c]
}

/// Euclidean distance in whole millimetres, truncated toward zero.
///
/// The value is first rounded to the nearest micrometre, so a distance
/// within 0.5 µm below a whole millimetre reads as that millimetre
/// (`999.9996` gives 1000, `999.9994` gives 999).
#[must_use]
pub fn distance(p1: Vec3, p2: Vec3, unit: LengthUnit) -> u32 {
    let len = p1.as_dvec3().distance(p2.as_dvec3());
    truncate_mm(len * unit.mm_per_unit())
}

/// Mean of the absolute X offsets of two points, in truncated millimetres,
/// with the same micrometre snap as [`distance`].
///
/// Only meaningful for sections drawn across the vault's X axis.
#[must_use]
pub fn mean_abs_x(p1: Vec3, p2: Vec3, unit: LengthUnit) -> u32 {
    let mm = unit.mm_per_unit();
    let a = f64::from(p1.x.abs()) * mm;
    let b = f64::from(p2.x.abs()) * mm;
    truncate_mm((a + b) / 2.0)
}

/// Midpoint of a segment.
#[must_use]
pub fn midpoint(a: Vec3, b: Vec3) -> Vec3 {
    (a + b) * 0.5
}

/// Truncate a millimetre value after dropping sub-micrometre float noise.
///
/// Scene points are `f32`, so `0.7` arrives as `0.69999998…`; rounding to
/// a micrometre first keeps truncation faithful to the entered value.
fn truncate_mm(mm: f64) -> u32 {
    if !mm.is_finite() || mm <= 0.0 {
        return 0;
    }
    let snapped = (mm * 1000.0).round() / 1000.0;
    snapped.trunc() as u32
}

/// Whether every component of the point is finite.
#[must_use]
pub fn is_finite_point(p: Vec3) -> bool {
    p.is_finite()
}
