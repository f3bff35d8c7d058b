use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box centred on `center` with the given half extents.
    #[must_use]
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Smallest box containing all points, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(
            Self::from_corners(*first, *first),
            |acc, p| Self {
                min: acc.min.min(*p),
                max: acc.max.max(*p),
            },
        ))
    }

    /// Bounds of a section rectangle, widened along X only.
    ///
    /// The section plane is thin in X, so a hole ring sitting on it needs the
    /// slack; Y and Z stay exact.
    #[must_use]
    pub fn section(p1: Vec3, p2: Vec3, tolerance: f32) -> Self {
        let b = Self::from_corners(p1, p2);
        Self {
            min: Vec3::new(b.min.x - tolerance, b.min.y, b.min.z),
            max: Vec3::new(b.max.x + tolerance, b.max.y, b.max.z),
        }
    }

    /// Grow the box uniformly in every direction.
    #[must_use]
    pub fn expanded(self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive point containment.
    #[must_use]
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Whether `other` lies entirely inside this box (inclusive).
    #[must_use]
    pub fn contains_box(&self, other: &Self) -> bool {
        other.min.cmpge(self.min).all() && other.max.cmple(self.max).all()
    }
}

/// Whether the section spanned by `p1`/`p2` contains `other`, with the
/// X-only tolerance applied to the section.
#[must_use]
pub fn box_contains_box(
    p1: Vec3,
    p2: Vec3,
    tolerance: f32,
    other: &Aabb,
) -> bool {
    Aabb::section(p1, p2, tolerance).contains_box(other)
}

/// Whether the section spanned by `p1`/`p2` contains `point`, with the
/// X-only tolerance applied to the section.
#[must_use]
pub fn box_contains_point(
    p1: Vec3,
    p2: Vec3,
    tolerance: f32,
    point: Vec3,
) -> bool {
    Aabb::section(p1, p2, tolerance).contains_point(point)
}
