use glam::Vec3;

use crate::error::AnnotateError;
use crate::geometry;
use crate::naming::{GroupKey, Role};
use crate::options::Options;
use crate::scene::{Color, LabelStyle, NodeShape, SceneNode};

/// Ring, cable disc and size label of one hole, before insertion.
#[derive(Debug, Clone)]
pub struct HoleAnnotation {
    /// Grouping key shared by all three artifacts.
    pub key: GroupKey,
    /// Torus outlining the penetration; this is the drag handle.
    pub ring: SceneNode,
    /// Disc standing in for the cable inside the hole.
    pub cable: SceneNode,
    /// Diameter readout above the hole.
    pub size: SceneNode,
}

impl HoleAnnotation {
    /// Nodes in insertion order: ring, cable, size.
    #[must_use]
    pub fn into_nodes(self) -> [SceneNode; 3] {
        [self.ring, self.cable, self.size]
    }
}

/// Where the size label of a `diameter_mm` hole centred at `point` sits.
#[must_use]
pub fn size_label_position(
    point: Vec3,
    diameter_mm: u32,
    options: &Options,
) -> Vec3 {
    point + Vec3::Y * options.hole.label_offset(diameter_mm)
}

/// Build the artifacts of hole `hole` with nominal diameter `diameter_mm`
/// centred at `point`. The ring faces the X axis.
pub fn build_hole(
    point: Vec3,
    diameter_mm: u32,
    hole: u64,
    options: &Options,
) -> Result<HoleAnnotation, AnnotateError> {
    if diameter_mm == 0 {
        return Err(AnnotateError::InvalidGeometry(format!(
            "hole {hole} needs a non-zero diameter"
        )));
    }
    if !geometry::is_finite_point(point) {
        return Err(AnnotateError::InvalidGeometry(format!(
            "hole {hole} centre must be finite, got {point}"
        )));
    }
    let key = GroupKey::Hole { diameter_mm, hole };
    let radius = options.units.length.mm_to_units(f64::from(diameter_mm) / 2.0);

    let ring = SceneNode::artifact(
        key.with_role(Role::HoleRing),
        NodeShape::Torus {
            radius,
            tube: options.hole.ring_tube,
            axis: Vec3::X,
        },
    )
    .at(point)
    .colored(Color::from_hex(options.colors.hole_ring));

    let cable = SceneNode::artifact(
        key.with_role(Role::Cable),
        NodeShape::Disc {
            radius: options.hole.cable_radius,
            normal: Vec3::X,
        },
    )
    .at(point)
    .colored(Color::from_hex(options.colors.cable));

    let size = SceneNode::artifact(
        key.with_role(Role::Size),
        NodeShape::Label {
            text: diameter_mm.to_string(),
            style: LabelStyle::Dimension,
        },
    )
    .at(size_label_position(point, diameter_mm, options))
    .colored(Color::from_hex(options.colors.label));

    Ok(HoleAnnotation {
        key,
        ring,
        cable,
        size,
    })
}
