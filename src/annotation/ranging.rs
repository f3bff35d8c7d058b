use glam::Vec3;

use crate::error::AnnotateError;
use crate::geometry;
use crate::naming::{GroupKey, Role};
use crate::options::Options;
use crate::scene::{Color, LabelStyle, NodeShape, SceneNode};

/// Glyph shown on the dismiss affordance.
const DELETE_GLYPH: &str = "x";

/// Line, distance readout and delete icon of one measurement.
#[derive(Debug, Clone)]
pub struct RangingAnnotation {
    /// Grouping key shared by all three artifacts.
    pub key: GroupKey,
    /// Tube along the measured segment.
    pub line: SceneNode,
    /// Distance in millimetres at the midpoint.
    pub size: SceneNode,
    /// Clickable cross just below the end point.
    pub delete_icon: SceneNode,
    /// Measured distance in millimetres.
    pub distance: u32,
}

impl RangingAnnotation {
    /// Nodes in insertion order: line, size, delete icon.
    #[must_use]
    pub fn into_nodes(self) -> [SceneNode; 3] {
        [self.line, self.size, self.delete_icon]
    }
}

/// Build measurement `ranging` between `start` and `end`.
pub fn build_ranging(
    start: Vec3,
    end: Vec3,
    ranging: u32,
    options: &Options,
) -> Result<RangingAnnotation, AnnotateError> {
    if !geometry::is_finite_point(start) || !geometry::is_finite_point(end) {
        return Err(AnnotateError::InvalidGeometry(format!(
            "ranging {ranging} needs finite points"
        )));
    }
    let key = GroupKey::Ranging { ranging };
    let color = Color::from_hex(options.colors.ranging);
    let distance = geometry::distance(start, end, options.units.length);

    let line = SceneNode::artifact(
        key.with_role(Role::Line),
        NodeShape::Tube {
            path: vec![start, end],
            radius: options.ranging.tube_radius,
            segments: options.ranging.segments,
            closed: false,
        },
    )
    .colored(color);

    let size = SceneNode::artifact(
        key.with_role(Role::Size),
        NodeShape::Label {
            text: distance.to_string(),
            style: LabelStyle::Dimension,
        },
    )
    .at(geometry::midpoint(start, end))
    .colored(Color::from_hex(options.colors.label));

    let delete_icon = SceneNode::artifact(
        key.with_role(Role::DeleteIcon),
        NodeShape::Label {
            text: DELETE_GLYPH.to_owned(),
            style: LabelStyle::Icon,
        },
    )
    .at(end - Vec3::Y * options.ranging.icon_drop)
    .colored(color);

    Ok(RangingAnnotation {
        key,
        line,
        size,
        delete_icon,
        distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_sits_at_midpoint() {
        let end = Vec3::new(0.3, 0.4, 0.0);
        let r = build_ranging(Vec3::ZERO, end, 4, &Options::default()).unwrap();
        assert_eq!(r.distance, 500);
        assert_eq!(r.size.position, Vec3::new(0.15, 0.2, 0.0));
        assert_eq!(r.line.name, "ranging-measure:4-line");
        assert_eq!(r.delete_icon.name, "ranging-measure:4-delete-icon");
    }

    #[test]
    fn delete_icon_drops_below_end() {
        let end = Vec3::new(1.0, 1.0, 1.0);
        let r = build_ranging(Vec3::ZERO, end, 1, &Options::default()).unwrap();
        assert!((r.delete_icon.position.y - 0.994).abs() < 1e-6);
        assert_eq!(r.delete_icon.position.x, 1.0);
        match &r.line.shape {
            NodeShape::Tube { path, radius, segments, closed } => {
                assert_eq!(path, &vec![Vec3::ZERO, end]);
                assert_eq!(*radius, 0.003);
                assert_eq!(*segments, 40);
                assert!(!closed);
            }
            other => panic!("unexpected line shape {other:?}"),
        }
    }
}
