use glam::Vec3;

use crate::error::AnnotateError;
use crate::geometry::{self, LengthUnit};
use crate::naming::{EventType, GroupKey, Role};
use crate::options::Options;
use crate::scene::{Color, LabelStyle, NodeShape, SceneNode};

/// Artifacts and measurements of one cross-section rebuild, before
/// insertion.
#[derive(Debug, Clone)]
pub struct CrossSection {
    /// Grouping key shared by every artifact.
    pub key: GroupKey,
    /// Closed tube around the four corners.
    pub outline: SceneNode,
    /// Dimension labels on edges AC, DB, AD and CB.
    pub labels: [SceneNode; 4],
    /// Compass letter at the section centre, when enabled.
    pub direction: Option<SceneNode>,
    /// Edge A–C in millimetres.
    pub length: u32,
    /// Mean absolute X of the corners in millimetres.
    pub width: u32,
    /// Edge A–D in millimetres.
    pub depth: u32,
}

impl CrossSection {
    /// Nodes in insertion order: outline, labels, direction.
    #[must_use]
    pub fn into_nodes(self) -> Vec<SceneNode> {
        let mut nodes = Vec::with_capacity(6);
        nodes.push(self.outline);
        nodes.extend(self.labels);
        nodes.extend(self.direction);
        nodes
    }
}

fn dimension_label(
    key: GroupKey,
    from: Vec3,
    to: Vec3,
    value: u32,
    color: Color,
) -> SceneNode {
    SceneNode::artifact(
        key.with_role(Role::Size),
        NodeShape::Label {
            text: value.to_string(),
            style: LabelStyle::Dimension,
        },
    )
    .at(geometry::midpoint(from, to))
    .colored(color)
}

/// Build the outline, dimension labels and optional direction indicator of
/// section `page` spanned by opposite corners `p1` and `p2`.
pub fn build_cross_section(
    p1: Vec3,
    p2: Vec3,
    event: EventType,
    page: u32,
    options: &Options,
) -> Result<CrossSection, AnnotateError> {
    if !geometry::is_finite_point(p1) || !geometry::is_finite_point(p2) {
        return Err(AnnotateError::InvalidGeometry(format!(
            "section {page} corners must be finite, got {p1} and {p2}"
        )));
    }
    let key = GroupKey::Section { event, page };
    let unit: LengthUnit = options.units.length;
    let corners = geometry::rectangle_corners(p1, p2);
    let [a, d, b, c] = corners;

    let length = geometry::distance(a, c, unit);
    let depth = geometry::distance(a, d, unit);
    let width = geometry::mean_abs_x(p1, p2, unit);

    let outline = SceneNode::artifact(
        key.with_role(Role::Line),
        NodeShape::Tube {
            path: corners.to_vec(),
            radius: options.section.outline_radius,
            segments: options.section.outline_segments,
            closed: true,
        },
    )
    .colored(Color::from_hex(options.colors.outline));

    let label_color = Color::from_hex(options.colors.label);
    let labels = [
        dimension_label(key, a, c, length, label_color),
        dimension_label(key, d, b, length, label_color),
        dimension_label(key, a, d, depth, label_color),
        dimension_label(key, c, b, depth, label_color),
    ];

    let direction = options.section.direction_indicator.then(|| {
        SceneNode::artifact(
            key.with_role(Role::Direction),
            NodeShape::Label {
                text: options.section.direction_text.clone(),
                style: LabelStyle::Direction,
            },
        )
        .at(geometry::midpoint(p1, p2))
        .colored(Color::from_hex(options.colors.direction))
    });

    Ok(CrossSection {
        key,
        outline,
        labels,
        direction,
        length,
        width,
        depth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_text(node: &SceneNode) -> &str {
        match &node.shape {
            NodeShape::Label { text, .. } => text,
            _ => "",
        }
    }

    #[test]
    fn outline_is_named_for_its_page() {
        let s = build_cross_section(
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 2.0),
            EventType::Drag,
            3,
            &Options::default(),
        )
        .unwrap();
        assert_eq!(s.outline.name, "plane-drag:3-line");
        assert_eq!(s.outline.role(), Some(Role::Line));
        match &s.outline.shape {
            NodeShape::Tube {
                path,
                radius,
                segments,
                closed,
            } => {
                assert_eq!(path.len(), 4);
                assert_eq!(*radius, 0.01);
                assert_eq!(*segments, 300);
                assert!(closed);
            }
            other => panic!("unexpected outline shape {other:?}"),
        }
    }

    #[test]
    fn measurements_follow_corner_edges() {
        let s = build_cross_section(
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 2.0),
            EventType::Drag,
            3,
            &Options::default(),
        )
        .unwrap();
        // C = (0, 0, 2), D = (0, 1, 0)
        assert_eq!(s.length, 2000);
        assert_eq!(s.depth, 1000);
        assert_eq!(s.width, 0);
        let texts: Vec<&str> = s.labels.iter().map(label_text).collect();
        assert_eq!(texts, ["2000", "2000", "1000", "1000"]);
        assert_eq!(s.labels[0].position, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(s.labels[2].position, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn width_averages_absolute_x() {
        let s = build_cross_section(
            Vec3::new(-0.6, 0.0, 0.0),
            Vec3::new(0.8, 1.0, 1.0),
            EventType::DoubleClick,
            1,
            &Options::default(),
        )
        .unwrap();
        assert_eq!(s.width, 700);
        assert_eq!(s.key.page(), Some(1));
    }

    #[test]
    fn direction_indicator_is_optional() {
        let mut opts = Options::default();
        let build = |opts: &Options| {
            build_cross_section(Vec3::ZERO, Vec3::ONE, EventType::Drag, 1, opts)
        };
        let with = build(&opts).unwrap();
        let centre = with.direction.as_ref().unwrap();
        assert_eq!(label_text(centre), "N");
        assert_eq!(centre.position, Vec3::splat(0.5));
        assert_eq!(with.into_nodes().len(), 6);

        opts.section.direction_indicator = false;
        let without = build(&opts).unwrap();
        assert!(without.direction.is_none());
        assert_eq!(without.into_nodes().len(), 5);
    }

    #[test]
    fn non_finite_corner_is_rejected() {
        let err = build_cross_section(
            Vec3::new(f32::NAN, 0.0, 0.0),
            Vec3::ONE,
            EventType::Drag,
            1,
            &Options::default(),
        );
        assert!(matches!(err, Err(AnnotateError::InvalidGeometry(_))));
    }
}
