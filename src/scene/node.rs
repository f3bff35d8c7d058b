use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;
use crate::naming::{self, ArtifactId, GroupKey, Role};

// ---------------------------------------------------------------------------
// Ids and colours
// ---------------------------------------------------------------------------

/// Handle to a node owned by a [`SceneRepository`](super::SceneRepository).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub struct NodeId(pub u32);

/// Linear RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub [f32; 3]);

impl Color {
    /// Build from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self([channel(16), channel(8), channel(0)])
    }

    /// Pack back into `0xRRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> u32 {
        let [r, g, b] =
            self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u32);
        (r << 16) | (g << 8) | b
    }
}

impl From<[f32; 3]> for Color {
    fn from(rgb: [f32; 3]) -> Self {
        Self(rgb)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self([1.0, 1.0, 1.0])
    }
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// How a text label is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// Small boxed dimension readout.
    Dimension,
    /// Large translucent compass letter.
    Direction,
    /// Clickable glyph such as the ranging dismiss cross.
    Icon,
}

/// Renderable payload of a node.
///
/// Node positions are world-space; groups carry no transform of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeShape {
    /// Container for other nodes.
    Group,
    /// Ring around `axis` centred on the node position.
    Torus {
        /// Ring radius.
        radius: f32,
        /// Tube thickness.
        tube: f32,
        /// Unit normal of the ring plane.
        axis: Vec3,
    },
    /// Flat disc centred on the node position.
    Disc {
        /// Disc radius.
        radius: f32,
        /// Unit normal of the disc.
        normal: Vec3,
    },
    /// Sphere centred on the node position.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// Tube swept along a world-space polyline.
    Tube {
        /// Polyline vertices.
        path: Vec<Vec3>,
        /// Tube radius.
        radius: f32,
        /// Tubular segments used when meshing.
        segments: u32,
        /// Whether the last vertex connects back to the first.
        closed: bool,
    },
    /// Screen-facing text anchored at the node position.
    Label {
        /// Displayed text.
        text: String,
        /// Presentation style.
        style: LabelStyle,
    },
    /// Host-owned geometry this crate never inspects (models, lights).
    Opaque,
}

/// Structured identity attached to a node, mirroring its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMeta {
    /// Annotation the node belongs to.
    pub key: GroupKey,
    /// Role inside the annotation; `None` for group containers.
    pub role: Option<Role>,
}

// ---------------------------------------------------------------------------
// SceneNode
// ---------------------------------------------------------------------------

/// One node of the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Display identifier (see [`naming`](crate::naming)).
    pub name: String,
    /// Structured copy of the name's fields, preferred for lookups.
    pub metadata: Option<NodeMeta>,
    /// Whether the node is drawn.
    pub visible: bool,
    /// World-space anchor.
    pub position: Vec3,
    /// Material colour.
    pub color: Color,
    /// Renderable payload.
    pub shape: NodeShape,
    pub(super) children: Vec<NodeId>,
}

impl SceneNode {
    /// Plain node with a free-form name and no metadata.
    #[must_use]
    pub fn named(name: impl Into<String>, shape: NodeShape) -> Self {
        Self {
            name: name.into(),
            metadata: None,
            visible: true,
            position: Vec3::ZERO,
            color: Color::default(),
            shape,
            children: Vec::new(),
        }
    }

    /// Annotation artifact whose name and metadata both derive from `id`.
    #[must_use]
    pub fn artifact(id: ArtifactId, shape: NodeShape) -> Self {
        Self {
            metadata: Some(NodeMeta {
                key: id.key,
                role: Some(id.role),
            }),
            ..Self::named(naming::encode(&id), shape)
        }
    }

    /// Empty container for the artifacts of one annotation.
    #[must_use]
    pub fn group(key: GroupKey) -> Self {
        Self {
            metadata: Some(NodeMeta { key, role: None }),
            ..Self::named(key.to_string(), NodeShape::Group)
        }
    }

    /// Builder-style position setter.
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder-style colour setter.
    #[must_use]
    pub fn colored(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Child ids in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node is a container.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.shape, NodeShape::Group)
    }

    /// Artifact identity: metadata first, then the decoded name.
    #[must_use]
    pub fn artifact_id(&self) -> Option<ArtifactId> {
        match self.metadata {
            Some(NodeMeta {
                key,
                role: Some(role),
            }) => Some(ArtifactId { key, role }),
            Some(NodeMeta { role: None, .. }) => None,
            None => naming::decode(&self.name),
        }
    }

    /// Grouping key: metadata first, then the decoded name.
    #[must_use]
    pub fn group_key(&self) -> Option<GroupKey> {
        self.metadata
            .map(|m| m.key)
            .or_else(|| naming::decode_key(&self.name))
    }

    /// Role: metadata first, then the decoded name.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.artifact_id().map(|id| id.role)
    }

    /// Whether the metadata, when present, agrees with a decodable name.
    #[must_use]
    pub fn metadata_matches_name(&self) -> bool {
        let Some(meta) = self.metadata else {
            return true;
        };
        match meta.role {
            Some(role) => naming::decode(&self.name)
                .is_none_or(|id| id == meta.key.with_role(role)),
            None => {
                naming::decode_key(&self.name).is_none_or(|k| k == meta.key)
            }
        }
    }

    /// World-space bounds of pickable geometry; `None` for groups, labels
    /// and opaque host nodes.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        match &self.shape {
            NodeShape::Torus { radius, tube, axis } => {
                let outer = radius + tube;
                let across = (Vec3::ONE - *axis * *axis).max(Vec3::ZERO);
                let half = across.map(f32::sqrt) * outer + axis.abs() * *tube;
                Some(Aabb::from_center(self.position, half))
            }
            NodeShape::Disc { radius, normal } => {
                let across = (Vec3::ONE - *normal * *normal).max(Vec3::ZERO);
                let half = across.map(f32::sqrt) * *radius;
                Some(Aabb::from_center(self.position, half))
            }
            NodeShape::Sphere { radius } => {
                Some(Aabb::from_center(self.position, Vec3::splat(*radius)))
            }
            NodeShape::Tube { path, radius, .. } => {
                Aabb::from_points(path).map(|b| b.expanded(*radius))
            }
            NodeShape::Group
            | NodeShape::Label { .. }
            | NodeShape::Opaque => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::EventType;

    fn section(page: u32) -> GroupKey {
        GroupKey::Section {
            event: EventType::Drag,
            page,
        }
    }

    #[test]
    fn artifact_name_and_metadata_agree() {
        let id = section(3).with_role(Role::Line);
        let node = SceneNode::artifact(id, NodeShape::Opaque);
        assert_eq!(node.name, "plane-drag:3-line");
        assert!(node.metadata_matches_name());
        assert_eq!(node.role(), Some(Role::Line));
    }

    #[test]
    fn metadata_takes_precedence_over_name() {
        let id = section(3).with_role(Role::Size);
        let mut node = SceneNode::artifact(id, NodeShape::Opaque);
        node.name = "Node".into();
        assert_eq!(node.artifact_id(), Some(section(3).with_role(Role::Size)));

        node.name = "plane-drag:4-size".into();
        assert_eq!(node.group_key(), Some(section(3)));
        assert!(!node.metadata_matches_name());
    }

    #[test]
    fn name_is_fallback_without_metadata() {
        let node = SceneNode::named("hole-d175:9-cable", NodeShape::Opaque);
        assert_eq!(
            node.group_key(),
            Some(GroupKey::Hole {
                diameter_mm: 175,
                hole: 9,
            })
        );
        assert_eq!(node.role(), Some(Role::Cable));
        assert_eq!(SceneNode::named("Node", NodeShape::Opaque).role(), None);
    }

    #[test]
    fn group_has_key_but_no_role() {
        let g = SceneNode::group(section(1));
        assert!(g.is_group());
        assert_eq!(g.group_key(), Some(section(1)));
        assert_eq!(g.artifact_id(), None);
    }

    #[test]
    fn torus_bounds_are_thin_along_axis() {
        let ring = SceneNode::named(
            "ring",
            NodeShape::Torus {
                radius: 0.1,
                tube: 0.01,
                axis: Vec3::X,
            },
        )
        .at(Vec3::new(1.0, 2.0, 3.0));
        let b = ring.bounds().unwrap();
        assert!((b.max.x - 1.01).abs() < 1e-6);
        assert!((b.max.y - 2.11).abs() < 1e-6);
        assert!((b.min.z - 2.89).abs() < 1e-6);
    }

    #[test]
    fn hex_colours_round_trip() {
        for hex in [0xffff00, 0x00ffff, 0xff0000, 0x123456] {
            assert_eq!(Color::from_hex(hex).to_hex(), hex);
        }
    }
}
