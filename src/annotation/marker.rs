use glam::Vec3;

use crate::camera::Camera;
use crate::error::AnnotateError;
use crate::geometry;
use crate::naming::{EventType, GroupKey, Role};
use crate::options::Options;
use crate::scene::{Color, NodeShape, SceneNode};

/// Start and end spheres of a section diagonal.
#[derive(Debug, Clone)]
pub struct EndpointMarkers {
    /// Sphere on the fixed corner.
    pub start: SceneNode,
    /// Sphere on the dragged corner; the drag handle.
    pub end: SceneNode,
}

impl EndpointMarkers {
    /// Nodes in insertion order: start, end.
    #[must_use]
    pub fn into_nodes(self) -> [SceneNode; 2] {
        [self.start, self.end]
    }
}

fn marker(
    key: GroupKey,
    role: Role,
    point: Vec3,
    camera: &Camera,
    options: &Options,
) -> SceneNode {
    let radius = options.marker.radius(camera.distance_to(point));
    SceneNode::artifact(key.with_role(role), NodeShape::Sphere { radius })
        .at(point)
        .colored(Color::from_hex(options.colors.marker))
}

/// Build both endpoint markers of section `page`. Each sphere's radius
/// tracks its own distance from the eye so it keeps a constant screen size.
pub fn build_endpoint_markers(
    start: Vec3,
    end: Vec3,
    event: EventType,
    page: u32,
    camera: &Camera,
    options: &Options,
) -> Result<EndpointMarkers, AnnotateError> {
    if !geometry::is_finite_point(start) || !geometry::is_finite_point(end) {
        return Err(AnnotateError::InvalidGeometry(format!(
            "section {page} markers need finite points"
        )));
    }
    let key = GroupKey::Section { event, page };
    Ok(EndpointMarkers {
        start: marker(key, Role::StartPoint, start, camera, options),
        end: marker(key, Role::EndPoint, end, camera, options),
    })
}
