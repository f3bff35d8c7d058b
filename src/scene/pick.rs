//! Ray hit-testing against scene nodes.

use glam::Vec3;

use super::{NodeId, NodeShape, SceneRepository};
use crate::geometry::{ray_aabb_hit_t, Ray};

/// Result of a successful pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Node that was hit.
    pub node: NodeId,
    /// World-space hit point.
    pub point: Vec3,
    /// Distance from the ray origin.
    pub distance: f32,
}

/// Hit parameter of `ray` against one node; spheres are tested exactly,
/// everything else by its bounding box.
fn hit_node<S: SceneRepository + ?Sized>(
    scene: &S,
    id: NodeId,
    ray: &Ray,
) -> Option<f32> {
    let node = scene.node(id)?;
    if !node.visible {
        return None;
    }
    match node.shape {
        NodeShape::Sphere { radius } => ray.hit_sphere(node.position, radius),
        _ => {
            let b = node.bounds()?;
            ray_aabb_hit_t(ray, b.min, b.max)
        }
    }
}

/// Nearest visible node among `candidates` intersected by `ray`.
pub fn pick_nearest<S: SceneRepository + ?Sized>(
    scene: &S,
    candidates: &[NodeId],
    ray: &Ray,
) -> Option<Hit> {
    candidates
        .iter()
        .filter_map(|id| hit_node(scene, *id, ray).map(|t| (*id, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(node, t)| Hit {
            node,
            point: ray.at(t),
            distance: t,
        })
}

/// Nearest visible annotation artifact anywhere in the scene.
///
/// Only nodes whose identity decodes are considered, so host geometry
/// (models, lights) never shadows an annotation.
pub fn pick_named<S: SceneRepository + ?Sized>(
    scene: &S,
    ray: &Ray,
) -> Option<Hit> {
    let named: Vec<NodeId> = scene
        .descendants(None)
        .into_iter()
        .filter(|id| scene.node(*id).and_then(|n| n.artifact_id()).is_some())
        .collect();
    pick_nearest(scene, &named, ray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{EventType, GroupKey, Role};
    use crate::scene::{Scene, SceneNode};

    fn ray() -> Ray {
        Ray::through(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO).unwrap()
    }

    fn marker(page: u32, at: Vec3) -> SceneNode {
        let key = GroupKey::Section {
            event: EventType::Drag,
            page,
        };
        let shape = NodeShape::Sphere { radius: 0.5 };
        SceneNode::artifact(key.with_role(Role::EndPoint), shape).at(at)
    }

    #[test]
    fn nearest_candidate_wins() {
        let mut scene = Scene::new();
        let far = scene.add(None, marker(1, Vec3::ZERO));
        let near = scene.add(None, marker(2, Vec3::new(0.0, 0.0, 5.0)));

        let hit = pick_nearest(&scene, &[far, near], &ray()).unwrap();
        assert_eq!(hit.node, near);
        assert!((hit.distance - 4.5).abs() < 1e-5);
        assert!((hit.point.z - 5.5).abs() < 1e-5);

        let only_far = pick_nearest(&scene, &[far], &ray()).unwrap();
        assert_eq!(only_far.node, far);
    }

    #[test]
    fn hidden_and_missing_nodes_are_skipped() {
        let mut scene = Scene::new();
        let a = scene.add(None, marker(1, Vec3::ZERO));
        assert!(scene.set_visible(a, false));
        assert!(pick_nearest(&scene, &[a, NodeId(77)], &ray()).is_none());
    }

    #[test]
    fn pick_named_ignores_host_geometry() {
        let mut scene = Scene::new();
        let vault = NodeShape::Sphere { radius: 1.0 };
        let _model = scene.add(
            None,
            SceneNode::named("vault", vault).at(Vec3::new(0.0, 0.0, 6.0)),
        );
        let m = scene.add(None, marker(1, Vec3::ZERO));
        assert_eq!(pick_named(&scene, &ray()).map(|h| h.node), Some(m));
    }

    #[test]
    fn boxes_are_hit_by_slab_test() {
        let mut scene = Scene::new();
        let key = GroupKey::Hole {
            diameter_mm: 200,
            hole: 1,
        };
        let ring = scene.add(
            None,
            SceneNode::artifact(
                key.with_role(Role::HoleRing),
                NodeShape::Torus {
                    radius: 0.1,
                    tube: 0.012,
                    axis: Vec3::Z,
                },
            ),
        );
        let hit = pick_named(&scene, &ray()).unwrap();
        assert_eq!(hit.node, ring);
        assert!((hit.distance - (10.0 - 0.012)).abs() < 1e-4);
    }
}
