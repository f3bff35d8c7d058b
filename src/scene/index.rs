//! Linear lookups over the scene graph by grouping key and role.
//!
//! All lookups are fail-soft: no match is `None` or an empty list, never an
//! error. Callers treat absence as "nothing to update yet".

use glam::Vec3;

use super::{NodeId, SceneRepository};
use crate::geometry::Aabb;
use crate::naming::{EventType, GroupKey, Role};

/// First direct child of `within` (top level for `None`) with this key and
/// role.
pub fn find_by_role<S: SceneRepository + ?Sized>(
    scene: &S,
    within: Option<NodeId>,
    key: &GroupKey,
    role: Role,
) -> Option<NodeId> {
    let wanted = key.with_role(role);
    scene
        .children_of(within)
        .iter()
        .copied()
        .find(|id| {
            scene.node(*id).and_then(|n| n.artifact_id()) == Some(wanted)
        })
}

/// Like [`find_by_role`] but searches the whole subtree.
pub fn find_by_role_deep<S: SceneRepository + ?Sized>(
    scene: &S,
    within: Option<NodeId>,
    key: &GroupKey,
    role: Role,
) -> Option<NodeId> {
    let wanted = key.with_role(role);
    scene
        .descendants(within)
        .into_iter()
        .find(|id| {
            scene.node(*id).and_then(|n| n.artifact_id()) == Some(wanted)
        })
}

/// Every node in the subtree of `within` playing `role`, any key.
pub fn find_all_by_role<S: SceneRepository + ?Sized>(
    scene: &S,
    within: Option<NodeId>,
    role: Role,
) -> Vec<NodeId> {
    scene
        .descendants(within)
        .into_iter()
        .filter(|id| scene.node(*id).and_then(|n| n.role()) == Some(role))
        .collect()
}

/// Top-level group container for `key`.
pub fn find_group<S: SceneRepository + ?Sized>(
    scene: &S,
    key: &GroupKey,
) -> Option<NodeId> {
    scene.roots().iter().copied().find(|id| {
        scene.node(*id).is_some_and(|n| {
            n.is_group() && n.group_key().as_ref() == Some(key)
        })
    })
}

/// Every non-group node in the scene belonging to `key`.
pub fn artifacts_of<S: SceneRepository + ?Sized>(
    scene: &S,
    key: &GroupKey,
) -> Vec<NodeId> {
    scene
        .descendants(None)
        .into_iter()
        .filter(|id| {
            scene.node(*id).is_some_and(|n| {
                !n.is_group() && n.group_key().as_ref() == Some(key)
            })
        })
        .collect()
}

/// Every node of section `page` produced by `event`, groups included.
pub fn section_nodes<S: SceneRepository + ?Sized>(
    scene: &S,
    page: u32,
    event: EventType,
) -> Vec<NodeId> {
    let key = GroupKey::Section { event, page };
    scene
        .descendants(None)
        .into_iter()
        .filter(|id| scene.node(*id).and_then(|n| n.group_key()) == Some(key))
        .collect()
}

/// Cable disc and size label belonging to one hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleArtifacts {
    /// The cable disc.
    pub cable: NodeId,
    /// The diameter label.
    pub size: NodeId,
}

/// Locate the cable and size label of the hole `key` among top-level nodes.
///
/// Returns `None` unless both are present.
pub fn hole_artifacts<S: SceneRepository + ?Sized>(
    scene: &S,
    key: &GroupKey,
) -> Option<HoleArtifacts> {
    Some(HoleArtifacts {
        cable: find_by_role(scene, None, key, Role::Cable)?,
        size: find_by_role(scene, None, key, Role::Size)?,
    })
}

/// Hole rings whose bounds fit inside the section spanned by `p1`/`p2`.
pub fn holes_within<S: SceneRepository + ?Sized>(
    scene: &S,
    p1: Vec3,
    p2: Vec3,
    tolerance: f32,
) -> Vec<NodeId> {
    let section = Aabb::section(p1, p2, tolerance);
    find_all_by_role(scene, None, Role::HoleRing)
        .into_iter()
        .filter(|id| {
            scene
                .node(*id)
                .and_then(|n| n.bounds())
                .is_some_and(|b| section.contains_box(&b))
        })
        .collect()
}
