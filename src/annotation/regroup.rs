//! Generation pruning for annotations rebuilt on every drag move.
//!
//! Each move appends a full generation of artifacts to a group. Before the
//! next frame only the newest generation per grouping key may survive;
//! anything older is stale geometry.

use rustc_hash::FxHashMap;

use crate::naming::GroupKey;
use crate::scene::{NodeId, SceneRepository};

/// Keep only the last `generation_len` children of each grouping key under
/// `parent`, removing the rest, and move the survivors under `target`.
///
/// Children are bucketed by their structured grouping key; children with no
/// key are left alone. Returns the number of removed nodes.
pub fn retain_latest_generation<S: SceneRepository + ?Sized>(
    scene: &mut S,
    parent: NodeId,
    target: NodeId,
    generation_len: usize,
) -> usize {
    if generation_len == 0 {
        return 0;
    }

    let mut order: Vec<GroupKey> = Vec::new();
    let mut buckets: FxHashMap<GroupKey, Vec<NodeId>> = FxHashMap::default();
    for id in scene.children_of(Some(parent)) {
        let Some(key) = scene.node(*id).and_then(|n| n.group_key()) else {
            continue;
        };
        buckets
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(*id);
    }

    let mut removed = 0;
    for key in order {
        let Some(record) = buckets.remove(&key) else {
            continue;
        };
        let split = record.len().saturating_sub(generation_len);
        let (stale, latest) = record.split_at(split);
        for id in stale {
            if scene.remove(*id).is_some() {
                removed += 1;
            }
        }
        if target != parent {
            for id in latest {
                let _ = scene.attach(*id, Some(target));
            }
        }
        if !stale.is_empty() {
            log::debug!("pruned {} stale artifacts of {key}", stale.len());
        }
    }
    removed
}

/// Remove top-level annotation groups that no longer hold any children.
///
/// Host groups without an annotation key are never touched. Returns the
/// number of removed groups.
pub fn remove_empty_groups<S: SceneRepository + ?Sized>(
    scene: &mut S,
) -> usize {
    let empty: Vec<NodeId> = scene
        .roots()
        .iter()
        .copied()
        .filter(|id| {
            scene.node(*id).is_some_and(|n| {
                n.is_group()
                    && n.children().is_empty()
                    && n.group_key().is_some()
            })
        })
        .collect();
    for id in &empty {
        let _ = scene.remove(*id);
    }
    empty.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{EventType, Role};
    use crate::scene::{NodeShape, Scene, SceneNode};

    fn section(page: u32) -> GroupKey {
        GroupKey::Section {
            event: EventType::Drag,
            page,
        }
    }

    /// Append one 7-artifact generation and return its ids.
    fn push_generation(
        scene: &mut Scene,
        parent: NodeId,
        page: u32,
    ) -> Vec<NodeId> {
        let roles = [
            Role::Line,
            Role::Size,
            Role::Size,
            Role::Size,
            Role::Size,
            Role::StartPoint,
            Role::EndPoint,
        ];
        roles
            .into_iter()
            .map(|role| {
                let id = section(page).with_role(role);
                let node = SceneNode::artifact(id, NodeShape::Opaque);
                scene.add(Some(parent), node)
            })
            .collect()
    }

    #[test]
    fn many_moves_leave_one_generation() {
        let mut scene = Scene::new();
        let g = scene.add(None, SceneNode::group(section(3)));
        let mut latest = Vec::new();
        for _ in 0..10 {
            latest = push_generation(&mut scene, g, 3);
            let _ = retain_latest_generation(&mut scene, g, g, 7);
        }
        assert_eq!(scene.children_of(Some(g)), latest.as_slice());
        assert_eq!(scene.len(), 8);
    }

    #[test]
    fn buckets_are_pruned_independently() {
        let mut scene = Scene::new();
        let g = scene.add(None, SceneNode::group(section(1)));
        let _old_a = push_generation(&mut scene, g, 1);
        let b = push_generation(&mut scene, g, 2);
        let a = push_generation(&mut scene, g, 1);

        assert_eq!(retain_latest_generation(&mut scene, g, g, 7), 7);
        let kept: Vec<NodeId> = scene.children_of(Some(g)).to_vec();
        assert_eq!(kept.len(), 14);
        assert!(a.iter().chain(&b).all(|id| kept.contains(id)));
    }

    #[test]
    fn survivors_move_to_target() {
        let mut scene = Scene::new();
        let src = scene.add(None, SceneNode::group(section(1)));
        let dst = scene.add(None, SceneNode::group(section(1)));
        let _ = push_generation(&mut scene, src, 1);
        let newest = push_generation(&mut scene, src, 1);

        assert_eq!(retain_latest_generation(&mut scene, src, dst, 7), 7);
        assert!(scene.children_of(Some(src)).is_empty());
        assert_eq!(scene.children_of(Some(dst)), newest.as_slice());

        assert_eq!(remove_empty_groups(&mut scene), 1);
        assert_eq!(scene.roots(), &[dst]);
    }

    #[test]
    fn unkeyed_children_and_host_groups_survive() {
        let mut scene = Scene::new();
        let g = scene.add(None, SceneNode::group(section(1)));
        let light = SceneNode::named("light", NodeShape::Opaque);
        let host = scene.add(Some(g), light);
        let host_group = SceneNode::named("host-group", NodeShape::Group);
        let lonely = scene.add(None, host_group);
        let _ = push_generation(&mut scene, g, 1);
        let _ = push_generation(&mut scene, g, 1);

        let _ = retain_latest_generation(&mut scene, g, g, 7);
        assert!(scene.contains(host));
        assert_eq!(remove_empty_groups(&mut scene), 0);
        assert!(scene.contains(lonely));
    }

    #[test]
    fn short_buckets_are_untouched() {
        let mut scene = Scene::new();
        let g = scene.add(None, SceneNode::group(section(1)));
        let ids = push_generation(&mut scene, g, 1);
        assert_eq!(retain_latest_generation(&mut scene, g, g, 8), 0);
        assert_eq!(retain_latest_generation(&mut scene, g, g, 0), 0);
        assert_eq!(scene.children_of(Some(g)), ids.as_slice());
    }
}
