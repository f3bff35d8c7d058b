use glam::Vec3;

use super::{DragContext, DragController};
use crate::annotation::size_label_position;
use crate::naming::{GroupKey, Role};
use crate::reactive::Shared;
use crate::scene::index::{self, HoleArtifacts};
use crate::scene::{Color, NodeId, SceneRepository};

/// Moves hole rings; hides the cable and size label while moving and snaps
/// them back on release.
#[derive(Debug)]
pub struct HoleDrag {
    selection: Shared<Option<NodeId>>,
}

impl HoleDrag {
    /// Controller publishing the grabbed ring into `selection`.
    #[must_use]
    pub fn new(selection: Shared<Option<NodeId>>) -> Self {
        Self { selection }
    }

    /// Currently selected ring.
    #[must_use]
    pub fn selection(&self) -> Shared<Option<NodeId>> {
        self.selection.clone()
    }
}

fn hole_key(scene: &dyn SceneRepository, node: NodeId) -> Option<GroupKey> {
    match scene.node(node).and_then(|n| n.group_key()) {
        Some(key @ GroupKey::Hole { .. }) => Some(key),
        other => {
            log::warn!("dragged node {node:?} is not a hole ring ({other:?})");
            None
        }
    }
}

fn siblings(
    scene: &dyn SceneRepository,
    key: &GroupKey,
) -> Option<HoleArtifacts> {
    let found = index::hole_artifacts(scene, key);
    if found.is_none() {
        log::debug!("{key} has no cable/size pair yet");
    }
    found
}

impl DragController for HoleDrag {
    fn drag_start(
        &mut self,
        ctx: &mut DragContext<'_>,
        node: NodeId,
        _position: Vec3,
    ) {
        let _ = self.selection.replace(Some(node));
        let Some(key) = hole_key(&*ctx.scene, node) else {
            return;
        };

        let highlight = Color::from_hex(ctx.options.colors.hole_highlight);
        let rest = Color::from_hex(ctx.options.colors.hole_ring);
        for ring in index::find_all_by_role(&*ctx.scene, None, Role::HoleRing) {
            if let Some(n) = ctx.scene.node_mut(ring) {
                n.color = if n.group_key() == Some(key) {
                    highlight
                } else {
                    rest
                };
            }
        }
    }

    fn drag(
        &mut self,
        ctx: &mut DragContext<'_>,
        node: NodeId,
        _position: Vec3,
    ) {
        let Some(key) = hole_key(&*ctx.scene, node) else {
            return;
        };
        let Some(HoleArtifacts { cable, size }) = siblings(&*ctx.scene, &key)
        else {
            return;
        };
        let _ = ctx.scene.set_visible(cable, false);
        let _ = ctx.scene.set_visible(size, false);
    }

    fn drag_end(
        &mut self,
        ctx: &mut DragContext<'_>,
        node: NodeId,
        position: Vec3,
    ) {
        let Some(key @ GroupKey::Hole { diameter_mm, .. }) =
            hole_key(&*ctx.scene, node)
        else {
            return;
        };
        let Some(HoleArtifacts { cable, size }) = siblings(&*ctx.scene, &key)
        else {
            return;
        };
        if let Some(n) = ctx.scene.node_mut(cable) {
            n.visible = true;
            n.position = position;
        }
        if let Some(n) = ctx.scene.node_mut(size) {
            n.visible = true;
            n.position =
                size_label_position(position, diameter_mm, ctx.options);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{build_hole, insert_all};
    use crate::camera::{Camera, Viewport};
    use crate::options::Options;
    use crate::scene::Scene;

    fn camera() -> Camera {
        Camera {
            eye: Vec3::new(5.0, 0.0, 0.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    /// Scene with two 175 mm holes; returns their ring ids.
    fn two_holes(scene: &mut Scene, opts: &Options) -> (NodeId, NodeId) {
        let first = build_hole(Vec3::ZERO, 175, 1, opts).unwrap();
        let second = build_hole(Vec3::Y, 175, 2, opts).unwrap();
        let a = insert_all(scene, None, first.into_nodes());
        let b = insert_all(scene, None, second.into_nodes());
        (a[0], b[0])
    }

    #[test]
    fn start_highlights_only_the_grabbed_ring() {
        let opts = Options::default();
        let mut scene = Scene::new();
        let (a, b) = two_holes(&mut scene, &opts);
        let selection = Shared::default();
        let mut ctrl = HoleDrag::new(selection.clone());
        let cam = camera();
        let mut ctx = DragContext {
            scene: &mut scene,
            camera: &cam,
            viewport: Viewport::new(100.0, 100.0),
            options: &opts,
        };

        ctrl.drag_start(&mut ctx, b, Vec3::ZERO);
        assert_eq!(selection.get(), Some(b));
        assert_eq!(ctx.scene.node(b).unwrap().color, Color::from_hex(0x00ffff));
        assert_eq!(ctx.scene.node(a).unwrap().color, Color::from_hex(0xffff00));

        ctrl.drag_start(&mut ctx, a, Vec3::ZERO);
        assert_eq!(ctx.scene.node(a).unwrap().color, Color::from_hex(0x00ffff));
        assert_eq!(ctx.scene.node(b).unwrap().color, Color::from_hex(0xffff00));
    }

    #[test]
    fn move_hides_and_end_snaps_siblings() {
        let opts = Options::default();
        let mut scene = Scene::new();
        let (ring, _) = two_holes(&mut scene, &opts);
        let key = GroupKey::Hole {
            diameter_mm: 175,
            hole: 1,
        };
        let HoleArtifacts { cable, size } =
            index::hole_artifacts(&scene, &key).unwrap();
        let mut ctrl = HoleDrag::new(Shared::default());
        let cam = camera();
        let mut ctx = DragContext {
            scene: &mut scene,
            camera: &cam,
            viewport: Viewport::new(100.0, 100.0),
            options: &opts,
        };

        ctrl.drag(&mut ctx, ring, Vec3::new(0.5, 0.5, 0.5));
        assert!(!ctx.scene.node(cable).unwrap().visible);
        assert!(!ctx.scene.node(size).unwrap().visible);

        let end = Vec3::new(1.0, 2.0, 3.0);
        ctrl.drag_end(&mut ctx, ring, end);
        let c = ctx.scene.node(cable).unwrap();
        assert!(c.visible);
        assert_eq!(c.position, end);
        let s = ctx.scene.node(size).unwrap();
        assert!(s.visible);
        assert_eq!(s.position.x, 1.0);
        assert_eq!(s.position.z, 3.0);
        assert!((s.position.y - (2.0 + 175.0 / 1300.0)).abs() < 1e-6);
    }

    #[test]
    fn missing_siblings_leave_scene_untouched() {
        let opts = Options::default();
        let mut scene = Scene::new();
        let (ring, _) = two_holes(&mut scene, &opts);
        let key = GroupKey::Hole {
            diameter_mm: 175,
            hole: 1,
        };
        let HoleArtifacts { cable, size } =
            index::hole_artifacts(&scene, &key).unwrap();
        let _ = scene.remove(size);
        let mut ctrl = HoleDrag::new(Shared::default());
        let cam = camera();
        let mut ctx = DragContext {
            scene: &mut scene,
            camera: &cam,
            viewport: Viewport::new(100.0, 100.0),
            options: &opts,
        };

        ctrl.drag(&mut ctx, ring, Vec3::ONE);
        ctrl.drag_end(&mut ctx, ring, Vec3::ONE);
        let c = ctx.scene.node(cable).unwrap();
        assert!(c.visible);
        assert_eq!(c.position, Vec3::ZERO);
    }
}
