use glam::{Vec2, Vec3};

use crate::camera::{Camera, Viewport};
use crate::geometry::Ray;
use crate::input::{InputEvent, MouseButton};
use crate::reactive::Shared;
use crate::scene::{pick, NodeId, SceneRepository};

/// Stage of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// A draggable node was grabbed.
    Start,
    /// The grabbed node moved.
    Drag,
    /// The node was released.
    End,
}

/// Notification emitted by [`DragControls`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    /// Stage of the gesture.
    pub phase: DragPhase,
    /// Node that was grabbed. May no longer exist by the time a later phase
    /// fires if a controller replaced it.
    pub node: NodeId,
    /// Live world-space position of the grabbed node.
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy)]
struct Grab {
    node: NodeId,
    plane_point: Vec3,
    plane_normal: Vec3,
    /// Hit point minus node position at grab time.
    offset: Vec3,
    position: Vec3,
}

/// Gesture layer that turns pointer input into drag events for a registry
/// of draggable nodes.
///
/// On left press the nearest registered node under the cursor is grabbed and
/// a drag plane is laid through the hit point facing the camera. Cursor
/// motion slides the node along that plane. The position is tracked here
/// rather than read back from the scene, so the gesture survives the grabbed
/// node being replaced mid-drag.
#[derive(Debug)]
pub struct DragControls {
    draggables: Shared<Vec<NodeId>>,
    active: bool,
    disposed: bool,
    cursor: Option<Vec2>,
    grab: Option<Grab>,
}

impl DragControls {
    /// Active controls over the nodes listed in `draggables`.
    #[must_use]
    pub fn new(draggables: Shared<Vec<NodeId>>) -> Self {
        Self {
            draggables,
            active: true,
            disposed: false,
            cursor: None,
            grab: None,
        }
    }

    /// Registry of draggable node ids.
    #[must_use]
    pub fn draggables(&self) -> Shared<Vec<NodeId>> {
        self.draggables.clone()
    }

    /// Resume listening. No effect once disposed.
    pub fn activate(&mut self) {
        if !self.disposed {
            self.active = true;
        }
    }

    /// Stop listening and drop any grab without emitting an end event.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.grab = None;
    }

    /// Deactivate permanently.
    pub fn dispose(&mut self) {
        self.deactivate();
        self.disposed = true;
    }

    /// Whether input is being processed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a node is currently grabbed.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// Live position of the grabbed node, if a drag is in progress.
    #[must_use]
    pub fn grab_position(&self) -> Option<Vec3> {
        self.grab.map(|g| g.position)
    }

    /// Drop the current grab without emitting an end event. Stays active.
    pub fn abandon_grab(&mut self) {
        self.grab = None;
    }

    fn ray(&self, camera: &Camera, viewport: Viewport) -> Option<Ray> {
        let cursor = self.cursor?;
        camera.screen_ray(cursor.x, cursor.y, viewport)
    }

    fn press<S: SceneRepository + ?Sized>(
        &mut self,
        scene: &S,
        camera: &Camera,
        viewport: Viewport,
    ) -> Option<DragEvent> {
        let ray = self.ray(camera, viewport)?;
        let candidates = self.draggables.get();
        let hit = pick::pick_nearest(scene, &candidates, &ray)?;
        let origin = scene.node(hit.node)?.position;

        self.grab = Some(Grab {
            node: hit.node,
            plane_point: hit.point,
            plane_normal: camera.forward(),
            offset: hit.point - origin,
            position: origin,
        });
        Some(DragEvent {
            phase: DragPhase::Start,
            node: hit.node,
            position: origin,
        })
    }

    fn motion<S: SceneRepository + ?Sized>(
        &mut self,
        scene: &mut S,
        camera: &Camera,
        viewport: Viewport,
    ) -> Option<DragEvent> {
        let ray = self.ray(camera, viewport)?;
        let grab = self.grab.as_mut()?;
        let t = ray.hit_plane(grab.plane_point, grab.plane_normal)?;
        grab.position = ray.at(t) - grab.offset;

        if let Some(node) = scene.node_mut(grab.node) {
            node.position = grab.position;
        }
        Some(DragEvent {
            phase: DragPhase::Drag,
            node: grab.node,
            position: grab.position,
        })
    }

    /// Feed one input event; returns the drag event it produced, if any.
    pub fn handle_input<S: SceneRepository + ?Sized>(
        &mut self,
        scene: &mut S,
        camera: &Camera,
        viewport: Viewport,
        event: &InputEvent,
    ) -> Option<DragEvent> {
        if !self.active {
            return None;
        }
        match *event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = Some(Vec2::new(x, y));
                self.motion(scene, camera, viewport)
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            } => {
                if self.grab.is_some() {
                    return None;
                }
                self.press(scene, camera, viewport)
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            } => self.grab.take().map(|grab| DragEvent {
                phase: DragPhase::End,
                node: grab.node,
                position: grab.position,
            }),
            InputEvent::MouseButton { .. }
            | InputEvent::Scroll { .. }
            | InputEvent::ModifiersChanged { .. } => None,
        }
    }
}
