//! Drag sessions: gesture layer, session state machine, and the hole and
//! plane controllers.
//!
//! A [`DragSession`] owns one [`DragControls`] gesture layer and one
//! [`DragController`]. The session enforces `Idle -> Dragging -> Idle`,
//! switches the orbit camera off while dragging, and releases the gesture
//! layer exactly once, whether through [`DragSession::teardown`] or drop.

mod controls;
mod hole;
mod plane;

pub use controls::{DragControls, DragEvent, DragPhase};
use glam::Vec3;
pub use hole::HoleDrag;
pub use plane::{Dimension, PlaneDrag, PlaneParams, PlaneParamsList};

use crate::camera::{Camera, ControlsGate, Viewport};
use crate::input::InputEvent;
use crate::options::Options;
use crate::scene::{NodeId, SceneRepository};

/// Everything a controller may read or mutate while handling a drag.
pub struct DragContext<'a> {
    /// Scene holding the annotations.
    pub scene: &'a mut dyn SceneRepository,
    /// Current camera, for marker sizing and the drag plane.
    pub camera: &'a Camera,
    /// Drawing surface, for unprojecting the cursor.
    pub viewport: Viewport,
    /// Annotation options.
    pub options: &'a Options,
}

/// Reaction to one drag session's events.
///
/// `node` is the id the gesture started on; it may already be gone by the
/// time `drag` or `drag_end` fire if the controller replaced it.
pub trait DragController {
    /// A handle was grabbed.
    fn drag_start(
        &mut self,
        ctx: &mut DragContext<'_>,
        node: NodeId,
        position: Vec3,
    );

    /// The handle moved to `position`.
    fn drag(&mut self, ctx: &mut DragContext<'_>, node: NodeId, position: Vec3);

    /// The handle was released at `position`.
    fn drag_end(
        &mut self,
        ctx: &mut DragContext<'_>,
        node: NodeId,
        position: Vec3,
    );

    /// The gesture was abandoned before release, with the handle last at
    /// `position`. Settles the scene as a release would.
    fn drag_cancel(
        &mut self,
        ctx: &mut DragContext<'_>,
        node: NodeId,
        position: Vec3,
    ) {
        self.drag_end(ctx, node, position);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    Dragging { node: NodeId },
}

/// One controller bound to its gesture layer.
pub struct DragSession<C> {
    controls: Option<DragControls>,
    controller: C,
    gate: ControlsGate,
    state: SessionState,
}

impl<C: DragController> DragSession<C> {
    /// Bind `controller` to `controls`, switching camera input through
    /// `gate`.
    #[must_use]
    pub fn new(
        controls: DragControls,
        controller: C,
        gate: ControlsGate,
    ) -> Self {
        Self {
            controls: Some(controls),
            controller,
            gate,
            state: SessionState::Idle,
        }
    }

    /// The bound controller.
    #[must_use]
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SessionState::Dragging { .. })
    }

    /// Whether the gesture layer is still held.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.controls.is_some()
    }

    /// Feed raw input through the gesture layer and dispatch what it emits.
    pub fn handle_input(
        &mut self,
        ctx: &mut DragContext<'_>,
        event: &InputEvent,
    ) -> Option<DragEvent> {
        let controls = self.controls.as_mut()?;
        let drag = controls.handle_input(
            &mut *ctx.scene,
            ctx.camera,
            ctx.viewport,
            event,
        )?;
        self.dispatch(ctx, drag);
        Some(drag)
    }

    /// Run one drag event through the state machine. Out-of-order events are
    /// dropped with a warning; nothing is dispatched after teardown.
    pub fn dispatch(&mut self, ctx: &mut DragContext<'_>, event: DragEvent) {
        if self.controls.is_none() {
            return;
        }
        match (event.phase, self.state) {
            (DragPhase::Start, SessionState::Idle) => {
                self.gate.set_enabled(false);
                self.state = SessionState::Dragging { node: event.node };
                log::info!("drag started on {:?}", event.node);
                self.controller.drag_start(ctx, event.node, event.position);
            }
            (DragPhase::Drag, SessionState::Dragging { .. }) => {
                self.gate.set_enabled(false);
                self.controller.drag(ctx, event.node, event.position);
            }
            (DragPhase::End, SessionState::Dragging { .. }) => {
                self.gate.set_enabled(true);
                self.state = SessionState::Idle;
                log::info!(
                    "drag ended on {:?} at {}",
                    event.node,
                    event.position
                );
                self.controller.drag_end(ctx, event.node, event.position);
            }
            (phase, state) => {
                log::warn!("ignoring {phase:?} drag event while {state:?}");
            }
        }
    }

    /// Abandon the gesture in progress and let the controller settle the
    /// scene. The gesture layer stays live. No effect while idle.
    pub fn cancel(&mut self, ctx: &mut DragContext<'_>) {
        let SessionState::Dragging { node } = self.state else {
            return;
        };
        let position = self
            .controls
            .as_ref()
            .and_then(DragControls::grab_position)
            .or_else(|| ctx.scene.node(node).map(|n| n.position));
        if let Some(controls) = self.controls.as_mut() {
            controls.abandon_grab();
        }
        self.state = SessionState::Idle;
        self.gate.set_enabled(true);
        log::info!("drag on {node:?} cancelled");

        match position {
            Some(position) => {
                self.controller.drag_cancel(ctx, node, position);
            }
            None => log::warn!("cancelled drag on {node:?} has no position"),
        }
    }

    /// Release the gesture layer. Safe to call mid-drag and more than once.
    ///
    /// The controller is not notified; call [`cancel`](Self::cancel) first
    /// when the scene must be left settled.
    pub fn teardown(&mut self) {
        self.release();
    }
}

impl<C> DragSession<C> {
    fn release(&mut self) {
        let Some(mut controls) = self.controls.take() else {
            return;
        };
        controls.deactivate();
        controls.dispose();
        if let SessionState::Dragging { node } = self.state {
            log::info!("drag on {node:?} cancelled by teardown");
            self.gate.set_enabled(true);
            self.state = SessionState::Idle;
        }
    }
}

impl<C> Drop for DragSession<C> {
    fn drop(&mut self) {
        self.release();
    }
}
