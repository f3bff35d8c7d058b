//! The owning view: scene, camera, and both drag sessions wired together.

use glam::Vec3;
use serde::Serialize;

use crate::annotation::{self, insert_all};
use crate::camera::{OrbitController, Viewport};
use crate::drag::{
    Dimension, DragContext, DragControls, DragEvent, DragPhase, DragSession,
    HoleDrag, PlaneDrag, PlaneParams, PlaneParamsList,
};
use crate::error::AnnotateError;
use crate::input::InputEvent;
use crate::naming::{EventType, GroupKey};
use crate::options::Options;
use crate::reactive::Shared;
use crate::scene::index;
use crate::scene::pick::{self, Hit};
use crate::scene::{NodeId, Scene, SceneNode, SceneRepository};

/// Mean section measurements in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageDimensions {
    /// Mean length.
    pub length: f64,
    /// Mean width.
    pub width: f64,
    /// Mean depth.
    pub depth: f64,
}

/// Annotated digital-twin view.
///
/// Owns the scene and the orbit camera, and runs a hole drag session and a
/// plane drag session over them. Dropping the view (or calling
/// [`teardown`](Self::teardown)) releases both gesture layers.
pub struct TwinView {
    scene: Scene,
    options: Options,
    orbit: OrbitController,
    hole_session: DragSession<HoleDrag>,
    plane_session: DragSession<PlaneDrag>,
    hole_handles: Shared<Vec<NodeId>>,
    plane_handles: Shared<Vec<NodeId>>,
    selection: Shared<Option<NodeId>>,
    planes: Shared<PlaneParamsList>,
    next_page: u32,
    next_hole: u64,
    next_ranging: u32,
}

impl TwinView {
    /// Empty view looking at the origin.
    #[must_use]
    pub fn new(options: Options, viewport: Viewport) -> Self {
        let orbit = OrbitController::new(
            &options.camera,
            viewport,
            Vec3::ZERO,
            options.camera.start_distance,
        );
        let gate = orbit.gate();

        let hole_handles = Shared::default();
        let plane_handles = Shared::default();
        let selection = Shared::default();
        let planes = Shared::default();

        let hole_session = DragSession::new(
            DragControls::new(hole_handles.clone()),
            HoleDrag::new(selection.clone()),
            gate.clone(),
        );
        let plane_session = DragSession::new(
            DragControls::new(plane_handles.clone()),
            PlaneDrag::new(planes.clone(), plane_handles.clone()),
            gate,
        );

        Self {
            scene: Scene::new(),
            options,
            orbit,
            hole_session,
            plane_session,
            hole_handles,
            plane_handles,
            selection,
            planes,
            next_page: 1,
            next_hole: 1,
            next_ranging: 1,
        }
    }

    /// The annotated scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for host geometry.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Orbit camera.
    #[must_use]
    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    /// Mutable orbit camera.
    pub fn orbit_mut(&mut self) -> &mut OrbitController {
        &mut self.orbit
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Hole ring currently selected by a drag.
    #[must_use]
    pub fn selection(&self) -> Shared<Option<NodeId>> {
        self.selection.clone()
    }

    /// Draggable hole rings.
    #[must_use]
    pub fn hole_handles(&self) -> Shared<Vec<NodeId>> {
        self.hole_handles.clone()
    }

    /// Draggable section end markers.
    #[must_use]
    pub fn plane_handles(&self) -> Shared<Vec<NodeId>> {
        self.plane_handles.clone()
    }

    /// Committed section geometry.
    #[must_use]
    pub fn planes(&self) -> Shared<PlaneParamsList> {
        self.planes.clone()
    }

    /// Route input to the drag sessions, then to the camera.
    ///
    /// Returns the drag event produced, if any. The camera always sees the
    /// event but stays put while a drag holds its gate closed.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<DragEvent> {
        let mut ctx = DragContext {
            scene: &mut self.scene,
            camera: &self.orbit.camera,
            viewport: self.orbit.viewport,
            options: &self.options,
        };
        let hole = self.hole_session.handle_input(&mut ctx, event);
        let grabbed_hole = hole.is_some_and(|e| e.phase == DragPhase::Start)
            || self.hole_session.is_dragging();
        let plane = if grabbed_hole {
            None
        } else {
            self.plane_session.handle_input(&mut ctx, event)
        };

        let _ = self.orbit.handle_input(event);
        hole.or(plane)
    }

    /// Project a world point to integer pixel coordinates.
    #[must_use]
    pub fn project_to_screen(&self, point: Vec3) -> (i32, i32) {
        self.orbit.camera.project_to_screen(point, self.orbit.viewport)
    }

    /// Nearest annotation artifact under pixel `(x, y)`.
    #[must_use]
    pub fn pick(&self, x: f32, y: f32) -> Option<Hit> {
        let ray = self.orbit.camera.screen_ray(x, y, self.orbit.viewport)?;
        pick::pick_named(&self.scene, &ray)
    }

    /// Create a cross-section from two double-clicked corners and return its
    /// page number. The end marker becomes a drag handle.
    ///
    /// Page numbers are never handed out twice, even after
    /// [`remove_section`](Self::remove_section).
    pub fn add_section(
        &mut self,
        p1: Vec3,
        p2: Vec3,
    ) -> Result<u32, AnnotateError> {
        let page = self
            .next_page
            .max(self.planes.with(PlaneParamsList::next_page));
        let event = EventType::DoubleClick;
        let section = annotation::build_cross_section(
            p1,
            p2,
            event,
            page,
            &self.options,
        )?;
        let markers = annotation::build_endpoint_markers(
            p1,
            p2,
            event,
            page,
            &self.orbit.camera,
            &self.options,
        )?;
        let params = PlaneParams {
            page,
            p1,
            p2,
            length: section.length,
            width: section.width,
            depth: section.depth,
        };

        let key = GroupKey::Section { event, page };
        let group = self.scene.add(None, SceneNode::group(key));
        let _ = insert_all(&mut self.scene, Some(group), section.into_nodes());
        let [start, end] = markers.into_nodes();
        let _ = self.scene.add(Some(group), start);
        let handle = self.scene.add(Some(group), end);

        self.next_page = page + 1;
        self.plane_handles.update(|h| h.push(handle));
        self.planes.update(|list| list.upsert(params));
        log::info!("section {page} created from {p1} to {p2}");
        Ok(page)
    }

    /// Create a hole of `diameter_mm` at `point` and return its key. The ring
    /// becomes a drag handle.
    pub fn add_hole(
        &mut self,
        point: Vec3,
        diameter_mm: u32,
    ) -> Result<GroupKey, AnnotateError> {
        let hole = self.next_hole;
        let built =
            annotation::build_hole(point, diameter_mm, hole, &self.options)?;
        let key = built.key;
        let [ring, cable, size] = built.into_nodes();
        let ring = self.scene.add(None, ring);
        let _ = self.scene.add(None, cable);
        let _ = self.scene.add(None, size);

        self.next_hole += 1;
        self.hole_handles.update(|h| h.push(ring));
        log::info!("{key} created at {point}");
        Ok(key)
    }

    /// Measure from `start` to `end` and return the ranging number.
    pub fn add_ranging(
        &mut self,
        start: Vec3,
        end: Vec3,
    ) -> Result<u32, AnnotateError> {
        let ranging = self.next_ranging;
        let built =
            annotation::build_ranging(start, end, ranging, &self.options)?;
        log::debug!("ranging {ranging} measures {} mm", built.distance);
        let _ = insert_all(&mut self.scene, None, built.into_nodes());
        self.next_ranging += 1;
        Ok(ranging)
    }

    /// Remove every artifact of a ranging, as its delete icon does. Returns
    /// the number of removed nodes.
    pub fn remove_ranging(&mut self, ranging: u32) -> usize {
        let key = GroupKey::Ranging { ranging };
        index::artifacts_of(&self.scene, &key)
            .into_iter()
            .filter(|id| self.scene.remove(*id).is_some())
            .count()
    }

    /// Remove a section: its artifacts in every generation, its params, and
    /// its handles.
    pub fn remove_section(&mut self, page: u32) -> bool {
        let existed = self.planes.update(|list| list.remove(page)).is_some();
        for event in [EventType::DoubleClick, EventType::Drag] {
            for id in index::section_nodes(&self.scene, page, event) {
                let _ = self.scene.remove(id);
            }
        }
        let scene = &self.scene;
        self.plane_handles.update(|h| h.retain(|id| scene.contains(*id)));
        existed
    }

    /// Hole rings lying on section `page`.
    #[must_use]
    pub fn holes_in_section(&self, page: u32) -> Vec<NodeId> {
        let Some(params) = self.planes.with(|list| list.get(page).copied())
        else {
            return Vec::new();
        };
        let tolerance = self.options.section.tolerance;
        index::holes_within(&self.scene, params.p1, params.p2, tolerance)
    }

    /// Mean measurements over every section; `None` without sections.
    #[must_use]
    pub fn average_dimensions(&self) -> Option<AverageDimensions> {
        self.planes.with(|list| {
            Some(AverageDimensions {
                length: list.average(Dimension::Length)?,
                width: list.average(Dimension::Width)?,
                depth: list.average(Dimension::Depth)?,
            })
        })
    }

    /// Point the camera at every annotation in the scene.
    pub fn frame_annotations(&mut self) {
        let scene = &self.scene;
        let positions: Vec<Vec3> = scene
            .descendants(None)
            .into_iter()
            .filter_map(|id| scene.node(id))
            .filter(|n| n.artifact_id().is_some())
            .map(|n| n.position)
            .collect();
        self.orbit.fit_to_positions(&positions);
    }

    /// Release both gesture layers. Safe mid-drag and more than once.
    ///
    /// A gesture in progress is cancelled first, so a hole caught mid-move
    /// gets its cable and label back.
    pub fn teardown(&mut self) {
        let mut ctx = DragContext {
            scene: &mut self.scene,
            camera: &self.orbit.camera,
            viewport: self.orbit.viewport,
            options: &self.options,
        };
        self.hole_session.cancel(&mut ctx);
        self.plane_session.cancel(&mut ctx);
        self.hole_session.teardown();
        self.plane_session.teardown();
    }

    /// Whether either session still holds its gesture layer.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.hole_session.is_live() || self.plane_session.is_live()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;
    use crate::naming::Role;
    use crate::scene::{Color, NodeShape};

    fn view() -> TwinView {
        TwinView::new(Options::default(), Viewport::new(800.0, 600.0))
    }

    fn press(pressed: bool) -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        }
    }

    fn cursor_at(view: &TwinView, p: Vec3) -> InputEvent {
        let (x, y) = view.project_to_screen(p);
        InputEvent::CursorMoved {
            x: x as f32,
            y: y as f32,
        }
    }

    #[test]
    fn hole_drag_end_to_end() {
        let mut v = view();
        let key = v.add_hole(Vec3::ZERO, 175).unwrap();
        let ring = v.hole_handles().get()[0];
        let gate = v.orbit().gate();

        let _ = v.handle_input(&cursor_at(&v, Vec3::ZERO));
        let start = v.handle_input(&press(true)).unwrap();
        assert_eq!((start.phase, start.node), (DragPhase::Start, ring));
        assert!(!gate.is_enabled());
        assert_eq!(v.selection().get(), Some(ring));
        let highlight = Color::from_hex(0x00ffff);
        assert_eq!(v.scene().node(ring).unwrap().color, highlight);

        let moved = v
            .handle_input(&cursor_at(&v, Vec3::new(0.3, 0.2, 0.0)))
            .unwrap();
        assert_eq!(moved.phase, DragPhase::Drag);
        let pair = index::hole_artifacts(v.scene(), &key).unwrap();
        assert!(!v.scene().node(pair.cable).unwrap().visible);

        let end = v.handle_input(&press(false)).unwrap();
        assert_eq!(end.phase, DragPhase::End);
        assert!(gate.is_enabled());
        let cable = v.scene().node(pair.cable).unwrap();
        assert!(cable.visible);
        assert_eq!(cable.position, end.position);
        assert_eq!(v.scene().node(ring).unwrap().position, end.position);
    }

    #[test]
    fn section_drag_end_to_end() {
        let mut v = view();
        let page = v
            .add_section(Vec3::new(0.0, -0.5, -0.5), Vec3::new(0.0, 0.5, 0.5))
            .unwrap();
        assert_eq!(page, 1);
        let first_handle = v.plane_handles().get()[0];

        let _ = v.handle_input(&cursor_at(&v, Vec3::new(0.0, 0.5, 0.5)));
        let start = v.handle_input(&press(true)).unwrap();
        assert_eq!(start.node, first_handle);
        for step in 1..=4 {
            let p = Vec3::new(0.0, 0.5 + step as f32 * 0.1, 0.5);
            let e = v.handle_input(&cursor_at(&v, p)).unwrap();
            assert_eq!(e.phase, DragPhase::Drag);
        }
        let _ = v.handle_input(&press(false)).unwrap();

        let drag_key = GroupKey::Section {
            event: EventType::Drag,
            page,
        };
        let group = index::find_group(v.scene(), &drag_key).unwrap();
        assert_eq!(v.scene().children_of(Some(group)).len(), 8);
        assert_eq!(v.scene().roots(), &[group]);

        let handles = v.plane_handles().get();
        assert_eq!(handles.len(), 1);
        assert_ne!(handles[0], first_handle);
        let newest = v.scene().node(handles[0]).unwrap();
        assert_eq!(newest.role(), Some(Role::EndPoint));

        let params = *v.planes().get().get(page).unwrap();
        assert!(params.p2.y > 0.8);
        assert_eq!(params.length, 1000);
    }

    /// Grab the end marker at `from`, drag it to `to` in `steps`, release.
    fn drag_marker(v: &mut TwinView, from: Vec3, to: Vec3, steps: u32) {
        let _ = v.handle_input(&cursor_at(v, from));
        let _ = v.handle_input(&press(true)).unwrap();
        for i in 1..=steps {
            let p = from.lerp(to, i as f32 / steps as f32);
            let _ = v.handle_input(&cursor_at(v, p)).unwrap();
        }
        let _ = v.handle_input(&press(false)).unwrap();
    }

    #[test]
    fn removed_page_is_not_reused() {
        let mut v = view();
        let p1 = Vec3::new(0.0, -0.5, -0.5);
        let p2 = Vec3::new(0.0, 0.5, 0.5);
        let first = v.add_section(p1, p2).unwrap();
        drag_marker(&mut v, p2, Vec3::new(0.0, 0.7, 0.5), 3);
        assert!(v.remove_section(first));
        assert!(v.scene().is_empty());

        let second = v.add_section(p1, p2).unwrap();
        assert_ne!(second, first);
        drag_marker(&mut v, p2, Vec3::new(0.0, 0.8, 0.5), 3);

        let setup =
            index::section_nodes(v.scene(), second, EventType::DoubleClick);
        assert!(setup.is_empty());
        let drag_key = GroupKey::Section {
            event: EventType::Drag,
            page: second,
        };
        let group = index::find_group(v.scene(), &drag_key).unwrap();
        assert_eq!(v.scene().roots(), &[group]);
        assert_eq!(v.scene().children_of(Some(group)).len(), 8);
    }

    #[test]
    fn empty_click_orbits_camera() {
        let mut v = view();
        let gate = v.orbit().gate();
        let eye = v.orbit().camera.eye;
        let _ = v.handle_input(&InputEvent::CursorMoved { x: 10.0, y: 10.0 });
        assert!(v.handle_input(&press(true)).is_none());
        let moved = InputEvent::CursorMoved { x: 60.0, y: 30.0 };
        assert!(v.handle_input(&moved).is_none());
        assert!(gate.is_enabled());
        assert_ne!(v.orbit().camera.eye, eye);
    }

    #[test]
    fn holes_on_a_section_are_found() {
        let mut v = view();
        let page = v.add_section(Vec3::ZERO, Vec3::new(0.0, 2.0, 2.0)).unwrap();
        let _ = v.add_hole(Vec3::new(0.0, 1.0, 1.0), 200).unwrap();
        let _ = v.add_hole(Vec3::new(0.0, 3.0, 1.0), 200).unwrap();
        let inside = v.holes_in_section(page);
        assert_eq!(inside.len(), 1);
        let ring = v.scene().node(inside[0]).unwrap();
        assert_eq!(ring.position, Vec3::new(0.0, 1.0, 1.0));
        assert!(v.holes_in_section(99).is_empty());
    }

    #[test]
    fn averages_over_sections() {
        let mut v = view();
        assert_eq!(v.average_dimensions(), None);
        let _ = v
            .add_section(Vec3::new(0.4, 0.0, 0.0), Vec3::new(0.4, 1.0, 1.0))
            .unwrap();
        let _ = v
            .add_section(Vec3::new(0.6, 0.0, 0.0), Vec3::new(0.6, 2.0, 3.0))
            .unwrap();
        let avg = v.average_dimensions().unwrap();
        assert_eq!(avg.width, 500.0);
        assert_eq!(avg.length, 2000.0);
        assert_eq!(avg.depth, 1500.0);
    }

    #[test]
    fn ranging_add_and_delete() {
        let mut v = view();
        let r = v.add_ranging(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.2)).unwrap();
        assert_eq!(v.scene().len(), 3);
        let key = GroupKey::Ranging { ranging: r };
        let label =
            index::find_by_role(v.scene(), None, &key, Role::Size).unwrap();
        assert!(matches!(
            &v.scene().node(label).unwrap().shape,
            NodeShape::Label { text, .. } if text == "1200"
        ));
        assert_eq!(v.remove_ranging(r), 3);
        assert!(v.scene().is_empty());
        assert_eq!(v.remove_ranging(r), 0);
    }

    #[test]
    fn remove_section_drops_everything() {
        let mut v = view();
        let page = v.add_section(Vec3::ZERO, Vec3::ONE).unwrap();
        assert!(v.remove_section(page));
        assert!(v.scene().is_empty());
        assert!(v.plane_handles().get().is_empty());
        assert!(!v.remove_section(page));
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut v = view();
        let _ = v.add_hole(Vec3::ZERO, 175).unwrap();
        let gate = v.orbit().gate();
        let _ = v.handle_input(&cursor_at(&v, Vec3::ZERO));
        let _ = v.handle_input(&press(true)).unwrap();
        assert!(!gate.is_enabled());

        v.teardown();
        assert!(gate.is_enabled());
        assert!(!v.is_live());
        v.teardown();
        assert!(v.handle_input(&press(false)).is_none());
    }

    #[test]
    fn teardown_mid_move_restores_hole_labels() {
        let mut v = view();
        let key = v.add_hole(Vec3::ZERO, 175).unwrap();
        let ring = v.hole_handles().get()[0];
        let pair = index::hole_artifacts(v.scene(), &key).unwrap();

        let _ = v.handle_input(&cursor_at(&v, Vec3::ZERO));
        let _ = v.handle_input(&press(true)).unwrap();
        let moved = v
            .handle_input(&cursor_at(&v, Vec3::new(0.2, 0.3, 0.0)))
            .unwrap();
        assert!(!v.scene().node(pair.size).unwrap().visible);

        v.teardown();
        let cable = v.scene().node(pair.cable).unwrap();
        assert!(cable.visible);
        assert_eq!(cable.position, moved.position);
        assert!(v.scene().node(pair.size).unwrap().visible);
        assert_eq!(v.scene().node(ring).unwrap().position, moved.position);
        assert!(v.orbit().gate().is_enabled());
    }

    #[test]
    fn framing_centres_on_annotations() {
        let mut v = view();
        let _ = v.add_hole(Vec3::new(0.0, 2.0, 0.0), 175).unwrap();
        let _ = v.add_hole(Vec3::new(0.0, 4.0, 0.0), 175).unwrap();
        v.frame_annotations();
        let target = v.orbit().camera.target;
        assert!((target.y - 3.0).abs() < 0.1);
    }

    #[test]
    fn invalid_geometry_is_reported() {
        let mut v = view();
        assert!(v.add_hole(Vec3::ZERO, 0).is_err());
        assert!(v.add_section(Vec3::splat(f32::NAN), Vec3::ONE).is_err());
        assert!(v.scene().is_empty());
    }
}
