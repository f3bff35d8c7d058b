use std::cell::Cell;
use std::rc::Rc;

use glam::{Quat, Vec2, Vec3};

use crate::camera::core::{Camera, Viewport};
use crate::input::{InputEvent, MouseButton};
use crate::options::CameraOptions;

const BASE_ROTATE_SPEED: f32 = 0.01;
const BASE_PAN_SPEED: f32 = 0.002;
const BASE_ZOOM_SPEED: f32 = 0.5;

/// Shared on/off switch for the orbit controls.
///
/// Drag sessions hold a clone and switch the camera off while an object is
/// being moved, so the same pointer motion never drives both.
#[derive(Debug, Clone)]
pub struct ControlsGate(Rc<Cell<bool>>);

impl ControlsGate {
    /// New gate, initially enabled.
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    /// Whether camera controls currently respond to input.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.0.get()
    }

    /// Switch controls on or off. Idempotent.
    pub fn set_enabled(&self, enabled: bool) {
        self.0.set(enabled);
    }
}

impl Default for ControlsGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Orbital camera controller: rotate around a focus point, pan, and zoom.
pub struct OrbitController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,

    /// Camera driven by this controller.
    pub camera: Camera,
    /// Current drawing surface.
    pub viewport: Viewport,
    gate: ControlsGate,

    mouse_pressed: bool,
    shift_pressed: bool,
    last_cursor: Option<Vec2>,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitController {
    /// Controller looking at `focus_point` from `distance` along +Z.
    #[must_use]
    pub fn new(
        options: &CameraOptions,
        viewport: Viewport,
        focus_point: Vec3,
        distance: f32,
    ) -> Self {
        let camera = Camera {
            eye: focus_point + Vec3::new(0.0, 0.0, distance),
            target: focus_point,
            up: Vec3::Y,
            aspect: viewport.aspect(),
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        Self {
            orientation: Quat::IDENTITY,
            distance,
            focus_point,
            camera,
            viewport,
            gate: ControlsGate::new(),
            mouse_pressed: false,
            shift_pressed: false,
            last_cursor: None,
            rotate_speed: BASE_ROTATE_SPEED * options.rotate_speed,
            pan_speed: BASE_PAN_SPEED * options.pan_speed,
            zoom_speed: BASE_ZOOM_SPEED * options.zoom_speed,
            min_distance: options.clamp_distance(0.0),
            max_distance: options.clamp_distance(f32::MAX),
        }
    }

    /// Handle to the enable switch shared with drag sessions.
    #[must_use]
    pub fn gate(&self) -> ControlsGate {
        self.gate.clone()
    }

    /// Current orbit radius.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Track a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width as f32, height as f32);
        self.camera.aspect = self.viewport.aspect();
    }

    /// Orbit by a pixel delta.
    pub fn rotate(&mut self, delta: Vec2) {
        let up = self.orientation * Vec3::Y;
        let horizontal =
            Quat::from_axis_angle(up, -delta.x * self.rotate_speed);
        self.orientation = horizontal * self.orientation;

        // Vertical rotation uses the right vector after the horizontal turn
        let right = self.orientation * Vec3::X;
        let vertical =
            Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
        self.orientation = (vertical * self.orientation).normalize();

        self.update_camera_pos();
    }

    /// Slide the focus point by a pixel delta, scaled by orbit radius.
    pub fn pan(&mut self, delta: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        let scale = self.pan_speed * self.distance;

        self.focus_point += right * (-delta.x * scale) + up * (delta.y * scale);
        self.update_camera_pos();
    }

    /// Dolly toward (positive) or away from the focus point.
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.distance =
            self.distance.clamp(self.min_distance, self.max_distance);
        self.update_camera_pos();
    }

    /// Adjust camera to fit the given positions, centering on their centroid
    /// and setting distance so all points are visible.
    pub fn fit_to_positions(&mut self, positions: &[Vec3]) {
        if positions.is_empty() {
            return;
        }

        let centroid: Vec3 =
            positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
        let radius = positions
            .iter()
            .map(|p| (*p - centroid).length())
            .fold(0.0f32, f32::max);

        self.focus_point = centroid;

        let fovy_rad = self.camera.fovy.to_radians();
        let fit_distance = radius / (fovy_rad / 2.0).tan();
        // 1.5x padding
        self.distance = (fit_distance * 1.5)
            .clamp(self.min_distance, self.max_distance);

        self.update_camera_pos();
    }

    /// Feed an input event. Returns true if the camera moved.
    ///
    /// Button and modifier state is always tracked; motion is ignored while
    /// the gate is closed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
            } => {
                self.mouse_pressed = pressed;
                false
            }
            InputEvent::MouseButton { .. } => false,
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                false
            }
            InputEvent::CursorMoved { x, y } => {
                let current = Vec2::new(x, y);
                let delta = current - self.last_cursor.unwrap_or(current);
                self.last_cursor = Some(current);

                if !self.mouse_pressed || !self.gate.is_enabled() {
                    return false;
                }
                if self.shift_pressed {
                    self.pan(delta);
                } else {
                    self.rotate(delta);
                }
                true
            }
            InputEvent::Scroll { delta } => {
                if !self.gate.is_enabled() {
                    return false;
                }
                self.zoom(delta);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> OrbitController {
        OrbitController::new(
            &CameraOptions::default(),
            Viewport::new(800.0, 600.0),
            Vec3::ZERO,
            10.0,
        )
    }

    fn drag(c: &mut OrbitController, from: (f32, f32), to: (f32, f32)) -> bool {
        let _ = c.handle_input(&InputEvent::CursorMoved {
            x: from.0,
            y: from.1,
        });
        let _ = c.handle_input(&InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        let moved = c.handle_input(&InputEvent::CursorMoved {
            x: to.0,
            y: to.1,
        });
        let _ = c.handle_input(&InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
        moved
    }

    #[test]
    fn rotation_keeps_orbit_radius() {
        let mut c = controller();
        assert!(drag(&mut c, (0.0, 0.0), (40.0, 25.0)));
        assert!((c.camera.eye.length() - 10.0).abs() < 1e-3);
        assert_ne!(c.camera.eye, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn closed_gate_blocks_motion() {
        let mut c = controller();
        let gate = c.gate();
        gate.set_enabled(false);
        assert!(!drag(&mut c, (0.0, 0.0), (40.0, 25.0)));
        assert!(!c.handle_input(&InputEvent::Scroll { delta: 1.0 }));
        assert_eq!(c.camera.eye, Vec3::new(0.0, 0.0, 10.0));

        gate.set_enabled(true);
        assert!(c.handle_input(&InputEvent::Scroll { delta: 1.0 }));
        assert!(c.distance() < 10.0);
    }

    #[test]
    fn shift_drag_pans_focus() {
        let mut c = controller();
        let _ = c.handle_input(&InputEvent::ModifiersChanged { shift: true });
        assert!(drag(&mut c, (0.0, 0.0), (-50.0, 0.0)));
        assert!(c.camera.target.x > 0.0);
        assert!((c.camera.eye - c.camera.target).length() - 10.0 < 1e-3);
    }

    #[test]
    fn fit_centres_on_points() {
        let mut c = controller();
        c.fit_to_positions(&[Vec3::NEG_X, Vec3::new(3.0, 0.0, 0.0)]);
        assert!(c.camera.target.distance(Vec3::new(1.0, 0.0, 0.0)) < 1e-5);
        c.resize(1000, 500);
        assert!((c.camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn zoom_stops_at_configured_range() {
        let opts = CameraOptions {
            min_distance: 2.0,
            max_distance: 20.0,
            ..CameraOptions::default()
        };
        let view = Viewport::new(800.0, 600.0);
        let mut c = OrbitController::new(&opts, view, Vec3::ZERO, 10.0);
        for _ in 0..100 {
            c.zoom(1.0);
        }
        assert_eq!(c.distance(), 2.0);
        for _ in 0..100 {
            c.zoom(-1.0);
        }
        assert_eq!(c.distance(), 20.0);
    }
}
