use glam::{Mat4, Vec2, Vec3};

use crate::geometry::Ray;

/// Size of the drawing surface in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Viewport of the given size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, falling back to 1 for a collapsed surface.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Half extents, the scale from NDC into pixels.
    #[must_use]
    pub fn half(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }
}

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        self.build_projection() * view
    }

    /// Projection matrix alone.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh uses a [0,1] depth range
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Unit vector from the eye toward the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or(Vec3::NEG_Z)
    }

    /// Distance from the eye to `point`.
    #[must_use]
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.eye.distance(point)
    }

    /// Project a world point to integer pixel coordinates (origin top-left).
    ///
    /// Coordinates are truncated toward zero. Points behind the eye mirror
    /// through the centre, as any homogeneous projection does.
    #[must_use]
    pub fn project_to_screen(
        &self,
        point: Vec3,
        viewport: Viewport,
    ) -> (i32, i32) {
        let ndc = self.build_matrix().project_point3(point);
        let half = viewport.half();
        let x = ndc.x * half.x + half.x;
        let y = -ndc.y * half.y + half.y;
        (x as i32, y as i32)
    }

    /// World-space ray from the near plane through pixel `(x, y)`.
    ///
    /// `None` when the viewport is empty or the matrix is singular.
    #[must_use]
    pub fn screen_ray(
        &self,
        x: f32,
        y: f32,
        viewport: Viewport,
    ) -> Option<Ray> {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return None;
        }
        let ndc_x = x / viewport.width * 2.0 - 1.0;
        let ndc_y = 1.0 - y / viewport.height * 2.0;

        let inverse = self.build_matrix().inverse();
        if !inverse.is_finite() {
            return None;
        }
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Ray::through(near, far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 2.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    const VIEW: Viewport = Viewport::new(800.0, 400.0);

    #[test]
    fn target_projects_to_centre() {
        assert_eq!(camera().project_to_screen(Vec3::ZERO, VIEW), (400, 200));
    }

    #[test]
    fn screen_y_grows_downward() {
        let (x, y) = camera().project_to_screen(Vec3::new(1.0, 1.0, 0.0), VIEW);
        assert!(x > 400);
        assert!(y < 200);
    }

    #[test]
    fn centre_ray_points_at_target() {
        let ray = camera().screen_ray(400.0, 200.0, VIEW).unwrap();
        assert!(ray.direction.distance(Vec3::NEG_Z) < 1e-4);
        assert!((ray.origin.z - 9.9).abs() < 1e-3);
    }

    #[test]
    fn unprojection_inverts_projection() {
        let cam = camera();
        let p = Vec3::new(1.5, -0.75, 0.0);
        let (x, y) = cam.project_to_screen(p, VIEW);
        let ray = cam.screen_ray(x as f32, y as f32, VIEW).unwrap();
        let t = ray.hit_plane(Vec3::ZERO, Vec3::Z).unwrap();
        assert!(ray.at(t).distance(p) < 0.05);
    }

    #[test]
    fn empty_viewport_has_no_ray() {
        let empty = Viewport::new(0.0, 0.0);
        assert!(camera().screen_ray(0.0, 0.0, empty).is_none());
        assert!((Viewport::new(0.0, 10.0).aspect() - 1.0).abs() < f32::EPSILON);
    }
}
