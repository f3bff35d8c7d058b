use glam::Vec3;

/// Half-line used for hit-testing and drag-plane projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point in world space.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` toward `through`. `None` when the points coincide.
    #[must_use]
    pub fn through(origin: Vec3, through: Vec3) -> Option<Self> {
        let direction = (through - origin).try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Nearest non-negative hit parameter against a sphere.
    #[must_use]
    pub fn hit_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let t0 = -b - sqrt_disc;
        let t1 = -b + sqrt_disc;
        if t0 >= 0.0 {
            Some(t0)
        } else if t1 >= 0.0 {
            Some(t1)
        } else {
            None
        }
    }

    /// Hit parameter against the plane through `point` with `normal`.
    #[must_use]
    pub fn hit_plane(&self, point: Vec3, normal: Vec3) -> Option<f32> {
        let denom = normal.dot(self.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = normal.dot(point - self.origin) / denom;
        (t >= 0.0).then_some(t)
    }
}

/// Slab-method ray–AABB intersection, returns Some(t) or None
#[must_use]
pub fn ray_aabb_hit_t(ray: &Ray, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = ray.direction.map(|d| {
        if d == 0.0 {
            f32::INFINITY
        } else {
            1.0 / d
        }
    });

    let t1 = (min - ray.origin) * inv;
    let t2 = (max - ray.origin) * inv;
    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}
