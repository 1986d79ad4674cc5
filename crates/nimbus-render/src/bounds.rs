use glam::Vec3;
use nimbus_core::constants::RAY_PARALLEL_EPSILON;
use nimbus_core::math::is_finite3;
use nimbus_core::Ray;

/// Parametric entry/exit distances of a ray through the volume.
/// `t_near` is already clamped to 0 for rays that start inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub t_near: f32,
    pub t_far: f32,
}

impl RayHit {
    pub fn length(&self) -> f32 {
        self.t_far - self.t_near
    }
}

/// Axis-aligned cloud container. Invariant: `min <= max` componentwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeBounds {
    min: Vec3,
    max: Vec3,
}

impl VolumeBounds {
    /// Build from two opposite corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        if !is_finite3(a) || !is_finite3(b) {
            log::warn!("cloud bounds have a non-finite corner ({a}, {b}); every ray will miss");
        }
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Build from a container transform: centre position and full extent.
    /// Negative extents (mirrored transforms) are folded to keep `min <= max`.
    pub fn from_container(position: Vec3, scale: Vec3) -> Self {
        if scale.min_element() < 0.0 {
            log::warn!("cloud container has a negative scale {scale}, folding to its absolute value");
        }
        if !is_finite3(position) || !is_finite3(scale) {
            log::warn!("cloud container transform is non-finite; every ray will miss");
        }
        let half = scale.abs() * 0.5;
        Self {
            min: position - half,
            max: position + half,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Slab-method intersection.
    ///
    /// Axes whose direction component is (near) zero never divide: the ray
    /// misses unless its origin already lies inside that slab. Non-finite or
    /// zero-length rays always miss, as do bounds with a non-finite corner.
    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        if !is_finite3(self.min) || !is_finite3(self.max) {
            return None;
        }
        if !is_finite3(ray.origin) || !is_finite3(ray.direction) {
            return None;
        }
        if ray.direction.length_squared() <= RAY_PARALLEL_EPSILON * RAY_PARALLEL_EPSILON {
            return None;
        }

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.direction[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];

            if d.abs() < RAY_PARALLEL_EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let t0 = (lo - o) * inv;
            let t1 = (hi - o) * inv;
            t_near = t_near.max(t0.min(t1));
            t_far = t_far.min(t0.max(t1));
        }

        if t_near > t_far || t_far < 0.0 {
            return None;
        }
        Some(RayHit {
            t_near: t_near.max(0.0),
            t_far,
        })
    }
}
