use glam::Vec3;

/// Linear RGB color. No alpha: clouds composite over an opaque background.
pub type Rgb = Vec3;

/// A world-space ray. Lives for a single pixel evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Expected to be unit length; callers that build rays from matrices normalize first.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parametric distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
