use glam::{Vec3, Vec4};

/// A read-only 3D noise source addressed in noise space.
///
/// Implementations must be pure: the same `uvw` always yields the same value.
pub trait NoiseField: Send + Sync {
    type Value: Copy;

    fn sample(&self, uvw: Vec3) -> Self::Value;
}

/// 4-channel base shape source.
pub type ShapeField = dyn NoiseField<Value = Vec4>;

/// 3-channel erosion detail source.
pub type DetailField = dyn NoiseField<Value = Vec3>;

/// Constant field. Useful for empty or homogeneous volumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformNoise<V>(pub V);

impl<V: Copy + Send + Sync> NoiseField for UniformNoise<V> {
    type Value = V;

    fn sample(&self, _uvw: Vec3) -> V {
        self.0
    }
}
