use glam::{Mat4, Vec3, Vec4};
use nimbus_core::constants::MIN_DIRECTION_LENGTH;
use nimbus_core::math::is_finite3;
use nimbus_core::Ray;

/// Reconstructs per-pixel view rays from the camera's inverse projection
/// and camera-to-world transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRays {
    inv_projection: Mat4,
    camera_to_world: Mat4,
}

impl CameraRays {
    pub fn new(inv_projection: Mat4, camera_to_world: Mat4) -> Self {
        if !inv_projection.is_finite() || !camera_to_world.is_finite() {
            log::warn!("camera matrices contain non-finite values; every ray will miss");
        }
        Self {
            inv_projection,
            camera_to_world,
        }
    }

    /// Right-handed look-at camera with a perspective projection.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3, fov_y_rad: f32, aspect: f32) -> Self {
        let view = Mat4::look_at_rh(eye, target, up);
        let proj = Mat4::perspective_rh(fov_y_rad, aspect, 0.1, 1000.0);
        Self::new(proj.inverse(), view.inverse())
    }

    /// Camera position in world space.
    pub fn origin(&self) -> Vec3 {
        self.camera_to_world.w_axis.truncate()
    }

    /// View ray through the centre of pixel `(x, y)`; row 0 is the top of the image.
    /// Returns `None` when the matrices produce a degenerate direction.
    pub fn ray(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Ray> {
        if width == 0 || height == 0 {
            return None;
        }
        let ndc_x = (x as f32 + 0.5) / width as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - (y as f32 + 0.5) / height as f32 * 2.0;

        // Clip-space z = 1 is the far plane under both depth conventions.
        let view = self.inv_projection * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        if view.w.abs() <= f32::EPSILON || !view.is_finite() {
            return None;
        }
        let view_dir = view.truncate() / view.w;
        let dir = self.camera_to_world.transform_vector3(view_dir);
        let len = dir.length();
        if !len.is_finite() || len <= MIN_DIRECTION_LENGTH {
            return None;
        }
        let origin = self.origin();
        if !is_finite3(origin) {
            return None;
        }
        Some(Ray::new(origin, dir / len))
    }
}
