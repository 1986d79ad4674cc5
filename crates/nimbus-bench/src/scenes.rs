use glam::Vec3;
use nimbus_render::{CameraRays, VolumeBounds};

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    /// Parameter preset from `nimbus_config::presets`.
    pub preset: &'static str,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    /// Container transform of the cloud volume.
    pub container_position: [f32; 3],
    pub container_scale: [f32; 3],
}

/// Vertical field of view shared by all scenes.
pub const SCENE_FOV_Y: f32 = std::f32::consts::FRAC_PI_3;

/// Standard suite: one scene per preset, from a close flat slab to a distant tall bank.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "default",
            preset: "default",
            camera_position: [0.0, 1.0, -8.0],
            camera_target: [0.0, 0.0, 0.0],
            container_position: [0.0, 0.0, 0.0],
            container_scale: [8.0, 2.0, 8.0],
        },
        SceneConfig {
            name: "cumulus",
            preset: "cumulus",
            camera_position: [0.0, -2.0, -14.0],
            camera_target: [0.0, 1.0, 0.0],
            container_position: [0.0, 1.5, 0.0],
            container_scale: [12.0, 4.0, 12.0],
        },
        SceneConfig {
            name: "overcast",
            preset: "overcast",
            camera_position: [0.0, -4.0, -6.0],
            camera_target: [0.0, 2.0, 6.0],
            container_position: [0.0, 3.0, 0.0],
            container_scale: [40.0, 2.0, 40.0],
        },
        SceneConfig {
            name: "wisps",
            preset: "wisps",
            camera_position: [6.0, 2.0, -10.0],
            camera_target: [0.0, 0.5, 0.0],
            container_position: [0.0, 0.5, 0.0],
            container_scale: [10.0, 3.0, 10.0],
        },
    ]
}

impl SceneConfig {
    pub fn bounds(&self) -> VolumeBounds {
        VolumeBounds::from_container(
            Vec3::from_array(self.container_position),
            Vec3::from_array(self.container_scale),
        )
    }

    pub fn camera(&self, width: u32, height: u32) -> CameraRays {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        CameraRays::look_at(
            Vec3::from_array(self.camera_position),
            Vec3::from_array(self.camera_target),
            Vec3::Y,
            SCENE_FOV_Y,
            aspect,
        )
    }
}
