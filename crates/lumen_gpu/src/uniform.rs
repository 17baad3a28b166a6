use bytemuck::{Pod, Zeroable};
use lumen_math::Vec3;
use lumen_scene::{Scene, SceneConfig};

/// Camera basis supplied by whatever owns the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl CameraFrame {
    /// Orthonormal frame at `position` facing `target`, with +Z as world up.
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        let forward = (target - position).try_normalize().unwrap_or(Vec3::X);
        let right = forward.cross(Vec3::Z).try_normalize().unwrap_or(Vec3::Y);
        let up = right.cross(forward);
        Self {
            position,
            forward,
            right,
            up,
        }
    }
}

/// Per-frame uniform block, four 16-byte rows.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SceneUniform {
    pub camera_position: [f32; 3],
    pub sphere_count: u32,
    pub camera_forward: [f32; 3],
    pub max_bounces: u32,
    pub camera_right: [f32; 3],
    /// 1 to traverse the BVH, 0 to test every sphere.
    pub enable_bvh: u32,
    pub camera_up: [f32; 3],
    /// Frame counter for progressive accumulation.
    pub sample_index: u32,
}

impl SceneUniform {
    pub fn new(camera: &CameraFrame, scene: &Scene, config: &SceneConfig) -> Self {
        Self {
            camera_position: camera.position.to_array(),
            sphere_count: scene.sphere_count() as u32,
            camera_forward: camera.forward.to_array(),
            max_bounces: config.max_bounces,
            camera_right: camera.right.to_array(),
            enable_bvh: u32::from(config.enable_bvh),
            camera_up: camera.up.to_array(),
            sample_index: 0,
        }
    }

    /// Move on to the next accumulation frame. Wraps instead of overflowing.
    pub fn advance_sample(&mut self) {
        self.sample_index = self.sample_index.wrapping_add(1);
    }
}
