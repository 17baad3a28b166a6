//! Sphere scene objects and their storage-buffer layout.

use bytemuck::{Pod, Zeroable};
use lumen_bvh::{Bounded, BoundingSphere};
use lumen_math::Vec3;

/// A colored sphere in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    /// Albedo (RGB, 0-1)
    pub color: Vec3,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 1.0,
            color: Vec3::splat(0.5), // Grey default
        }
    }
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, color: Vec3) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }

    pub fn to_gpu(&self) -> GpuSphere {
        GpuSphere {
            center: self.center.to_array(),
            _pad0: 0.0,
            color: self.color.to_array(),
            _pad1: 0.0,
            radius: self.radius,
            _pad2: [0.0; 3],
        }
    }
}

impl Bounded for Sphere {
    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.center, self.radius)
    }
}

/// One sphere as the kernel reads it: three 16-byte rows
/// `[center, _] [color, _] [radius, _, _, _]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuSphere {
    pub center: [f32; 3],
    pub _pad0: f32,
    pub color: [f32; 3],
    pub _pad1: f32,
    pub radius: f32,
    pub _pad2: [f32; 3],
}
