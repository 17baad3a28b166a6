//! Storage buffers for one scene snapshot.
//!
//! Built once per BVH rebuild and replaced wholesale; the kernel never sees
//! a half-written hierarchy.

use std::borrow::Cow;

use crate::SceneUniform;
use lumen_scene::Scene;
use wgpu::util::DeviceExt;
use wgpu::{BindGroup, BindGroupLayout, Buffer, BufferUsages, Device, Queue};

/// Smallest storage buffer we create; zero-sized bindings are rejected.
pub const MIN_STORAGE_BYTES: usize = 48;

/// Pad `bytes` with zeros up to `MIN_STORAGE_BYTES`.
pub fn storage_contents(bytes: &[u8]) -> Cow<'_, [u8]> {
    if bytes.len() >= MIN_STORAGE_BYTES {
        Cow::Borrowed(bytes)
    } else {
        let mut padded = bytes.to_vec();
        padded.resize(MIN_STORAGE_BYTES, 0);
        Cow::Owned(padded)
    }
}

/// GPU copies of the scene: uniform, spheres, BVH nodes and BVH indices.
pub struct SceneBuffers {
    pub uniform: Buffer,
    pub spheres: Buffer,
    pub nodes: Buffer,
    pub indices: Buffer,
    pub node_count: u32,
}

impl SceneBuffers {
    /// Upload the scene's spheres and its current BVH.
    ///
    /// Only the `nodes_used` prefix of the node buffer is uploaded.
    pub fn new(device: &Device, scene: &Scene, uniform: &SceneUniform) -> Self {
        let bvh = scene.bvh();
        let spheres = scene.gpu_spheres();

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform"),
            contents: bytemuck::bytes_of(uniform),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });

        let storage = |label: &str, bytes: &[u8]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: &storage_contents(bytes),
                usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            })
        };

        let sphere_buffer = storage("Sphere Buffer", bytemuck::cast_slice(&spheres));
        let node_buffer = storage("BVH Node Buffer", bvh.node_bytes());
        let index_buffer = storage("BVH Index Buffer", bvh.index_bytes());

        log::info!(
            "Uploaded {} spheres, {} BVH nodes ({} bytes)",
            spheres.len(),
            bvh.nodes_used(),
            bvh.node_bytes().len()
        );

        Self {
            uniform: uniform_buffer,
            spheres: sphere_buffer,
            nodes: node_buffer,
            indices: index_buffer,
            node_count: bvh.nodes_used() as u32,
        }
    }

    /// Update the per-frame uniform in place.
    pub fn write_uniform(&self, queue: &Queue, uniform: &SceneUniform) {
        queue.write_buffer(&self.uniform, 0, bytemuck::bytes_of(uniform));
    }

    /// Layout of the four scene bindings as seen from a compute shader.
    pub fn bind_group_layout(device: &Device) -> BindGroupLayout {
        let storage = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only: true },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                storage(1),
                storage(2),
                storage(3),
            ],
        })
    }

    pub fn bind_group(&self, device: &Device, layout: &BindGroupLayout) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: self.spheres.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.nodes.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: self.indices.as_entire_binding(),
                },
            ],
        })
    }
}
