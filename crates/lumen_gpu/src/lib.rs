//! Lumen GPU - hands a scene snapshot to the ray tracing kernel.
//!
//! Covers device creation (reporting "unsupported" instead of panicking when
//! no adapter is available) and the storage buffers the kernel binds: the
//! scene uniform, spheres, BVH nodes and the BVH index array. Pipeline and
//! shader setup live with the renderer.

mod buffers;
mod context;
mod uniform;

pub use buffers::{storage_contents, SceneBuffers, MIN_STORAGE_BYTES};
pub use context::GpuContext;
pub use uniform::{CameraFrame, SceneUniform};

use thiserror::Error;

/// Errors from GPU setup.
#[derive(Error, Debug)]
pub enum GpuError {
    #[error("GPU ray tracing unsupported: {0}")]
    Unsupported(String),

    #[error("Failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Result type for GPU operations.
pub type GpuResult<T> = Result<T, GpuError>;
