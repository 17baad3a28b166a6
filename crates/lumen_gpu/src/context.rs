use crate::{GpuError, GpuResult};
use wgpu::{Device, Instance, Queue};

/// Device and queue for compute work, without a window surface.
pub struct GpuContext {
    pub device: Device,
    pub queue: Queue,
    pub adapter_name: String,
}

impl GpuContext {
    /// Pick a high-performance adapter and open a device on it.
    ///
    /// Returns `GpuError::Unsupported` when the platform has no usable adapter.
    pub async fn new_headless() -> GpuResult<Self> {
        let instance = Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| GpuError::Unsupported("no suitable GPU adapter".to_string()))?;

        let adapter_name = adapter.get_info().name;
        log::info!("Using GPU adapter: {}", adapter_name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Lumen Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        Ok(Self {
            device,
            queue,
            adapter_name,
        })
    }
}
