//! Build a random sphere scene, report its BVH and upload it to the GPU.
//!
//! Run with: cargo run -- [scene.json] [--no-gpu]

use std::env;
use std::time::Instant;

use anyhow::{Context, Result};
use lumen_bvh::Bounded;
use lumen_gpu::{CameraFrame, GpuContext, GpuError, SceneBuffers, SceneUniform};
use lumen_math::{Interval, Ray, Vec3};
use lumen_scene::{Scene, SceneConfig};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let use_gpu = !args.iter().any(|a| a == "--no-gpu");

    let config = match args.iter().find(|a| !a.starts_with("--")) {
        Some(path) => {
            log::info!("Loading scene config: {}", path);
            SceneConfig::load(path).with_context(|| format!("failed to load {path}"))?
        }
        None => SceneConfig::default(),
    };

    let start = Instant::now();
    let scene = Scene::random(&config)?;
    let build_time = start.elapsed();

    let stats = scene.bvh().stats();
    println!("=== Scene ===");
    println!("Spheres: {}", scene.sphere_count());
    println!("BVH: {}", stats);
    println!("Build time: {:.2?}", build_time);

    let bounds = scene.world_bounds();
    println!(
        "World bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
        bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
    );

    let camera = CameraFrame::look_at(bounds.max * 1.5 + Vec3::ONE, bounds.centroid());
    trace_center_ray(&scene, &camera);

    if !use_gpu {
        return Ok(());
    }

    match pollster::block_on(GpuContext::new_headless()) {
        Ok(gpu) => {
            let mut uniform = SceneUniform::new(&camera, &scene, &config);
            let buffers = SceneBuffers::new(&gpu.device, &scene, &uniform);
            let layout = SceneBuffers::bind_group_layout(&gpu.device);
            let _bind_group = buffers.bind_group(&gpu.device, &layout);
            println!(
                "Uploaded {} nodes to {}",
                buffers.node_count, gpu.adapter_name
            );

            // Each accumulation frame only changes the uniform.
            uniform.advance_sample();
            buffers.write_uniform(&gpu.queue, &uniform);
            gpu.queue.submit(std::iter::empty());
            log::debug!("Uniform updated for sample {}", uniform.sample_index);
        }
        Err(GpuError::Unsupported(reason)) => {
            log::warn!("GPU ray tracing unsupported: {}", reason);
            println!("GPU: unsupported ({reason})");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Trace one ray through the CPU traversal as a sanity check of the node buffer.
fn trace_center_ray(scene: &Scene, camera: &CameraFrame) {
    let ray = Ray::new(camera.position, camera.forward);
    let spheres: Vec<_> = scene.spheres().iter().map(|s| s.bounding_sphere()).collect();

    match scene.bvh().intersect(&spheres, &ray, Interval::new(0.001, f32::INFINITY)) {
        Some(hit) => println!("Center ray: sphere {} at t = {:.2}", hit.primitive, hit.t),
        None => println!("Center ray: no hit"),
    }
}
