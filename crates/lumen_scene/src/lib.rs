//! Lumen Scene - the CPU side of the sphere ray tracer.
//!
//! This crate provides:
//!
//! - **Scene objects**: `Sphere` with its GPU record `GpuSphere`
//! - **Scene**: the sphere list plus its current `Bvh`, rebuilt on every change
//! - **Configuration**: `SceneConfig`, loaded from JSON
//!
//! # Example
//!
//! ```ignore
//! use lumen_scene::{Scene, SceneConfig};
//!
//! let config = SceneConfig::load("scene.json")?;
//! let scene = Scene::random(&config)?;
//! println!("{}", scene.bvh().stats());
//! ```

pub mod config;
pub mod scene;
pub mod sphere;

// Re-export commonly used types
pub use config::{ConfigError, SceneConfig};
pub use scene::{Scene, SceneError, SceneResult};
pub use sphere::{GpuSphere, Sphere};
