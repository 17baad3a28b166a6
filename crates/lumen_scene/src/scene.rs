//! The sphere scene and its acceleration structure.
//!
//! The BVH is rebuilt from scratch whenever the sphere list changes. A
//! failed rebuild leaves the previous spheres and hierarchy in place.

use lumen_bvh::{Bvh, BvhError};
use lumen_math::{Aabb, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::config::{ConfigError, SceneConfig};
use crate::sphere::{GpuSphere, Sphere};

/// Errors that can occur while building or editing a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("BVH error: {0}")]
    Bvh(#[from] BvhError),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Spheres plus the hierarchy built over them.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
    bvh: Bvh,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spheres(spheres: Vec<Sphere>) -> SceneResult<Self> {
        let bvh = Bvh::from_primitives(&spheres)?;
        Ok(Self { spheres, bvh })
    }

    /// Scatter `config.sphere_count` spheres with random position, size and color.
    pub fn random(config: &SceneConfig) -> SceneResult<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let e = config.half_extent;
        let spheres: Vec<Sphere> = (0..config.sphere_count)
            .map(|_| {
                let center = Vec3::new(
                    rng.gen_range(-e..e),
                    rng.gen_range(-e..e),
                    rng.gen_range(-e..e),
                );
                let radius = rng.gen_range(config.min_radius..config.max_radius);
                let color = Vec3::new(rng.gen(), rng.gen(), rng.gen());
                Sphere::new(center, radius, color)
            })
            .collect();

        let scene = Self::from_spheres(spheres)?;
        log::info!(
            "Generated {} spheres, {} BVH nodes",
            scene.sphere_count(),
            scene.bvh.nodes_used()
        );
        Ok(scene)
    }

    /// Add a sphere and rebuild the hierarchy.
    pub fn push_sphere(&mut self, sphere: Sphere) -> SceneResult<()> {
        self.spheres.push(sphere);
        if let Err(e) = self.rebuild_bvh() {
            self.spheres.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Replace every sphere and rebuild the hierarchy.
    pub fn set_spheres(&mut self, spheres: Vec<Sphere>) -> SceneResult<()> {
        *self = Self::from_spheres(spheres)?;
        Ok(())
    }

    /// Edit spheres in place, then rebuild. Rolls the edit back if the result is invalid.
    pub fn update_spheres(&mut self, edit: impl FnOnce(&mut [Sphere])) -> SceneResult<()> {
        let previous = self.spheres.clone();
        edit(&mut self.spheres);
        if let Err(e) = self.rebuild_bvh() {
            self.spheres = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Rebuild the BVH from the current spheres.
    pub fn rebuild_bvh(&mut self) -> SceneResult<()> {
        self.bvh = Bvh::from_primitives(&self.spheres)?;
        log::debug!("Rebuilt BVH over {} spheres", self.spheres.len());
        Ok(())
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Spheres in storage-buffer layout, in original order (the index array refers to these).
    pub fn gpu_spheres(&self) -> Vec<GpuSphere> {
        self.spheres.iter().map(Sphere::to_gpu).collect()
    }

    /// World bounds of every sphere; empty scenes report a zero box.
    pub fn world_bounds(&self) -> Aabb {
        if self.spheres.is_empty() {
            Aabb::ZERO
        } else {
            self.bvh.bounds()
        }
    }
}
