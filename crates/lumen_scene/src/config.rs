//! Scene generation and renderer settings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a scene configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Scene configuration.
///
/// Missing fields fall back to the defaults, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of random spheres to generate
    pub sphere_count: usize,
    /// Sphere centers are drawn from `[-half_extent, half_extent]` on each axis
    pub half_extent: f32,
    /// Radius range `[min_radius, max_radius)`
    pub min_radius: f32,
    pub max_radius: f32,
    /// Fixed seed for reproducible scenes; random when absent
    pub seed: Option<u64>,
    /// Let the kernel walk the BVH instead of testing every sphere
    pub enable_bvh: bool,
    /// Maximum ray bounce depth
    pub max_bounces: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sphere_count: 1024,
            half_extent: 150.0,
            min_radius: 3.0,
            max_radius: 13.0,
            seed: None,
            enable_bvh: true,
            max_bounces: 4,
        }
    }
}

impl SceneConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every range the scene generator samples from is usable.
    ///
    /// Sampling `-half_extent..half_extent` needs `2 * half_extent` to stay
    /// finite, and likewise `max_radius - min_radius`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.half_extent.is_finite() && self.half_extent > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "half_extent must be positive, got {}",
                self.half_extent
            )));
        }
        if self.half_extent > f32::MAX / 2.0 {
            return Err(ConfigError::Invalid(format!(
                "half_extent {} is too large, the sampled range overflows f32",
                self.half_extent
            )));
        }
        if !(self.max_radius - self.min_radius).is_finite() {
            return Err(ConfigError::Invalid(format!(
                "radius range {}..{} must be finite with a finite width",
                self.min_radius, self.max_radius
            )));
        }
        if self.min_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_radius must be non-negative, got {}",
                self.min_radius
            )));
        }
        if self.min_radius >= self.max_radius {
            return Err(ConfigError::Invalid(format!(
                "min_radius {} must be below max_radius {}",
                self.min_radius, self.max_radius
            )));
        }
        Ok(())
    }
}
