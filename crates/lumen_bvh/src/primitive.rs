//! Bounding spheres, the only view of scene objects the builder sees.

use crate::{BvhError, BvhResult};
use lumen_math::{Aabb, Vec3};

/// A sphere enclosing one scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere-inclusive box, `center ± radius` on each axis.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_sphere(self.center, self.radius)
    }

    /// Reject NaN/infinite values, negative radii and bounds that overflow f32.
    pub fn validate(&self, index: usize) -> BvhResult<()> {
        if !self.center.is_finite() || !self.radius.is_finite() {
            return Err(BvhError::NonFinite { index });
        }
        if self.radius < 0.0 {
            return Err(BvhError::NegativeRadius {
                index,
                radius: self.radius,
            });
        }
        let bounds = self.aabb();
        if !bounds.min.is_finite() || !bounds.max.is_finite() {
            return Err(BvhError::NonFinite { index });
        }
        Ok(())
    }
}

/// Anything that can hand the builder a bounding sphere.
///
/// Scene objects implement this; only they know their real shape.
pub trait Bounded {
    fn bounding_sphere(&self) -> BoundingSphere;
}

impl Bounded for BoundingSphere {
    fn bounding_sphere(&self) -> BoundingSphere {
        *self
    }
}

/// Validate a whole primitive list, reporting the first bad entry.
pub fn validate_primitives(primitives: &[BoundingSphere]) -> BvhResult<()> {
    primitives
        .iter()
        .enumerate()
        .try_for_each(|(index, sphere)| sphere.validate(index))
}
