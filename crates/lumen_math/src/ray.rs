use crate::Vec3;

/// A ray with origin and direction.
///
/// The reciprocal of the direction is cached because every node visited
/// during BVH traversal needs it for the slab test.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction does not need to be normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: direction.recip(),
        }
    }

    /// Component-wise `1 / direction` (infinite on axes the ray is parallel to).
    #[inline]
    pub fn inv_direction(&self) -> Vec3 {
        self.inv_direction
    }
}
