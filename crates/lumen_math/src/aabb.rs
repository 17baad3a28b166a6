use crate::{Interval, Ray, Vec3, AXES};

/// Axis-Aligned Bounding Box stored as two corners.
///
/// The corner form matches the BVH node layout, so building and packing
/// nodes never has to convert between representations.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// The box enclosing a sphere: `center ± radius` on every axis.
    pub fn from_sphere(center: Vec3, radius: f32) -> Self {
        let r = Vec3::splat(radius);
        Self {
            min: center - r,
            max: center + r,
        }
    }

    /// Grow this box in place to also cover `other`.
    #[inline]
    pub fn grow(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// `max - min` per axis.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    ///
    /// A later axis only wins when it is strictly longer, so ties go to X, then Y.
    pub fn longest_axis(&self) -> usize {
        let extent = self.extent();
        let mut axis = 0;
        if extent.y > extent[axis] {
            axis = 1;
        }
        if extent.z > extent[axis] {
            axis = 2;
        }
        axis
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// True if `other` lies entirely inside this box (boundaries inclusive).
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.cmple(other.min).all() && other.max.cmple(self.max).all()
    }

    /// Slab test. Returns the parameter at which the ray enters the box,
    /// clipped to `ray_t`, or `None` on a miss.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<f32> {
        let inv = r.inv_direction();
        let mut t_min = ray_t.min;
        let mut t_max = ray_t.max;

        for axis in 0..AXES {
            let mut t0 = (self.min[axis] - r.origin[axis]) * inv[axis];
            let mut t1 = (self.max[axis] - r.origin[axis]) * inv[axis];
            if inv[axis] < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            // NaN (origin on a slab plane with a parallel ray) leaves the range untouched.
            t_min = t0.max(t_min);
            t_max = t1.min(t_max);
            if t_max < t_min {
                return None;
            }
        }

        Some(t_min)
    }

    /// Contains nothing; the identity for `grow`.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Zero-size box at the origin.
    pub const ZERO: Aabb = Aabb {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners(min: Vec3, max: Vec3) -> Aabb {
        Aabb { min, max }
    }

    #[test]
    fn test_aabb_from_sphere() {
        let aabb = Aabb::from_sphere(Vec3::new(1.0, 2.0, 3.0), 0.5);

        assert_eq!(aabb.min, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(aabb.max, Vec3::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn test_aabb_grow_from_empty() {
        let mut aabb = Aabb::EMPTY;
        aabb.grow(&Aabb::from_sphere(Vec3::ZERO, 1.0));
        aabb.grow(&Aabb::from_sphere(Vec3::new(10.0, 0.0, 0.0), 1.0));

        assert_eq!(aabb.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vec3::new(11.0, 1.0, 1.0));
    }

    #[test]
    fn test_aabb_longest_axis() {
        let aabb_x = corners(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0));
        assert_eq!(aabb_x.longest_axis(), 0);

        let aabb_y = corners(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0));
        assert_eq!(aabb_y.longest_axis(), 1);

        let aabb_z = corners(Vec3::ZERO, Vec3::new(1.0, 1.0, 10.0));
        assert_eq!(aabb_z.longest_axis(), 2);
    }

    #[test]
    fn test_aabb_longest_axis_ties_prefer_earlier() {
        let cube = corners(Vec3::ZERO, Vec3::splat(4.0));
        assert_eq!(cube.longest_axis(), 0);

        let yz = corners(Vec3::ZERO, Vec3::new(1.0, 4.0, 4.0));
        assert_eq!(yz.longest_axis(), 1);
    }

    #[test]
    fn test_aabb_contains() {
        let outer = corners(Vec3::splat(-2.0), Vec3::splat(2.0));
        let inner = Aabb::from_sphere(Vec3::ZERO, 1.0);
        let touching = Aabb::from_sphere(Vec3::new(1.0, 0.0, 0.0), 1.0);
        let outside = Aabb::from_sphere(Vec3::new(2.0, 0.0, 0.0), 1.0);

        assert!(outer.contains(&inner));
        assert!(outer.contains(&touching));
        assert!(!outer.contains(&outside));
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = corners(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Ray pointing at center enters at z = -1, t = 4
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let t = aabb.hit(&ray, Interval::new(0.0, 100.0));
        assert_eq!(t, Some(4.0));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)).is_none());

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)).is_none());

        // Box beyond the allowed range
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 3.0)).is_none());
    }

    #[test]
    fn test_aabb_hit_from_inside() {
        let aabb = corners(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0));

        assert_eq!(aabb.hit(&ray, Interval::FORWARD), Some(0.0));
    }

    #[test]
    fn test_aabb_centroid() {
        let aabb = corners(Vec3::ZERO, Vec3::splat(10.0));
        assert_eq!(aabb.centroid(), Vec3::splat(5.0));
    }
}
