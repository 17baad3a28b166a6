//! CPU walk over the flat node buffer.
//!
//! Reads the buffer the same way the compute kernel does (stack of node
//! indices, slab test per node, leaf ranges through the index array), so it
//! doubles as a check that the encoding is traversable.

use crate::{BoundingSphere, Bvh};
use lumen_math::{Interval, Ray};

/// Closest intersection found by [`Bvh::intersect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the primitive in the original input order.
    pub primitive: u32,
    pub t: f32,
}

impl Bvh {
    /// Call `visit` for every primitive in a leaf whose box the ray enters
    /// within `ray_t`. `visit` returns a new upper bound for the ray
    /// parameter when it finds a closer hit; boxes beyond it are skipped.
    pub fn traverse(&self, ray: &Ray, ray_t: Interval, mut visit: impl FnMut(u32) -> Option<f32>) {
        // The empty root reads as internal (count == 0) but has no children.
        if self.is_empty() {
            return;
        }
        let nodes = self.nodes();
        let mut closest = ray_t.max;
        let mut stack = Vec::with_capacity(64);
        stack.push(0usize);

        while let Some(node_idx) = stack.pop() {
            let node = &nodes[node_idx];
            if node.bounds().hit(ray, ray_t.with_max(closest)).is_none() {
                continue;
            }
            match node.children() {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => {
                    for &prim in &self.indices()[node.primitive_range()] {
                        if let Some(t) = visit(prim) {
                            closest = closest.min(t);
                        }
                    }
                }
            }
        }
    }

    /// Closest sphere hit by `ray` within `ray_t`.
    ///
    /// `primitives` must be the list this hierarchy was built from.
    pub fn intersect(
        &self,
        primitives: &[BoundingSphere],
        ray: &Ray,
        ray_t: Interval,
    ) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        self.traverse(ray, ray_t, |prim| {
            let limit = best.map_or(ray_t.max, |hit| hit.t);
            let t = hit_sphere(&primitives[prim as usize], ray, ray_t.with_max(limit))?;
            best = Some(Hit { primitive: prim, t });
            Some(t)
        });
        best
    }
}

/// Smaller root of `|o + t·d - c|² = r²` inside `ray_t`, else the larger one.
fn hit_sphere(sphere: &BoundingSphere, ray: &Ray, ray_t: Interval) -> Option<f32> {
    let to_center = sphere.center - ray.origin;
    let a = ray.direction.length_squared();
    let half_b = ray.direction.dot(to_center);
    let c = to_center.length_squared() - sphere.radius * sphere.radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();

    [(half_b - sqrt_d) / a, (half_b + sqrt_d) / a]
        .into_iter()
        .find(|&t| ray_t.surrounds(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn brute_force(spheres: &[BoundingSphere], ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for (i, sphere) in spheres.iter().enumerate() {
            let limit = best.map_or(ray_t.max, |hit| hit.t);
            if let Some(t) = hit_sphere(sphere, ray, ray_t.with_max(limit)) {
                best = Some(Hit {
                    primitive: i as u32,
                    t,
                });
            }
        }
        best
    }

    #[test]
    fn test_hit_sphere() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let t = hit_sphere(&sphere, &ray, Interval::new(0.001, f32::INFINITY));
        assert!((t.unwrap() - 0.5).abs() < 0.001);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(hit_sphere(&sphere, &ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_hit_sphere_from_inside_uses_far_root() {
        let sphere = BoundingSphere::new(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let t = hit_sphere(&sphere, &ray, Interval::new(0.001, f32::INFINITY));
        assert!((t.unwrap() - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_intersect_empty_bvh() {
        let bvh = Bvh::build(&[]).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(bvh.intersect(&[], &ray, Interval::FORWARD).is_none());
    }

    #[test]
    fn test_traverse_empty_bvh_visits_nothing() {
        // The ray passes through the zero-size root box at the origin.
        let bvh = Bvh::default();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Z);
        let mut visited = 0;
        bvh.traverse(&ray, Interval::FORWARD, |_| {
            visited += 1;
            None
        });
        assert_eq!(visited, 0);
    }

    #[test]
    fn test_intersect_row_of_spheres() {
        let spheres: Vec<_> = (0..10)
            .map(|i| BoundingSphere::new(Vec3::new(i as f32, 0.0, -5.0), 0.5))
            .collect();
        let bvh = Bvh::build(&spheres).unwrap();

        // Ray that hits sphere at x=5
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = bvh.intersect(&spheres, &ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert_eq!(hit.primitive, 5);
        assert!((hit.t - 4.5).abs() < 0.01);
    }

    #[test]
    fn test_intersect_picks_closest() {
        let spheres = [
            BoundingSphere::new(Vec3::new(0.0, 0.0, 30.0), 1.0),
            BoundingSphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0),
            BoundingSphere::new(Vec3::new(0.0, 0.0, 20.0), 1.0),
            BoundingSphere::new(Vec3::new(50.0, 0.0, 0.0), 1.0),
        ];
        let bvh = Bvh::build(&spheres).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let hit = bvh.intersect(&spheres, &ray, Interval::FORWARD).unwrap();
        assert_eq!(hit.primitive, 1);
        assert!((hit.t - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_traverse_skips_distant_leaves() {
        let spheres: Vec<_> = (0..64)
            .map(|i| BoundingSphere::new(Vec3::new(i as f32 * 10.0, 0.0, 0.0), 1.0))
            .collect();
        let bvh = Bvh::build(&spheres).unwrap();

        // Straight down onto sphere 0: only a handful of leaves are visited.
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut visited = Vec::new();
        bvh.traverse(&ray, Interval::FORWARD, |prim| {
            visited.push(prim);
            None
        });

        assert!(visited.contains(&0));
        assert!(visited.len() <= 2);
    }

    #[test]
    fn test_intersect_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(1234);
        let spheres: Vec<_> = (0..500)
            .map(|_| {
                let center = Vec3::new(
                    rng.gen_range(-150.0..150.0),
                    rng.gen_range(-150.0..150.0),
                    rng.gen_range(-150.0..150.0),
                );
                BoundingSphere::new(center, rng.gen_range(3.0..13.0))
            })
            .collect();
        let bvh = Bvh::build(&spheres).unwrap();
        let ray_t = Interval::new(0.001, f32::INFINITY);

        for _ in 0..200 {
            let origin = Vec3::new(
                rng.gen_range(-200.0..200.0),
                rng.gen_range(-200.0..200.0),
                rng.gen_range(-200.0..200.0),
            );
            let target = Vec3::new(
                rng.gen_range(-150.0..150.0),
                rng.gen_range(-150.0..150.0),
                rng.gen_range(-150.0..150.0),
            );
            let ray = Ray::new(origin, (target - origin).normalize());

            let expected = brute_force(&spheres, &ray, ray_t);
            let actual = bvh.intersect(&spheres, &ray, ray_t);
            match (expected, actual) {
                (None, None) => {}
                (Some(e), Some(a)) => assert!((e.t - a.t).abs() < 1e-3),
                other => panic!("BVH and brute force disagree: {other:?}"),
            }
        }
    }
}
