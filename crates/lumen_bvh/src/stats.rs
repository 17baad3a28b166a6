use crate::{Bvh, LEAF_MAX_SIZE};

/// Shape summary of a built hierarchy, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BvhStats {
    pub primitive_count: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    /// Levels including the root; a single leaf has depth 1.
    pub max_depth: usize,
    pub max_leaf_size: usize,
    /// Leaves holding more than `LEAF_MAX_SIZE` primitives.
    pub oversized_leaves: usize,
}

impl Bvh {
    pub fn stats(&self) -> BvhStats {
        let nodes = self.nodes();
        let mut stats = BvhStats {
            primitive_count: self.len(),
            node_count: nodes.len(),
            ..Default::default()
        };
        // The empty root has count == 0 but no children.
        if self.is_empty() {
            stats.leaf_count = 1;
            stats.max_depth = 1;
            return stats;
        }

        let mut stack = vec![(0usize, 1usize)];
        while let Some((idx, depth)) = stack.pop() {
            stats.max_depth = stats.max_depth.max(depth);
            match nodes[idx].children() {
                Some((left, right)) => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
                None => {
                    let size = nodes[idx].count as usize;
                    stats.leaf_count += 1;
                    stats.max_leaf_size = stats.max_leaf_size.max(size);
                    if size > LEAF_MAX_SIZE {
                        stats.oversized_leaves += 1;
                    }
                }
            }
        }
        stats
    }
}

impl std::fmt::Display for BvhStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} primitives, {} nodes ({} leaves), depth {}, largest leaf {}",
            self.primitive_count,
            self.node_count,
            self.leaf_count,
            self.max_depth,
            self.max_leaf_size
        )?;
        if self.oversized_leaves > 0 {
            write!(f, ", {} oversized", self.oversized_leaves)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{BoundingSphere, Bvh};
    use lumen_math::Vec3;

    #[test]
    fn test_stats_empty() {
        let stats = Bvh::default().stats();

        assert_eq!(stats.primitive_count, 0);
        assert_eq!(stats.node_count, 1);
        assert_eq!(stats.leaf_count, 1);
        assert_eq!(stats.max_depth, 1);
        assert_eq!(stats.max_leaf_size, 0);
    }

    #[test]
    fn test_stats_balanced_row() {
        // Eight evenly spaced spheres split cleanly into four pairs.
        let spheres: Vec<_> = (0..8)
            .map(|i| BoundingSphere::new(Vec3::new(i as f32 * 10.0, 0.0, 0.0), 1.0))
            .collect();
        let stats = Bvh::build(&spheres).unwrap().stats();

        assert_eq!(stats.leaf_count, 4);
        assert_eq!(stats.node_count, 7);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.max_leaf_size, 2);
        assert_eq!(stats.oversized_leaves, 0);
    }

    #[test]
    fn test_stats_display_mentions_oversized() {
        let spheres = vec![BoundingSphere::new(Vec3::ZERO, 1.0); 3];
        let stats = Bvh::build(&spheres).unwrap().stats();

        assert_eq!(stats.oversized_leaves, 1);
        assert!(stats.to_string().contains("1 oversized"));
    }
}
