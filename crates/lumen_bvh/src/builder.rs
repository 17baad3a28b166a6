//! Top-down BVH construction with a spatial-median split.
//!
//! Each node is split at the midpoint of its bounding box along the longest
//! axis. Only the index array is reordered; primitive data never moves.
//! Bounds are the union of sphere-inclusive boxes (`center ± radius`),
//! which is looser than the objects themselves but cheap to compute.

use crate::{validate_primitives, Bounded, BoundingSphere, BvhError, BvhResult, GpuNode};
use bytemuck::Zeroable;
use lumen_math::Aabb;

/// Maximum primitives per leaf node before splitting.
pub const LEAF_MAX_SIZE: usize = 2;

/// Largest primitive count whose `2n - 1` node indices still fit in a `u32`.
pub const MAX_PRIMITIVES: usize = (u32::MAX / 2) as usize;

/// Worst-case node count for `n` primitives: `max(1, 2n - 1)`.
pub fn node_capacity(primitive_count: usize) -> usize {
    (2 * primitive_count).saturating_sub(1).max(1)
}

/// A built hierarchy: the permuted index array plus the flat node buffer.
///
/// The value is an immutable snapshot. Changing the scene means building a
/// new `Bvh` and replacing this one.
#[derive(Debug, Clone, PartialEq)]
pub struct Bvh {
    indices: Vec<u32>,
    nodes: Vec<GpuNode>,
    nodes_used: usize,
    oversized_leaves: usize,
}

impl Default for Bvh {
    /// The hierarchy of an empty scene: one empty leaf.
    fn default() -> Self {
        Self {
            indices: Vec::new(),
            nodes: vec![GpuNode::leaf(0, 0)],
            nodes_used: 1,
            oversized_leaves: 0,
        }
    }
}

impl Bvh {
    /// Build a hierarchy over `primitives`.
    ///
    /// Input is validated first; a non-finite or negative-radius sphere is
    /// reported with its index and nothing is built. Two builds over the same
    /// input in the same order produce identical buffers.
    pub fn build(primitives: &[BoundingSphere]) -> BvhResult<Self> {
        let n = primitives.len();
        if n > MAX_PRIMITIVES {
            return Err(BvhError::TooManyPrimitives(n));
        }
        validate_primitives(primitives)?;

        if n == 0 {
            log::debug!("BVH: empty scene, single empty leaf");
            return Ok(Self::default());
        }

        let mut builder = Builder {
            primitives,
            indices: (0..n as u32).collect(),
            nodes: vec![GpuNode::zeroed(); node_capacity(n)],
            nodes_used: 1,
            oversized_leaves: 0,
        };

        builder.nodes[0] = GpuNode::leaf(0, n as u32);
        builder.update_bounds(0);
        builder.subdivide(0)?;

        if builder.oversized_leaves > 0 {
            log::warn!(
                "BVH: {} leaves exceed {} primitives (coincident centers)",
                builder.oversized_leaves,
                LEAF_MAX_SIZE
            );
        }
        log::debug!(
            "BVH: {} primitives, {} of {} nodes used",
            n,
            builder.nodes_used,
            builder.nodes.len()
        );

        Ok(Self {
            indices: builder.indices,
            nodes: builder.nodes,
            nodes_used: builder.nodes_used,
            oversized_leaves: builder.oversized_leaves,
        })
    }

    /// Build from any scene objects that expose a bounding sphere.
    pub fn from_primitives<T: Bounded>(objects: &[T]) -> BvhResult<Self> {
        let spheres: Vec<BoundingSphere> = objects.iter().map(Bounded::bounding_sphere).collect();
        Self::build(&spheres)
    }

    /// Number of primitives indexed.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Primitive ids in traversal order; leaves refer to ranges of this slice.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The valid nodes, root first.
    pub fn nodes(&self) -> &[GpuNode] {
        &self.nodes[..self.nodes_used]
    }

    /// The whole preallocated buffer, including unused capacity past `nodes_used`.
    pub fn node_buffer(&self) -> &[GpuNode] {
        &self.nodes
    }

    pub fn nodes_used(&self) -> usize {
        self.nodes_used
    }

    pub fn root(&self) -> &GpuNode {
        &self.nodes[0]
    }

    /// Bounds of the whole scene.
    pub fn bounds(&self) -> Aabb {
        self.root().bounds()
    }

    /// Leaves left above `LEAF_MAX_SIZE` because their primitives could not be separated.
    pub fn oversized_leaf_count(&self) -> usize {
        self.oversized_leaves
    }

    /// Valid nodes as bytes, ready for a storage buffer.
    pub fn node_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.nodes())
    }

    /// Index array as bytes, ready for a storage buffer.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Scratch state for one build.
struct Builder<'a> {
    primitives: &'a [BoundingSphere],
    indices: Vec<u32>,
    nodes: Vec<GpuNode>,
    nodes_used: usize,
    oversized_leaves: usize,
}

impl Builder<'_> {
    fn update_bounds(&mut self, node_idx: usize) {
        let node = self.nodes[node_idx];
        let bounds = self.indices[node.primitive_range()]
            .iter()
            .fold(Aabb::EMPTY, |mut acc, &prim| {
                acc.grow(&self.primitives[prim as usize].aabb());
                acc
            });
        self.nodes[node_idx].set_bounds(&bounds);
    }

    /// Split nodes until every leaf is small enough or cannot be split.
    ///
    /// Uses an explicit stack so degenerate inputs cannot overflow the call
    /// stack. Left is popped before right, giving the same node order as a
    /// recursive depth-first build.
    fn subdivide(&mut self, root: usize) -> BvhResult<()> {
        let mut stack = vec![root];
        while let Some(node_idx) = stack.pop() {
            if let Some((left, right)) = self.split(node_idx)? {
                stack.push(right);
                stack.push(left);
            }
        }
        Ok(())
    }

    /// Split one leaf in two. Returns the new children, or `None` if the node stays a leaf.
    fn split(&mut self, node_idx: usize) -> BvhResult<Option<(usize, usize)>> {
        let node = self.nodes[node_idx];
        let count = node.count as usize;
        if count <= LEAF_MAX_SIZE {
            return Ok(None);
        }

        let bounds = node.bounds();
        let axis = bounds.longest_axis();
        let split_position = bounds.min[axis] + bounds.extent()[axis] / 2.0;

        let range = node.primitive_range();
        let primitives = self.primitives;
        let left_count = partition(&mut self.indices[range.clone()], |prim| {
            primitives[prim as usize].center[axis] < split_position
        });

        if left_count == 0 || left_count == count {
            self.oversized_leaves += 1;
            log::debug!(
                "BVH: node {} kept as leaf with {} primitives (no split on axis {})",
                node_idx,
                count,
                axis
            );
            return Ok(None);
        }

        let left = self.allocate_pair()?;
        let right = left + 1;

        self.nodes[left] = GpuNode::leaf(range.start as u32, left_count as u32);
        self.nodes[right] = GpuNode::leaf(
            (range.start + left_count) as u32,
            (count - left_count) as u32,
        );
        self.nodes[node_idx].make_internal(left as u32);

        self.update_bounds(left);
        self.update_bounds(right);
        Ok(Some((left, right)))
    }

    fn allocate_pair(&mut self) -> BvhResult<usize> {
        let left = self.nodes_used;
        if left + 2 > self.nodes.len() {
            return Err(BvhError::Capacity {
                requested: left + 2,
                capacity: self.nodes.len(),
            });
        }
        self.nodes_used += 2;
        Ok(left)
    }
}

/// Two-pointer in-place partition. Entries for which `goes_left` holds end up
/// at the front; returns how many there are. Order within each side is not kept.
pub(crate) fn partition(indices: &mut [u32], goes_left: impl Fn(u32) -> bool) -> usize {
    let mut i = 0;
    let mut j = indices.len();
    while i < j {
        if goes_left(indices[i]) {
            i += 1;
        } else {
            j -= 1;
            indices.swap(i, j);
        }
    }
    i
}
