//! The 32-byte node record shared with the traversal kernel.

use bytemuck::{Pod, Zeroable};
use lumen_math::{Aabb, Vec3};
use std::ops::Range;

/// 32-bit words per node.
pub const NODE_WORDS: usize = 8;

/// Bytes per node in the storage buffer.
pub const NODE_SIZE: usize = std::mem::size_of::<GpuNode>();

const _: () = assert!(NODE_SIZE == NODE_WORDS * 4);

/// One BVH node, laid out exactly as the shader reads it.
///
/// `count` doubles as the leaf/internal tag: leaves have `count > 0` and
/// cover `indices[first..first + count]`; internal nodes have `count == 0`
/// and children at `first` and `first + 1`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GpuNode {
    pub min: [f32; 3],
    pub first: u32,
    pub max: [f32; 3],
    pub count: u32,
}

impl GpuNode {
    /// A leaf covering `count` entries of the index array starting at `first`.
    pub fn leaf(first: u32, count: u32) -> Self {
        Self {
            first,
            count,
            ..Self::zeroed()
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.count > 0
    }

    /// Turn this node into an internal node whose children start at `left`.
    pub fn make_internal(&mut self, left: u32) {
        self.first = left;
        self.count = 0;
    }

    /// Child node indices, `None` for leaves.
    ///
    /// Children never start at index 0 (that is the root), so a node with
    /// `first == 0` and `count == 0` is the root of an empty hierarchy.
    pub fn children(&self) -> Option<(usize, usize)> {
        if self.is_leaf() || self.first == 0 {
            None
        } else {
            let left = self.first as usize;
            Some((left, left + 1))
        }
    }

    /// Slice of the index array this node covers. Empty for internal nodes.
    pub fn primitive_range(&self) -> Range<usize> {
        let start = self.first as usize;
        if self.is_leaf() {
            start..start + self.count as usize
        } else {
            start..start
        }
    }

    pub fn min_corner(&self) -> Vec3 {
        Vec3::from_array(self.min)
    }

    pub fn max_corner(&self) -> Vec3 {
        Vec3::from_array(self.max)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: self.min_corner(),
            max: self.max_corner(),
        }
    }

    pub fn set_bounds(&mut self, bounds: &Aabb) {
        self.min = bounds.min.to_array();
        self.max = bounds.max.to_array();
    }

    /// The node as raw words, in upload order.
    pub fn to_words(&self) -> [u32; NODE_WORDS] {
        bytemuck::cast(*self)
    }
}
