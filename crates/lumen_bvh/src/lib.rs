//! Lumen BVH - flat bounding volume hierarchy for GPU ray tracing.
//!
//! Builds a binary hierarchy over bounding spheres with a spatial-median
//! split and stores it as a flat array of 32-byte nodes that a compute
//! shader can walk without pointers:
//!
//! ```text
//! [min_x, min_y, min_z, first_or_left, max_x, max_y, max_z, count]
//! ```
//!
//! A node is a leaf when `count > 0`; its primitives are
//! `indices[first..first + count]`. Otherwise it is internal and its
//! children sit at `first` and `first + 1`.
//!
//! # Example
//!
//! ```ignore
//! use lumen_bvh::{BoundingSphere, Bvh};
//! use lumen_math::Vec3;
//!
//! let spheres = vec![
//!     BoundingSphere::new(Vec3::ZERO, 1.0),
//!     BoundingSphere::new(Vec3::new(10.0, 0.0, 0.0), 1.0),
//! ];
//! let bvh = Bvh::build(&spheres)?;
//! queue.write_buffer(&node_buffer, 0, bvh.node_bytes());
//! ```

mod builder;
mod error;
mod node;
mod primitive;
mod stats;
mod traverse;

pub use builder::{node_capacity, Bvh, LEAF_MAX_SIZE, MAX_PRIMITIVES};
pub use error::{BvhError, BvhResult};
pub use node::{GpuNode, NODE_SIZE, NODE_WORDS};
pub use primitive::{validate_primitives, Bounded, BoundingSphere};
pub use stats::BvhStats;
pub use traverse::Hit;
