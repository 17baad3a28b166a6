use thiserror::Error;

/// Errors produced while building a BVH.
///
/// Everything except `Capacity` is a problem with the input and is caught
/// before any node is written. `Capacity` means the `2n - 1` sizing rule was
/// violated, which is a bug in the builder and should be treated as fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BvhError {
    #[error("primitive {index} has a non-finite center, radius or bound")]
    NonFinite { index: usize },

    #[error("primitive {index} has negative radius {radius}")]
    NegativeRadius { index: usize, radius: f32 },

    #[error("{0} primitives cannot be addressed by 32-bit node fields")]
    TooManyPrimitives(usize),

    #[error("node buffer overflow: {requested} nodes needed, capacity is {capacity}")]
    Capacity { requested: usize, capacity: usize },
}

/// Result type for BVH operations.
pub type BvhResult<T> = Result<T, BvhError>;
