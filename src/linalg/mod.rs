//! Tensor and linear-algebra layer
//!
//! This module contains:
//! - `Shape` - per-axis extents with row-major index arithmetic
//! - `Tensor` - dense fixed-shape container with elementwise and contractive operations
//! - `Dims` - the static shape carried by every expression node
//! - `ScalarLike` / `Tensorial` - capability traits for host values used as operands

mod dims;
mod shape;
mod tensor;
mod traits;

pub use dims::Dims;
pub use shape::{MdIndices, Shape};
pub use tensor::Tensor;
pub use traits::{ScalarLike, Tensorial};
