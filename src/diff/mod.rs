//! Symbolic differentiation

mod engine;

pub use engine::derivative_of;
