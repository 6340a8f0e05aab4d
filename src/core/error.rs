use thiserror::Error;

use crate::linalg::Shape;

/// Errors reported by construction, evaluation and differentiation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XprError {
    // Construction errors
    #[error("Tensor of shape {shape} needs {expected} elements, but {got} were supplied")]
    ElementCount {
        shape: Shape,
        expected: usize,
        got: usize,
    },
    #[error("Ragged input: entries of shape {expected} and {got} cannot form one tensor")]
    Ragged { expected: Shape, got: Shape },
    #[error("Index {index:?} is out of bounds for shape {shape}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Shape },
    #[error("Index of rank {got} used on a tensor of rank {expected}")]
    RankMismatch { expected: usize, got: usize },
    #[error("Operator '{op}' cannot combine operands of shape {operands}")]
    ShapeMismatch { op: &'static str, operands: String },
    #[error("Operator '{op}' expects {expected} operand(s), but got {got}")]
    Arity {
        op: &'static str,
        expected: usize,
        got: usize,
    },

    // Binding errors
    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    // Configuration errors
    #[error("Variable '{0}' is fixed and cannot be the differentiation variable")]
    VariableIsFixed(String),
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
    #[error("Operator '{0}' is already registered")]
    DuplicateOperator(String),

    // Safety limits
    #[error("Expression nesting depth exceeds maximum limit")]
    MaxDepthExceeded,
    #[error("Expression size exceeds maximum node count limit")]
    MaxNodesExceeded,
}

impl XprError {
    /// Build a shape mismatch error from the displayed shapes of each operand
    pub(crate) fn shape_mismatch<I, D>(op: &'static str, operands: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: std::fmt::Display,
    {
        let operands = operands
            .into_iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" and ");
        Self::ShapeMismatch { op, operands }
    }
}
