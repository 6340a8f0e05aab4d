//! Expression constructors.
//!
//! Provides all constructor methods for building expressions. Operator nodes
//! are only ever created through [`Expr::apply`] (checked) or `Expr::build`
//! (used internally by derivative rules), so every node has been offered to
//! its operator's simplifier first.

use std::sync::Arc;

use super::{Expr, ExprKind, compute_expr_hash};
use crate::core::traits::{is_one, is_zero};
use crate::linalg::{Dims, Tensor};
use crate::ops::{self, OperatorDef, Registry};
use crate::{Symbol, XprError, symb};

impl Expr {
    fn leaf(kind: ExprKind, dims: Dims) -> Self {
        let hash = compute_expr_hash(&kind);
        Self { hash, dims, kind }
    }

    // -------------------------------------------------------------------------
    // Basic constructors
    // -------------------------------------------------------------------------

    /// Create a number expression
    #[must_use]
    pub fn number(n: f64) -> Self {
        Self::leaf(ExprKind::Const(n), Dims::Scalar)
    }

    /// The zero value
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self::number(0.0)
    }

    /// The unit value
    #[inline]
    #[must_use]
    pub fn one() -> Self {
        Self::number(1.0)
    }

    /// Create a variable from a name (auto-interned)
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Self::var(symb(name.as_ref()))
    }

    /// Create a variable from an interned symbol.
    ///
    /// Variables may be bound to scalars or tensors, so their shape is only
    /// known at evaluation time.
    #[must_use]
    pub fn var(symbol: Symbol) -> Self {
        Self::leaf(ExprKind::Var(symbol), Dims::Unknown)
    }

    /// Create a tensor constant; a rank-0 tensor becomes a plain number
    #[must_use]
    pub fn tensor(tensor: Tensor) -> Self {
        if tensor.shape().is_scalar() {
            return Self::number(tensor.as_slice()[0]);
        }
        let dims = Dims::Tensor(tensor.shape().clone());
        Self::leaf(ExprKind::Tensor(Arc::new(tensor)), dims)
    }

    // -------------------------------------------------------------------------
    // Accessor methods
    // -------------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Statically inferred shape of the expression
    #[inline]
    #[must_use]
    pub const fn dims(&self) -> &Dims {
        &self.dims
    }

    /// Get the structural hash of the expression
    #[inline]
    #[must_use]
    pub const fn structural_hash(&self) -> u64 {
        self.hash
    }

    /// Check if expression is a constant number and return its value
    #[inline]
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match &self.kind {
            ExprKind::Const(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_symbol(&self) -> Option<Symbol> {
        match &self.kind {
            ExprKind::Var(s) => Some(*s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_tensor(&self) -> Option<&Tensor> {
        match &self.kind {
            ExprKind::Tensor(t) => Some(t.as_ref()),
            _ => None,
        }
    }

    /// Operator of a composite node
    #[inline]
    #[must_use]
    pub const fn op(&self) -> Option<&'static OperatorDef> {
        match &self.kind {
            ExprKind::Op { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Operands of a composite node (empty for leaves)
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[Arc<Self>] {
        match &self.kind {
            ExprKind::Op { args, .. } => args.as_slice(),
            _ => &[],
        }
    }

    /// Check if this expression is exactly the number zero
    #[inline]
    pub fn is_zero_num(&self) -> bool {
        self.as_number().is_some_and(is_zero)
    }

    /// Check if this expression is exactly the number one
    #[inline]
    pub fn is_one_num(&self) -> bool {
        self.as_number().is_some_and(is_one)
    }

    // -------------------------------------------------------------------------
    // Operator application
    // -------------------------------------------------------------------------

    /// Apply an operator: arity check, the shape rule, then simplification.
    ///
    /// The shape rule runs first so that an identity such as `1^b` cannot hide
    /// an operand combination the operator rejects.
    ///
    /// # Errors
    /// `Arity` for a wrong operand count, `ShapeMismatch` when the operand
    /// shapes cannot be combined.
    pub fn apply(op: &'static OperatorDef, args: Vec<Self>) -> Result<Self, XprError> {
        op.check_arity(args.len())?;
        let dims = infer_dims(op, &args)?;
        if let Some(simplified) = (op.simplify)(&args) {
            return Ok(simplified);
        }
        Ok(Self::node(op, args, dims))
    }

    /// Apply a registered operator by name
    ///
    /// # Errors
    /// `UnknownOperator` if no operator is registered under `name`, otherwise
    /// as [`Expr::apply`].
    pub fn apply_named(name: &str, args: Vec<Self>) -> Result<Self, XprError> {
        let op = Registry::get(name).ok_or_else(|| XprError::UnknownOperator(name.to_string()))?;
        Self::apply(op, args)
    }

    /// Lenient construction used while differentiating: a shape conflict
    /// leaves the node's shape unknown so that it surfaces at evaluation.
    pub(crate) fn build(op: &'static OperatorDef, args: Vec<Self>) -> Self {
        debug_assert_eq!(args.len(), op.arity, "operator '{}' arity", op.name);
        if let Some(simplified) = (op.simplify)(&args) {
            return simplified;
        }
        let dims = infer_dims(op, &args).unwrap_or_else(|err| {
            log::debug!("{err}; shape deferred to evaluation");
            Dims::Unknown
        });
        Self::node(op, args, dims)
    }

    fn node(op: &'static OperatorDef, args: Vec<Self>, dims: Dims) -> Self {
        let kind = ExprKind::Op {
            op,
            args: args.into_iter().map(Arc::new).collect(),
        };
        Self::leaf(kind, dims)
    }

    // -------------------------------------------------------------------------
    // Checked operator helpers
    // -------------------------------------------------------------------------

    /// # Errors
    /// `ShapeMismatch` unless both operands have the same shape.
    pub fn try_add(self, rhs: impl Into<Self>) -> Result<Self, XprError> {
        Self::apply(&ops::ADD, vec![self, rhs.into()])
    }

    /// # Errors
    /// `ShapeMismatch` unless both operands have the same shape.
    pub fn try_sub(self, rhs: impl Into<Self>) -> Result<Self, XprError> {
        Self::apply(&ops::SUB, vec![self, rhs.into()])
    }

    /// Product: scaling when either side is scalar, contraction for two tensors.
    ///
    /// # Errors
    /// `ShapeMismatch` for two tensors of different shapes.
    pub fn try_mul(self, rhs: impl Into<Self>) -> Result<Self, XprError> {
        Self::apply(&ops::MUL, vec![self, rhs.into()])
    }

    /// # Errors
    /// `ShapeMismatch` for two tensors of different shapes.
    pub fn try_div(self, rhs: impl Into<Self>) -> Result<Self, XprError> {
        Self::apply(&ops::DIV, vec![self, rhs.into()])
    }

    /// # Errors
    /// `ShapeMismatch` if the exponent is a tensor.
    pub fn try_pow(self, exponent: impl Into<Self>) -> Result<Self, XprError> {
        Self::apply(&ops::POW, vec![self, exponent.into()])
    }

    /// Elementwise product.
    ///
    /// # Errors
    /// `ShapeMismatch` for two tensors of different shapes.
    pub fn try_hadamard(self, rhs: impl Into<Self>) -> Result<Self, XprError> {
        Self::apply(&ops::HADAMARD, vec![self, rhs.into()])
    }

    /// Raise to a power.
    ///
    /// # Panics
    /// If the exponent is statically a tensor; use [`Expr::try_pow`] to get an error instead.
    #[must_use]
    #[track_caller]
    pub fn pow(self, exponent: impl Into<Self>) -> Self {
        self.try_pow(exponent).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Elementwise product.
    ///
    /// # Panics
    /// On a static shape mismatch; use [`Expr::try_hadamard`] to get an error instead.
    #[must_use]
    #[track_caller]
    pub fn hadamard(self, rhs: impl Into<Self>) -> Self {
        self.try_hadamard(rhs).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Natural exponential (elementwise on tensors)
    #[must_use]
    pub fn exp(self) -> Self {
        Self::build(&ops::EXP, vec![self])
    }

    /// Natural logarithm (elementwise on tensors)
    #[must_use]
    pub fn ln(self) -> Self {
        Self::build(&ops::LN, vec![self])
    }
}

fn infer_dims(op: &'static OperatorDef, args: &[Expr]) -> Result<Dims, XprError> {
    let operand_dims: Vec<&Dims> = args.iter().map(|a| &a.dims).collect();
    (op.shape)(&operand_dims).ok_or_else(|| XprError::shape_mismatch(op.name, &operand_dims))
}

// -------------------------------------------------------------------------
// Conversions
// -------------------------------------------------------------------------

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Self::number(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Self::number(f64::from(n))
    }
}

impl From<Symbol> for Expr {
    fn from(symbol: Symbol) -> Self {
        Self::var(symbol)
    }
}

impl From<&Symbol> for Expr {
    fn from(symbol: &Symbol) -> Self {
        Self::var(*symbol)
    }
}

impl From<Tensor> for Expr {
    fn from(tensor: Tensor) -> Self {
        Self::tensor(tensor)
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}
