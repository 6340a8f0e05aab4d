//! Centralized operator registry
//!
//! This module provides a single source of truth for all operators, including
//! their simplification, shape, evaluation, derivative and rendering rules.
//! The helpers below are the building blocks those rules share; they are
//! public so operators defined outside this crate can reuse them.

use std::sync::Arc;

use crate::core::display::Renderer;
use crate::linalg::Dims;
use crate::{Expr, ExprKind};

pub(crate) mod arithmetic;
pub(crate) mod elementary;
pub mod registry;

pub use arithmetic::{ADD, DIV, HADAMARD, MUL, NEG, SUB};
pub use elementary::{EXP, LN, POW};
pub use registry::{DerivativeFn, EvalFn, OperatorDef, Registry, RenderFn, ShapeFn, SimplifyFn};

/// Binding strengths used for parenthesisation
pub mod precedence {
    pub const ADD: u8 = 1;
    pub const MUL: u8 = 2;
    pub const NEG: u8 = 3;
    pub const POW: u8 = 4;
    pub const FUNCTION: u8 = 6;
    pub const LEAF: u8 = u8::MAX;
}

/// Every operator shipped with the crate
pub(crate) fn builtin_operators() -> [&'static OperatorDef; 9] {
    [&ADD, &SUB, &MUL, &HADAMARD, &DIV, &NEG, &POW, &EXP, &LN]
}

// ===== Helper functions for building rules =====

/// Clone an operand out of its `Arc` (shallow: children stay shared)
#[inline]
pub fn operand(arg: &Arc<Expr>) -> Expr {
    Expr::clone(arg)
}

/// Fold two scalar constants, keeping only finite results
pub fn fold_binary(args: &[Expr], f: fn(f64, f64) -> f64) -> Option<Expr> {
    let (a, b) = (args[0].as_number()?, args[1].as_number()?);
    let folded = f(a, b);
    folded.is_finite().then(|| Expr::number(folded))
}

/// Fold a scalar constant, keeping only finite results
pub fn fold_unary(args: &[Expr], f: fn(f64) -> f64) -> Option<Expr> {
    let folded = f(args[0].as_number()?);
    folded.is_finite().then(|| Expr::number(folded))
}

/// The single operand of `expr` if it is a node of operator `op`
pub(crate) fn unary_operand<'e>(expr: &'e Expr, op: &OperatorDef) -> Option<&'e Arc<Expr>> {
    match &expr.kind {
        ExprKind::Op { op: inner, args } if inner.name == op.name && args.len() == 1 => {
            args.first()
        }
        _ => None,
    }
}

// ===== Shape rules =====

pub fn shape_same(dims: &[&Dims]) -> Option<Dims> {
    Dims::same(dims[0], dims[1])
}

pub fn shape_broadcast(dims: &[&Dims]) -> Option<Dims> {
    Dims::broadcast(dims[0], dims[1])
}

pub fn shape_contract(dims: &[&Dims]) -> Option<Dims> {
    Dims::contract(dims[0], dims[1])
}

pub fn shape_unary(dims: &[&Dims]) -> Option<Dims> {
    Some(dims[0].clone())
}

// ===== Rendering rules =====

/// `a op b`, grouping operands that bind more loosely than the operator
pub fn render_infix<'a>(r: &mut Renderer<'a>, def: &OperatorDef, args: &'a [Arc<Expr>]) {
    let (lhs, rhs) = (&args[0], &args[1]);
    r.operand(lhs, def.precedence);
    r.write_str(" ");
    r.write_str(r.symbol_of(def));
    r.write_str(" ");

    // A commutative operator chains with itself; any other right operand of
    // equal strength, or one that starts with a minus sign, is grouped
    let chains = def.commutative && rhs.op().is_some_and(|o| o.name == def.name);
    let min = if r.is_negative(rhs) {
        precedence::LEAF
    } else if chains {
        def.precedence
    } else {
        def.precedence + 1
    };
    r.operand(rhs, min);
}

/// `-a`
pub fn render_prefix<'a>(r: &mut Renderer<'a>, def: &OperatorDef, args: &'a [Arc<Expr>]) {
    r.write_str(r.symbol_of(def));
    r.operand(&args[0], def.precedence + 1);
}

/// `name(a)` or `\name\left(a\right)`
pub fn render_function<'a>(r: &mut Renderer<'a>, def: &OperatorDef, args: &'a [Arc<Expr>]) {
    r.write_str(r.symbol_of(def));
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            r.write_str(", ");
        }
        r.wrapped(arg);
    }
}

/// `a^b`; the exponent is parenthesised only when it has more than one node
pub fn render_power<'a>(r: &mut Renderer<'a>, def: &OperatorDef, args: &'a [Arc<Expr>]) {
    let (base, exponent) = (&args[0], &args[1]);
    r.operand(base, def.precedence + 1);
    r.write_str(r.symbol_of(def));
    if r.is_latex() {
        r.grouped(exponent);
    } else if exponent.node_count() > 1 {
        r.wrapped(exponent);
    } else {
        r.expr(exponent);
    }
}

/// `a / b`, or `\frac{a}{b}` in LaTeX
pub fn render_fraction<'a>(r: &mut Renderer<'a>, def: &OperatorDef, args: &'a [Arc<Expr>]) {
    if !r.is_latex() {
        render_infix(r, def, args);
        return;
    }
    r.write_str(def.latex);
    r.grouped(&args[0]);
    r.grouped(&args[1]);
}
