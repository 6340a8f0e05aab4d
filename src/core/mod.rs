//! Core types for symbolic mathematics
//!
//! This module contains the fundamental types:
//! - `Expr` / `ExprKind` - Expression tree
//! - `Symbol` - Interned variable identities
//! - `Value` / `Bindings` - Evaluation inputs and results
//! - `XprError` - Error types
//! - Display formatting (`to_string`, `to_latex`, `render`)

pub(crate) mod display;
pub(crate) mod error;
pub(crate) mod evaluator;
pub(crate) mod expr;
pub(crate) mod symbol;
pub(crate) mod traits;
pub(crate) mod value;

// Public re-exports (for external API)
pub use display::{FormatMode, Rendered, Renderer, render};
pub use error::XprError;
pub use evaluator::evaluate;
pub use expr::{Expr, ExprKind, compute_expr_hash};
pub use symbol::{Symbol, symb, symb_anon, symb_get, symbol_exists};
pub use value::{Bindings, Value};
