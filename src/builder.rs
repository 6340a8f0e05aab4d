//! Builder pattern API for differentiation
//!
//! Provides a fluent interface for configuring and executing differentiation.
//!
//! # Example
//! ```
//! use symb_tensor::{Bindings, Diff, Value, symb};
//!
//! let (x, a) = (symb("builder_doc_x"), symb("builder_doc_a"));
//! let expr = a * x.to_expr().pow(3.0);
//!
//! // d²/dx² (a x³) = 6 a x
//! let second = Diff::new().fixed_var(a).order(2).differentiate(&expr, x).unwrap();
//! let b = Bindings::new().bind(a, 2.0).bind(x, 1.5);
//! assert_eq!(second.evaluate(&b), Ok(Value::Scalar(18.0)));
//! ```

use rustc_hash::FxHashSet;

use crate::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, Expr, Symbol, XprError};

/// Builder for differentiation operations
#[derive(Debug, Clone)]
pub struct Diff {
    fixed_vars: FxHashSet<Symbol>,
    order: usize,
    max_depth: Option<usize>,
    max_nodes: Option<usize>,
}

impl Default for Diff {
    fn default() -> Self {
        Self {
            fixed_vars: FxHashSet::default(),
            order: 1,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_nodes: Some(DEFAULT_MAX_NODES),
        }
    }
}

impl Diff {
    /// Create a new differentiation builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single fixed variable (treated as constant during differentiation)
    #[must_use]
    pub fn fixed_var(mut self, var: impl Into<Symbol>) -> Self {
        self.fixed_vars.insert(var.into());
        self
    }

    /// Add multiple fixed variables
    #[must_use]
    pub fn fixed_vars<S: Into<Symbol>>(mut self, vars: impl IntoIterator<Item = S>) -> Self {
        self.fixed_vars.extend(vars.into_iter().map(Into::into));
        self
    }

    /// Differentiate this many times (`0` returns the expression unchanged)
    #[must_use]
    pub const fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Set maximum tree depth accepted as input
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set maximum node count accepted as input
    #[must_use]
    pub const fn max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Remove the depth and node limits
    #[must_use]
    pub const fn unlimited(mut self) -> Self {
        self.max_depth = None;
        self.max_nodes = None;
        self
    }

    /// Differentiate an expression with respect to a variable.
    ///
    /// Limits are checked before every pass, so a higher-order derivative
    /// whose intermediate result grows past them is rejected as well.
    ///
    /// # Errors
    /// - `VariableIsFixed` if `var` was also declared fixed
    /// - `MaxDepthExceeded` / `MaxNodesExceeded` if a limit is exceeded
    pub fn differentiate(&self, expr: &Expr, var: impl Into<Symbol>) -> Result<Expr, XprError> {
        let var = var.into();
        if self.fixed_vars.contains(&var) {
            return Err(XprError::VariableIsFixed(var.to_string()));
        }

        let mut current = expr.clone();
        for _ in 0..self.order {
            self.check_limits(&current)?;
            current = current.derive(var, &self.fixed_vars);
        }
        Ok(current)
    }

    fn check_limits(&self, expr: &Expr) -> Result<(), XprError> {
        if let Some(max_d) = self.max_depth
            && expr.max_depth() > max_d
        {
            log::debug!("rejecting expression deeper than {max_d}");
            return Err(XprError::MaxDepthExceeded);
        }
        if let Some(max_n) = self.max_nodes
            && expr.node_count() > max_n
        {
            log::debug!("rejecting expression with more than {max_n} nodes");
            return Err(XprError::MaxNodesExceeded);
        }
        Ok(())
    }
}
