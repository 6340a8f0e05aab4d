use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::core::display::Renderer;
use crate::linalg::Dims;
use crate::{Expr, Value, XprError};

/// Construction-time rewrite: `Some(expr)` when an identity or annihilator applies
pub type SimplifyFn = fn(&[Expr]) -> Option<Expr>;

/// Static shape rule: `None` when the operand shapes cannot be combined
pub type ShapeFn = fn(&[&Dims]) -> Option<Dims>;

/// Numerical evaluation: `None` when the operand shapes cannot be combined
pub type EvalFn = fn(&[Value]) -> Option<Value>;

/// Symbolic differentiation.
/// Arguments: (operands of the node, derivatives of the operands).
/// Returns the total derivative, composed with the chain rule.
pub type DerivativeFn = fn(&[Arc<Expr>], &[Expr]) -> Expr;

/// Layout of a node given its operands: text and operand pieces queued on the renderer
pub type RenderFn = for<'a> fn(&mut Renderer<'a>, &OperatorDef, &'a [Arc<Expr>]);

/// Definition of an operator including its simplification, evaluation,
/// differentiation and rendering rules.
///
/// Operators are plain `static` values; adding one never touches existing
/// operators. Register it with [`Registry::register`] to make it available
/// by name.
pub struct OperatorDef {
    /// Unique name (e.g. "add", "pow")
    pub name: &'static str,
    /// Infix symbol or function name in standard notation
    pub symbol: &'static str,
    /// Symbol or command in LaTeX notation
    pub latex: &'static str,
    /// Number of operands
    pub arity: usize,
    pub commutative: bool,
    /// Binding strength used to decide parenthesisation (see [`precedence`](super::precedence))
    pub precedence: u8,
    pub simplify: SimplifyFn,
    pub shape: ShapeFn,
    pub eval: EvalFn,
    pub derivative: DerivativeFn,
    pub render: RenderFn,
}

impl OperatorDef {
    #[inline]
    #[must_use]
    pub const fn is_commutative(&self) -> bool {
        self.commutative
    }

    pub(crate) fn check_arity(&self, got: usize) -> Result<(), XprError> {
        if got == self.arity {
            Ok(())
        } else {
            Err(XprError::Arity {
                op: self.name,
                expected: self.arity,
                got,
            })
        }
    }
}

impl fmt::Debug for OperatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorDef")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("commutative", &self.commutative)
            .finish_non_exhaustive()
    }
}

/// Registry storing all operator definitions by name
static REGISTRY: LazyLock<RwLock<FxHashMap<&'static str, &'static OperatorDef>>> =
    LazyLock::new(|| RwLock::new(init_registry()));

fn init_registry() -> FxHashMap<&'static str, &'static OperatorDef> {
    super::builtin_operators()
        .into_iter()
        .map(|def| (def.name, def))
        .collect()
}

/// Central catalog of operators
pub struct Registry;

impl Registry {
    /// Get an operator definition by name
    pub fn get(name: &str) -> Option<&'static OperatorDef> {
        REGISTRY
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
    }

    /// Add an operator to the catalog.
    ///
    /// # Errors
    /// `DuplicateOperator` if another operator already uses the name.
    pub fn register(def: &'static OperatorDef) -> Result<(), XprError> {
        let mut map = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
        if map.contains_key(def.name) {
            return Err(XprError::DuplicateOperator(def.name.to_string()));
        }
        log::debug!("registered operator '{}'", def.name);
        map.insert(def.name, def);
        Ok(())
    }

    /// Names of all registered operators, sorted
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = REGISTRY
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        names.sort_unstable();
        names
    }
}
