//! Interned variable identities
//!
//! # Symbol Interning
//!
//! Each unique variable name exists exactly once; every [`Symbol`] with that
//! name shares the same key, so identity comparison is O(1) and a symbol is
//! `Copy`. A symbol carries no value: values come from a
//! [`Bindings`](crate::Bindings) set at evaluation time.
//!
//! # Example
//! ```
//! use symb_tensor::{symb, symb_get};
//!
//! let x = symb("doc_symbol_x");
//! assert_eq!(x, symb("doc_symbol_x"));
//! assert_eq!(symb_get("doc_symbol_x"), Some(x));
//! ```

mod registry;

use std::fmt;
use std::sync::Arc;

use slotmap::{DefaultKey, Key};

use crate::Expr;

pub use registry::{symb, symb_anon, symb_get, symbol_exists};

/// Identity of a variable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub(crate) DefaultKey);

impl Symbol {
    /// Create a new anonymous symbol (always distinct)
    #[must_use]
    pub fn anon() -> Self {
        symb_anon()
    }

    /// Reconstruct a symbol from its [`id`](Self::id)
    #[inline]
    #[must_use]
    pub fn from_id(id: u64) -> Self {
        Self(registry::key_from_id(id))
    }

    /// Unique numeric ID
    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.0.data().as_ffi()
    }

    /// Name of the symbol, `None` for anonymous symbols
    #[must_use]
    pub fn name(&self) -> Option<Arc<str>> {
        registry::name_of(self.0)
    }

    /// The variable expression for this symbol
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        Expr::var(*self)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        symb(name)
    }
}

impl From<&String> for Symbol {
    fn from(name: &String) -> Self {
        symb(name)
    }
}

impl From<&Symbol> for Symbol {
    fn from(sym: &Symbol) -> Self {
        *sym
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "${}", self.id()),
        }
    }
}
