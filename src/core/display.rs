//! Display implementations for expressions.
//!
//! This module provides two output formats for mathematical expressions:
//!
//! ## Standard Display (`to_string()` / `{}`)
//! Human-readable mathematical notation:
//! - `x + y^2`
//! - `2 * exp(x) / (x + 1)`
//!
//! ## LaTeX Format (`to_latex()`)
//! For typesetting in documents:
//! - `x + y^{2}`
//! - `\frac{2 \cdot \exp\left(x\right)}{x + 1}`
//!
//! Each operator's render rule lays out its node as a sequence of text and
//! operand pieces on a [`Renderer`]; the pieces are then written with an
//! explicit work stack, so arbitrarily deep trees render without recursion.

use std::fmt;

use crate::linalg::Tensor;
use crate::ops::{OperatorDef, precedence};
use crate::{Bindings, Expr, ExprKind, Value, XprError};

/// Output notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    Standard,
    Latex,
}

enum Piece<'a> {
    Text(&'a str),
    Expr(&'a Expr),
}

/// Layout of one operator node, handed to operator render rules
pub struct Renderer<'a> {
    mode: FormatMode,
    bindings: Option<&'a Bindings>,
    pieces: Vec<Piece<'a>>,
}

impl<'a> Renderer<'a> {
    const fn new(mode: FormatMode, bindings: Option<&'a Bindings>) -> Self {
        Self {
            mode,
            bindings,
            pieces: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> FormatMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn is_latex(&self) -> bool {
        self.mode == FormatMode::Latex
    }

    /// The operator's symbol in the current notation
    #[inline]
    #[must_use]
    pub fn symbol_of(&self, def: &OperatorDef) -> &'static str {
        if self.is_latex() { def.latex } else { def.symbol }
    }

    pub fn write_str(&mut self, s: &'a str) {
        self.pieces.push(Piece::Text(s));
    }

    /// Place a subexpression without grouping
    pub fn expr(&mut self, expr: &'a Expr) {
        self.pieces.push(Piece::Expr(expr));
    }

    /// Place an operand, grouping it when it binds more loosely than `min_precedence`
    pub fn operand(&mut self, expr: &'a Expr, min_precedence: u8) {
        if self.precedence_of(expr) < min_precedence {
            self.wrapped(expr);
        } else {
            self.expr(expr);
        }
    }

    /// Place inside parentheses
    pub fn wrapped(&mut self, expr: &'a Expr) {
        let (open, close) = match self.mode {
            FormatMode::Standard => ("(", ")"),
            FormatMode::Latex => (r"\left(", r"\right)"),
        };
        self.write_str(open);
        self.expr(expr);
        self.write_str(close);
    }

    /// Place inside a LaTeX group `{...}`
    pub fn grouped(&mut self, expr: &'a Expr) {
        self.write_str("{");
        self.expr(expr);
        self.write_str("}");
    }

    /// Binding strength of the expression as it will be printed.
    /// Negative numbers, including bound values, print with a leading minus.
    #[must_use]
    pub fn precedence_of(&self, expr: &Expr) -> u8 {
        match &expr.kind {
            ExprKind::Const(n) if n.is_sign_negative() && *n != 0.0 => precedence::NEG,
            ExprKind::Var(s) => match self.bindings.and_then(|b| b.get(*s)) {
                Some(Value::Scalar(v)) if v.is_sign_negative() && *v != 0.0 => precedence::NEG,
                _ => precedence::LEAF,
            },
            ExprKind::Op { op, .. } => op.precedence,
            ExprKind::Const(_) | ExprKind::Tensor(_) => precedence::LEAF,
        }
    }

    /// Whether the expression prints with a leading minus sign
    #[must_use]
    pub fn is_negative(&self, expr: &Expr) -> bool {
        self.precedence_of(expr) == precedence::NEG
    }
}

/// Write `expr`, expanding operator nodes through their render rules
fn write_expr<'a>(
    out: &mut dyn fmt::Write,
    mode: FormatMode,
    bindings: Option<&'a Bindings>,
    expr: &'a Expr,
) -> fmt::Result {
    let latex = mode == FormatMode::Latex;
    let mut work = vec![Piece::Expr(expr)];

    while let Some(piece) = work.pop() {
        let e = match piece {
            Piece::Text(s) => {
                out.write_str(s)?;
                continue;
            }
            Piece::Expr(e) => e,
        };
        match &e.kind {
            ExprKind::Const(n) => write_number(out, *n, latex)?,
            ExprKind::Var(s) => match bindings.and_then(|b| b.get(*s)) {
                Some(Value::Scalar(v)) => write_number(out, *v, latex)?,
                Some(Value::Tensor(t)) => write_tensor(out, t, latex)?,
                None => write!(out, "{s}")?,
            },
            ExprKind::Tensor(t) => write_tensor(out, t, latex)?,
            ExprKind::Op { op, args } => {
                let mut layout = Renderer::new(mode, bindings);
                (op.render)(&mut layout, op, args);
                work.extend(layout.pieces.into_iter().rev());
            }
        }
    }
    Ok(())
}

fn write_number(out: &mut dyn fmt::Write, n: f64, latex: bool) -> fmt::Result {
    if n.is_nan() {
        return out.write_str(if latex { r"\text{NaN}" } else { "NaN" });
    }
    if n.is_infinite() {
        return out.write_str(match (latex, n > 0.0) {
            (true, true) => r"\infty",
            (true, false) => r"-\infty",
            (false, true) => "Infinity",
            (false, false) => "-Infinity",
        });
    }

    #[allow(clippy::float_cmp)]
    let is_int = n.trunc() == n;
    if is_int && n.abs() < 1e10 {
        #[allow(clippy::cast_possible_truncation)]
        let n_int = n as i64;
        write!(out, "{n_int}")
    } else {
        write!(out, "{n}")
    }
}

fn write_tensor(out: &mut dyn fmt::Write, t: &Tensor, latex: bool) -> fmt::Result {
    if !latex || t.shape().rank() > 2 || t.is_empty() {
        return write!(out, "{t}");
    }
    // Vectors print as a column, matrices row by row
    let extents = t.shape().extents();
    let cols = if extents.len() == 2 { extents[1] } else { 1 };
    out.write_str(r"\begin{pmatrix}")?;
    for (row, chunk) in t.as_slice().chunks(cols).enumerate() {
        if row > 0 {
            out.write_str(r" \\")?;
        }
        for (col, &v) in chunk.iter().enumerate() {
            out.write_str(if col == 0 { " " } else { " & " })?;
            write_number(out, v, true)?;
        }
    }
    out.write_str(r" \end{pmatrix}")
}

// =============================================================================
// DISPLAY IMPLEMENTATION
// =============================================================================

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, FormatMode::Standard, None, self)
    }
}

/// Lazily rendered expression, printed through [`fmt::Display`]
pub struct Rendered<'a> {
    expr: &'a Expr,
    mode: FormatMode,
    bindings: Option<&'a Bindings>,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self.mode, self.bindings, self.expr)
    }
}

impl Expr {
    /// LaTeX rendering, e.g. `\frac{x}{y^{2}}`
    #[must_use]
    pub fn to_latex(&self) -> String {
        self.display_with(FormatMode::Latex, None).to_string()
    }

    /// Display adaptor for a given notation and optional bindings.
    ///
    /// Bound variables print as their values; unbound ones print by name.
    #[must_use]
    pub const fn display_with<'a>(
        &'a self,
        mode: FormatMode,
        bindings: Option<&'a Bindings>,
    ) -> Rendered<'a> {
        Rendered {
            expr: self,
            mode,
            bindings,
        }
    }
}

/// Render an expression in standard notation. With bindings, every variable
/// prints as its bound value.
///
/// # Errors
/// `UnboundVariable` if bindings are given but miss a variable of the expression.
pub fn render(expr: &Expr, bindings: Option<&Bindings>) -> Result<String, XprError> {
    if let Some(b) = bindings
        && let Some(missing) = expr.variables().into_iter().find(|s| !b.contains(*s))
    {
        return Err(XprError::UnboundVariable(missing.to_string()));
    }
    Ok(expr
        .display_with(FormatMode::Standard, bindings)
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symb;

    #[test]
    fn test_number_formatting() {
        assert_eq!(Expr::number(3.0).to_string(), "3");
        assert_eq!(Expr::number(0.25).to_string(), "0.25");
        assert_eq!(Expr::number(f64::INFINITY).to_latex(), r"\infty");
    }

    #[test]
    fn test_negative_operands_are_grouped() {
        let x = symb("display_neg_x");
        assert_eq!((x + -2.0).to_string(), "display_neg_x + (-2)");
        assert_eq!(
            Expr::number(-2.0).pow(x).to_string(),
            "(-2)^display_neg_x"
        );
        assert_eq!((x - (-x)).to_string(), "display_neg_x - (-display_neg_x)");
    }

    #[test]
    fn test_non_associative_right_operand() {
        let (a, b, c) = (symb("display_a"), symb("display_b"), symb("display_c"));
        assert_eq!((a - (b - c)).to_string(), "display_a - (display_b - display_c)");
        assert_eq!((a + (b + c)).to_string(), "display_a + display_b + display_c");
        assert_eq!((a / (b * c)).to_string(), "display_a / (display_b * display_c)");
        assert_eq!(((a + b) * c).to_string(), "(display_a + display_b) * display_c");
    }

    #[test]
    fn test_latex() {
        let x = symb("display_lx");
        let e = (x.to_expr().exp() + 1.0) / x.to_expr().pow(2.0);
        assert_eq!(
            e.to_latex(),
            r"\frac{\exp\left(display_lx\right) + 1}{display_lx^{2}}"
        );
    }

    #[test]
    fn test_latex_matrix() {
        let t = Tensor::new([2, 2], [1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(
            Expr::tensor(t).to_latex(),
            r"\begin{pmatrix} 1 & 2 \\ 3 & 4 \end{pmatrix}"
        );
    }

    #[test]
    fn test_render_with_bindings() {
        let (x, y) = (symb("display_bx"), symb("display_by"));
        let e = x + y.to_expr().pow(2.0);
        let b = Bindings::new().bind(x, 1.5).bind(y, -3.0);
        assert_eq!(render(&e, Some(&b)).unwrap(), "1.5 + (-3)^2");

        let partial = Bindings::new().bind(x, 1.0);
        assert_eq!(
            render(&e, Some(&partial)).unwrap_err(),
            XprError::UnboundVariable("display_by".to_string())
        );
        assert_eq!(render(&e, None).unwrap(), "display_bx + display_by^2");
    }

    #[test]
    fn test_deep_tree_renders() {
        let x = symb("display_deep_x");
        let mut e = x.to_expr();
        for _ in 0..100_000 {
            e = e + 1.0;
        }
        let text = render(&e, None).unwrap();
        assert!(text.starts_with("display_deep_x + 1 + 1"));
        assert_eq!(text.len(), "display_deep_x".len() + 100_000 * " + 1".len());

        let b = Bindings::new().bind(x, 2.0);
        assert!(render(&e, Some(&b)).unwrap().starts_with("2 + 1"));
        assert!(e.to_latex().ends_with("+ 1"));
    }
}
