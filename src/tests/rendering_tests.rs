//! Text and LaTeX rendering

use crate::{Bindings, Expr, Tensor, XprError, make_variable, render, symb};

#[test]
fn test_sum_with_power() {
    let x = make_variable("x");
    let y = make_variable("y");
    let text = (x + y.pow(2.0)).to_string();
    assert_eq!(text, "x + y^2");
    assert!(text.find('x') < text.find('+'));
    assert!(!text.contains('('));
}

#[test]
fn test_composite_exponent_is_wrapped() {
    let x = make_variable("x");
    let y = make_variable("y");
    assert_eq!(x.clone().pow(y + 1.0).to_string(), "x^(y + 1)");
    assert_eq!((x.clone() + 1.0).pow(2.0).to_string(), "(x + 1)^2");
    assert_eq!(x.clone().pow(-1.0).to_string(), "x^-1");
}

#[test]
fn test_precedence() {
    let (a, b, c) = (symb("a"), symb("b"), symb("c"));
    assert_eq!((a * (b + c)).to_string(), "a * (b + c)");
    assert_eq!((a * b + c).to_string(), "a * b + c");
    assert_eq!(((a - b) - c).to_string(), "a - b - c");
    assert_eq!((a / (b / c)).to_string(), "a / (b / c)");
    assert_eq!((-(a + b)).to_string(), "-(a + b)");
    assert_eq!((a.to_expr().exp() * b).to_string(), "exp(a) * b");
}

#[test]
fn test_tensor_constant() {
    let t = Tensor::new([2, 2], [1.0, 2.0, 3.0, 4.0]).unwrap();
    let e = symb("s") * Expr::tensor(t);
    assert_eq!(e.to_string(), "s * [[1, 2], [3, 4]]");
}

#[test]
fn test_latex_rendering() {
    let (x, y) = (symb("x"), symb("y"));
    assert_eq!((x * y).to_latex(), r"x \cdot y");
    assert_eq!((x / y).to_latex(), r"\frac{x}{y}");
    assert_eq!(x.to_expr().pow(y + 1.0).to_latex(), "x^{y + 1}");
    assert_eq!((x + 1.0).pow(2.0).to_latex(), r"\left(x + 1\right)^{2}");
    assert_eq!(y.to_expr().ln().to_latex(), r"\ln\left(y\right)");
    assert_eq!(x.to_expr().hadamard(y).to_latex(), r"x \odot y");
}

#[test]
fn test_render_with_bindings() {
    let (x, y) = (symb("x"), symb("y"));
    let e = x * y.to_expr().pow(2.0);
    let b = Bindings::new().bind(x, 2.0).bind(y, 0.5);
    assert_eq!(render(&e, Some(&b)).unwrap(), "2 * 0.5^2");
    assert_eq!(render(&e, None).unwrap(), e.to_string());
}

#[test]
fn test_render_binding_miss() {
    let (x, y) = (symb("x"), symb("y"));
    let e = x + y;
    let b = Bindings::new().bind(x, 1.0);
    assert_eq!(
        render(&e, Some(&b)),
        Err(XprError::UnboundVariable("y".to_string()))
    );
}
