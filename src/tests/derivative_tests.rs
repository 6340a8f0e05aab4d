//! Differentiation rules evaluated at concrete points

use crate::{
    Bindings, Diff, Expr, Tensor, Value, XprError, derivative_of, evaluate, make_variable, symb,
};

fn at(expr: &Expr, bindings: &Bindings) -> f64 {
    evaluate(expr, bindings).unwrap().as_scalar().unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-10 * (1.0 + expected.abs()),
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_sum_rule() {
    let (x, y) = (symb("deriv_sum_x"), symb("deriv_sum_y"));
    assert!(derivative_of(&(x + y), x).is_one_num());
}

#[test]
fn test_power_rule() {
    let x = make_variable("deriv_pow_x");
    let d = derivative_of(&x.pow(3.0), "deriv_pow_x");
    let b = Bindings::new().bind("deriv_pow_x", 2.0);
    assert_eq!(evaluate(&d, &b), Ok(Value::Scalar(12.0)));
    assert_eq!(d.to_string(), "3 * deriv_pow_x^2");
}

#[test]
fn test_constant_exponent_has_no_log_term() {
    let x = symb("deriv_nolog_x");
    let d = derivative_of(&x.to_expr().pow(2.5), x);
    assert!(!d.to_string().contains("ln"));
}

#[test]
fn test_variable_exponent() {
    // d/dy x^y = x^y ln(x)
    let (x, y) = (symb("deriv_varexp_x"), symb("deriv_varexp_y"));
    let e = x.to_expr().pow(y);
    let b = Bindings::new().bind(x, 3.0).bind(y, 2.0);
    assert_close(at(&derivative_of(&e, y), &b), 9.0 * 3.0_f64.ln());
    assert_close(at(&derivative_of(&e, x), &b), 6.0);
}

#[test]
fn test_product_and_quotient_rules() {
    let x = symb("deriv_quot_x");
    let b = Bindings::new().bind(x, 2.0);

    // d/dx x * exp(x) = (1 + x) exp(x)
    let prod = x * x.to_expr().exp();
    assert_close(at(&derivative_of(&prod, x), &b), 3.0 * 2.0_f64.exp());

    // d/dx 1 / x = -1 / x^2
    let quot = 1.0 / x;
    assert_close(at(&derivative_of(&quot, x), &b), -0.25);

    // d/dx x / (x + 1) = 1 / (x + 1)^2
    let ratio = x / (x + 1.0);
    assert_close(at(&derivative_of(&ratio, x), &b), 1.0 / 9.0);
}

#[test]
fn test_chain_rule_through_ln_and_exp() {
    let x = symb("deriv_chain_x");
    let b = Bindings::new().bind(x, 0.5);

    // d/dx ln(x^2 + 1) = 2x / (x^2 + 1)
    let e = (x.to_expr().pow(2.0) + 1.0).ln();
    assert_close(at(&derivative_of(&e, x), &b), 1.0 / 1.25);

    // d/dx exp(-x) = -exp(-x)
    let e = (-x).exp();
    assert_close(at(&derivative_of(&e, x), &b), -(-0.5_f64).exp());
}

#[test]
fn test_negation_and_difference() {
    let (x, y) = (symb("deriv_neg_x"), symb("deriv_neg_y"));
    assert_eq!(derivative_of(&-x, x), Expr::number(-1.0));
    let d = derivative_of(&(x * y - y), y);
    assert_eq!(d, x - 1.0);
}

#[test]
fn test_fixed_variables_are_constants() {
    let (x, k) = (symb("deriv_fixed_x"), symb("deriv_fixed_k"));
    let e = k * x.to_expr().pow(k);
    let d = Diff::new().fixed_var(k).differentiate(&e, x).unwrap();
    let b = Bindings::new().bind(x, 2.0).bind(k, 3.0);
    // k * k * x^(k - 1)
    assert_close(at(&d, &b), 36.0);

    let d = Diff::new().fixed_var(x).differentiate(&e, k);
    assert!(d.is_ok());
    assert_eq!(
        Diff::new().fixed_var(k).differentiate(&e, k),
        Err(XprError::VariableIsFixed("deriv_fixed_k".to_string()))
    );
}

#[test]
fn test_shape_conflicts_surface_at_evaluation() {
    let x = symb("deriv_conflict_x");
    let a = Expr::tensor(Tensor::filled([2], 1.0));
    let c = Expr::tensor(Tensor::filled([3], 1.0));
    let e = x * a + x * c;

    // Differentiation itself never fails
    let d = derivative_of(&e, x);
    assert!(d.dims().is_unknown());

    let b = Bindings::new().bind(x, 1.0);
    assert!(matches!(
        evaluate(&d, &b),
        Err(XprError::ShapeMismatch { op: "add", .. })
    ));
}
