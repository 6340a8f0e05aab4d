//! Tensor-valued expressions: construction checks, evaluation and derivatives

use crate::{
    Bindings, Dims, Expr, Tensor, Value, XprError, derivative_of, evaluate, make_tensor, symb,
};

fn tensor(shape: &[usize], values: &[f64]) -> Tensor {
    make_tensor(shape, values.iter().copied()).unwrap()
}

fn eval_tensor(expr: &Expr, bindings: &Bindings) -> Tensor {
    match evaluate(expr, bindings).unwrap() {
        Value::Tensor(t) => t,
        Value::Scalar(s) => panic!("expected a tensor, got {s}"),
    }
}

#[test]
fn test_make_tensor_checks_element_count() {
    assert!(matches!(
        make_tensor([2, 2], [1.0, 2.0, 3.0]),
        Err(XprError::ElementCount { expected: 4, got: 3, .. })
    ));
}

#[test]
fn test_construction_rejects_mismatched_shapes() {
    let a = Expr::tensor(Tensor::zeros([2, 2]));
    let b = Expr::tensor(Tensor::zeros([3]));
    let err = a.clone().try_add(b.clone()).unwrap_err();
    assert!(matches!(err, XprError::ShapeMismatch { op: "add", .. }));
    assert!(a.clone().try_mul(b.clone()).is_err());
    assert!(a.try_div(b).is_err());
}

#[test]
fn test_elementwise_add() {
    let a = Expr::tensor(tensor(&[2, 2], &[1.0, 2.0, 3.0, 4.0]));
    let b = Expr::tensor(tensor(&[2, 2], &[4.0, 3.0, 2.0, 1.0]));
    let sum = a + b;
    assert_eq!(sum.dims(), &Dims::Tensor([2, 2].into()));
    assert_eq!(
        eval_tensor(&sum, &Bindings::new()),
        tensor(&[2, 2], &[5.0, 5.0, 5.0, 5.0])
    );
}

#[test]
fn test_contraction_and_scaling() {
    let a = Expr::tensor(tensor(&[3], &[1.0, 2.0, 3.0]));
    let dot = a.clone() * a.clone();
    assert_eq!(dot.dims(), &Dims::Scalar);
    assert_eq!(evaluate(&dot, &Bindings::new()), Ok(Value::Scalar(14.0)));

    let scaled = 2.0 * a.clone();
    assert_eq!(
        eval_tensor(&scaled, &Bindings::new()),
        tensor(&[3], &[2.0, 4.0, 6.0])
    );
    let halved = a / 2.0;
    assert_eq!(
        eval_tensor(&halved, &Bindings::new()),
        tensor(&[3], &[0.5, 1.0, 1.5])
    );
}

#[test]
fn test_elementwise_functions() {
    let a = Expr::tensor(tensor(&[2], &[1.0, 2.0]));
    assert_eq!(
        eval_tensor(&a.clone().pow(2.0), &Bindings::new()),
        tensor(&[2], &[1.0, 4.0])
    );
    assert_eq!(
        eval_tensor(&a.clone().ln(), &Bindings::new()),
        tensor(&[2], &[0.0, 2.0_f64.ln()])
    );
    assert_eq!(
        eval_tensor(&-a.clone(), &Bindings::new()),
        tensor(&[2], &[-1.0, -2.0])
    );
    assert_eq!(
        eval_tensor(&a.clone().hadamard(a), &Bindings::new()),
        tensor(&[2], &[1.0, 4.0])
    );
}

#[test]
fn test_tensor_exponent_is_rejected() {
    let a = Expr::tensor(tensor(&[2], &[1.0, 2.0]));
    assert!(Expr::number(2.0).try_pow(a).is_err());
}

#[test]
fn test_tensor_bound_variables() {
    let (v, w) = (symb("tensor_bound_v"), symb("tensor_bound_w"));
    let e = v * w;
    let b = Bindings::new()
        .bind(v, tensor(&[2], &[1.0, 2.0]))
        .bind(w, tensor(&[2], &[3.0, 4.0]));
    assert_eq!(evaluate(&e, &b), Ok(Value::Scalar(11.0)));

    let mismatched = Bindings::new()
        .bind(v, tensor(&[2], &[1.0, 2.0]))
        .bind(w, tensor(&[3], &[3.0, 4.0, 5.0]));
    assert!(evaluate(&e, &mismatched).is_err());
}

#[test]
fn test_derivative_of_scaled_tensor() {
    let x = symb("tensor_scaled_x");
    let t = tensor(&[2], &[1.0, 2.0]);
    let d = derivative_of(&(x * Expr::tensor(t.clone())), x);
    assert_eq!(d, Expr::tensor(t));
}

#[test]
fn test_derivative_of_contraction() {
    // d/dx (xT)·(xT) = 2x |T|^2
    let x = symb("tensor_contract_x");
    let xt = x * Expr::tensor(tensor(&[2], &[1.0, 2.0]));
    let d = derivative_of(&(xt.clone() * xt), x);
    let b = Bindings::new().bind(x, 3.0);
    assert_eq!(evaluate(&d, &b), Ok(Value::Scalar(30.0)));
}

#[test]
fn test_derivative_of_elementwise_function() {
    // d/dx exp(xT) = exp(xT) ⊙ T
    let x = symb("tensor_exp_x");
    let t = tensor(&[2], &[1.0, 2.0]);
    let e = (x * Expr::tensor(t.clone())).exp();
    let d = derivative_of(&e, x);
    assert_eq!(eval_tensor(&d, &Bindings::new().bind(x, 0.0)), t);
}

#[test]
fn test_derivative_of_tensor_power() {
    // d/dx T^x = T^x ⊙ ln(T)
    let x = symb("tensor_powx_x");
    let t = tensor(&[3], &[1.0, 2.0, 4.0]);
    let d = derivative_of(&Expr::tensor(t).pow(x), x);
    let result = eval_tensor(&d, &Bindings::new().bind(x, 2.0));
    let expected = [0.0, 4.0 * 2.0_f64.ln(), 16.0 * 4.0_f64.ln()];
    for (got, want) in result.as_slice().iter().zip(expected) {
        assert!((got - want).abs() < 1e-12, "{got} vs {want}");
    }
}
