mod common;

use approx::assert_abs_diff_eq;
use common::c;
use qsim_rs::{SimError, StateVector};
use std::f64::consts::FRAC_1_SQRT_2;

#[test]
fn test_zero_state() {
    let state = StateVector::zero_state(3);
    assert_eq!(state.len(), 8);
    assert_eq!(state.num_qubits(), Some(3));
    assert_eq!(state.get(0), c(1.0, 0.0));
    for i in 1..8 {
        assert_eq!(state.get(i), c(0.0, 0.0));
    }
}

#[test]
fn test_basis_state() {
    let state = StateVector::basis_state(2, 3);
    assert_eq!(state.get(3), c(1.0, 0.0));
    assert_abs_diff_eq!(state.norm(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_elementwise_ops() {
    let a = StateVector::from_vec(vec![c(1.0, 1.0), c(2.0, 0.0)]);
    let b = StateVector::from_vec(vec![c(0.0, 1.0), c(-1.0, 0.5)]);

    assert_eq!(a.add(&b).unwrap(), StateVector::from_vec(vec![c(1.0, 2.0), c(1.0, 0.5)]));
    assert_eq!(a.sub(&b).unwrap(), StateVector::from_vec(vec![c(1.0, 0.0), c(3.0, -0.5)]));
    // (1+i)(i) = -1 + i ; 2 * (-1 + 0.5i) = -2 + i
    assert_eq!(a.mul(&b).unwrap(), StateVector::from_vec(vec![c(-1.0, 1.0), c(-2.0, 1.0)]));
}

#[test]
fn test_scalar_ops() {
    let a = StateVector::from_vec(vec![c(1.0, 0.0), c(0.0, 1.0)]);
    assert_eq!(a.add_scalar(c(1.0, 0.0)), StateVector::from_vec(vec![c(2.0, 0.0), c(1.0, 1.0)]));
    assert_eq!(a.sub_scalar(c(0.0, 1.0)), StateVector::from_vec(vec![c(1.0, -1.0), c(0.0, 0.0)]));
    assert_eq!(a.scale(c(0.0, 1.0)), StateVector::from_vec(vec![c(0.0, 1.0), c(-1.0, 0.0)]));
}

#[test]
fn test_length_mismatch() {
    let a = StateVector::zero_state(1);
    let b = StateVector::zero_state(2);
    assert!(matches!(a.add(&b), Err(SimError::ShapeMismatch { .. })));
    assert!(matches!(a.sub(&b), Err(SimError::ShapeMismatch { .. })));
    assert!(matches!(a.mul(&b), Err(SimError::ShapeMismatch { .. })));
    assert!(matches!(a.dot(&b), Err(SimError::ShapeMismatch { .. })));
}

#[test]
fn test_dot_is_not_conjugated() {
    let a = StateVector::from_vec(vec![c(0.0, 1.0), c(1.0, 0.0)]);
    // i * i + 1 * 1 = 0, whereas the Hermitian product would give 2
    let d = a.dot(&a).unwrap();
    assert_abs_diff_eq!(d.re, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(d.im, 0.0, epsilon = 1e-12);
}

#[test]
fn test_tensor_product_layout() {
    let a = StateVector::from_vec(vec![c(1.0, 0.0), c(2.0, 0.0)]);
    let b = StateVector::from_vec(vec![c(3.0, 0.0), c(0.0, 1.0), c(5.0, 0.0)]);
    let t = a.tensor(&b);
    assert_eq!(t.len(), 6);
    // result[i * |b| + j] = a[i] * b[j]
    assert_eq!(t.get(0), c(3.0, 0.0));
    assert_eq!(t.get(1), c(0.0, 1.0));
    assert_eq!(t.get(4), c(0.0, 2.0));
    assert_eq!(t.get(5), c(10.0, 0.0));
}

#[test]
fn test_tensor_of_basis_states() {
    // |1> ⊗ |0> = |10>
    let one = StateVector::basis_state(1, 1);
    let zero = StateVector::zero_state(1);
    assert_eq!(one.tensor(&zero), StateVector::basis_state(2, 2));
}

#[test]
fn test_normalize() {
    let a = StateVector::from_vec(vec![c(3.0, 0.0), c(0.0, 4.0)]);
    assert_abs_diff_eq!(a.norm(), 5.0, epsilon = 1e-12);
    let n = a.normalize();
    assert_abs_diff_eq!(n.norm(), 1.0, epsilon = 1e-12);
    assert_eq!(n, StateVector::from_vec(vec![c(0.6, 0.0), c(0.0, 0.8)]));
}

#[test]
fn test_tolerant_equality() {
    let a = StateVector::from_vec(vec![c(FRAC_1_SQRT_2, 0.0), c(FRAC_1_SQRT_2, 0.0)]);
    let b = StateVector::from_vec(vec![c(FRAC_1_SQRT_2 + 1e-12, 0.0), c(FRAC_1_SQRT_2, -1e-12)]);
    assert_eq!(a, b);
    assert_ne!(a, StateVector::zero_state(1));
    assert_ne!(a, StateVector::zero_state(2));
}

#[test]
fn test_operations_do_not_modify_receiver() {
    let a = StateVector::from_vec(vec![c(1.0, 0.0), c(1.0, 0.0)]);
    let _ = a.normalize();
    let _ = a.scale(c(2.0, 0.0));
    assert_eq!(a.get(0), c(1.0, 0.0));
}
