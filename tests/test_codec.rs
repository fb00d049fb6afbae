mod common;

use common::c;
use qsim_rs::codec::{decode_state, encode_state};
use qsim_rs::{Gate, Register, SimError, StateVector};

#[test]
fn test_encode_basis_states() {
    assert_eq!(encode_state(&StateVector::zero_state(2), 2), "|00⟩");
    assert_eq!(encode_state(&StateVector::basis_state(3, 6), 3), "|110⟩");
}

#[test]
fn test_encode_bell_state() {
    let mut register = Register::with_seed(2, 0);
    register.apply_gate(&Gate::H, &[0]).unwrap();
    register.apply_gate(&Gate::CNOT, &[0, 1]).unwrap();
    assert_eq!(encode_state(register.state(), 2), "0.71|00⟩ 0.71|11⟩");
}

#[test]
fn test_encode_signs_and_phases() {
    let mut register = Register::with_seed(1, 0);
    register.apply_gate(&Gate::X, &[0]).unwrap();
    register.apply_gate(&Gate::H, &[0]).unwrap();
    assert_eq!(encode_state(register.state(), 1), "0.71|0⟩ -0.71|1⟩");

    let state = StateVector::from_vec(vec![c(0.0, 0.0), c(0.0, -1.0)]);
    assert_eq!(encode_state(&state, 1), "-i|1⟩");

    let state = StateVector::from_vec(vec![c(-1.0, 0.0), c(0.0, 0.0)]);
    assert_eq!(encode_state(&state, 1), "-|0⟩");

    let state = StateVector::from_vec(vec![c(0.5, 0.5), c(0.0, 0.5)]);
    assert_eq!(encode_state(&state, 1), "(0.5 + 0.5i)|0⟩ 0.5i|1⟩");
}

#[test]
fn test_encode_zero_vector() {
    let state = StateVector::from_vec(vec![c(0.0, 0.0); 4]);
    assert_eq!(encode_state(&state, 2), "0");
}

#[test]
fn test_decode_terms() {
    assert_eq!(decode_state("|01⟩").unwrap(), StateVector::basis_state(2, 1));
    assert_eq!(decode_state("|110>").unwrap(), StateVector::basis_state(3, 6));
    assert_eq!(decode_state("101").unwrap(), StateVector::basis_state(3, 5));
    assert_eq!(
        decode_state("-|1⟩").unwrap(),
        StateVector::from_vec(vec![c(0.0, 0.0), c(-1.0, 0.0)])
    );
    assert_eq!(
        decode_state("i|10⟩").unwrap(),
        StateVector::from_vec(vec![c(0.0, 0.0), c(0.0, 0.0), c(0.0, 1.0), c(0.0, 0.0)])
    );
    assert_eq!(
        decode_state(" -i|0⟩ ").unwrap(),
        StateVector::from_vec(vec![c(0.0, -1.0), c(0.0, 0.0)])
    );
}

#[test]
fn test_decode_reads_back_single_terms() {
    for input in ["|0110⟩", "-|10⟩", "i|1⟩", "-i|001⟩"] {
        let state = decode_state(input).unwrap();
        let n = state.num_qubits().unwrap();
        assert_eq!(encode_state(&state, n), input);
    }
}

#[test]
fn test_decode_rejects_malformed_input() {
    let too_long = format!("|{}⟩", "0".repeat(25));
    let inputs = ["", "|⟩", "|012⟩", "|01", "0.5|0⟩", "|0⟩ + |1⟩", "x|0⟩", too_long.as_str()];
    for input in inputs {
        assert!(
            matches!(decode_state(input), Err(SimError::InvalidEncoding { .. })),
            "{:?} should be rejected",
            input
        );
    }
}
