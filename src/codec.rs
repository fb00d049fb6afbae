//! Human-readable rendering of amplitude vectors, for debugging and tests.
//!
//! `encode_state` writes every non-negligible amplitude as a coefficient
//! followed by a ket, e.g. `0.71|00⟩ -0.71i|11⟩`. `decode_state` reads back a
//! single basis term such as `|01⟩`, `-|1⟩`, `i|10⟩` or `-i|0⟩`.

use num_complex::Complex64;

use crate::complex::{ComplexExt, EPSILON};
use crate::error::{Result, SimError};
use crate::index::basis_label;
use crate::state::StateVector;

/// Largest ket accepted by [`decode_state`].
pub const MAX_DECODE_QUBITS: usize = 24;

/// Render `state` as a space-separated list of `coefficient|bits⟩` terms.
///
/// A coefficient of exactly 1 is omitted and -1 is written as `-`. An
/// all-zero vector renders as `0`.
///
/// # Example
/// ```
/// use qsim_rs::codec::encode_state;
/// use qsim_rs::StateVector;
///
/// assert_eq!(encode_state(&StateVector::basis_state(2, 1), 2), "|01⟩");
/// ```
pub fn encode_state(state: &StateVector, num_qubits: usize) -> String {
    let terms: Vec<String> = state
        .iter()
        .enumerate()
        .filter(|(_, amp)| amp.magnitude() >= EPSILON)
        .map(|(basis, amp)| format!("{}|{}⟩", format_coefficient(*amp), basis_label(basis, num_qubits)))
        .collect();
    if terms.is_empty() {
        return "0".to_string();
    }
    terms.join(" ")
}

fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

fn is_unit(x: f64) -> bool {
    (x.abs() - 1.0).abs() < EPSILON
}

/// Two decimals, trailing zeros trimmed: 0.50 -> 0.5, 2.00 -> 2.
fn format_number(x: f64) -> String {
    let s = format!("{:.2}", x);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn format_coefficient(amp: Complex64) -> String {
    let (re, im) = (amp.re, amp.im);
    match (is_zero(re), is_zero(im)) {
        (false, true) if is_unit(re) => (if re < 0.0 { "-" } else { "" }).to_string(),
        (false, true) => format_number(re),
        (true, false) if is_unit(im) => (if im < 0.0 { "-i" } else { "i" }).to_string(),
        (true, false) => format!("{}i", format_number(im)),
        _ => {
            let sign = if im < 0.0 { '-' } else { '+' };
            let magnitude = if is_unit(im) {
                String::new()
            } else {
                format_number(im.abs())
            };
            format!("({} {} {}i)", format_number(re), sign, magnitude)
        }
    }
}

/// Parse a single-term state such as `-i|010⟩` into a basis vector of
/// dimension `2^len(bits)`.
///
/// Accepted form: optional `-`, optional `i`, then either `|bits⟩` (or
/// `|bits>`) or bare bits. Anything else, including sums of several terms,
/// is rejected with `InvalidEncoding`.
pub fn decode_state(input: &str) -> Result<StateVector> {
    let invalid = |reason: &str| SimError::InvalidEncoding {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let mut rest = input.trim();
    let negative = rest.starts_with('-');
    if negative {
        rest = &rest[1..];
    }
    let imaginary = rest.starts_with('i');
    if imaginary {
        rest = &rest[1..];
    }

    let bits = match rest.strip_prefix('|') {
        Some(ket) => ket
            .strip_suffix('⟩')
            .or_else(|| ket.strip_suffix('>'))
            .ok_or_else(|| invalid("unterminated ket"))?,
        None => rest,
    };
    if bits.is_empty() {
        return Err(invalid("missing basis bits"));
    }
    if !bits.chars().all(|ch| ch == '0' || ch == '1') {
        return Err(invalid("expected exactly one term of binary digits"));
    }
    if bits.len() > MAX_DECODE_QUBITS {
        return Err(invalid("too many qubits"));
    }

    let index = bits
        .chars()
        .fold(0usize, |acc, ch| (acc << 1) | usize::from(ch == '1'));
    let sign = if negative { -1.0 } else { 1.0 };
    let coefficient = if imaginary {
        Complex64::new(0.0, sign)
    } else {
        Complex64::new(sign, 0.0)
    };

    let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1usize << bits.len()];
    amplitudes[index] = coefficient;
    Ok(StateVector::from_vec(amplitudes))
}
