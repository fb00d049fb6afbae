//! Bit-selection convention for qubit registers.
//!
//! A register of `n` qubits stores `2^n` amplitudes. The qubit bound to
//! position `p` corresponds to bit `n - 1 - p` of the flat basis index, so
//! position 0 is the most significant bit. This matches the operator
//! embedding `I^p ⊗ U ⊗ I^(n-p-k)` and is the only convention used for
//! probabilities, collapse and the textual codec.

/// Value (0 or 1) of the bit that position `position` selects in `basis`.
///
/// # Example
/// ```
/// use qsim_rs::index::bit_at;
/// // |10> in a 2-qubit register has flat index 2
/// assert_eq!(bit_at(2, 0, 2), 1);
/// assert_eq!(bit_at(2, 1, 2), 0);
/// ```
#[inline]
pub fn bit_at(basis: usize, position: usize, num_qubits: usize) -> usize {
    debug_assert!(position < num_qubits, "position {} out of range", position);
    (basis >> (num_qubits - 1 - position)) & 1
}

/// Compose per-position bits into a flat basis index.
///
/// # Example
/// ```
/// use qsim_rs::index::basis_index;
/// assert_eq!(basis_index(&[1, 0, 1]), 5);
/// ```
pub fn basis_index(bits: &[usize]) -> usize {
    bits.iter().fold(0usize, |acc, &b| (acc << 1) | (b & 1))
}

/// Decompose a flat basis index into per-position bits.
///
/// # Example
/// ```
/// use qsim_rs::index::basis_bits;
/// assert_eq!(basis_bits(5, 3), vec![1, 0, 1]);
/// ```
pub fn basis_bits(basis: usize, num_qubits: usize) -> Vec<usize> {
    (0..num_qubits).map(|p| bit_at(basis, p, num_qubits)).collect()
}

/// Iterate over basis indices whose bit at `position` equals `value`.
///
/// # Example
/// ```
/// use qsim_rs::index::iter_basis_fixed;
/// // 2 qubits, position 0 fixed to 1: |10> and |11>
/// let indices: Vec<_> = iter_basis_fixed(2, 0, 1).collect();
/// assert_eq!(indices, vec![2, 3]);
/// ```
pub fn iter_basis_fixed(num_qubits: usize, position: usize, value: usize) -> impl Iterator<Item = usize> {
    (0..1usize << num_qubits).filter(move |&i| bit_at(i, position, num_qubits) == value)
}

/// Fixed-width binary rendering of a basis index, position 0 first.
pub fn basis_label(basis: usize, num_qubits: usize) -> String {
    basis_bits(basis, num_qubits)
        .iter()
        .map(|&b| if b == 1 { '1' } else { '0' })
        .collect()
}
