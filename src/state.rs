use std::fmt;

use ndarray::Array1;
use num_complex::Complex64;

use crate::complex::ComplexExt;
use crate::error::{Result, SimError};

/// Fixed-length amplitude vector.
///
/// Every operation returns a new vector; the receiver is never modified.
/// Equality compares element-wise with the [`crate::complex::EPSILON`]
/// tolerance.
#[derive(Debug, Clone)]
pub struct StateVector {
    data: Array1<Complex64>,
}

impl StateVector {
    pub fn new(data: Array1<Complex64>) -> Self {
        StateVector { data }
    }

    pub fn from_vec(amplitudes: Vec<Complex64>) -> Self {
        StateVector {
            data: Array1::from_vec(amplitudes),
        }
    }

    /// Creates |0,0,...,0> on `num_qubits` qubits (first element = 1, rest = 0).
    pub fn zero_state(num_qubits: usize) -> Self {
        Self::basis_state(num_qubits, 0)
    }

    /// Creates the computational basis state with flat index `index`.
    ///
    /// # Panics
    /// Panics if `index >= 2^num_qubits`.
    pub fn basis_state(num_qubits: usize, index: usize) -> Self {
        let total = 1usize << num_qubits;
        assert!(index < total, "basis index {} out of range for {} qubit(s)", index, num_qubits);
        let mut data = Array1::zeros(total);
        data[index] = Complex64::new(1.0, 0.0);
        StateVector { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of qubits if the length is a power of two.
    pub fn num_qubits(&self) -> Option<usize> {
        let len = self.len();
        len.is_power_of_two().then(|| len.trailing_zeros() as usize)
    }

    pub fn get(&self, index: usize) -> Complex64 {
        self.data[index]
    }

    pub fn data(&self) -> &Array1<Complex64> {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<Complex64> {
        self.data.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Complex64> {
        self.data.iter()
    }

    fn check_len(&self, other: &StateVector, operation: &'static str) -> Result<()> {
        if self.len() != other.len() {
            return Err(SimError::shape(operation, self.len(), other.len()));
        }
        Ok(())
    }

    fn zip_with(
        &self,
        other: &StateVector,
        operation: &'static str,
        f: impl Fn(Complex64, Complex64) -> Complex64,
    ) -> Result<StateVector> {
        self.check_len(other, operation)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(StateVector { data })
    }

    fn map(&self, f: impl Fn(Complex64) -> Complex64) -> StateVector {
        StateVector {
            data: self.data.mapv(f),
        }
    }

    pub fn add(&self, other: &StateVector) -> Result<StateVector> {
        self.zip_with(other, "vector add", |a, b| a + b)
    }

    pub fn sub(&self, other: &StateVector) -> Result<StateVector> {
        self.zip_with(other, "vector subtract", |a, b| a - b)
    }

    /// Element-wise (Hadamard) product.
    pub fn mul(&self, other: &StateVector) -> Result<StateVector> {
        self.zip_with(other, "vector multiply", |a, b| a * b)
    }

    pub fn add_scalar(&self, scalar: Complex64) -> StateVector {
        self.map(|a| a + scalar)
    }

    pub fn sub_scalar(&self, scalar: Complex64) -> StateVector {
        self.map(|a| a - scalar)
    }

    pub fn scale(&self, scalar: Complex64) -> StateVector {
        self.map(|a| a * scalar)
    }

    /// Bilinear dot product `sum_i a_i * b_i`.
    ///
    /// Neither side is conjugated, so this is not the Hermitian inner product.
    pub fn dot(&self, other: &StateVector) -> Result<Complex64> {
        self.check_len(other, "dot product")?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| a * b)
            .sum())
    }

    /// Tensor product: `result[i * |other| + j] = self[i] * other[j]`.
    pub fn tensor(&self, other: &StateVector) -> StateVector {
        let data = self
            .data
            .iter()
            .flat_map(|&a| other.data.iter().map(move |&b| a * b))
            .collect();
        StateVector { data }
    }

    /// L2 norm.
    pub fn norm(&self) -> f64 {
        self.data
            .iter()
            .map(|c| c.magnitude_squared())
            .sum::<f64>()
            .sqrt()
    }

    /// Divide every element by the L2 norm.
    ///
    /// The result is NaN-filled for a zero vector; callers must not normalize
    /// a null vector.
    pub fn normalize(&self) -> StateVector {
        let norm = self.norm();
        self.map(|a| a.div_real(norm))
    }

    pub fn approx_eq(&self, other: &StateVector) -> bool {
        self.len() == other.len()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.approx_eq(b))
    }
}

impl PartialEq for StateVector {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl From<Vec<Complex64>> for StateVector {
    fn from(amplitudes: Vec<Complex64>) -> Self {
        StateVector::from_vec(amplitudes)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, amp) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let sign = if amp.im >= 0.0 { '+' } else { '-' };
            write!(f, "({:.2} {} {:.2}i)", amp.re, sign, amp.im.abs())?;
        }
        write!(f, "]")
    }
}
