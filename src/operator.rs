use std::fmt;

use ndarray::{linalg::kron, Array2};
use num_complex::Complex64;

use crate::complex::ComplexExt;
use crate::error::{Result, SimError};
use crate::state::StateVector;

/// Immutable complex matrix used for gates and permutations.
///
/// Equality compares element-wise with the [`crate::complex::EPSILON`]
/// tolerance and requires identical shapes.
#[derive(Debug, Clone)]
pub struct Operator {
    data: Array2<Complex64>,
}

impl Operator {
    pub fn new(data: Array2<Complex64>) -> Self {
        Operator { data }
    }

    /// Build from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        if let Some(bad) = rows.iter().find(|r| r.len() != ncols) {
            return Err(SimError::shape("matrix construction", ncols, bad.len()));
        }
        let flat: Vec<Complex64> = rows.into_iter().flatten().collect();
        let data = Array2::from_shape_vec((nrows, ncols), flat)
            .map_err(|e| SimError::shape("matrix construction", format!("{}x{}", nrows, ncols), e))?;
        Ok(Operator { data })
    }

    /// `size x size` identity. `identity(1)` is the neutral element of [`Operator::kron`].
    pub fn identity(size: usize) -> Self {
        Operator {
            data: Array2::eye(size),
        }
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[[row, col]]
    }

    pub fn data(&self) -> &Array2<Complex64> {
        &self.data
    }

    /// Copy of the elements as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Complex64>> {
        self.data.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    fn shape_str(&self) -> String {
        format!("{}x{}", self.nrows(), self.ncols())
    }

    fn zip_with(
        &self,
        other: &Operator,
        operation: &'static str,
        f: impl Fn(Complex64, Complex64) -> Complex64,
    ) -> Result<Operator> {
        if self.dim() != other.dim() {
            return Err(SimError::shape(operation, self.shape_str(), other.shape_str()));
        }
        let mut data = self.data.clone();
        data.zip_mut_with(&other.data, |a, &b| *a = f(*a, b));
        Ok(Operator { data })
    }

    pub fn add(&self, other: &Operator) -> Result<Operator> {
        self.zip_with(other, "matrix add", |a, b| a + b)
    }

    pub fn sub(&self, other: &Operator) -> Result<Operator> {
        self.zip_with(other, "matrix subtract", |a, b| a - b)
    }

    pub fn scale(&self, scalar: Complex64) -> Operator {
        Operator {
            data: self.data.mapv(|a| a * scalar),
        }
    }

    /// Standard matrix product `self * other`.
    pub fn matmul(&self, other: &Operator) -> Result<Operator> {
        if self.ncols() != other.nrows() {
            return Err(SimError::shape("matrix multiply", self.shape_str(), other.shape_str()));
        }
        Ok(Operator {
            data: self.data.dot(&other.data),
        })
    }

    /// Matrix-vector product.
    pub fn apply(&self, state: &StateVector) -> Result<StateVector> {
        if self.ncols() != state.len() {
            return Err(SimError::shape("matrix-vector multiply", self.shape_str(), state.len()));
        }
        Ok(StateVector::new(self.data.dot(state.data())))
    }

    /// Kronecker product: block `(i, j)` of the result is `self[i, j] * other`.
    pub fn kron(&self, other: &Operator) -> Operator {
        Operator {
            data: kron(&self.data, &other.data),
        }
    }

    /// `self ⊗ self ⊗ ... ⊗ self` (`exponent` factors); exponent 0 gives the 1x1 identity.
    pub fn tensor_power(&self, exponent: usize) -> Operator {
        (0..exponent).fold(Operator::identity(1), |acc, _| acc.kron(self))
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Operator {
        Operator {
            data: self.data.t().mapv(|a| a.conj()),
        }
    }

    /// Whether `U† U = I` within tolerance.
    pub fn is_unitary(&self) -> bool {
        self.is_square()
            && self
                .dagger()
                .matmul(self)
                .map(|p| p == Operator::identity(self.nrows()))
                .unwrap_or(false)
    }

    pub fn approx_eq(&self, other: &Operator) -> bool {
        self.dim() == other.dim()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.approx_eq(b))
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl From<Array2<Complex64>> for Operator {
    fn from(data: Array2<Complex64>) -> Self {
        Operator::new(data)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.rows() {
            for amp in row.iter() {
                let sign = if amp.im >= 0.0 { '+' } else { '-' };
                write!(f, "({:5.2} {} {:.2}i) ", amp.re, sign, amp.im.abs())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Embed a `2^k x 2^k` native operator acting on the contiguous positions
/// `position..position + k` of an `num_qubits`-qubit register:
/// `I^(position) ⊗ native ⊗ I^(num_qubits - position - k)`.
pub fn embed(native: &Operator, position: usize, num_qubits: usize) -> Result<Operator> {
    let dim = native.nrows();
    if !native.is_square() || !dim.is_power_of_two() {
        return Err(SimError::InvalidGate {
            reason: format!("{}x{} is not a qubit operator", native.nrows(), native.ncols()),
        });
    }
    let width = dim.trailing_zeros() as usize;
    if position + width > num_qubits {
        return Err(SimError::shape(
            "operator embedding",
            format!("{} qubit(s) at position {}", width, position),
            format!("{}-qubit register", num_qubits),
        ));
    }
    let identity = Operator::identity(2);
    let before = identity.tensor_power(position);
    let after = identity.tensor_power(num_qubits - position - width);
    Ok(before.kron(native).kron(&after))
}
