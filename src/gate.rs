use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;

use ndarray::{array, Array2};
use num_complex::Complex64;

use crate::error::{Result, SimError};
use crate::operator::Operator;

/// Quantum gate, dispatched by arity.
///
/// Primitive gates carry a native `2^k x 2^k` matrix that assumes its
/// operands are adjacent, first operand on the most significant position.
/// `CCNOT` and `U` have no matrix of their own; they replay a fixed sequence
/// of primitive gates (see [`Gate::decompose`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    /// S† = diag(1, -i)
    Sdg,
    T,
    /// T† = diag(1, e^(-iπ/4))
    Tdg,
    /// Phase gate: diag(1, e^(iθ)).
    Phase(f64),
    Rx(f64),
    Ry(f64),
    Rz(f64),
    /// Controlled NOT, first operand is the control.
    CNOT,
    /// Controlled Z.
    CZ,
    /// Exchanges the positions of its two operands.
    Swap,
    /// Universal single-qubit rotation `U(θ, φ, λ)`: Rz(φ), then Ry(θ), then Rz(λ).
    U(f64, f64, f64),
    /// Doubly-controlled NOT (Toffoli); operands are (control, control, target).
    CCNOT,
    /// Externally supplied operator on `log2(dim)` adjacent qubits.
    Custom(CustomGate),
}

/// Validated payload of [`Gate::Custom`], built by [`Gate::custom`].
///
/// The matrix is unitary with dimension `2^k`, `k >= 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomGate {
    matrix: Operator,
    label: String,
}

impl CustomGate {
    pub fn matrix(&self) -> &Operator {
        &self.matrix
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn num_qubits(&self) -> usize {
        self.matrix.nrows().trailing_zeros() as usize
    }
}

/// How a gate is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    /// Native 2x2 operator embedded at the target position.
    OneQubit,
    /// Native operator on `k >= 2` qubits, applied after gathering operands.
    MultiQubit(usize),
    /// Position exchange carried out through elementary swaps.
    Exchange,
    /// Fixed sequence of primitive gates.
    Composite(usize),
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::I => write!(f, "I"),
            Gate::X => write!(f, "X"),
            Gate::Y => write!(f, "Y"),
            Gate::Z => write!(f, "Z"),
            Gate::H => write!(f, "H"),
            Gate::S => write!(f, "S"),
            Gate::Sdg => write!(f, "S†"),
            Gate::T => write!(f, "T"),
            Gate::Tdg => write!(f, "T†"),
            Gate::Phase(theta) => write!(f, "Phase({:.4})", theta),
            Gate::Rx(theta) => write!(f, "Rx({:.4})", theta),
            Gate::Ry(theta) => write!(f, "Ry({:.4})", theta),
            Gate::Rz(theta) => write!(f, "Rz({:.4})", theta),
            Gate::CNOT => write!(f, "CNOT"),
            Gate::CZ => write!(f, "CZ"),
            Gate::Swap => write!(f, "SWAP"),
            Gate::U(theta, phi, lambda) => {
                write!(f, "U({:.4}, {:.4}, {:.4})", theta, phi, lambda)
            }
            Gate::CCNOT => write!(f, "CCNOT"),
            Gate::Custom(custom) => write!(f, "{}", custom.label),
        }
    }
}

impl Gate {
    /// Wrap an externally supplied operator.
    ///
    /// # Errors
    /// `InvalidGate` unless the matrix is unitary and square with a
    /// power-of-two dimension of at least 2.
    pub fn custom(matrix: Operator, label: impl Into<String>) -> Result<Gate> {
        let (rows, cols) = matrix.dim();
        if rows != cols || rows < 2 || !rows.is_power_of_two() {
            return Err(SimError::InvalidGate {
                reason: format!("custom matrix is {}x{}, expected 2^k x 2^k with k >= 1", rows, cols),
            });
        }
        if !matrix.is_unitary() {
            return Err(SimError::InvalidGate {
                reason: format!("custom {}x{} matrix is not unitary", rows, cols),
            });
        }
        Ok(Gate::Custom(CustomGate {
            matrix,
            label: label.into(),
        }))
    }

    /// Declared operand count.
    pub fn num_qubits(&self) -> usize {
        match self {
            Gate::CNOT | Gate::CZ | Gate::Swap => 2,
            Gate::CCNOT => 3,
            Gate::Custom(custom) => custom.num_qubits(),
            _ => 1,
        }
    }

    pub fn kind(&self) -> GateKind {
        match self {
            Gate::Swap => GateKind::Exchange,
            Gate::U(..) | Gate::CCNOT => GateKind::Composite(self.num_qubits()),
            _ => match self.num_qubits() {
                1 => GateKind::OneQubit,
                k => GateKind::MultiQubit(k),
            },
        }
    }

    /// Native matrix, `None` for composite gates.
    pub fn matrix(&self) -> Option<Operator> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let m2 = |a: Complex64, b: Complex64, c: Complex64, d: Complex64| {
            Operator::new(array![[a, b], [c, d]])
        };

        let m = match self {
            Gate::I => Operator::identity(2),
            Gate::X => m2(zero, one, one, zero),
            Gate::Y => m2(zero, -i, i, zero),
            Gate::Z => m2(one, zero, zero, -one),
            Gate::H => {
                let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
                m2(s, s, s, -s)
            }
            Gate::S => m2(one, zero, zero, i),
            Gate::Sdg => m2(one, zero, zero, -i),
            Gate::T => m2(one, zero, zero, Complex64::from_polar(1.0, FRAC_PI_4)),
            Gate::Tdg => m2(one, zero, zero, Complex64::from_polar(1.0, -FRAC_PI_4)),
            Gate::Phase(theta) => m2(one, zero, zero, Complex64::from_polar(1.0, *theta)),
            Gate::Rx(theta) => {
                let cos = Complex64::new((theta / 2.0).cos(), 0.0);
                let neg_i_sin = Complex64::new(0.0, -(theta / 2.0).sin());
                m2(cos, neg_i_sin, neg_i_sin, cos)
            }
            Gate::Ry(theta) => {
                let cos = Complex64::new((theta / 2.0).cos(), 0.0);
                let sin = Complex64::new((theta / 2.0).sin(), 0.0);
                m2(cos, -sin, sin, cos)
            }
            Gate::Rz(theta) => m2(
                Complex64::from_polar(1.0, -theta / 2.0),
                zero,
                zero,
                Complex64::from_polar(1.0, theta / 2.0),
            ),
            Gate::CNOT => {
                // |10> <-> |11>
                let mut m = Array2::eye(4);
                m[[2, 2]] = zero;
                m[[3, 3]] = zero;
                m[[2, 3]] = one;
                m[[3, 2]] = one;
                Operator::new(m)
            }
            Gate::CZ => {
                let mut m = Array2::eye(4);
                m[[3, 3]] = -one;
                Operator::new(m)
            }
            Gate::Swap => swap_operator(),
            Gate::Custom(custom) => custom.matrix.clone(),
            Gate::U(..) | Gate::CCNOT => return None,
        };
        Some(m)
    }

    /// Primitive sequence of a composite gate.
    ///
    /// Each step names a gate and the operand slots (indices into the
    /// composite's own operand list) it acts on. `None` for primitives.
    ///
    /// CCNOT closes with T on the first control and T† on the second; the
    /// reverse assignment leaves phases i and -i on the controls.
    pub fn decompose(&self) -> Option<Vec<(Gate, Vec<usize>)>> {
        match self {
            Gate::U(theta, phi, lambda) => Some(vec![
                (Gate::Rz(*phi), vec![0]),
                (Gate::Ry(*theta), vec![0]),
                (Gate::Rz(*lambda), vec![0]),
            ]),
            Gate::CCNOT => {
                let (c1, c2, t) = (0, 1, 2);
                Some(vec![
                    (Gate::H, vec![t]),
                    (Gate::CNOT, vec![c2, t]),
                    (Gate::Tdg, vec![t]),
                    (Gate::CNOT, vec![c1, t]),
                    (Gate::T, vec![t]),
                    (Gate::CNOT, vec![c2, t]),
                    (Gate::Tdg, vec![t]),
                    (Gate::CNOT, vec![c1, t]),
                    (Gate::T, vec![t]),
                    (Gate::T, vec![c2]),
                    (Gate::H, vec![t]),
                    (Gate::CNOT, vec![c1, c2]),
                    (Gate::T, vec![c1]),
                    (Gate::Tdg, vec![c2]),
                    (Gate::CNOT, vec![c1, c2]),
                ])
            }
            _ => None,
        }
    }

    /// Adjoint (conjugate transpose). For unitary gates this is the inverse.
    pub fn dagger(&self) -> Gate {
        match self {
            Gate::I | Gate::X | Gate::Y | Gate::Z | Gate::H => self.clone(),
            Gate::CNOT | Gate::CZ | Gate::Swap | Gate::CCNOT => self.clone(),
            Gate::S => Gate::Sdg,
            Gate::Sdg => Gate::S,
            Gate::T => Gate::Tdg,
            Gate::Tdg => Gate::T,
            Gate::Phase(theta) => Gate::Phase(-theta),
            Gate::Rx(theta) => Gate::Rx(-theta),
            Gate::Ry(theta) => Gate::Ry(-theta),
            Gate::Rz(theta) => Gate::Rz(-theta),
            // Rz(λ)Ry(θ)Rz(φ) reversed and inverted
            Gate::U(theta, phi, lambda) => Gate::U(-theta, -lambda, -phi),
            Gate::Custom(custom) => Gate::Custom(CustomGate {
                matrix: custom.matrix.dagger(),
                label: format!("{}†", custom.label),
            }),
        }
    }

    /// Check an operand list length against [`Gate::num_qubits`].
    pub fn check_arity(&self, actual: usize) -> Result<()> {
        let expected = self.num_qubits();
        if actual != expected {
            return Err(SimError::InvalidArity {
                gate: self.to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Parse a named, parameterized gate as written by [`Gate::name`].
    pub fn from_name(name: &str, params: &[f64]) -> Result<Gate> {
        let want = |n: usize| -> Result<()> {
            if params.len() != n {
                return Err(SimError::Config(format!(
                    "gate {} takes {} parameter(s), got {}",
                    name,
                    n,
                    params.len()
                )));
            }
            Ok(())
        };
        let gate = match name {
            "I" | "X" | "Y" | "Z" | "H" | "S" | "Sdg" | "T" | "Tdg" | "CNOT" | "CZ" | "SWAP"
            | "CCNOT" => {
                want(0)?;
                match name {
                    "I" => Gate::I,
                    "X" => Gate::X,
                    "Y" => Gate::Y,
                    "Z" => Gate::Z,
                    "H" => Gate::H,
                    "S" => Gate::S,
                    "Sdg" => Gate::Sdg,
                    "T" => Gate::T,
                    "Tdg" => Gate::Tdg,
                    "CNOT" => Gate::CNOT,
                    "CZ" => Gate::CZ,
                    "SWAP" => Gate::Swap,
                    _ => Gate::CCNOT,
                }
            }
            "Phase" | "Rx" | "Ry" | "Rz" => {
                want(1)?;
                match name {
                    "Phase" => Gate::Phase(params[0]),
                    "Rx" => Gate::Rx(params[0]),
                    "Ry" => Gate::Ry(params[0]),
                    _ => Gate::Rz(params[0]),
                }
            }
            "U" => {
                want(3)?;
                Gate::U(params[0], params[1], params[2])
            }
            other => return Err(SimError::Config(format!("unknown gate {:?}", other))),
        };
        Ok(gate)
    }

    /// Stable ASCII name and parameters, the inverse of [`Gate::from_name`].
    /// Custom gates report `"Custom"`.
    pub fn name(&self) -> (&'static str, Vec<f64>) {
        match self {
            Gate::I => ("I", vec![]),
            Gate::X => ("X", vec![]),
            Gate::Y => ("Y", vec![]),
            Gate::Z => ("Z", vec![]),
            Gate::H => ("H", vec![]),
            Gate::S => ("S", vec![]),
            Gate::Sdg => ("Sdg", vec![]),
            Gate::T => ("T", vec![]),
            Gate::Tdg => ("Tdg", vec![]),
            Gate::Phase(theta) => ("Phase", vec![*theta]),
            Gate::Rx(theta) => ("Rx", vec![*theta]),
            Gate::Ry(theta) => ("Ry", vec![*theta]),
            Gate::Rz(theta) => ("Rz", vec![*theta]),
            Gate::CNOT => ("CNOT", vec![]),
            Gate::CZ => ("CZ", vec![]),
            Gate::Swap => ("SWAP", vec![]),
            Gate::U(theta, phi, lambda) => ("U", vec![*theta, *phi, *lambda]),
            Gate::CCNOT => ("CCNOT", vec![]),
            Gate::Custom(_) => ("Custom", vec![]),
        }
    }
}

/// 4x4 permutation exchanging two adjacent qubits: |01> <-> |10>.
pub fn swap_operator() -> Operator {
    let zero = Complex64::new(0.0, 0.0);
    let one = Complex64::new(1.0, 0.0);
    let mut m = Array2::eye(4);
    m[[1, 1]] = zero;
    m[[2, 2]] = zero;
    m[[1, 2]] = one;
    m[[2, 1]] = one;
    Operator::new(m)
}
