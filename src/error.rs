//! Error types for the simulator.
//!
//! Every variant is a contract violation rather than a transient condition:
//! nothing is retried, the failing operation is aborted and the error is
//! returned to the caller.

use thiserror::Error;

use crate::layout::QubitId;

/// Result type for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised by the algebra layer, the register and the circuit executor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Incompatible dimensions in a vector or matrix operation.
    #[error("shape mismatch in {operation}: {left} and {right}")]
    ShapeMismatch {
        operation: &'static str,
        left: String,
        right: String,
    },

    /// A gate was invoked with the wrong number of operands.
    #[error("gate {gate} expects {expected} operand(s), got {actual}")]
    InvalidArity {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// The id is not bound in the register.
    #[error("qubit with id {id} does not exist")]
    UnknownQubit { id: QubitId },

    /// The same qubit was passed twice as an operand of one gate.
    #[error("qubit with id {id} used more than once as a gate operand")]
    DuplicateQubit { id: QubitId },

    /// The elementary swap was asked to exchange non-neighbouring positions.
    #[error("positions {first} and {second} are not adjacent")]
    NotAdjacent { first: usize, second: usize },

    /// Malformed textual state.
    #[error("invalid state encoding {input:?}: {reason}")]
    InvalidEncoding { input: String, reason: String },

    /// A custom gate matrix that cannot act on qubits.
    #[error("invalid gate: {reason}")]
    InvalidGate { reason: String },

    /// An algorithm driver was handed an oracle sized for another register.
    #[error("register has {actual} qubit(s), oracle requires {expected}")]
    RegisterMismatch { expected: usize, actual: usize },

    /// Malformed configuration or serialized program.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SimError {
    pub(crate) fn shape(operation: &'static str, left: impl ToString, right: impl ToString) -> Self {
        SimError::ShapeMismatch {
            operation,
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Config(err.to_string())
    }
}
