//! JSON form of an operation queue.
//!
//! ```json
//! {
//!   "num_qubits": 2,
//!   "operations": [
//!     {"type": "gate", "gate": "H", "qubits": [0]},
//!     {"type": "gate", "gate": "Rx", "params": [0.5], "qubits": [1]},
//!     {"type": "measure", "qubit": 0}
//!   ]
//! }
//! ```
//!
//! Custom gates carry `"label"` and `"matrix"` as rows of `[re, im]` pairs.

use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::circuit::{Circuit, Operation};
use crate::error::{Result, SimError};
use crate::gate::Gate;
use crate::layout::QubitId;
use crate::operator::Operator;
use crate::register::Register;

#[derive(Serialize, Deserialize)]
struct ProgramJson {
    num_qubits: usize,
    operations: Vec<OperationJson>,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum OperationJson {
    #[serde(rename = "gate")]
    Gate(GateJson),
    #[serde(rename = "measure")]
    Measure { qubit: QubitId },
}

#[derive(Serialize, Deserialize)]
struct GateJson {
    gate: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    params: Vec<f64>,
    qubits: Vec<QubitId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix: Option<Vec<Vec<[f64; 2]>>>,
}

/// An operation queue not yet bound to a register.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitProgram {
    pub num_qubits: usize,
    pub operations: Vec<Operation>,
}

impl CircuitProgram {
    /// Queue the program's operations on a circuit over `register`.
    ///
    /// # Errors
    /// `RegisterMismatch` if the register size differs from `num_qubits`.
    pub fn bind<R: Rng>(self, register: &mut Register<R>) -> Result<Circuit<'_, R>> {
        if register.num_qubits() != self.num_qubits {
            return Err(SimError::RegisterMismatch {
                expected: self.num_qubits,
                actual: register.num_qubits(),
            });
        }
        let mut circuit = Circuit::new(register);
        for operation in self.operations {
            circuit.push(operation);
        }
        Ok(circuit)
    }
}

fn gate_to_json(gate: &Gate, qubits: &[QubitId]) -> GateJson {
    let (name, params) = gate.name();
    let (label, matrix) = match gate {
        Gate::Custom(custom) => {
            let rows = custom
                .matrix()
                .to_rows()
                .into_iter()
                .map(|row| row.into_iter().map(|c| [c.re, c.im]).collect())
                .collect();
            (Some(custom.label().to_string()), Some(rows))
        }
        _ => (None, None),
    };
    GateJson {
        gate: name.to_string(),
        params,
        qubits: qubits.to_vec(),
        label,
        matrix,
    }
}

fn gate_from_json(gj: GateJson) -> Result<Operation> {
    let gate = if gj.gate == "Custom" {
        let rows = gj
            .matrix
            .ok_or_else(|| SimError::Config("Custom gate requires matrix".to_string()))?;
        let rows: Vec<Vec<Complex64>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(|[re, im]| Complex64::new(re, im)).collect())
            .collect();
        Gate::custom(Operator::from_rows(rows)?, gj.label.unwrap_or_default())?
    } else {
        Gate::from_name(&gj.gate, &gj.params)?
    };
    Ok(Operation::ApplyGate {
        gate,
        qubits: gj.qubits,
    })
}

/// Serialize a queue of operations to pretty-printed JSON.
pub fn operations_to_json(num_qubits: usize, operations: &[Operation]) -> Result<String> {
    let operations = operations
        .iter()
        .map(|op| match op {
            Operation::ApplyGate { gate, qubits } => OperationJson::Gate(gate_to_json(gate, qubits)),
            Operation::Measure { qubit } => OperationJson::Measure { qubit: *qubit },
        })
        .collect();
    let program = ProgramJson {
        num_qubits,
        operations,
    };
    Ok(serde_json::to_string_pretty(&program)?)
}

/// Serialize a circuit's queue.
pub fn circuit_to_json<R: Rng>(circuit: &Circuit<'_, R>) -> Result<String> {
    operations_to_json(circuit.num_qubits(), circuit.operations())
}

/// Parse a program written by [`operations_to_json`].
pub fn program_from_json(json: &str) -> Result<CircuitProgram> {
    let program: ProgramJson = serde_json::from_str(json)?;
    let operations = program
        .operations
        .into_iter()
        .map(|op| match op {
            OperationJson::Gate(gj) => gate_from_json(gj),
            OperationJson::Measure { qubit } => Ok(Operation::Measure { qubit }),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CircuitProgram {
        num_qubits: program.num_qubits,
        operations,
    })
}
