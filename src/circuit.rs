use std::fmt;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

use crate::error::Result;
use crate::gate::Gate;
use crate::layout::QubitId;
use crate::measure::MeasurementResult;
use crate::register::Register;

/// A queued circuit step.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ApplyGate { gate: Gate, qubits: Vec<QubitId> },
    Measure { qubit: QubitId },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::ApplyGate { gate, qubits } => {
                write!(f, "{} @ q[{}]", gate, format_ids(qubits))
            }
            Operation::Measure { qubit } => write!(f, "measure @ q[{}]", qubit),
        }
    }
}

fn format_ids(ids: &[QubitId]) -> String {
    ids.iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Append-only operation queue bound to one register.
///
/// Operations are not validated when queued; unknown ids or arity mismatches
/// surface from [`Circuit::execute`].
pub struct Circuit<'r, R: Rng = StdRng> {
    register: &'r mut Register<R>,
    operations: Vec<Operation>,
    results: Vec<MeasurementResult>,
}

impl<'r, R: Rng> Circuit<'r, R> {
    pub fn new(register: &'r mut Register<R>) -> Self {
        Circuit {
            register,
            operations: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Queue `gate` on `qubits` (operand order matters).
    pub fn add_gate(&mut self, gate: Gate, qubits: &[QubitId]) -> &mut Self {
        self.operations.push(Operation::ApplyGate {
            gate,
            qubits: qubits.to_vec(),
        });
        self
    }

    /// Queue a measurement of `qubit`.
    pub fn add_measurement(&mut self, qubit: QubitId) -> &mut Self {
        self.operations.push(Operation::Measure { qubit });
        self
    }

    pub fn push(&mut self, operation: Operation) -> &mut Self {
        self.operations.push(operation);
        self
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn num_qubits(&self) -> usize {
        self.register.num_qubits()
    }

    pub fn register(&self) -> &Register<R> {
        &*self.register
    }

    /// Replay the queue in order against the register.
    ///
    /// The result log is cleared first, then refilled one entry per
    /// measurement. Execution stops at the first failing operation; earlier
    /// gate applications and measurements stay applied to the register and
    /// their results stay in the log. Running twice replays every gate and
    /// measures again on the state the first run left behind.
    pub fn execute(&mut self) -> Result<&[MeasurementResult]> {
        info!(operations = self.operations.len(), "executing circuit");
        self.results.clear();
        for operation in &self.operations {
            match operation {
                Operation::ApplyGate { gate, qubits } => self.register.apply_gate(gate, qubits)?,
                Operation::Measure { qubit } => {
                    let result = self.register.measure(*qubit)?;
                    self.results.push(result);
                }
            }
        }
        info!(measurements = self.results.len(), "circuit finished");
        Ok(&self.results)
    }

    /// Results of the last execution, in measurement order.
    pub fn measurement_results(&self) -> &[MeasurementResult] {
        &self.results
    }
}

impl<R: Rng> fmt::Display for Circuit<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nqubits: {}", self.num_qubits())?;
        for operation in &self.operations {
            writeln!(f, "  {}", operation)?;
        }
        Ok(())
    }
}
