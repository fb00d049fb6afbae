use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::apply::apply_gate;
use crate::config::SimConfig;
use crate::error::Result;
use crate::gate::Gate;
use crate::index::bit_at;
use crate::layout::{QubitId, QubitLayout};
use crate::measure::{self, MeasurementResult};
use crate::state::StateVector;

/// A register of `n` qubits: the `2^n` amplitudes, the id/position table and
/// the random source used for measurement.
///
/// The register is the only place state and layout change. It performs no
/// locking; one writer at a time.
#[derive(Debug, Clone)]
pub struct Register<R = StdRng> {
    state: StateVector,
    layout: QubitLayout,
    rng: R,
}

impl Register<StdRng> {
    /// `|0...0>` on `num_qubits` qubits with an entropy-seeded generator.
    pub fn new(num_qubits: usize) -> Self {
        Self::with_rng(num_qubits, StdRng::from_entropy())
    }

    /// `|0...0>` with a reproducible generator.
    pub fn with_seed(num_qubits: usize, seed: u64) -> Self {
        Self::with_rng(num_qubits, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &SimConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(config.num_qubits, seed),
            None => Self::new(config.num_qubits),
        }
    }
}

impl<R: Rng> Register<R> {
    /// `|0...0>` measured with the injected generator `rng`.
    pub fn with_rng(num_qubits: usize, rng: R) -> Self {
        Register {
            state: StateVector::zero_state(num_qubits),
            layout: QubitLayout::identity(num_qubits),
            rng,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.layout.len()
    }

    /// Amplitudes in the current position order.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    pub fn layout(&self) -> &QubitLayout {
        &self.layout
    }

    /// Current position of qubit `id`.
    pub fn position(&self, id: QubitId) -> Result<usize> {
        self.layout.position(id)
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Apply `gate` to the qubits `ids`, in operand order.
    ///
    /// State and layout are replaced together only when the whole application
    /// succeeds.
    pub fn apply_gate(&mut self, gate: &Gate, ids: &[QubitId]) -> Result<()> {
        let mut layout = self.layout.clone();
        let state = apply_gate(&self.state, &mut layout, gate, ids)?;
        self.state = state;
        self.layout = layout;
        Ok(())
    }

    /// Amplitudes reindexed by qubit id, qubit 0 as most significant bit,
    /// whatever the current positions are.
    pub fn canonical_state(&self) -> StateVector {
        let n = self.num_qubits();
        let slots = self.layout.slots();
        let amplitudes = (0..self.state.len())
            .map(|logical| {
                let raw = slots
                    .iter()
                    .fold(0usize, |acc, &id| (acc << 1) | bit_at(logical, id, n));
                self.state.get(raw)
            })
            .collect();
        StateVector::from_vec(amplitudes)
    }

    /// Probability that qubit `id` reads 0.
    pub fn probability_of_zero(&self, id: QubitId) -> Result<f64> {
        let position = self.layout.position(id)?;
        Ok(measure::probability_of_zero(&self.state, position, self.num_qubits()))
    }

    /// Probabilities of the basis states in the current position order.
    pub fn probabilities(&self) -> Vec<f64> {
        measure::probabilities(&self.state)
    }

    /// Measure qubit `id`: sample, collapse and renormalize.
    pub fn measure(&mut self, id: QubitId) -> Result<MeasurementResult> {
        let position = self.layout.position(id)?;
        let n = self.num_qubits();
        let p_zero = measure::probability_of_zero(&self.state, position, n);
        let outcome = measure::sample_outcome(p_zero, &mut self.rng);
        self.state = measure::collapse(&self.state, position, n, outcome);
        debug!(qubit = id, position, p_zero, outcome, "measure");
        Ok(MeasurementResult::new(id, outcome))
    }

    /// Back to `|0...0>` with identity bindings. The generator keeps its state.
    pub fn reset(&mut self) {
        let n = self.num_qubits();
        self.state = StateVector::zero_state(n);
        self.layout = QubitLayout::identity(n);
    }
}
