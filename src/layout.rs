//! Qubit bindings.
//!
//! A register owns one [`QubitLayout`]: a permutation table mapping each
//! stable qubit id to its current position in the amplitude encoding and
//! back. Positions only change through elementary adjacent swaps, which
//! update both directions of the table at once.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Caller-facing qubit identifier, fixed for the lifetime of a register.
pub type QubitId = usize;

/// Bijection between qubit ids and positions `0..n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitLayout {
    /// position -> id
    slots: Vec<QubitId>,
    /// id -> position
    positions: Vec<usize>,
}

impl QubitLayout {
    /// Ids `0..n` bound to positions `0..n`.
    pub fn identity(num_qubits: usize) -> Self {
        QubitLayout {
            slots: (0..num_qubits).collect(),
            positions: (0..num_qubits).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current position of `id`.
    pub fn position(&self, id: QubitId) -> Result<usize> {
        self.positions
            .get(id)
            .copied()
            .ok_or(SimError::UnknownQubit { id })
    }

    /// Id currently bound to `position`.
    ///
    /// # Panics
    /// Panics if `position >= len()`.
    pub fn qubit_at(&self, position: usize) -> QubitId {
        self.slots[position]
    }

    /// `(id, position)` pairs in id order.
    pub fn bindings(&self) -> impl Iterator<Item = (QubitId, usize)> + '_ {
        self.positions.iter().copied().enumerate()
    }

    /// Ids in position order.
    pub fn slots(&self) -> &[QubitId] {
        &self.slots
    }

    /// Exchange the qubits bound to two positions.
    pub(crate) fn swap_positions(&mut self, a: usize, b: usize) {
        let (id_a, id_b) = (self.slots[a], self.slots[b]);
        self.slots.swap(a, b);
        self.positions[id_a] = b;
        self.positions[id_b] = a;
    }

    /// Whether both directions of the table agree and cover `0..n`.
    pub fn is_consistent(&self) -> bool {
        let n = self.len();
        self.positions.len() == n
            && self
                .slots
                .iter()
                .enumerate()
                .all(|(pos, &id)| id < n && self.positions[id] == pos)
    }
}
