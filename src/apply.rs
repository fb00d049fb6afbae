//! Gate application against an amplitude vector and its qubit layout.
//!
//! Every gate ends up as one full-space operator `I^p ⊗ U ⊗ I^(n-p-k)`
//! multiplied into the state. Multi-qubit gates first bring their operands
//! into a contiguous block with [`move_qubit`], which only ever performs
//! elementary adjacent swaps; each swap permutes the amplitudes and the
//! layout together so the layout always describes the actual encoding.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::{Result, SimError};
use crate::gate::{swap_operator, Gate, GateKind};
use crate::layout::{QubitId, QubitLayout};
use crate::operator::{embed, Operator};
use crate::state::StateVector;

/// Exchange the qubits at two neighbouring positions.
///
/// # Errors
/// `NotAdjacent` if the positions are not neighbours.
pub fn swap_adjacent(
    state: &StateVector,
    layout: &mut QubitLayout,
    first: usize,
    second: usize,
) -> Result<StateVector> {
    if first.abs_diff(second) != 1 {
        return Err(SimError::NotAdjacent { first, second });
    }
    let full = embed(&swap_operator(), first.min(second), layout.len())?;
    let next = full.apply(state)?;
    trace!(first, second, "adjacent swap");
    layout.swap_positions(first, second);
    Ok(next)
}

/// Walk qubit `id` to `destination` one elementary swap at a time.
pub fn move_qubit(
    state: &StateVector,
    layout: &mut QubitLayout,
    id: QubitId,
    destination: usize,
) -> Result<StateVector> {
    if destination >= layout.len() {
        return Err(SimError::shape("qubit move", destination, layout.len()));
    }
    let mut current = state.clone();
    let mut position = layout.position(id)?;
    while position != destination {
        let neighbour = if position < destination {
            position + 1
        } else {
            position - 1
        };
        current = swap_adjacent(&current, layout, position, neighbour)?;
        position = neighbour;
    }
    Ok(current)
}

/// Bring `operands` into a contiguous block in operand order, anchored on
/// the first operand.
///
/// Each later operand is moved directly beneath the block built so far.
/// An operand coming from above passes through the block, which shifts the
/// block up by one position and keeps it contiguous.
pub fn gather(
    state: &StateVector,
    layout: &mut QubitLayout,
    operands: &[QubitId],
) -> Result<StateVector> {
    let mut current = state.clone();
    let Some((&head, rest)) = operands.split_first() else {
        return Ok(current);
    };
    let mut last = layout.position(head)?;
    for &id in rest {
        let position = layout.position(id)?;
        let destination = if position > last { last + 1 } else { last };
        current = move_qubit(&current, layout, id, destination)?;
        last = layout.position(id)?;
    }
    Ok(current)
}

/// Exchange the positions of two qubits, carrying the amplitudes with them.
pub fn exchange(
    state: &StateVector,
    layout: &mut QubitLayout,
    first: QubitId,
    second: QubitId,
) -> Result<StateVector> {
    let first_position = layout.position(first)?;
    let second_position = layout.position(second)?;
    let moved = move_qubit(state, layout, first, second_position)?;
    move_qubit(&moved, layout, second, first_position)
}

/// Apply a native operator to operands, gathering them first when there is
/// more than one.
pub fn apply_native(
    state: &StateVector,
    layout: &mut QubitLayout,
    native: &Operator,
    operands: &[QubitId],
) -> Result<StateVector> {
    let gathered = if operands.len() > 1 {
        gather(state, layout, operands)?
    } else {
        state.clone()
    };
    let anchor = match operands.first() {
        Some(&id) => layout.position(id)?,
        None => return Ok(gathered),
    };
    let full = embed(native, anchor, layout.len())?;
    full.apply(&gathered)
}

/// Resolve operands and apply `gate`.
///
/// All ids are resolved and checked before the first amplitude changes, so
/// `UnknownQubit`, `DuplicateQubit` and `InvalidArity` leave the inputs
/// untouched.
pub fn apply_gate(
    state: &StateVector,
    layout: &mut QubitLayout,
    gate: &Gate,
    operands: &[QubitId],
) -> Result<StateVector> {
    gate.check_arity(operands.len())?;
    let positions = operands
        .iter()
        .map(|&id| layout.position(id))
        .collect::<Result<Vec<usize>>>()?;
    let mut seen = HashSet::new();
    if let Some(&id) = operands.iter().find(|&&id| !seen.insert(id)) {
        return Err(SimError::DuplicateQubit { id });
    }
    debug!(gate = %gate, ?operands, ?positions, "apply gate");

    match gate.kind() {
        GateKind::Exchange => exchange(state, layout, operands[0], operands[1]),
        GateKind::Composite(_) => {
            let steps = gate.decompose().unwrap_or_default();
            let mut current = state.clone();
            for (step, slots) in &steps {
                let ids: Vec<QubitId> = slots.iter().map(|&s| operands[s]).collect();
                current = apply_gate(&current, layout, step, &ids)?;
            }
            Ok(current)
        }
        GateKind::OneQubit | GateKind::MultiQubit(_) => {
            let native = gate.matrix().ok_or_else(|| SimError::InvalidGate {
                reason: format!("{} has no native matrix", gate),
            })?;
            apply_native(state, layout, &native, operands)
        }
    }
}
