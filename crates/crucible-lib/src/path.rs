use std::collections::HashMap;

use crate::grid::Position;
use crate::transition::State;

/// `state -> parent` links recorded by a single search invocation.
pub type PredecessorMap = HashMap<State, State>;

/// Walk parent links from `final_state` back to a state with no parent.
///
/// Returns the visited states start-first. The walk is capped at one link per
/// map entry, so a malformed map cannot loop forever.
pub fn reconstruct_states(predecessors: &PredecessorMap, final_state: State) -> Vec<State> {
    let mut states = vec![final_state];
    let mut current = final_state;
    for _ in 0..predecessors.len() {
        let Some(&parent) = predecessors.get(&current) else {
            break;
        };
        states.push(parent);
        current = parent;
    }
    states.reverse();
    states
}

/// Positions along the predecessor chain ending at `final_state`, start-first.
///
/// For macro-edge searches these are the turning points; for single-cell
/// searches every cell appears.
pub fn reconstruct(predecessors: &PredecessorMap, final_state: State) -> Vec<Position> {
    reconstruct_states(predecessors, final_state)
        .into_iter()
        .map(|state| state.position)
        .collect()
}

/// Fill in the straight runs between consecutive waypoints.
///
/// Consecutive waypoints normally share a row or a column. If they do not,
/// the row is walked before the column.
pub fn expand(waypoints: &[Position]) -> Vec<Position> {
    let Some(&first) = waypoints.first() else {
        return Vec::new();
    };
    let mut cells = vec![first];
    let mut current = first;
    for &next in &waypoints[1..] {
        while current.row != next.row {
            current.row = if current.row < next.row {
                current.row + 1
            } else {
                current.row - 1
            };
            cells.push(current);
        }
        while current.col != next.col {
            current.col = if current.col < next.col {
                current.col + 1
            } else {
                current.col - 1
            };
            cells.push(current);
        }
    }
    cells
}
