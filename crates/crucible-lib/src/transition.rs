//! Legal moves over the `(position, heading, run)` state space.
//!
//! Two move vocabularies share these rules. The frontier engine expands
//! *macro-edges*: a turn followed by a straight walk whose length already
//! satisfies the run bounds, so every generated state is one the mover may
//! turn or stop in. The backtracking engine expands single-cell moves and
//! checks the bounds step by step.

use serde::Serialize;

use crate::constraints::RunConstraints;
use crate::error::Result;
use crate::grid::{CostGrid, Heading, Position};

/// A mover's position together with its movement history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct State {
    pub position: Position,
    pub heading: Heading,
    /// Consecutive steps taken in `heading` since the last turn.
    pub run: u32,
}

impl State {
    pub const fn new(position: Position, heading: Heading, run: u32) -> Self {
        Self {
            position,
            heading,
            run,
        }
    }
}

/// A successor state and the cost paid to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: State,
    pub cost: u32,
}

/// Synthetic starting states for a start cell that has no incoming heading.
///
/// Heading `Down` lets the first macro-edge turn into a horizontal corridor,
/// heading `Right` into a vertical one; together they cover all four
/// directions out of `start`.
pub fn seed_states(start: Position) -> [State; 2] {
    [
        State::new(start, Heading::Down, 1),
        State::new(start, Heading::Right, 1),
    ]
}

/// Append every macro-edge out of `state` into `buf`. The caller clears `buf`.
///
/// For each perpendicular heading, walks `k` cells for every `k` in
/// `[min_run, max_run]` that stays on the grid.
pub fn macro_edges(
    grid: &CostGrid,
    state: State,
    constraints: &RunConstraints,
    buf: &mut Vec<Transition>,
) -> Result<()> {
    for heading in [state.heading.turn_left(), state.heading.turn_right()] {
        let mut position = state.position;
        let mut cost = 0u32;
        for run in 1..=constraints.max_run() {
            let Some(next) = grid.step(position, heading) else {
                break;
            };
            position = next;
            cost = cost.saturating_add(u32::from(grid.cost(position)?));
            if constraints.may_turn(run) {
                buf.push(Transition {
                    state: State::new(position, heading, run),
                    cost,
                });
            }
        }
    }
    Ok(())
}

/// Append the single-cell successors of `state` into `buf`. The caller clears `buf`.
///
/// Straight ahead while `run < max_run`; left or right only once
/// `run >= min_run`; never backwards.
pub fn single_moves(
    grid: &CostGrid,
    state: State,
    constraints: &RunConstraints,
    buf: &mut Vec<Transition>,
) -> Result<()> {
    if constraints.may_continue(state.run) {
        push_step(grid, state.position, state.heading, state.run + 1, buf)?;
    }
    if constraints.may_turn(state.run) {
        for heading in [state.heading.turn_left(), state.heading.turn_right()] {
            push_step(grid, state.position, heading, 1, buf)?;
        }
    }
    Ok(())
}

/// Append the first single-cell moves out of a start cell with no heading.
pub fn origin_moves(grid: &CostGrid, start: Position, buf: &mut Vec<Transition>) -> Result<()> {
    for heading in Heading::ALL {
        push_step(grid, start, heading, 1, buf)?;
    }
    Ok(())
}

fn push_step(
    grid: &CostGrid,
    from: Position,
    heading: Heading,
    run: u32,
    buf: &mut Vec<Transition>,
) -> Result<()> {
    if let Some(next) = grid.step(from, heading) {
        buf.push(Transition {
            state: State::new(next, heading, run),
            cost: u32::from(grid.cost(next)?),
        });
    }
    Ok(())
}
