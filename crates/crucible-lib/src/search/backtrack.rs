//! Branch-and-bound depth-first search over single-cell moves.
//!
//! This engine shares no expansion logic with the frontier search beyond the
//! run rules themselves, which makes it useful as an independent check. It
//! is exponential in the worst case and meant for small grids and tests.

use std::collections::{HashMap, HashSet};

use crate::constraints::RunConstraints;
use crate::error::{Error, Result};
use crate::grid::{CostGrid, Heading, Position};
use crate::oracle::LowerBoundTable;
use crate::path::{reconstruct_states, PredecessorMap};
use crate::transition::{origin_moves, single_moves, State, Transition};

use super::{SearchOutcome, SearchStats, SearchStrategy};

const PROGRESS_INTERVAL: u64 = 1_000_000;

#[derive(Debug, Clone, Copy)]
struct Frame {
    state: State,
    cost: u32,
}

/// Placeholder state for the start cell before any move has been made.
fn root_state(start: Position) -> State {
    State::new(start, Heading::Right, 0)
}

/// A legal path to the target found cheaply, used to seed the bound.
#[derive(Debug, Clone)]
pub struct UpperBound {
    pub cost: u32,
    /// States along the path, starting with the root state on `start`.
    pub states: Vec<State>,
}

/// Minimum-cost search from `start` to `target`, pruned by `lower_bounds`.
///
/// `lower_bounds` must have been built for `target`. The running best starts
/// at [`greedy_upper_bound`] and any partial path whose cost plus the bound
/// of its cell cannot beat it is dropped. A best-cost label per
/// `(position, heading, run)` discards dominated revisits.
pub fn search(
    grid: &CostGrid,
    start: Position,
    target: Position,
    constraints: &RunConstraints,
    lower_bounds: &LowerBoundTable,
) -> Result<SearchOutcome> {
    constraints.validate()?;
    grid.ensure_in_bounds(start)?;
    grid.ensure_in_bounds(target)?;
    if lower_bounds.target() != target {
        return Err(Error::BoundsTargetMismatch {
            table_target: lower_bounds.target(),
            target,
        });
    }

    let root = root_state(start);
    if start == target {
        return Ok(SearchOutcome {
            strategy: SearchStrategy::Backtracking,
            cost: 0,
            final_state: root,
            predecessors: PredecessorMap::new(),
            stats: SearchStats::default(),
        });
    }

    let Some(seed) = greedy_upper_bound(grid, start, target, constraints, lower_bounds)? else {
        tracing::debug!(%start, %target, "no legal path exists");
        return Err(Error::UnreachableTarget { start, target });
    };
    tracing::debug!(upper_bound = seed.cost, "seeded branch-and-bound");

    let mut best = seed.cost;
    let mut best_path = seed.states;
    let mut labels: HashMap<State, u32> = HashMap::new();
    let mut parents = PredecessorMap::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut stats = SearchStats::default();
    let mut iterations: u64 = 0;
    let mut improvements = 0usize;
    let mut buf = Vec::new();

    origin_moves(grid, start, &mut buf)?;
    push_candidates(
        &mut buf,
        Frame {
            state: root,
            cost: 0,
        },
        best,
        lower_bounds,
        &mut labels,
        &mut parents,
        &mut stack,
        &mut stats,
    );

    while let Some(frame) = stack.pop() {
        iterations += 1;
        if iterations % PROGRESS_INTERVAL == 0 {
            tracing::trace!(
                iterations,
                stack = stack.len(),
                best,
                "backtracking search progress"
            );
        }

        if labels.get(&frame.state).is_some_and(|&label| label < frame.cost) {
            continue;
        }
        let Some(bound) = lower_bounds.get(frame.state.position) else {
            continue;
        };
        if frame.cost.saturating_add(bound) >= best {
            continue;
        }

        if frame.state.position == target && constraints.may_turn(frame.state.run) {
            best = frame.cost;
            best_path = reconstruct_states(&parents, frame.state);
            improvements += 1;
            continue;
        }

        stats.expanded += 1;
        buf.clear();
        single_moves(grid, frame.state, constraints, &mut buf)?;
        push_candidates(
            &mut buf,
            frame,
            best,
            lower_bounds,
            &mut labels,
            &mut parents,
            &mut stack,
            &mut stats,
        );
    }

    tracing::debug!(
        cost = best,
        iterations,
        improvements,
        expanded = stats.expanded,
        "backtracking search finished"
    );

    let final_state = best_path.last().copied().unwrap_or(root);
    Ok(SearchOutcome {
        strategy: SearchStrategy::Backtracking,
        cost: best,
        final_state,
        predecessors: chain_links(&best_path),
        stats,
    })
}

/// Push the surviving candidates in `buf`, most promising last so it is popped first.
#[allow(clippy::too_many_arguments)]
fn push_candidates(
    buf: &mut [Transition],
    from: Frame,
    best: u32,
    lower_bounds: &LowerBoundTable,
    labels: &mut HashMap<State, u32>,
    parents: &mut PredecessorMap,
    stack: &mut Vec<Frame>,
    stats: &mut SearchStats,
) {
    buf.sort_by_key(|t| {
        let bound = lower_bounds.get(t.state.position).unwrap_or(u32::MAX);
        std::cmp::Reverse(from.cost.saturating_add(t.cost).saturating_add(bound))
    });
    for t in buf.iter() {
        let cost = from.cost.saturating_add(t.cost);
        let Some(bound) = lower_bounds.get(t.state.position) else {
            continue;
        };
        if cost.saturating_add(bound) >= best {
            continue;
        }
        if labels.get(&t.state).is_some_and(|&label| label <= cost) {
            continue;
        }
        labels.insert(t.state, cost);
        parents.insert(t.state, from.state);
        stack.push(Frame {
            state: t.state,
            cost,
        });
        stats.pushed += 1;
    }
}

/// Find some legal path from `start` to `target`, preferring cells with low bounds.
///
/// Depth-first with a visited set over full states, so each state is expanded
/// at most once. Since every reachable state is eventually visited, `None`
/// means no legal path exists.
pub fn greedy_upper_bound(
    grid: &CostGrid,
    start: Position,
    target: Position,
    constraints: &RunConstraints,
    lower_bounds: &LowerBoundTable,
) -> Result<Option<UpperBound>> {
    let root = root_state(start);
    let mut visited: HashSet<State> = HashSet::new();
    let mut parents = PredecessorMap::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut buf = Vec::new();

    origin_moves(grid, start, &mut buf)?;
    let mut from = Frame {
        state: root,
        cost: 0,
    };
    loop {
        buf.sort_by_key(|t| std::cmp::Reverse(lower_bounds.get(t.state.position)));
        for t in buf.iter() {
            if lower_bounds.get(t.state.position).is_none() || !visited.insert(t.state) {
                continue;
            }
            parents.insert(t.state, from.state);
            stack.push(Frame {
                state: t.state,
                cost: from.cost.saturating_add(t.cost),
            });
        }

        let Some(frame) = stack.pop() else {
            return Ok(None);
        };
        if frame.state.position == target && constraints.may_turn(frame.state.run) {
            return Ok(Some(UpperBound {
                cost: frame.cost,
                states: reconstruct_states(&parents, frame.state),
            }));
        }

        from = frame;
        buf.clear();
        single_moves(grid, frame.state, constraints, &mut buf)?;
    }
}

fn chain_links(states: &[State]) -> PredecessorMap {
    states
        .windows(2)
        .map(|pair| (pair[1], pair[0]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::frontier;

    fn setup(text: &str) -> (CostGrid, LowerBoundTable) {
        let grid: CostGrid = text.parse().expect("valid grid");
        let table = LowerBoundTable::build(&grid, grid.bottom_right()).expect("bounds");
        (grid, table)
    }

    fn run(text: &str, constraints: RunConstraints) -> Result<SearchOutcome> {
        let (grid, table) = setup(text);
        search(
            &grid,
            grid.top_left(),
            grid.bottom_right(),
            &constraints,
            &table,
        )
    }

    #[test]
    fn agrees_with_frontier_on_small_grid() {
        let text = "24134\n32154\n32552\n34465\n45466";
        let (grid, table) = setup(text);
        for constraints in [
            RunConstraints::normal(),
            RunConstraints::new(2, 4).unwrap(),
            RunConstraints::new(1, 1).unwrap(),
        ] {
            let primary =
                frontier::search(&grid, grid.top_left(), grid.bottom_right(), &constraints);
            let check = search(
                &grid,
                grid.top_left(),
                grid.bottom_right(),
                &constraints,
                &table,
            );
            match (primary, check) {
                (Ok(a), Ok(b)) => assert_eq!(a.cost, b.cost, "{constraints}"),
                (Err(_), Err(_)) => {}
                (a, b) => panic!("engines disagree for {constraints}: {a:?} vs {b:?}"),
            }
        }
    }

    #[test]
    fn single_cell_costs_nothing() {
        let outcome = run("5", RunConstraints::ultra()).unwrap();
        assert_eq!(outcome.cost, 0);
        assert_eq!(outcome.waypoints(), vec![Position::new(0, 0)]);
    }

    #[test]
    fn short_corridor_is_unreachable_with_long_minimum_run() {
        let err = run("11", RunConstraints::new(4, 10).unwrap()).expect_err("unreachable");
        assert!(matches!(err, Error::UnreachableTarget { .. }));
    }

    #[test]
    fn target_must_be_reached_with_minimum_run() {
        // Reaching (0,1) takes one step; with min_run 2 the mover cannot stop there.
        let err = run("19", RunConstraints::new(2, 3).unwrap()).expect_err("unreachable");
        assert!(matches!(err, Error::UnreachableTarget { .. }));
    }

    #[test]
    fn path_is_a_chain_of_adjacent_cells() {
        let outcome = run("11111\n99991\n11111", RunConstraints::normal()).unwrap();
        let cells = outcome.waypoints();
        assert_eq!(cells.first(), Some(&Position::new(0, 0)));
        assert_eq!(cells.last(), Some(&Position::new(2, 4)));
        for pair in cells.windows(2) {
            let dr = pair[0].row.abs_diff(pair[1].row);
            let dc = pair[0].col.abs_diff(pair[1].col);
            assert_eq!(dr + dc, 1);
        }
    }

    #[test]
    fn greedy_bound_is_a_legal_upper_bound() {
        let (grid, table) = setup("2413\n3215\n3255\n3446");
        let constraints = RunConstraints::normal();
        let seed = greedy_upper_bound(
            &grid,
            grid.top_left(),
            grid.bottom_right(),
            &constraints,
            &table,
        )
        .unwrap()
        .expect("path exists");
        let optimum = frontier::search(&grid, grid.top_left(), grid.bottom_right(), &constraints)
            .unwrap()
            .cost;
        assert!(seed.cost >= optimum);

        let total: u32 = seed.states[1..]
            .iter()
            .map(|s| u32::from(grid.cost(s.position).unwrap()))
            .sum();
        assert_eq!(total, seed.cost);
        assert!(seed.states[1..].iter().all(|s| s.run >= 1 && s.run <= 3));
    }

    #[test]
    fn mismatched_bound_table_is_rejected() {
        let grid: CostGrid = "12\n34".parse().unwrap();
        let table = LowerBoundTable::build(&grid, grid.top_left()).unwrap();
        let err = search(
            &grid,
            grid.top_left(),
            grid.bottom_right(),
            &RunConstraints::normal(),
            &table,
        )
        .expect_err("wrong table");
        assert!(matches!(err, Error::BoundsTargetMismatch { .. }));
    }

    #[test]
    fn near_max_costs_saturate_and_are_pruned() {
        let (grid, table) = setup("19\n11");
        let from = Frame {
            state: root_state(grid.top_left()),
            cost: u32::MAX - 3,
        };
        let mut buf = vec![Transition {
            state: State::new(Position::new(0, 1), Heading::Right, 1),
            cost: 9,
        }];
        let mut labels = HashMap::new();
        let mut parents = PredecessorMap::new();
        let mut stack = Vec::new();
        let mut stats = SearchStats::default();

        push_candidates(
            &mut buf,
            from,
            u32::MAX,
            &table,
            &mut labels,
            &mut parents,
            &mut stack,
            &mut stats,
        );
        assert!(stack.is_empty());
        assert_eq!(stats.pushed, 0);
    }
}
