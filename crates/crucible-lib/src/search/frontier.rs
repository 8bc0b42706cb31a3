use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::constraints::RunConstraints;
use crate::error::{Error, Result};
use crate::grid::{CostGrid, Heading, Position};
use crate::path::PredecessorMap;
use crate::transition::{macro_edges, seed_states, State};

use super::{SearchOutcome, SearchStats, SearchStrategy};

/// Minimum-cost search from `start` to `target` under `constraints`.
///
/// Dijkstra over macro-edges. A `(position, heading)` pair is settled the
/// first time any state for it is popped: the run-length of a macro-edge
/// endpoint does not restrict which macro-edges leave it, so the cheapest
/// arrival dominates every later one. The first popped state on `target`
/// is optimal.
///
/// Costs are `u32` and saturate, so results are exact while the optimum
/// stays below `u32::MAX` (any grid under roughly 4.7e8 cells).
pub fn search(
    grid: &CostGrid,
    start: Position,
    target: Position,
    constraints: &RunConstraints,
) -> Result<SearchOutcome> {
    constraints.validate()?;
    grid.ensure_in_bounds(start)?;
    grid.ensure_in_bounds(target)?;

    let mut open = BinaryHeap::new();
    let mut settled: HashSet<(Position, Heading)> = HashSet::new();
    let mut predecessors = PredecessorMap::new();
    let mut stats = SearchStats::default();
    let mut buf = Vec::new();

    for seed in seed_states(start) {
        open.push(FrontierEntry {
            cost: 0,
            state: seed,
            parent: None,
        });
        stats.pushed += 1;
    }

    while let Some(entry) = open.pop() {
        let state = entry.state;

        if state.position == target {
            if let Some(parent) = entry.parent {
                predecessors.insert(state, parent);
            }
            tracing::debug!(
                cost = entry.cost,
                expanded = stats.expanded,
                pushed = stats.pushed,
                "frontier search reached target"
            );
            return Ok(SearchOutcome {
                strategy: SearchStrategy::Frontier,
                cost: entry.cost,
                final_state: state,
                predecessors,
                stats,
            });
        }

        if !settled.insert((state.position, state.heading)) {
            continue;
        }
        if let Some(parent) = entry.parent {
            predecessors.insert(state, parent);
        }
        stats.expanded += 1;

        buf.clear();
        macro_edges(grid, state, constraints, &mut buf)?;
        for edge in &buf {
            if settled.contains(&(edge.state.position, edge.state.heading)) {
                continue;
            }
            open.push(FrontierEntry {
                cost: entry.cost.saturating_add(edge.cost),
                state: edge.state,
                parent: Some(state),
            });
            stats.pushed += 1;
        }
    }

    tracing::debug!(
        expanded = stats.expanded,
        pushed = stats.pushed,
        "frontier exhausted without reaching target"
    );
    Err(Error::UnreachableTarget { start, target })
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    cost: u32,
    state: State,
    parent: Option<State>,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::expand;

    const EXAMPLE: &str = "\
2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533";

    fn run(text: &str, constraints: RunConstraints) -> Result<SearchOutcome> {
        let grid: CostGrid = text.parse().expect("valid grid");
        search(&grid, grid.top_left(), grid.bottom_right(), &constraints)
    }

    #[test]
    fn example_normal_cost() {
        assert_eq!(run(EXAMPLE, RunConstraints::normal()).unwrap().cost, 102);
    }

    #[test]
    fn example_ultra_cost() {
        assert_eq!(run(EXAMPLE, RunConstraints::ultra()).unwrap().cost, 94);
    }

    #[test]
    fn single_cell_costs_nothing() {
        let outcome = run("7", RunConstraints::ultra()).unwrap();
        assert_eq!(outcome.cost, 0);
        assert_eq!(outcome.waypoints(), vec![Position::new(0, 0)]);
    }

    #[test]
    fn short_corridor_is_unreachable_with_long_minimum_run() {
        let err = run("11", RunConstraints::new(4, 10).unwrap()).expect_err("unreachable");
        assert!(matches!(err, Error::UnreachableTarget { .. }));
    }

    #[test]
    fn off_grid_target_is_rejected() {
        let grid: CostGrid = "11".parse().unwrap();
        let err = search(
            &grid,
            grid.top_left(),
            Position::new(0, 5),
            &RunConstraints::normal(),
        )
        .expect_err("target off grid");
        assert!(matches!(err, Error::OutOfBounds { .. }));
    }

    #[test]
    fn path_cells_sum_to_reported_cost() {
        let grid: CostGrid = EXAMPLE.parse().unwrap();
        let outcome = search(
            &grid,
            grid.top_left(),
            grid.bottom_right(),
            &RunConstraints::ultra(),
        )
        .unwrap();
        let cells = expand(&outcome.waypoints());
        assert_eq!(cells.first(), Some(&grid.top_left()));
        assert_eq!(cells.last(), Some(&grid.bottom_right()));
        let total: u32 = cells[1..]
            .iter()
            .map(|&p| u32::from(grid.cost(p).unwrap()))
            .sum();
        assert_eq!(total, outcome.cost);
    }

    #[test]
    fn arbitrary_endpoints_are_supported() {
        let grid: CostGrid = "111\n191\n111".parse().unwrap();
        let outcome = search(
            &grid,
            Position::new(2, 2),
            Position::new(0, 0),
            &RunConstraints::normal(),
        )
        .unwrap();
        assert_eq!(outcome.cost, 4);
    }
}
