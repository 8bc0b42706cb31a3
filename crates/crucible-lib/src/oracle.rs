//! Admissible cost-to-target bounds for pruning.
//!
//! The table is the exact shortest-path cost to the target when run-length
//! rules are ignored. Dropping constraints can only add paths, so every entry
//! is a lower bound on the constrained cost from the same cell.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::Result;
use crate::grid::{CostGrid, Heading, Position};

/// Sentinel stored for cells with no route to the target.
pub const UNREACHABLE: u32 = u32::MAX;

/// Per-cell lower bounds on the remaining cost to a fixed target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowerBoundTable {
    target: Position,
    rows: usize,
    cols: usize,
    bounds: Vec<u32>,
}

impl LowerBoundTable {
    /// Run an unconstrained Dijkstra outward from `target`.
    ///
    /// Stepping from `u` back to a neighbour `v` charges `cost(u)`, since a
    /// forward walk from `v` pays for entering `u`.
    pub fn build(grid: &CostGrid, target: Position) -> Result<Self> {
        grid.ensure_in_bounds(target)?;

        let mut bounds = vec![UNREACHABLE; grid.len()];
        let mut open = BinaryHeap::new();
        bounds[grid.index(target)] = 0;
        open.push(CellEntry {
            position: target,
            cost: 0,
        });

        while let Some(CellEntry { position, cost }) = open.pop() {
            if cost > bounds[grid.index(position)] {
                continue;
            }
            let through = cost.saturating_add(u32::from(grid.cost(position)?));
            for heading in Heading::ALL {
                let Some(neighbor) = grid.step(position, heading) else {
                    continue;
                };
                let slot = &mut bounds[grid.index(neighbor)];
                if through < *slot {
                    *slot = through;
                    open.push(CellEntry {
                        position: neighbor,
                        cost: through,
                    });
                }
            }
        }

        let table = Self {
            target,
            rows: grid.rows(),
            cols: grid.cols(),
            bounds,
        };
        tracing::debug!(
            target = %target,
            reachable = table.reachable_count(),
            "built lower-bound table"
        );
        Ok(table)
    }

    /// Lower bound from `position`, or `None` when unreachable or off-grid.
    pub fn get(&self, position: Position) -> Option<u32> {
        if position.row >= self.rows || position.col >= self.cols {
            return None;
        }
        match self.bounds[position.row * self.cols + position.col] {
            UNREACHABLE => None,
            bound => Some(bound),
        }
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells with a finite bound.
    pub fn reachable_count(&self) -> usize {
        self.bounds.iter().filter(|&&b| b != UNREACHABLE).count()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct CellEntry {
    position: Position,
    cost: u32,
}

impl Ord for CellEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the cheapest entry first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for CellEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
