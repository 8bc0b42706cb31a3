//! Search engines over the constrained state space.
//!
//! - [`frontier`] - Dijkstra over macro-edges; the primary engine.
//! - [`backtrack`] - explicit-stack branch-and-bound over single-cell moves;
//!   an independent cross-check, much slower on large grids.
//!
//! Both return a [`SearchOutcome`] carrying the optimal cost and the
//! predecessor links needed to recover the path.

pub mod backtrack;
pub mod frontier;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::grid::Position;
use crate::path::{expand, reconstruct, PredecessorMap};
use crate::transition::State;

/// Available search engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Priority-frontier (Dijkstra) search over macro-edges.
    #[default]
    Frontier,
    /// Bounded depth-first search over single-cell moves.
    Backtracking,
}

impl SearchStrategy {
    /// The engine used to cross-check this one.
    pub fn counterpart(self) -> SearchStrategy {
        match self {
            SearchStrategy::Frontier => SearchStrategy::Backtracking,
            SearchStrategy::Backtracking => SearchStrategy::Frontier,
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchStrategy::Frontier => "frontier",
            SearchStrategy::Backtracking => "backtracking",
        };
        f.write_str(value)
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frontier" | "dijkstra" => Ok(SearchStrategy::Frontier),
            "backtracking" | "dfs" => Ok(SearchStrategy::Backtracking),
            other => Err(format!("unknown search engine '{other}'")),
        }
    }
}

/// Work counters reported by a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States taken off the queue or stack and expanded.
    pub expanded: usize,
    /// States pushed onto the queue or stack.
    pub pushed: usize,
}

/// Result of one search invocation.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub strategy: SearchStrategy,
    /// Minimum total entered-cell cost from start to target.
    pub cost: u32,
    /// State in which the optimal path reaches the target.
    pub final_state: State,
    /// Parent links along the optimal path.
    pub predecessors: PredecessorMap,
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Recorded states of the optimal path, start-first.
    ///
    /// The frontier engine records turning points; the backtracking engine
    /// records every cell.
    pub fn waypoints(&self) -> Vec<Position> {
        reconstruct(&self.predecessors, self.final_state)
    }

    /// Every cell of the optimal path, start-first.
    pub fn cells(&self) -> Vec<Position> {
        expand(&self.waypoints())
    }
}
