//! Search strategies behind a common trait.
//!
//! Each engine is wrapped in a struct implementing [`SearchEngine`], so
//! [`solve`](super::solve) can run one as the primary and the other as a
//! cross-check without knowing which is which.

use std::sync::Arc;

use crate::constraints::RunConstraints;
use crate::error::Result;
use crate::grid::{CostGrid, Position};
use crate::oracle::LowerBoundTable;
use crate::search::{backtrack, frontier, SearchOutcome, SearchStrategy};

/// Trait for search strategies.
pub trait SearchEngine: Send + Sync {
    /// The strategy identifier for this engine.
    fn strategy(&self) -> SearchStrategy;

    /// Find the minimum legal cost from `start` to `target`.
    fn search(
        &self,
        grid: &CostGrid,
        start: Position,
        target: Position,
        constraints: &RunConstraints,
    ) -> Result<SearchOutcome>;

    /// Whether this engine prunes with a [`LowerBoundTable`].
    fn requires_lower_bounds(&self) -> bool {
        false
    }
}

/// Dijkstra over macro-edges.
#[derive(Debug, Clone, Default)]
pub struct FrontierEngine;

impl SearchEngine for FrontierEngine {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::Frontier
    }

    fn search(
        &self,
        grid: &CostGrid,
        start: Position,
        target: Position,
        constraints: &RunConstraints,
    ) -> Result<SearchOutcome> {
        frontier::search(grid, start, target, constraints)
    }
}

/// Branch-and-bound depth-first search.
///
/// Reuses a shared lower-bound table when it was built for the requested
/// target; otherwise builds one for the call.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingEngine {
    lower_bounds: Option<Arc<LowerBoundTable>>,
}

impl BacktrackingEngine {
    pub fn new(lower_bounds: Option<Arc<LowerBoundTable>>) -> Self {
        Self { lower_bounds }
    }
}

impl SearchEngine for BacktrackingEngine {
    fn strategy(&self) -> SearchStrategy {
        SearchStrategy::Backtracking
    }

    fn search(
        &self,
        grid: &CostGrid,
        start: Position,
        target: Position,
        constraints: &RunConstraints,
    ) -> Result<SearchOutcome> {
        match &self.lower_bounds {
            Some(table) if table.target() == target => {
                backtrack::search(grid, start, target, constraints, table)
            }
            _ => {
                let table = LowerBoundTable::build(grid, target)?;
                backtrack::search(grid, start, target, constraints, &table)
            }
        }
    }

    fn requires_lower_bounds(&self) -> bool {
        true
    }
}

/// Build the engine for `strategy`.
pub fn select_engine(
    strategy: SearchStrategy,
    lower_bounds: Option<Arc<LowerBoundTable>>,
) -> Box<dyn SearchEngine> {
    match strategy {
        SearchStrategy::Frontier => Box::new(FrontierEngine),
        SearchStrategy::Backtracking => Box::new(BacktrackingEngine::new(lower_bounds)),
    }
}
