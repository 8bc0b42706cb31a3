//! High-level solving entry points.
//!
//! This module provides:
//! - [`SolveRequest`] - endpoints, run constraints, engine choice, verification
//! - [`Solution`] - the outcome plus which engine confirmed it
//! - [`solve`] - main entry point
//! - [`cross_validate`] - run both engines and insist they agree
//! - [`minimum_cost`] - corner-to-corner cost with the primary engine
//!
//! # Example
//!
//! ```
//! use crucible_lib::{solve, CostGrid, RunConstraints, SolveRequest};
//!
//! let grid: CostGrid = "112\n911\n991".parse()?;
//! let request = SolveRequest::corners(&grid, RunConstraints::normal()).with_verification();
//! let solution = solve(&grid, &request)?;
//! assert_eq!(solution.cost(), 4);
//! # Ok::<(), crucible_lib::Error>(())
//! ```

mod engine;

pub use engine::{select_engine, BacktrackingEngine, FrontierEngine, SearchEngine};

use std::sync::Arc;

use crate::constraints::RunConstraints;
use crate::error::{Error, Result};
use crate::grid::{CostGrid, Position};
use crate::oracle::LowerBoundTable;
use crate::search::{SearchOutcome, SearchStrategy};

/// Grids larger than this make the backtracking engine slow enough to mention.
const BACKTRACKING_WARN_CELLS: usize = 400;

/// High-level solve request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveRequest {
    pub start: Position,
    pub target: Position,
    pub constraints: RunConstraints,
    pub strategy: SearchStrategy,
    /// Also run the counterpart engine and require the same cost.
    pub verify: bool,
}

impl SolveRequest {
    /// Top-left to bottom-right with the frontier engine, unverified.
    pub fn corners(grid: &CostGrid, constraints: RunConstraints) -> Self {
        Self {
            start: grid.top_left(),
            target: grid.bottom_right(),
            constraints,
            strategy: SearchStrategy::Frontier,
            verify: false,
        }
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_verification(mut self) -> Self {
        self.verify = true;
        self
    }
}

/// Solved request.
#[derive(Debug, Clone)]
pub struct Solution {
    pub request: SolveRequest,
    pub outcome: SearchOutcome,
    /// Engine that independently confirmed the cost, when verification ran.
    pub verified_by: Option<SearchStrategy>,
}

impl Solution {
    pub fn cost(&self) -> u32 {
        self.outcome.cost
    }

    /// Every cell of the optimal path, start-first.
    pub fn cells(&self) -> Vec<Position> {
        self.outcome.cells()
    }
}

/// Run the requested engine, and its counterpart when `verify` is set.
pub fn solve(grid: &CostGrid, request: &SolveRequest) -> Result<Solution> {
    request.constraints.validate()?;
    grid.ensure_in_bounds(request.start)?;
    grid.ensure_in_bounds(request.target)?;

    let needs_bounds = request.verify || request.strategy == SearchStrategy::Backtracking;
    if needs_bounds && grid.len() > BACKTRACKING_WARN_CELLS {
        tracing::warn!(
            cells = grid.len(),
            "backtracking search on a large grid may take a long time"
        );
    }
    let lower_bounds = if needs_bounds {
        Some(Arc::new(LowerBoundTable::build(grid, request.target)?))
    } else {
        None
    };

    let primary = select_engine(request.strategy, lower_bounds.clone());
    let outcome = primary.search(grid, request.start, request.target, &request.constraints)?;
    tracing::debug!(
        engine = %primary.strategy(),
        constraints = %request.constraints,
        cost = outcome.cost,
        "primary search finished"
    );

    let verified_by = if request.verify {
        let secondary = select_engine(request.strategy.counterpart(), lower_bounds);
        let check = secondary.search(grid, request.start, request.target, &request.constraints)?;
        ensure_agreement(&outcome, &check)?;
        Some(secondary.strategy())
    } else {
        None
    };

    Ok(Solution {
        request: *request,
        outcome,
        verified_by,
    })
}

/// Run both engines and return `(frontier, backtracking)` outcomes once they agree.
pub fn cross_validate(
    grid: &CostGrid,
    start: Position,
    target: Position,
    constraints: &RunConstraints,
) -> Result<(SearchOutcome, SearchOutcome)> {
    let table = Arc::new(LowerBoundTable::build(grid, target)?);
    let primary = FrontierEngine.search(grid, start, target, constraints)?;
    let check = BacktrackingEngine::new(Some(table)).search(grid, start, target, constraints)?;
    ensure_agreement(&primary, &check)?;
    Ok((primary, check))
}

/// Minimum top-left to bottom-right cost under `constraints`.
pub fn minimum_cost(grid: &CostGrid, constraints: &RunConstraints) -> Result<u32> {
    let request = SolveRequest::corners(grid, *constraints);
    Ok(solve(grid, &request)?.cost())
}

fn ensure_agreement(primary: &SearchOutcome, check: &SearchOutcome) -> Result<()> {
    if primary.cost == check.cost {
        return Ok(());
    }
    tracing::warn!(
        primary = primary.cost,
        secondary = check.cost,
        "search engines disagree"
    );
    Err(Error::EngineMismatch {
        primary_engine: primary.strategy.to_string(),
        primary: primary.cost,
        secondary_engine: check.strategy.to_string(),
        secondary: check.cost,
    })
}
