//! Crucible library entry points.
//!
//! This crate finds minimum-cost paths across grids of single-digit costs
//! when the mover must take between `min_run` and `max_run` steps in one
//! heading before turning. Higher-level consumers (the CLI) should only
//! depend on the items exported here instead of reimplementing behavior.
//!
//! - [`CostGrid`] - parsed, immutable cost grid
//! - [`RunConstraints`] - run-length bounds (`normal`, `ultra`, or custom)
//! - [`frontier_search`] - primary Dijkstra engine over macro-edges
//! - [`backtracking_search`] - bounded depth-first cross-check
//! - [`LowerBoundTable`] - admissible cost-to-target bounds
//! - [`solve`] / [`cross_validate`] - engine selection and verification

#![deny(warnings)]

pub mod constraints;
pub mod error;
pub mod grid;
pub mod oracle;
pub mod output;
pub mod path;
pub mod search;
pub mod solver;
pub mod transition;

pub use constraints::RunConstraints;
pub use error::{Error, Result};
pub use grid::{CostGrid, Heading, Position};
pub use oracle::{LowerBoundTable, UNREACHABLE};
pub use output::{MapCell, PathMap, SolveSummary};
pub use path::{expand, reconstruct, PredecessorMap};
pub use search::backtrack::{greedy_upper_bound, search as backtracking_search, UpperBound};
pub use search::frontier::search as frontier_search;
pub use search::{SearchOutcome, SearchStats, SearchStrategy};
pub use solver::{
    cross_validate, minimum_cost, select_engine, solve, BacktrackingEngine, FrontierEngine,
    SearchEngine, Solution, SolveRequest,
};
pub use transition::{seed_states, State, Transition};
