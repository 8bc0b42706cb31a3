//! Solve command handler for computing minimum path costs.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};

use crucible_lib::{
    solve, CostGrid, PathMap, Position, RunConstraints, SearchStrategy, SolveRequest, SolveSummary,
};

use crate::commands::read_grid;
use crate::output::{render_json, render_path_map, render_solve_text, OutputFormat};
use crate::terminal::ColorPalette;

/// Named run-length configurations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Runs of 1 to 3 cells.
    Normal,
    /// Runs of 4 to 10 cells.
    Ultra,
    /// `normal` then `ultra`.
    #[default]
    All,
}

impl Preset {
    pub fn constraints(self) -> Vec<RunConstraints> {
        match self {
            Preset::Normal => vec![RunConstraints::normal()],
            Preset::Ultra => vec![RunConstraints::ultra()],
            Preset::All => vec![RunConstraints::normal(), RunConstraints::ultra()],
        }
    }
}

/// Arguments for the solve command.
#[derive(Debug, Clone, Args)]
pub struct SolveCommandArgs {
    /// Grid file of digit rows, or `-` to read stdin.
    #[arg(long, short)]
    pub input: PathBuf,

    /// Run-length preset to solve for.
    #[arg(long, value_enum, default_value_t = Preset::All)]
    pub preset: Preset,

    /// Minimum run before turning or stopping; overrides the preset.
    #[arg(long, requires = "max_run")]
    pub min_run: Option<u32>,

    /// Maximum run before a turn is forced; overrides the preset.
    #[arg(long, requires = "min_run")]
    pub max_run: Option<u32>,

    /// Search engine to run (frontier or backtracking).
    #[arg(long, default_value = "frontier")]
    pub engine: SearchStrategy,

    /// Also run the other engine and fail if the costs differ.
    #[arg(long)]
    pub verify: bool,

    /// Draw the optimal path over the grid.
    #[arg(long)]
    pub show_path: bool,

    /// Start cell as ROW,COL (defaults to the top-left corner).
    #[arg(long)]
    pub start: Option<Position>,

    /// Target cell as ROW,COL (defaults to the bottom-right corner).
    #[arg(long)]
    pub target: Option<Position>,

    /// Fail unless every computed cost equals this value.
    #[arg(long)]
    pub expect: Option<u32>,
}

impl SolveCommandArgs {
    /// Constraint sets to solve, explicit bounds taking precedence over the preset.
    pub fn constraint_sets(&self) -> Result<Vec<RunConstraints>> {
        match (self.min_run, self.max_run) {
            (Some(min_run), Some(max_run)) => Ok(vec![RunConstraints::new(min_run, max_run)
                .context("invalid run-length bounds")?]),
            _ => Ok(self.preset.constraints()),
        }
    }

    fn request(&self, grid: &CostGrid, constraints: RunConstraints) -> SolveRequest {
        let mut request =
            SolveRequest::corners(grid, constraints).with_strategy(self.engine);
        request.start = self.start.unwrap_or(request.start);
        request.target = self.target.unwrap_or(request.target);
        request.verify = self.verify;
        request
    }
}

/// Handle the solve subcommand.
///
/// Solves every requested constraint set, renders the results, then checks
/// `--expect` so the report is still printed on a mismatch.
pub fn handle_solve_command<W: Write>(
    args: &SolveCommandArgs,
    format: OutputFormat,
    palette: ColorPalette,
    out: &mut W,
) -> Result<()> {
    let grid = read_grid(&args.input)?;
    tracing::debug!(rows = grid.rows(), cols = grid.cols(), "loaded grid");

    let mut summaries = Vec::new();
    let mut maps = Vec::new();
    for constraints in args.constraint_sets()? {
        let request = args.request(&grid, constraints);
        let solution = solve(&grid, &request)
            .with_context(|| format!("failed to solve for {constraints}"))?;
        tracing::info!(
            constraints = %constraints,
            engine = %solution.outcome.strategy,
            cost = solution.cost(),
            expanded = solution.outcome.stats.expanded,
            "solved"
        );
        let summary = SolveSummary::from_solution(&solution, args.show_path);
        if args.show_path {
            maps.push(PathMap::build(&grid, &summary.path));
        }
        summaries.push(summary);
    }

    match format {
        OutputFormat::Json => render_json(out, &summaries)?,
        OutputFormat::Text => {
            for (index, summary) in summaries.iter().enumerate() {
                render_solve_text(out, summary, palette)?;
                if let Some(map) = maps.get(index) {
                    render_path_map(out, map, palette)?;
                }
            }
        }
    }

    if let Some(expected) = args.expect {
        for summary in &summaries {
            if summary.cost != expected {
                bail!(
                    "expected cost {expected} but {} found {}",
                    summary.label(),
                    summary.cost
                );
            }
        }
    }
    Ok(())
}
