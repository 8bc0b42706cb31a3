//! Bounds command handler for inspecting the pruning table.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crucible_lib::{LowerBoundTable, Position};

use crate::commands::read_grid;
use crate::output::{render_bounds_text, render_json, BoundsReport, OutputFormat};
use crate::terminal::ColorPalette;

/// Arguments for the bounds command.
#[derive(Debug, Clone, Args)]
pub struct BoundsCommandArgs {
    /// Grid file of digit rows, or `-` to read stdin.
    #[arg(long, short)]
    pub input: PathBuf,

    /// Target cell as ROW,COL (defaults to the bottom-right corner).
    #[arg(long)]
    pub target: Option<Position>,
}

/// Handle the bounds subcommand.
pub fn handle_bounds_command<W: Write>(
    args: &BoundsCommandArgs,
    format: OutputFormat,
    palette: ColorPalette,
    out: &mut W,
) -> Result<()> {
    let grid = read_grid(&args.input)?;
    let target = args.target.unwrap_or_else(|| grid.bottom_right());
    let table = LowerBoundTable::build(&grid, target)
        .with_context(|| format!("failed to build lower bounds to {target}"))?;
    let report = BoundsReport::from_table(&table);

    match format {
        OutputFormat::Json => render_json(out, &report)?,
        OutputFormat::Text => render_bounds_text(out, &report, palette)?,
    }
    Ok(())
}
