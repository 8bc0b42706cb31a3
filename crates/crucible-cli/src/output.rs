//! Output formatting for solve reports and lower-bound tables.
//!
//! Every renderer writes to a caller-supplied [`Write`] so commands can
//! target stdout while tests capture into a buffer.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use crucible_lib::{LowerBoundTable, MapCell, PathMap, Position, SolveSummary};

use crate::terminal::ColorPalette;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Lower-bound table in a serialisable shape, `None` marking unreachable cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundsReport {
    pub target: Position,
    pub rows: Vec<Vec<Option<u32>>>,
}

impl BoundsReport {
    pub fn from_table(table: &LowerBoundTable) -> Self {
        let rows = (0..table.rows())
            .map(|row| {
                (0..table.cols())
                    .map(|col| table.get(Position::new(row, col)))
                    .collect()
            })
            .collect();
        Self {
            target: table.target(),
            rows,
        }
    }
}

/// Render one solve result as a single summary line.
///
/// e.g. `normal: cost 102 (frontier, verified by backtracking)`.
pub fn render_solve_text<W: Write>(
    out: &mut W,
    summary: &SolveSummary,
    palette: ColorPalette,
) -> io::Result<()> {
    let verified = match summary.verified_by {
        Some(engine) => format!(
            ", {}verified by {engine}{}",
            palette.green, palette.reset
        ),
        None => String::new(),
    };
    writeln!(
        out,
        "{}: cost {}{}{} ({}{verified})",
        summary.label(),
        palette.white_bold,
        summary.cost,
        palette.reset,
        summary.engine
    )
}

/// Render the grid with the path drawn over it.
pub fn render_path_map<W: Write>(
    out: &mut W,
    map: &PathMap,
    palette: ColorPalette,
) -> io::Result<()> {
    for row in map.rows() {
        for &cell in row {
            let color = match cell {
                MapCell::Cost(_) => palette.gray,
                MapCell::Step(_) => palette.cyan,
                MapCell::Start(_) => palette.tag_start,
                MapCell::Finish => palette.tag_finish,
            };
            write!(out, "{color}{}{}", cell.symbol(), palette.reset)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render a lower-bound table as right-aligned columns, `.` for unreachable cells.
pub fn render_bounds_text<W: Write>(
    out: &mut W,
    report: &BoundsReport,
    palette: ColorPalette,
) -> io::Result<()> {
    let width = report
        .rows
        .iter()
        .flatten()
        .flatten()
        .map(|bound| bound.to_string().len())
        .max()
        .unwrap_or(1);

    writeln!(out, "lower bounds to {}:", report.target)?;
    for row in &report.rows {
        let mut first = true;
        for bound in row {
            if !first {
                write!(out, " ")?;
            }
            first = false;
            match bound {
                Some(value) => write!(out, "{value:>width$}")?,
                None => write!(out, "{}{:>width$}{}", palette.red, ".", palette.reset)?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render any serialisable value as pretty JSON followed by a newline.
pub fn render_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
