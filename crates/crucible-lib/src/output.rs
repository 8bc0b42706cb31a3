use std::collections::HashMap;

use serde::Serialize;

use crate::constraints::RunConstraints;
use crate::grid::{CostGrid, Heading, Position};
use crate::search::SearchStrategy;
use crate::solver::Solution;

/// Structured representation of a solution that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SolveSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<&'static str>,
    pub min_run: u32,
    pub max_run: u32,
    pub engine: SearchStrategy,
    pub cost: u32,
    pub start: Position,
    pub target: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<SearchStrategy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Position>,
}

impl SolveSummary {
    /// Summarise `solution`, optionally including every path cell.
    pub fn from_solution(solution: &Solution, include_path: bool) -> Self {
        let constraints: RunConstraints = solution.request.constraints;
        Self {
            preset: constraints.preset_name(),
            min_run: constraints.min_run(),
            max_run: constraints.max_run(),
            engine: solution.outcome.strategy,
            cost: solution.cost(),
            start: solution.request.start,
            target: solution.request.target,
            verified_by: solution.verified_by,
            path: if include_path {
                solution.cells()
            } else {
                Vec::new()
            },
        }
    }

    /// Label shown in textual renderings, e.g. `normal` or `runs 2..=5`.
    pub fn label(&self) -> String {
        match self.preset {
            Some(name) => name.to_string(),
            None => format!("runs {}..={}", self.min_run, self.max_run),
        }
    }
}

/// One cell of a [`PathMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCell {
    /// Off the path; shows the cell's cost.
    Cost(u8),
    /// On the path, entered moving in this heading.
    Step(Heading),
    /// Where the path starts.
    Start(u8),
    /// Where the path ends.
    Finish,
}

impl MapCell {
    /// Plain single-character rendering.
    pub fn symbol(self) -> char {
        match self {
            MapCell::Cost(value) | MapCell::Start(value) => char::from(b'0' + value),
            MapCell::Step(heading) => heading.glyph(),
            MapCell::Finish => 'O',
        }
    }
}

/// The grid with a path drawn over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMap {
    rows: Vec<Vec<MapCell>>,
}

impl PathMap {
    /// Draw `cells` (a contiguous path, start-first) over `grid`.
    ///
    /// Cells not on the grid are ignored.
    pub fn build(grid: &CostGrid, cells: &[Position]) -> Self {
        let mut marks: HashMap<Position, MapCell> = HashMap::new();
        for pair in cells.windows(2) {
            if let Some(heading) = heading_between(pair[0], pair[1]) {
                marks.insert(pair[1], MapCell::Step(heading));
            }
        }
        if let (Some(&first), Some(&last)) = (cells.first(), cells.last()) {
            if let Ok(value) = grid.cost(first) {
                marks.insert(first, MapCell::Start(value));
            }
            if cells.len() > 1 {
                marks.insert(last, MapCell::Finish);
            }
        }

        let rows = (0..grid.rows())
            .map(|row| {
                (0..grid.cols())
                    .map(|col| {
                        let position = Position::new(row, col);
                        marks.get(&position).copied().unwrap_or_else(|| {
                            MapCell::Cost(grid.cost(position).unwrap_or_default())
                        })
                    })
                    .collect()
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<MapCell>] {
        &self.rows
    }

    /// Render without styling, one line per grid row.
    pub fn to_plain_string(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            for cell in row {
                out.push(cell.symbol());
            }
            out.push('\n');
        }
        out
    }
}

fn heading_between(from: Position, to: Position) -> Option<Heading> {
    Heading::ALL
        .into_iter()
        .find(|&heading| from.offset(heading) == Some(to))
}
