//! Grid geometry and the immutable [`CostGrid`].
//!
//! Rows grow downward and columns grow rightward. Entering a cell costs its
//! digit; the cell a walk starts on is never charged.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A cell coordinate. Only meaningful relative to a grid's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbouring coordinate one cell away in `heading`.
    ///
    /// Returns `None` when the move would leave the top or left edge; the
    /// bottom and right edges are checked by [`CostGrid::step`].
    pub fn offset(self, heading: Heading) -> Option<Position> {
        let (dr, dc) = heading.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Position { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = String;

    /// Parses `"row,col"`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL but got '{s}'"))?;
        let row = row
            .trim()
            .parse()
            .map_err(|_| format!("invalid row in '{s}'"))?;
        let col = col
            .trim()
            .parse()
            .map_err(|_| format!("invalid column in '{s}'"))?;
        Ok(Position { row, col })
    }
}

/// Axis-aligned direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// All four headings, clockwise from `Up`.
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    /// Heading after a 90° counter-clockwise turn.
    pub fn turn_left(self) -> Heading {
        match self {
            Heading::Up => Heading::Left,
            Heading::Left => Heading::Down,
            Heading::Down => Heading::Right,
            Heading::Right => Heading::Up,
        }
    }

    /// Heading after a 90° clockwise turn.
    pub fn turn_right(self) -> Heading {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }

    /// The opposite heading. Never a legal transition.
    pub fn reverse(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// `(row, col)` delta of a single step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Heading::Up => (-1, 0),
            Heading::Down => (1, 0),
            Heading::Left => (0, -1),
            Heading::Right => (0, 1),
        }
    }

    /// Single-character arrow used when drawing paths.
    pub fn glyph(self) -> char {
        match self {
            Heading::Up => '^',
            Heading::Down => 'v',
            Heading::Left => '<',
            Heading::Right => '>',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Heading::Up => "up",
            Heading::Down => "down",
            Heading::Left => "left",
            Heading::Right => "right",
        };
        f.write_str(value)
    }
}

/// Rectangular grid of single-digit entry costs. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGrid {
    cells: Vec<u8>,
    rows: usize,
    cols: usize,
}

impl CostGrid {
    /// Build a grid from rows of digit values (each `0..=9`).
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(Error::invalid_grid("grid has no rows"));
        };
        let cols = first.len();
        if cols == 0 {
            return Err(Error::invalid_grid("grid rows are empty"));
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::invalid_grid(format!(
                    "row {} has {} cells, expected {}",
                    index + 1,
                    row.len(),
                    cols
                )));
            }
            if let Some(col) = row.iter().position(|&value| value > 9) {
                return Err(Error::invalid_grid(format!(
                    "cost {} at row {}, column {} is not a single digit",
                    row[col],
                    index + 1,
                    col + 1
                )));
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            cells,
            rows: rows.len(),
            cols,
        })
    }

    /// Load and parse a grid file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        text.parse()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `position` lies inside `[0, rows) x [0, cols)`.
    pub fn in_bounds(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// Cost of entering `position`.
    pub fn cost(&self, position: Position) -> Result<u8> {
        self.ensure_in_bounds(position)?;
        Ok(self.cells[position.row * self.cols + position.col])
    }

    /// Fail with [`Error::OutOfBounds`] unless `position` is on the grid.
    pub fn ensure_in_bounds(&self, position: Position) -> Result<()> {
        if self.in_bounds(position) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                position,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// In-bounds neighbour of `position` one step along `heading`.
    pub fn step(&self, position: Position, heading: Heading) -> Option<Position> {
        position
            .offset(heading)
            .filter(|&next| self.in_bounds(next))
    }

    pub fn top_left(&self) -> Position {
        Position::new(0, 0)
    }

    pub fn bottom_right(&self) -> Position {
        Position::new(self.rows - 1, self.cols - 1)
    }

    /// Row-major iterator over every position.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn index(&self, position: Position) -> usize {
        position.row * self.cols + position.col
    }
}

impl FromStr for CostGrid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut lines: Vec<&str> = s.lines().map(str::trim_end).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let mut rows = Vec::with_capacity(lines.len());
        for (line_index, line) in lines.iter().enumerate() {
            let row = line
                .chars()
                .enumerate()
                .map(|(col_index, ch)| {
                    ch.to_digit(10).map(|digit| digit as u8).ok_or_else(|| {
                        Error::invalid_grid(format!(
                            "non-digit character {:?} at line {}, column {}",
                            ch,
                            line_index + 1,
                            col_index + 1
                        ))
                    })
                })
                .collect::<Result<Vec<u8>>>()?;
            rows.push(row);
        }

        CostGrid::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_costs() {
        let grid: CostGrid = "123\n456\n".parse().expect("valid grid");
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.cost(Position::new(1, 2)).unwrap(), 6);
        assert_eq!(grid.bottom_right(), Position::new(1, 2));
    }

    #[test]
    fn accepts_crlf_and_trailing_blank_lines() {
        let grid: CostGrid = "12\r\n34\r\n\r\n\n".parse().expect("valid grid");
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cost(Position::new(1, 0)).unwrap(), 3);
    }

    #[test]
    fn rejects_empty_input() {
        let err = "".parse::<CostGrid>().expect_err("empty grid");
        assert!(matches!(err, Error::InvalidGrid { .. }));
        let err = "\n\n".parse::<CostGrid>().expect_err("blank grid");
        assert!(matches!(err, Error::InvalidGrid { .. }));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = "123\n45\n".parse::<CostGrid>().expect_err("ragged");
        assert!(format!("{err}").contains("row 2 has 2 cells, expected 3"));
    }

    #[test]
    fn rejects_non_digit_characters() {
        let err = "12\n3x\n".parse::<CostGrid>().expect_err("non-digit");
        assert!(format!("{err}").contains("line 2, column 2"));
    }

    #[test]
    fn rejects_out_of_range_row_values() {
        let err = CostGrid::from_rows(vec![vec![1, 12]]).expect_err("two digits");
        assert!(matches!(err, Error::InvalidGrid { .. }));
    }

    #[test]
    fn cost_outside_grid_is_an_error() {
        let grid: CostGrid = "12\n34".parse().unwrap();
        let err = grid.cost(Position::new(2, 0)).expect_err("out of bounds");
        assert!(matches!(
            err,
            Error::OutOfBounds {
                rows: 2,
                cols: 2,
                ..
            }
        ));
        assert!(!grid.in_bounds(Position::new(0, 2)));
    }

    #[test]
    fn step_stops_at_every_edge() {
        let grid: CostGrid = "12\n34".parse().unwrap();
        let origin = grid.top_left();
        assert_eq!(grid.step(origin, Heading::Up), None);
        assert_eq!(grid.step(origin, Heading::Left), None);
        assert_eq!(grid.step(origin, Heading::Right), Some(Position::new(0, 1)));
        assert_eq!(grid.step(grid.bottom_right(), Heading::Down), None);
    }

    #[test]
    fn turns_are_perpendicular_and_reverse_is_opposite() {
        for heading in Heading::ALL {
            assert_eq!(heading.turn_left().turn_right(), heading);
            assert_eq!(heading.turn_left().turn_left(), heading.reverse());
            assert_ne!(heading.turn_right(), heading.reverse());
            let (dr, dc) = heading.delta();
            let (rr, rc) = heading.reverse().delta();
            assert_eq!((dr + rr, dc + rc), (0, 0));
        }
    }

    #[test]
    fn parses_position_pairs() {
        assert_eq!("3, 4".parse::<Position>().unwrap(), Position::new(3, 4));
        assert!("3".parse::<Position>().is_err());
        assert!("a,1".parse::<Position>().is_err());
    }
}
