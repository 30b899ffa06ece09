// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

//! This crate implements the engine behind a small Sudoku web service. It
//! supports the following key features:
//!
//! * Parsing and printing 9x9 Sudoku grids, which are exchanged as
//! 81-character puzzle strings
//! * Checking whether a digit may occupy a cell without violating the row,
//! column, or 3x3 region uniqueness rules, reporting *all* violated rules
//! * Solving puzzles with an exhaustive backtracking search
//! * Serving both operations over HTTP as `POST /api/solve` and
//! `POST /api/check`
//!
//! # Puzzle strings
//!
//! The only exchange format is the puzzle string: exactly 81 characters,
//! row-major, where each character is a digit `1` to `9` or a `.` denoting
//! an empty cell. See [SudokuGrid::parse] for the validation rules.
//!
//! ```
//! use sudoku_api::SudokuGrid;
//!
//! let grid = SudokuGrid::parse(
//!     "1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37."
//! ).unwrap();
//!
//! assert_eq!(Some(1), grid.get(0, 0));
//! assert_eq!(None, grid.get(0, 1));
//! ```
//!
//! # Checking placements
//!
//! [check_all](constraint::check_all) decides whether a digit may occupy a
//! cell and collects every violated rule, not just the first one. A cell
//! that already holds the candidate digit does not conflict with itself.
//!
//! ```
//! use sudoku_api::SudokuGrid;
//! use sudoku_api::constraint::{check_all, Conflict};
//!
//! let mut grid = SudokuGrid::parse(
//!     "1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37."
//! ).unwrap();
//!
//! assert!(check_all(&mut grid, 0, 1, 3).valid);
//! assert_eq!(vec![Conflict::Column], check_all(&mut grid, 0, 1, 9).conflict);
//! ```
//!
//! # Solving puzzles
//!
//! [SudokuSolver](solver::SudokuSolver) validates a puzzle string, runs the
//! backtracking search, and returns the solved puzzle string or a typed
//! [SudokuError](error::SudokuError).
//!
//! ```
//! use sudoku_api::solver::SudokuSolver;
//!
//! let solution = SudokuSolver.solve(
//!     "1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37."
//! ).unwrap();
//!
//! assert_eq!(81, solution.len());
//! assert!(!solution.contains('.'));
//! ```
//!
//! # The HTTP layer
//!
//! The [api] module exposes both operations as an axum router; the
//! `sudoku-api` binary serves it. The HTTP layer is deliberately thin: it
//! extracts fields, performs fast shape rejections, and relays the
//! engine's result or error message verbatim as JSON.

pub mod api;
pub mod constraint;
pub mod error;
pub mod solver;

use error::SudokuError;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// The number of rows, columns, and regions of a grid.
pub const GRID_SIZE: usize = 9;

/// The number of rows and columns of one 3x3 region.
pub(crate) const REGION_SIZE: usize = 3;

/// The total number of cells of a grid, which is also the required length
/// of a puzzle string.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// The character denoting an empty cell in a puzzle string.
pub const EMPTY_CELL: char = '.';

pub(crate) fn index(row: usize, column: usize) -> usize {
    row * GRID_SIZE + column
}

/// A Sudoku grid is a fixed 9x9 matrix of cells, each either holding a
/// digit 1 to 9 or empty. It is built from and serialized to the
/// 81-character puzzle string format and offers raw cell access for the
/// constraint checker and the solver. The grid itself carries no rule
/// logic beyond its shape.
///
/// Cells are stored row-major, so the linear index of a cell is
/// `row * 9 + column`. The shape is fixed at construction; only cell
/// contents change afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SudokuGrid {
    cells: [Option<u8>; CELL_COUNT]
}

impl SudokuGrid {

    /// Creates a new, completely empty grid.
    pub fn new() -> SudokuGrid {
        SudokuGrid {
            cells: [None; CELL_COUNT]
        }
    }

    /// Parses a puzzle string into a grid. The string must be exactly 81
    /// characters long and each character must be a digit `1` to `9` or
    /// [EMPTY_CELL]. Entries are assigned left-to-right, top-to-bottom,
    /// where each row is completed before the next one is started.
    ///
    /// Violations are reported in a fixed priority order, and nothing is
    /// built once one is found.
    ///
    /// # Errors
    ///
    /// * `SudokuError::MissingInput` if `puzzle` is empty.
    /// * `SudokuError::InvalidLength` if `puzzle` is not 81 characters
    /// long.
    /// * `SudokuError::InvalidCharacters` if `puzzle` contains any
    /// character other than `1` to `9` and `.`.
    pub fn parse(puzzle: &str) -> Result<SudokuGrid, SudokuError> {
        if puzzle.is_empty() {
            return Err(SudokuError::MissingInput);
        }

        if puzzle.chars().count() != CELL_COUNT {
            return Err(SudokuError::InvalidLength);
        }

        let mut cells = [None; CELL_COUNT];

        for (i, c) in puzzle.chars().enumerate() {
            cells[i] = match c {
                EMPTY_CELL => None,
                '1'..='9' => Some(c as u8 - b'0'),
                _ => return Err(SudokuError::InvalidCharacters)
            };
        }

        Ok(SudokuGrid {
            cells
        })
    }

    /// Gets the content of the cell at the specified position, where
    /// `None` represents an empty cell.
    ///
    /// # Panics
    ///
    /// If `row` or `column` is greater than 8. Callers are expected to
    /// respect the grid shape; external coordinates are normalized through
    /// [Coordinate] before they reach the grid.
    pub fn get(&self, row: usize, column: usize) -> Option<u8> {
        assert!(row < GRID_SIZE && column < GRID_SIZE);

        self.cells[index(row, column)]
    }

    /// Sets the content of the cell at the specified position to the given
    /// digit, which must be in the range `[1, 9]`. If the cell was not
    /// empty, the old digit is overwritten.
    ///
    /// # Panics
    ///
    /// If `row` or `column` is greater than 8 or `digit` is outside
    /// `[1, 9]`.
    pub fn set(&mut self, row: usize, column: usize, digit: u8) {
        assert!(row < GRID_SIZE && column < GRID_SIZE);
        assert!((1..=9).contains(&digit));

        self.cells[index(row, column)] = Some(digit);
    }

    /// Clears the cell at the specified position, that is, marks it empty.
    ///
    /// # Panics
    ///
    /// If `row` or `column` is greater than 8.
    pub fn clear(&mut self, row: usize, column: usize) {
        assert!(row < GRID_SIZE && column < GRID_SIZE);

        self.cells[index(row, column)] = None;
    }

    /// Flattens the grid back into the 81-character puzzle string. This is
    /// the exact inverse of [SudokuGrid::parse] for any valid puzzle
    /// string.
    ///
    /// ```
    /// use sudoku_api::SudokuGrid;
    ///
    /// let puzzle =
    ///     "..9..5.1.85.4....2432......1...69.83.9.....6.62.71...9......1945....4.37.4.3..6..";
    /// let grid = SudokuGrid::parse(puzzle).unwrap();
    ///
    /// assert_eq!(puzzle, grid.to_puzzle_string());
    /// ```
    pub fn to_puzzle_string(&self) -> String {
        self.cells.iter()
            .map(|cell| match cell {
                Some(digit) => (b'0' + digit) as char,
                None => EMPTY_CELL
            })
            .collect()
    }

    /// Finds the first empty cell in row-major order and returns its
    /// `(row, column)` position, or `None` if the grid is full. The scan
    /// order is deterministic, which keeps solver results reproducible.
    pub fn first_empty_cell(&self) -> Option<(usize, usize)> {
        self.cells.iter()
            .position(Option::is_none)
            .map(|i| (i / GRID_SIZE, i % GRID_SIZE))
    }

    /// Indicates whether every cell of this grid holds a digit.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|cell| cell == &None)
    }
}

impl Default for SudokuGrid {
    fn default() -> SudokuGrid {
        SudokuGrid::new()
    }
}

fn to_char(cell: Option<u8>) -> char {
    if let Some(digit) = cell {
        (b'0' + digit) as char
    }
    else {
        ' '
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char) -> String {
    let mut result = String::new();

    for column in 0..GRID_SIZE {
        if column == 0 {
            result.push(start);
        }
        else if column % REGION_SIZE == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(column));
        result.push(pad);
    }

    result.push(end);
    result
}

impl Display for SudokuGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let top_row = line('╔', '╦', '╤', |_| '═', '═', '╗');
        let thin_separator = line('╟', '╫', '┼', |_| '─', '─', '╢');
        let thick_separator = line('╠', '╬', '╪', |_| '═', '═', '╣');
        let bottom_row = line('╚', '╩', '╧', |_| '═', '═', '╝');

        for row in 0..GRID_SIZE {
            if row == 0 {
                writeln!(f, "{}", top_row)?;
            }
            else if row % REGION_SIZE == 0 {
                writeln!(f, "{}", thick_separator)?;
            }
            else {
                writeln!(f, "{}", thin_separator)?;
            }

            let content = line('║', '║', '│',
                |column| to_char(self.get(row, column)), ' ', '║');
            writeln!(f, "{}", content)?;
        }

        write!(f, "{}", bottom_row)
    }
}

/// A cell position normalized to zero-based `(row, column)` indices, each
/// in `[0, 8]`. Externally, cells are addressed by a row letter `A` to `I`
/// followed by a column digit `1` to `9`, e.g. `A2` for row 0, column 1;
/// parsing such a name is the only way to build a `Coordinate` from user
/// input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Coordinate {

    /// The zero-based row index, counted from the top.
    pub row: usize,

    /// The zero-based column index, counted from the left.
    pub column: usize
}

impl FromStr for Coordinate {
    type Err = SudokuError;

    fn from_str(s: &str) -> Result<Coordinate, SudokuError> {
        let mut chars = s.chars();
        let row_name = chars.next().ok_or(SudokuError::InvalidCoordinate)?;
        let column_name = chars.next().ok_or(SudokuError::InvalidCoordinate)?;

        if chars.next().is_some() {
            return Err(SudokuError::InvalidCoordinate);
        }

        if !('A'..='I').contains(&row_name) ||
                !('1'..='9').contains(&column_name) {
            return Err(SudokuError::InvalidCoordinate);
        }

        Ok(Coordinate {
            row: row_name as usize - 'A' as usize,
            column: column_name as usize - '1' as usize
        })
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let row_name = (b'A' + self.row as u8) as char;
        let column_name = (b'1' + self.column as u8) as char;
        write!(f, "{}{}", row_name, column_name)
    }
}
