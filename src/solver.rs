//! This module contains the logic for solving puzzles and for answering
//! placement checks on behalf of the API.
//!
//! [BacktrackingSolver] performs the search itself: a depth-first
//! trial-and-error walk over the empty cells which undoes a choice when
//! it cannot lead to a solution. [SudokuSolver] is the entry point the
//! HTTP layer calls into; it validates raw request inputs, builds the
//! grid, and delegates to the search or to the
//! [constraint](crate::constraint) module.

use crate::{GRID_SIZE, SudokuGrid};
use crate::constraint::{
    self,
    ColumnConstraint,
    Constraint,
    PlacementResult,
    RegionConstraint,
    RowConstraint
};
use crate::error::SudokuError;

/// The outcome of a solver run: either a completed grid or the statement
/// that the puzzle has no solution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Solution {

    /// The puzzle was solved; the full grid is wrapped in this instance.
    Solved(SudokuGrid),

    /// The search space was exhausted without finding a solution.
    Impossible
}

/// A trait for structs which have the ability to solve Sudoku grids.
pub trait Solver {

    /// Solves, or attempts to solve, the provided grid. The input grid is
    /// not modified; the solution, if any, is returned as a new grid.
    fn solve(&self, grid: &SudokuGrid) -> Solution;
}

/// A [Solver] which finds a solution by exhaustive backtracking: locate
/// the first empty cell in row-major order, try the digits 1 to 9 in
/// ascending order, and recurse on the rest of the grid for each digit
/// the constraint checker permits. The first successful recursion is
/// propagated immediately; if no digit works, the cell is reset and
/// failure reported to the caller.
///
/// Both scan order and digit order are deterministic, so the same puzzle
/// always produces the same solution. Recursion depth is bounded by the
/// 81 cells of the grid. Worst-case runtime is exponential in the number
/// of empty cells, and there is no built-in interruption point; callers
/// needing a bound must impose an external deadline.
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    fn solve_rec(grid: &mut SudokuGrid) -> bool {
        let (row, column) = match grid.first_empty_cell() {
            Some(cell) => cell,
            None => return true
        };

        for digit in 1..=9 {
            if constraint::check_all(grid, row, column, digit).valid {
                grid.set(row, column, digit);

                if BacktrackingSolver::solve_rec(grid) {
                    return true;
                }

                grid.clear(row, column);
            }
        }

        false
    }
}

impl Solver for BacktrackingSolver {
    fn solve(&self, grid: &SudokuGrid) -> Solution {
        let mut work = grid.clone();

        if BacktrackingSolver::solve_rec(&mut work) {
            Solution::Solved(work)
        }
        else {
            Solution::Impossible
        }
    }
}

fn parse_value(value: &str) -> Result<u8, SudokuError> {
    let mut chars = value.chars();

    match (chars.next(), chars.next()) {
        (Some(digit @ '1'..='9'), None) => Ok(digit as u8 - b'0'),
        _ => Err(SudokuError::InvalidValue)
    }
}

/// Verifies that every filled cell of a completed grid is a valid
/// placement against the rest of the grid. The search only constrains the
/// cells it fills, so givens that contradicted each other from the start
/// would otherwise slip through.
fn verify_solved_grid(grid: &mut SudokuGrid) -> bool {
    for row in 0..GRID_SIZE {
        for column in 0..GRID_SIZE {
            match grid.get(row, column) {
                Some(digit) =>
                    if !constraint::check_all(grid, row, column, digit)
                            .valid {
                        return false;
                    }
                None => return false
            }
        }
    }

    true
}

/// The facade of the engine. Every operation takes the raw strings of an
/// API request, validates them, builds a fresh [SudokuGrid], and performs
/// the work on it. Each call owns its grid exclusively; nothing is cached
/// or shared between invocations, so concurrent calls cannot observe each
/// other's intermediate state.
#[derive(Clone, Copy, Default)]
pub struct SudokuSolver;

impl SudokuSolver {

    /// Solves the given puzzle string and returns the solution as a full
    /// 81-character puzzle string with no empty cells.
    ///
    /// The successfully completed grid is re-verified cell by cell before
    /// it is serialized; puzzles whose givens already contradict each
    /// other are thereby reported as unsolvable even if the search
    /// managed to fill every empty cell.
    ///
    /// # Errors
    ///
    /// * Any validation error of [SudokuGrid::parse].
    /// * `SudokuError::Unsolvable` if the search exhausts the entire
    /// search space without finding a solution, or the completed grid
    /// fails re-verification.
    pub fn solve(&self, puzzle: &str) -> Result<String, SudokuError> {
        let grid = SudokuGrid::parse(puzzle)?;

        match BacktrackingSolver.solve(&grid) {
            Solution::Solved(mut solved) =>
                if verify_solved_grid(&mut solved) {
                    Ok(solved.to_puzzle_string())
                }
                else {
                    Err(SudokuError::Unsolvable)
                }
            Solution::Impossible => Err(SudokuError::Unsolvable)
        }
    }

    /// Checks whether `value` may occupy the cell named by `coordinate`
    /// against all three constraints, returning the union of every
    /// violated conflict kind.
    ///
    /// # Errors
    ///
    /// Validation runs before any check, in this order:
    ///
    /// * Any validation error of [SudokuGrid::parse] for `puzzle`.
    /// * `SudokuError::InvalidValue` if `value` is not a single digit `1`
    /// to `9`.
    /// * `SudokuError::InvalidCoordinate` if `coordinate` is not a row
    /// letter `A` to `I` followed by a column digit `1` to `9`.
    pub fn check_placement(&self, puzzle: &str, coordinate: &str,
            value: &str) -> Result<PlacementResult, SudokuError> {
        let (mut grid, coordinate, digit) =
            self.process_input(puzzle, coordinate, value)?;

        Ok(constraint::check_all(&mut grid, coordinate.row,
            coordinate.column, digit))
    }

    /// Checks the placement against the row constraint only. The result
    /// reports at most the `row` conflict kind. Validation is the same as
    /// for [SudokuSolver::check_placement].
    pub fn check_row_placement(&self, puzzle: &str, coordinate: &str,
            value: &str) -> Result<PlacementResult, SudokuError> {
        self.check_single(&RowConstraint, puzzle, coordinate, value)
    }

    /// Checks the placement against the column constraint only. The
    /// result reports at most the `column` conflict kind. Validation is
    /// the same as for [SudokuSolver::check_placement].
    pub fn check_column_placement(&self, puzzle: &str, coordinate: &str,
            value: &str) -> Result<PlacementResult, SudokuError> {
        self.check_single(&ColumnConstraint, puzzle, coordinate, value)
    }

    /// Checks the placement against the region constraint only. The
    /// result reports at most the `region` conflict kind. Validation is
    /// the same as for [SudokuSolver::check_placement].
    pub fn check_region_placement(&self, puzzle: &str, coordinate: &str,
            value: &str) -> Result<PlacementResult, SudokuError> {
        self.check_single(&RegionConstraint, puzzle, coordinate, value)
    }

    fn check_single(&self, constraint: &dyn Constraint, puzzle: &str,
            coordinate: &str, value: &str)
            -> Result<PlacementResult, SudokuError> {
        let (mut grid, coordinate, digit) =
            self.process_input(puzzle, coordinate, value)?;

        Ok(constraint.check_placement(&mut grid, coordinate.row,
            coordinate.column, digit))
    }

    fn process_input(&self, puzzle: &str, coordinate: &str, value: &str)
            -> Result<(SudokuGrid, crate::Coordinate, u8), SudokuError> {
        let grid = SudokuGrid::parse(puzzle)?;
        let digit = parse_value(value)?;
        let coordinate = coordinate.parse()?;

        Ok((grid, coordinate, digit))
    }
}
