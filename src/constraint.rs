//! This module decides whether a digit may legally occupy a cell of a
//! [SudokuGrid](crate::SudokuGrid) under standard Sudoku rules.
//!
//! Each rule is a [Constraint]: [RowConstraint], [ColumnConstraint], and
//! [RegionConstraint] check the 9 cells of the cell's row, column, and 3x3
//! region respectively. A single constraint reports at most its own
//! [Conflict] kind, while [check_all] runs all three and returns the union
//! of every violated kind. That asymmetry is part of the public API: a
//! client asking for a full check receives `["row", "column", "region"]`
//! if a digit clashes with all three units, never just the first match.
//!
//! ```
//! use sudoku_api::SudokuGrid;
//! use sudoku_api::constraint::{check_all, Conflict, Constraint, RowConstraint};
//!
//! let mut grid = SudokuGrid::new();
//! grid.set(0, 0, 5);
//!
//! // A second 5 in row A violates the row rule only.
//! assert!(!RowConstraint.check_value(&mut grid, 0, 8, 5));
//! assert_eq!(vec![Conflict::Row], check_all(&mut grid, 0, 8, 5).conflict);
//!
//! // Within the top-left region it violates the region rule as well.
//! assert_eq!(vec![Conflict::Column, Conflict::Region],
//!     check_all(&mut grid, 2, 0, 5).conflict);
//! ```
//!
//! # Self-exclusion
//!
//! A filled cell must not conflict with itself: re-checking the digit a
//! cell already holds is valid as long as no *other* cell of the unit
//! holds it too. Checks therefore clear the target cell for the duration
//! of the scan through a [ScopedClear] guard which restores the saved
//! content when it is dropped, so the grid is unchanged on every exit
//! path and repeated checks are idempotent.

use crate::{GRID_SIZE, REGION_SIZE, SudokuGrid};

use serde::Serialize;

/// The kinds of rule violation a placement can cause. The serialized
/// names (`"row"`, `"column"`, `"region"`) are the values of the
/// `conflict` array in API responses.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Conflict {

    /// The candidate digit already occurs in another cell of the row.
    Row,

    /// The candidate digit already occurs in another cell of the column.
    Column,

    /// The candidate digit already occurs in another cell of the 3x3
    /// region.
    Region
}

/// The outcome of checking a placement: either valid, or invalid together
/// with every [Conflict] kind the placement would cause. Serializes to
/// the wire shape of the `/api/check` endpoint, where the `conflict`
/// array is omitted for valid placements.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlacementResult {

    /// Whether the placement violates no constraint.
    pub valid: bool,

    /// The kinds of constraint the placement violates, empty if it is
    /// valid. [check_all] pushes kinds in row, column, region order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflict: Vec<Conflict>
}

impl PlacementResult {
    fn from_conflicts(conflict: Vec<Conflict>) -> PlacementResult {
        PlacementResult {
            valid: conflict.is_empty(),
            conflict
        }
    }
}

/// Temporarily clears the target cell while a unit is scanned, so a cell
/// re-checking its own digit does not count as a conflict against itself.
/// The saved content is written back in `drop`, which guarantees
/// restoration on every exit path, including early returns from a
/// short-circuiting scan.
pub struct ScopedClear<'a> {
    grid: &'a mut SudokuGrid,
    row: usize,
    column: usize,
    saved: Option<u8>
}

impl<'a> ScopedClear<'a> {

    /// Saves the cell at `(row, column)` and clears it if it currently
    /// holds `digit`. Cells holding a different digit are left alone, as
    /// they cannot be mistaken for the candidate during the scan.
    pub fn new(grid: &'a mut SudokuGrid, row: usize, column: usize,
            digit: u8) -> ScopedClear<'a> {
        let saved = grid.get(row, column);

        if saved == Some(digit) {
            grid.clear(row, column);
        }

        ScopedClear {
            grid,
            row,
            column,
            saved
        }
    }

    /// Gets the grid being scanned, with the target cell cleared if it
    /// held the candidate digit.
    pub fn grid(&self) -> &SudokuGrid {
        self.grid
    }
}

impl Drop for ScopedClear<'_> {
    fn drop(&mut self) {
        if let Some(digit) = self.saved {
            self.grid.set(self.row, self.column, digit);
        }
    }
}

/// A single Sudoku placement rule. Implementations scan one unit (row,
/// column, or region) of the grid and decide whether a candidate digit
/// may occupy a cell; each names the [Conflict] kind it reports when the
/// scan finds the digit elsewhere in the unit.
pub trait Constraint {

    /// The kind of conflict this constraint reports.
    fn conflict(&self) -> Conflict;

    /// Checks whether `digit` may occupy the cell at `(row, column)`
    /// without violating this constraint, considering only
    /// currently-filled cells. The target cell itself is excluded from
    /// the scan, so a cell already holding `digit` is not a conflict.
    /// The grid is guaranteed to be unchanged when this returns.
    ///
    /// `digit` must be in `[1, 9]`; callers validate candidate values
    /// before checking them.
    fn check_value(&self, grid: &mut SudokuGrid, row: usize, column: usize,
        digit: u8) -> bool;

    /// Checks the placement like
    /// [check_value](Constraint::check_value) and wraps the outcome in a
    /// [PlacementResult] carrying at most this constraint's own conflict
    /// kind.
    fn check_placement(&self, grid: &mut SudokuGrid, row: usize,
            column: usize, digit: u8) -> PlacementResult {
        if self.check_value(grid, row, column, digit) {
            PlacementResult::from_conflicts(Vec::new())
        }
        else {
            PlacementResult::from_conflicts(vec![self.conflict()])
        }
    }
}

/// The `Constraint` that a digit occurs at most once in each row.
#[derive(Clone)]
pub struct RowConstraint;

impl Constraint for RowConstraint {
    fn conflict(&self) -> Conflict {
        Conflict::Row
    }

    fn check_value(&self, grid: &mut SudokuGrid, row: usize, column: usize,
            digit: u8) -> bool {
        let scan = ScopedClear::new(grid, row, column, digit);

        (0..GRID_SIZE)
            .all(|other_column| scan.grid().get(row, other_column) != Some(digit))
    }
}

/// The `Constraint` that a digit occurs at most once in each column.
#[derive(Clone)]
pub struct ColumnConstraint;

impl Constraint for ColumnConstraint {
    fn conflict(&self) -> Conflict {
        Conflict::Column
    }

    fn check_value(&self, grid: &mut SudokuGrid, row: usize, column: usize,
            digit: u8) -> bool {
        let scan = ScopedClear::new(grid, row, column, digit);

        (0..GRID_SIZE)
            .all(|other_row| scan.grid().get(other_row, column) != Some(digit))
    }
}

/// The `Constraint` that a digit occurs at most once in each 3x3 region.
/// The region of a cell is located by arithmetic on its coordinates; no
/// region structure is searched.
#[derive(Clone)]
pub struct RegionConstraint;

impl Constraint for RegionConstraint {
    fn conflict(&self) -> Conflict {
        Conflict::Region
    }

    fn check_value(&self, grid: &mut SudokuGrid, row: usize, column: usize,
            digit: u8) -> bool {
        let region_row = row - row % REGION_SIZE;
        let region_column = column - column % REGION_SIZE;
        let scan = ScopedClear::new(grid, row, column, digit);

        for other_row in region_row..(region_row + REGION_SIZE) {
            for other_column in
                    region_column..(region_column + REGION_SIZE) {
                if scan.grid().get(other_row, other_column) == Some(digit) {
                    return false;
                }
            }
        }

        true
    }
}

/// Checks the placement of `digit` at `(row, column)` against all three
/// constraints and returns the union of the violated conflict kinds. All
/// constraints are always evaluated; the check never stops at the first
/// violation, so the `conflict` array of the result is exhaustive.
pub fn check_all(grid: &mut SudokuGrid, row: usize, column: usize,
        digit: u8) -> PlacementResult {
    let constraints: [&dyn Constraint; 3] =
        [&RowConstraint, &ColumnConstraint, &RegionConstraint];
    let mut conflict = Vec::new();

    for constraint in constraints {
        if !constraint.check_value(grid, row, column, digit) {
            conflict.push(constraint.conflict());
        }
    }

    PlacementResult::from_conflicts(conflict)
}

#[cfg(test)]
mod tests {

    use super::*;

    use serde_json::json;

    const PUZZLE: &str =
        "1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.";

    fn grid() -> SudokuGrid {
        SudokuGrid::parse(PUZZLE).unwrap()
    }

    #[test]
    fn row_placement_valid() {
        let mut grid = grid();

        assert!(RowConstraint.check_value(&mut grid, 0, 1, 3));
        assert!(RowConstraint.check_value(&mut grid, 0, 2, 5));
    }

    #[test]
    fn row_placement_conflict() {
        let mut grid = grid();
        let result = RowConstraint.check_placement(&mut grid, 0, 1, 4);

        assert!(!result.valid);
        assert_eq!(vec![Conflict::Row], result.conflict);
    }

    #[test]
    fn column_placement_valid() {
        let mut grid = grid();

        assert!(ColumnConstraint.check_value(&mut grid, 0, 1, 3));
        assert!(ColumnConstraint.check_value(&mut grid, 0, 2, 5));
    }

    #[test]
    fn column_placement_conflict() {
        let mut grid = grid();
        let result = ColumnConstraint.check_placement(&mut grid, 0, 1, 9);

        assert!(!result.valid);
        assert_eq!(vec![Conflict::Column], result.conflict);
    }

    #[test]
    fn region_placement_valid() {
        let mut grid = grid();

        assert!(RegionConstraint.check_value(&mut grid, 0, 1, 3));
        assert!(RegionConstraint.check_value(&mut grid, 0, 2, 5));
    }

    #[test]
    fn region_placement_conflict() {
        let mut grid = grid();
        let result = RegionConstraint.check_placement(&mut grid, 0, 1, 2);

        assert!(!result.valid);
        assert_eq!(vec![Conflict::Region], result.conflict);
    }

    #[test]
    fn check_all_valid() {
        let mut grid = grid();
        let result = check_all(&mut grid, 0, 1, 3);

        assert!(result.valid);
        assert!(result.conflict.is_empty());
    }

    #[test]
    fn check_all_reports_single_conflict() {
        let mut grid = grid();
        let result = check_all(&mut grid, 0, 1, 9);

        assert!(!result.valid);
        assert_eq!(vec![Conflict::Column], result.conflict);
    }

    #[test]
    fn check_all_reports_every_conflict() {
        let mut grid = grid();
        let result = check_all(&mut grid, 0, 1, 2);

        assert!(!result.valid);
        assert_eq!(vec![Conflict::Row, Conflict::Column, Conflict::Region],
            result.conflict);
    }

    #[test]
    fn filled_cell_does_not_conflict_with_itself() {
        let mut grid = grid();

        // A1 already holds a 1; re-validating it must succeed.
        assert_eq!(Some(1), grid.get(0, 0));
        assert!(check_all(&mut grid, 0, 0, 1).valid);
    }

    #[test]
    fn checks_leave_the_grid_unchanged() {
        let mut grid = grid();
        let before = grid.clone();

        for _ in 0..3 {
            RowConstraint.check_value(&mut grid, 0, 0, 1);
            ColumnConstraint.check_value(&mut grid, 0, 0, 1);
            RegionConstraint.check_value(&mut grid, 0, 0, 1);
            check_all(&mut grid, 0, 1, 2);
        }

        assert_eq!(before, grid);
    }

    #[test]
    fn scoped_clear_restores_on_drop() {
        let mut grid = grid();

        {
            let scan = ScopedClear::new(&mut grid, 0, 0, 1);
            assert_eq!(None, scan.grid().get(0, 0));
        }

        assert_eq!(Some(1), grid.get(0, 0));
    }

    #[test]
    fn scoped_clear_ignores_other_digits() {
        let mut grid = grid();

        {
            let scan = ScopedClear::new(&mut grid, 0, 0, 7);
            assert_eq!(Some(1), scan.grid().get(0, 0));
        }

        assert_eq!(Some(1), grid.get(0, 0));
    }

    #[test]
    fn placement_result_serialization() {
        let mut grid = grid();

        let valid = serde_json::to_value(check_all(&mut grid, 0, 1, 3))
            .unwrap();
        assert_eq!(json!({ "valid": true }), valid);

        let invalid = serde_json::to_value(check_all(&mut grid, 0, 1, 2))
            .unwrap();
        assert_eq!(
            json!({
                "valid": false,
                "conflict": ["row", "column", "region"]
            }),
            invalid);
    }
}
