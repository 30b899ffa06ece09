//! This module contains the error definitions used in this crate.

use thiserror::Error;

/// The errors that can occur when validating, checking, or solving a
/// puzzle. All of them are outcomes reported to the client, not faults:
/// each `Display` message is the exact text relayed over the API, and no
/// condition aborts the process.
///
/// Validation errors are raised synchronously before a grid is built, so
/// a failing request performs no partial computation.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SudokuError {

    /// Indicates that the puzzle string is absent or empty.
    #[error("Required field missing")]
    MissingInput,

    /// Indicates that the puzzle string does not contain exactly 81
    /// characters.
    #[error("Expected puzzle to be 81 characters long")]
    InvalidLength,

    /// Indicates that the puzzle string contains a character other than
    /// the digits 1 to 9 and the empty-cell marker `.`.
    #[error("Invalid characters in puzzle")]
    InvalidCharacters,

    /// Indicates that a candidate value is not a single digit 1 to 9.
    #[error("Invalid value")]
    InvalidValue,

    /// Indicates that a cell name does not map to a valid row and column,
    /// i.e. is not a row letter `A` to `I` followed by a column digit `1`
    /// to `9`.
    #[error("Invalid coordinate")]
    InvalidCoordinate,

    /// Indicates that the backtracking search exhausted the entire search
    /// space without finding a solution. This covers both puzzles whose
    /// givens already contradict each other and consistent puzzles with no
    /// completion; the two cases are deliberately not distinguished.
    #[error("Puzzle cannot be solved")]
    Unsolvable
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn messages_match_api_contract() {
        assert_eq!("Required field missing",
            SudokuError::MissingInput.to_string());
        assert_eq!("Expected puzzle to be 81 characters long",
            SudokuError::InvalidLength.to_string());
        assert_eq!("Invalid characters in puzzle",
            SudokuError::InvalidCharacters.to_string());
        assert_eq!("Invalid value", SudokuError::InvalidValue.to_string());
        assert_eq!("Invalid coordinate",
            SudokuError::InvalidCoordinate.to_string());
        assert_eq!("Puzzle cannot be solved",
            SudokuError::Unsolvable.to_string());
    }
}
