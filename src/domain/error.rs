//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid input tables.
/// These are independent of where the tables came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed input: row {row} has {cost_len} cost cells but {profit_len} profit cells")]
    MalformedInput {
        row: usize,
        cost_len: usize,
        profit_len: usize,
    },

    #[error("malformed input: cost table has {cost_rows} rows but profit table has {profit_rows}")]
    RowCountMismatch {
        cost_rows: usize,
        profit_rows: usize,
    },

    #[error("malformed input: row {row} is empty, expected at least the group cell")]
    EmptyRow { row: usize },

    #[error("cannot parse cell at row {row}, column {column} as a non-negative integer: {value:?}")]
    Parse {
        row: usize,
        column: usize,
        value: String,
    },
}

impl DomainError {
    /// True for every shape error between the cost and profit tables.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            DomainError::MalformedInput { .. }
                | DomainError::RowCountMismatch { .. }
                | DomainError::EmptyRow { .. }
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
