//! Integer tables parsed from delimited text.

use crate::domain::error::{DomainError, DomainResult};

/// Row-major grid of non-negative integers. Rows may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<u64>>,
}

impl Table {
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Self {
        Self { rows }
    }

    /// Parse delimited text into a table.
    ///
    /// Every non-blank line is one row, cells are split on `delimiter` and
    /// trimmed. Row and column numbers in errors are zero-based and count
    /// only non-blank lines.
    pub fn parse(content: &str, delimiter: char) -> DomainResult<Self> {
        let rows = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(row, line)| parse_row(row, line, delimiter))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn parse_row(row: usize, line: &str, delimiter: char) -> DomainResult<Vec<u64>> {
    line.split(delimiter)
        .enumerate()
        .map(|(column, cell)| {
            let cell = cell.trim();
            cell.parse::<u64>().map_err(|_| DomainError::Parse {
                row,
                column,
                value: cell.to_string(),
            })
        })
        .collect()
}
