//! Error types for gridkit-core.

use thiserror::Error;

/// Errors raised by table mutations.
///
/// A failed operation leaves the store untouched and emits no event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Row index beyond the current row count.
    #[error("row {index} out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    /// Column index beyond the width of the addressed row.
    #[error("column {column} out of range (row has {width} cells)")]
    ColumnOutOfRange { column: usize, width: usize },

    /// Row width differs from the table width.
    #[error("row has {actual} cells, table expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_out_of_range_display() {
        let err = TableError::RowOutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "row 7 out of range (table has 3 rows)");
    }

    #[test]
    fn test_column_out_of_range_display() {
        let err = TableError::ColumnOutOfRange {
            column: 4,
            width: 2,
        };
        assert!(err.to_string().contains("column 4"));
        assert!(err.to_string().contains("2 cells"));
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = TableError::ShapeMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "row has 3 cells, table expects 2");
    }
}
