//! Error types for gridkit-editing.

use gridkit_core::TableError;
use thiserror::Error;

/// Errors raised by the editor surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Column is excluded, hidden or marked read-only.
    #[error("column {0} is not editable")]
    ColumnNotEditable(usize),

    /// The context menu is turned off.
    #[error("context menu is disabled")]
    MenuDisabled,

    /// No menu item at this index.
    #[error("no menu item at index {0}")]
    UnknownMenuItem(usize),

    /// Menu item cannot be activated (separator).
    #[error("menu item {0} is not actionable")]
    NotActionable(usize),

    /// Operation requires an open edit or menu.
    #[error("no active edit")]
    NoActiveEdit,

    /// Menu was opened on a row, not a cell.
    #[error("menu target has no column")]
    NoColumnTarget,

    /// The edited row changed in the table after the edit was opened.
    #[error("row {0} changed since the edit was opened")]
    StaleEdit(usize),

    /// Row form submitted with the wrong number of inputs.
    #[error("row form expects {expected} inputs, got {actual}")]
    InputCount { expected: usize, actual: usize },

    /// The table rejected the change.
    #[error("table error: {0}")]
    Table(#[from] TableError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_edit_display() {
        assert_eq!(
            EditError::StaleEdit(3).to_string(),
            "row 3 changed since the edit was opened"
        );
    }

    #[test]
    fn test_edit_error_display() {
        assert_eq!(
            EditError::ColumnNotEditable(2).to_string(),
            "column 2 is not editable"
        );
        assert_eq!(
            EditError::InputCount {
                expected: 3,
                actual: 1
            }
            .to_string(),
            "row form expects 3 inputs, got 1"
        );
    }

    #[test]
    fn test_edit_error_from_table_error() {
        let err: EditError = TableError::RowOutOfRange { index: 4, len: 2 }.into();
        assert!(matches!(err, EditError::Table(_)));
        assert!(err.to_string().contains("row 4 out of range"));
    }
}
