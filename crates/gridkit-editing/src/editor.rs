//! Inline cell and row editing driven by [`EditorOptions`].
//!
//! The editor holds at most one pending interaction (an open menu, a cell or
//! row form, or a staged removal) and commits it through the table's own
//! mutation operations. Each pending edit keeps a snapshot of the row it was
//! opened on; a commit whose target no longer matches that snapshot is
//! rejected with [`EditError::StaleEdit`].

use crate::error::EditError;
use crate::menu::{MenuEntry, MenuItem, MenuOutcome};
use crate::options::EditorOptions;
use gridkit_core::{Cell, CellInput, Row, Table, TableError};
use std::sync::Arc;

/// Where a menu was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTarget {
    /// Row under the pointer
    pub row: usize,
    /// Column under the pointer, if the menu was opened on a cell
    pub column: Option<usize>,
}

impl EditTarget {
    /// Target a single cell.
    #[must_use]
    pub const fn cell(row: usize, column: usize) -> Self {
        Self {
            row,
            column: Some(column),
        }
    }

    /// Target a whole row.
    #[must_use]
    pub const fn row(row: usize) -> Self {
        Self { row, column: None }
    }
}

/// An open inline cell edit.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEdit {
    /// Row being edited
    pub row_index: usize,
    /// Column being edited
    pub column_index: usize,
    /// Cell as it was when the edit opened
    pub cell: Cell,
    /// Initial input content
    pub content: String,
}

/// One input of a row form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowInput {
    /// Column the input writes to
    pub column: usize,
    /// Input label
    pub label: String,
    /// Initial input content
    pub value: String,
}

/// An open row form.
#[derive(Debug, Clone, PartialEq)]
pub struct RowEdit {
    /// Row being edited
    pub row_index: usize,
    /// Row as it was when the form opened
    pub row: Row,
    /// Inputs for the editable columns, in column order
    pub inputs: Vec<RowInput>,
}

/// Pending editor interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    /// Nothing open
    #[default]
    Idle,
    /// Context menu open on a target
    Menu(EditTarget),
    /// Cell editor open
    Cell(CellEdit),
    /// Row form open
    Row(RowEdit),
    /// Waiting for removal confirmation
    ConfirmRemove {
        /// Row to remove
        row: usize,
        /// Row as it was when removal was staged
        snapshot: Row,
    },
}

/// Editor surface bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    options: EditorOptions,
    state: EditState,
}

impl Editor {
    /// Create an editor.
    #[must_use]
    pub fn new(options: EditorOptions) -> Self {
        Self {
            options,
            state: EditState::Idle,
        }
    }

    /// Configuration.
    #[must_use]
    pub const fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Pending interaction.
    #[must_use]
    pub const fn state(&self) -> &EditState {
        &self.state
    }

    /// Check whether `column` may be edited.
    ///
    /// Excluded columns, columns marked read-only and, unless hidden columns
    /// are included, hidden columns are refused.
    #[must_use]
    pub fn is_editable(&self, table: &Table, column: usize) -> bool {
        if self.options.exclude_columns.contains(&column) {
            return false;
        }
        let settings = table.columns().get(column);
        settings.editable && (self.options.hidden_columns || !settings.hidden)
    }

    /// Open the context menu on `target`.
    pub fn open_menu(&mut self, target: EditTarget) -> Result<(), EditError> {
        if !self.options.context_menu {
            return Err(EditError::MenuDisabled);
        }
        tracing::debug!(row = target.row, column = ?target.column, "menu opened");
        self.state = EditState::Menu(target);
        Ok(())
    }

    /// Target of the open menu.
    #[must_use]
    pub const fn menu_target(&self) -> Option<EditTarget> {
        match self.state {
            EditState::Menu(target) => Some(target),
            _ => None,
        }
    }

    /// Menu items resolved for display, index-aligned with the configuration.
    #[must_use]
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        self.options
            .menu_items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                MenuItem::Command { label, .. } => MenuEntry::Command {
                    index,
                    label: label(self),
                },
                MenuItem::Separator => MenuEntry::Separator { index },
                MenuItem::Link { url, label } => MenuEntry::Link {
                    index,
                    label: label.clone().unwrap_or_else(|| url.clone()),
                    url: url.clone(),
                },
            })
            .collect()
    }

    /// Activate the menu item at `index`.
    ///
    /// A command that leaves the menu open closes it afterwards.
    pub fn activate(&mut self, table: &mut Table, index: usize) -> Result<MenuOutcome, EditError> {
        let item = self
            .options
            .menu_items
            .get(index)
            .ok_or(EditError::UnknownMenuItem(index))?;

        let action = match item {
            MenuItem::Separator => return Err(EditError::NotActionable(index)),
            MenuItem::Link { url, .. } => {
                let url = url.clone();
                self.close_menu();
                return Ok(MenuOutcome::Navigate(url));
            }
            MenuItem::Command { action, .. } => Arc::clone(action),
        };

        tracing::debug!(index, "menu command");
        let result = action(self, table);
        self.close_menu();
        result.map(|()| MenuOutcome::Done)
    }

    /// Open the inline editor on one cell.
    pub fn edit_cell(
        &mut self,
        table: &Table,
        row: usize,
        column: usize,
    ) -> Result<CellEdit, EditError> {
        if !self.is_editable(table, column) {
            return Err(EditError::ColumnNotEditable(column));
        }
        let cell = table
            .row(row)
            .ok_or(TableError::RowOutOfRange {
                index: row,
                len: table.len(),
            })?
            .get(column)
            .ok_or(TableError::ColumnOutOfRange {
                column,
                width: table.row(row).map_or(0, Row::len),
            })?
            .clone();

        let edit = CellEdit {
            row_index: row,
            column_index: column,
            content: cell.display().into_owned(),
            cell,
        };
        tracing::debug!(row, column, "cell edit opened");
        self.state = EditState::Cell(edit.clone());
        Ok(edit)
    }

    /// Commit the open cell edit.
    pub fn save_cell(
        &mut self,
        table: &mut Table,
        value: impl Into<CellInput>,
    ) -> Result<(), EditError> {
        let EditState::Cell(edit) = &self.state else {
            return Err(EditError::NoActiveEdit);
        };
        let current = table
            .row(edit.row_index)
            .and_then(|row| row.get(edit.column_index));
        if current != Some(&edit.cell) {
            let row = edit.row_index;
            return Err(self.discard_stale(row));
        }
        table.update_cell(edit.row_index, edit.column_index, value)?;
        self.state = EditState::Idle;
        Ok(())
    }

    /// Open the row form on `row`, with one input per editable column.
    pub fn edit_row(&mut self, table: &Table, row: usize) -> Result<RowEdit, EditError> {
        let current = table
            .row(row)
            .ok_or(TableError::RowOutOfRange {
                index: row,
                len: table.len(),
            })?
            .clone();

        let inputs = current
            .cells()
            .iter()
            .enumerate()
            .filter(|(column, _)| self.is_editable(table, *column))
            .map(|(column, cell)| RowInput {
                column,
                label: table
                    .columns()
                    .get(column)
                    .heading
                    .clone()
                    .unwrap_or_else(|| format!("Column {}", column + 1)),
                value: cell.display().into_owned(),
            })
            .collect();

        let edit = RowEdit {
            row_index: row,
            row: current,
            inputs,
        };
        tracing::debug!(row, inputs = edit.inputs.len(), "row edit opened");
        self.state = EditState::Row(edit.clone());
        Ok(edit)
    }

    /// Commit the open row form.
    ///
    /// `values` holds one entry per form input. Columns without an input
    /// keep the cell they had when the form opened.
    pub fn save_row<I>(&mut self, table: &mut Table, values: I) -> Result<(), EditError>
    where
        I: IntoIterator,
        I::Item: Into<CellInput>,
    {
        let EditState::Row(edit) = &self.state else {
            return Err(EditError::NoActiveEdit);
        };
        if table.row(edit.row_index) != Some(&edit.row) {
            let row = edit.row_index;
            return Err(self.discard_stale(row));
        }
        let values: Vec<CellInput> = values.into_iter().map(Into::into).collect();
        if values.len() != edit.inputs.len() {
            return Err(EditError::InputCount {
                expected: edit.inputs.len(),
                actual: values.len(),
            });
        }

        let mut values = values.into_iter();
        let mut inputs = edit.inputs.iter().peekable();
        let mut merged = Vec::with_capacity(edit.row.len());
        for (column, cell) in edit.row.cells().iter().enumerate() {
            if inputs.next_if(|input| input.column == column).is_some() {
                merged.extend(values.next());
            } else {
                merged.push(CellInput::Cell(cell.clone()));
            }
        }

        table.update_row(edit.row_index, merged)?;
        self.state = EditState::Idle;
        Ok(())
    }

    /// Stage removal of `row` and return the confirmation prompt.
    pub fn remove_row(&mut self, table: &Table, row: usize) -> Result<&str, EditError> {
        let snapshot = table
            .row(row)
            .ok_or(TableError::RowOutOfRange {
                index: row,
                len: table.len(),
            })?
            .clone();
        self.state = EditState::ConfirmRemove { row, snapshot };
        Ok(&self.options.labels.really_remove)
    }

    /// Remove the staged row.
    pub fn confirm_remove(&mut self, table: &mut Table) -> Result<usize, EditError> {
        let EditState::ConfirmRemove { row, snapshot } = &self.state else {
            return Err(EditError::NoActiveEdit);
        };
        let row = *row;
        if table.row(row) != Some(snapshot) {
            return Err(self.discard_stale(row));
        }
        let removed = table.remove(row);
        tracing::debug!(row, removed, "row removal confirmed");
        self.state = EditState::Idle;
        Ok(removed)
    }

    /// Drop any pending interaction.
    pub fn close(&mut self) {
        self.state = EditState::Idle;
    }

    fn discard_stale(&mut self, row: usize) -> EditError {
        tracing::warn!(row, "row changed under an open edit");
        self.state = EditState::Idle;
        EditError::StaleEdit(row)
    }

    fn close_menu(&mut self) {
        if matches!(self.state, EditState::Menu(_)) {
            self.state = EditState::Idle;
        }
    }
}
