//! The table: row store, cursor and notification pipeline.

use crate::cell::{CellInput, Row};
use crate::convert::{ColumnRegistry, ConverterTable};
use crate::cursor::{Cursor, CursorMove};
use crate::error::TableError;
use crate::event::{ListenerId, Listeners, TableEvent};
use crate::options::TableOptions;
use crate::store::{RowMatch, RowSelector, RowStore};
use std::fmt;

/// A tabular data model.
///
/// All mutations go through the table so that `has_rows`, the cursor and the
/// listeners stay in step with the rows. State is fully updated before any
/// listener runs.
///
/// # Examples
///
/// ```
/// use gridkit_core::{Table, TableOptions};
///
/// let mut table = Table::new(TableOptions::default());
/// table.add(["a", "1"]).unwrap();
/// table.add(["b", "2"]).unwrap();
///
/// assert_eq!(table.find_row_index(0, "B"), Some(1));
/// assert_eq!(table.remove([0]), 1);
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Table {
    store: RowStore,
    cursor: Cursor,
    options: TableOptions,
    columns: ColumnRegistry,
    converters: ConverterTable,
    listeners: Listeners,
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new(options: TableOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Set the column settings registry.
    #[must_use]
    pub fn with_columns(mut self, columns: ColumnRegistry) -> Self {
        self.columns = columns;
        self
    }

    /// Set the conversion hooks.
    #[must_use]
    pub fn with_converters(mut self, converters: ConverterTable) -> Self {
        self.converters = converters;
        self
    }

    /// Options the table was created with.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Column settings registry.
    #[must_use]
    pub const fn columns(&self) -> &ColumnRegistry {
        &self.columns
    }

    /// Underlying store.
    #[must_use]
    pub const fn store(&self) -> &RowStore {
        &self.store
    }

    /// All rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        self.store.rows()
    }

    /// Row at `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.store.get(index)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Whether the table holds at least one row.
    #[must_use]
    pub const fn has_rows(&self) -> bool {
        self.store.has_rows()
    }

    /// Current cursor.
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor.get()
    }

    /// Register a listener for table events.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&TableEvent, &RowStore) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Append one row.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ShapeMismatch`] if the row width differs from
    /// the table width.
    pub fn add<I>(&mut self, values: I) -> Result<(), TableError>
    where
        I: IntoIterator,
        I::Item: Into<CellInput>,
    {
        let row = self.build_row(values);
        self.check_width(row.len())?;
        self.store.push(row);
        tracing::debug!(rows = self.store.len(), "row added");
        self.emit_updated();
        Ok(())
    }

    /// Remove one row or a set of rows. Indices past the end are ignored.
    ///
    /// Returns the number of rows removed.
    pub fn remove(&mut self, selector: impl Into<RowSelector>) -> usize {
        let indices = selector.into().into_set();
        let removed = self.store.remove_set(&indices);
        let moved = self.cursor.remap_after_remove(&indices, self.store.len());
        tracing::debug!(removed, rows = self.store.len(), "rows removed");
        self.emit_updated();
        if let Some(moved) = moved {
            self.emit_cursor_moved(moved);
        }
        removed
    }

    /// Index of the first row whose cell at `column` contains `value`, case-insensitively.
    pub fn find_row_index(&self, column: usize, value: impl fmt::Display) -> Option<usize> {
        self.store.find_row_index(column, value)
    }

    /// Like [`Self::find_row_index`], also returning the row and its cell values.
    pub fn find_row(&self, column: usize, value: impl fmt::Display) -> RowMatch<'_> {
        self.store.find_row(column, value)
    }

    /// Replace the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RowOutOfRange`] if `index` is past the end, or
    /// [`TableError::ShapeMismatch`] if the row width differs from the table width.
    pub fn update_row<I>(&mut self, index: usize, values: I) -> Result<(), TableError>
    where
        I: IntoIterator,
        I::Item: Into<CellInput>,
    {
        if index >= self.store.len() {
            tracing::warn!(index, rows = self.store.len(), "update of missing row");
            return Err(TableError::RowOutOfRange {
                index,
                len: self.store.len(),
            });
        }
        let row = self.build_row(values);
        self.check_width(row.len())?;
        self.store.replace(index, row)?;
        tracing::debug!(index, "row replaced");
        self.emit_updated();
        Ok(())
    }

    /// Replace a single cell.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RowOutOfRange`] or [`TableError::ColumnOutOfRange`]
    /// if the cell does not exist.
    pub fn update_cell(
        &mut self,
        index: usize,
        column: usize,
        value: impl Into<CellInput>,
    ) -> Result<(), TableError> {
        let value = value.into();
        let cell = if self.options.convert_on_write {
            self.converters
                .hook(column)
                .convert(value, self.columns.get(column))
        } else {
            value.into_cell()
        };

        let row = self.store.row_mut(index)?;
        let width = row.len();
        row.replace(column, cell)
            .ok_or(TableError::ColumnOutOfRange { column, width })?;
        tracing::debug!(index, column, "cell replaced");
        self.emit_updated();
        Ok(())
    }

    /// Move the cursor. Setting the current value again does nothing.
    pub fn set_cursor(&mut self, index: Option<usize>) {
        let Some(moved) = self.cursor.set(index) else {
            return;
        };
        tracing::debug!(cursor = ?moved.cursor, previous = ?moved.previous, "cursor moved");
        self.emit(TableEvent::Render);
        if let Some(row) = moved.cursor {
            if self.options.scroll_y {
                self.emit(TableEvent::ScrollIntoView { row });
            }
        }
        self.emit_cursor_moved(moved);
    }

    fn build_row<I>(&self, values: I) -> Row
    where
        I: IntoIterator,
        I::Item: Into<CellInput>,
    {
        let values: Vec<CellInput> = values.into_iter().map(Into::into).collect();
        if self.options.convert_on_write {
            Row::new(self.converters.convert_row(values, &self.columns))
        } else {
            values.into_iter().map(CellInput::into_cell).collect()
        }
    }

    fn check_width(&self, actual: usize) -> Result<(), TableError> {
        match self.options.column_count.or_else(|| self.store.width()) {
            Some(expected) if expected != actual => {
                tracing::warn!(expected, actual, "row width mismatch");
                Err(TableError::ShapeMismatch { expected, actual })
            }
            _ => Ok(()),
        }
    }

    fn emit(&self, event: TableEvent) {
        self.listeners.emit(&event, &self.store);
    }

    fn emit_updated(&self) {
        self.emit(TableEvent::Updated {
            rows: self.store.len(),
        });
    }

    fn emit_cursor_moved(&self, moved: CursorMove) {
        self.emit(TableEvent::CursorMoved {
            cursor: moved.cursor,
            previous: moved.previous,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, CellData};
    use crate::convert::{ColumnSettings, ColumnType};
    use std::sync::{Arc, Mutex};

    type EventLog = Arc<Mutex<Vec<TableEvent>>>;

    fn recorded(table: &mut Table) -> EventLog {
        let log: EventLog = Arc::default();
        let sink = Arc::clone(&log);
        table.subscribe(move |event, _| sink.lock().unwrap().push(*event));
        log
    }

    fn sample() -> Table {
        let mut table = Table::new(TableOptions::default());
        for row in [["a", "1"], ["b", "2"], ["c", "3"]] {
            table.add(row).unwrap();
        }
        table
    }

    fn cursor_moves(log: &EventLog) -> Vec<TableEvent> {
        log.lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, TableEvent::CursorMoved { .. }))
            .copied()
            .collect()
    }

    #[test]
    fn test_add_sets_has_rows_and_notifies() {
        let mut table = Table::default();
        let log = recorded(&mut table);
        assert!(!table.has_rows());

        table.add(["d", "4"]).unwrap();
        assert!(table.has_rows());
        assert_eq!(*log.lock().unwrap(), vec![TableEvent::Updated { rows: 1 }]);
    }

    #[test]
    fn test_add_converts_by_column_type() {
        let columns = ColumnRegistry::new(vec![
            ColumnSettings::default(),
            ColumnSettings::typed(ColumnType::Number),
        ]);
        let mut table = Table::default().with_columns(columns);
        table.add(["x", "12"]).unwrap();

        let row = table.row(0).unwrap();
        assert_eq!(row.get(0), Some(&Cell::new("x")));
        assert_eq!(row.get(1).map(|c| &c.data), Some(&CellData::Number(12.0)));
        assert_eq!(row.get(1).unwrap().display(), "12");
    }

    #[test]
    fn test_add_without_conversion_stores_as_is() {
        let columns = ColumnRegistry::new(vec![ColumnSettings::typed(ColumnType::Number)]);
        let mut table = Table::new(TableOptions::new().convert_on_write(false)).with_columns(columns);
        table.add(["12"]).unwrap();
        assert_eq!(table.row(0).unwrap().get(0), Some(&Cell::new("12")));
    }

    #[test]
    fn test_add_rejects_width_mismatch() {
        let mut table = sample();
        let log = recorded(&mut table);
        let err = table.add(["only-one"]).unwrap_err();
        assert_eq!(
            err,
            TableError::ShapeMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(table.len(), 3);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_declared_column_count_applies_to_first_row() {
        let mut table = Table::new(TableOptions::new().column_count(3));
        assert!(table.add(["a", "b"]).is_err());
        assert!(table.is_empty());
        table.add(["a", "b", "c"]).unwrap();
    }

    #[test]
    fn test_remove_scenario() {
        let mut table = sample();
        assert_eq!(table.remove([1]), 1);
        let display: Vec<Vec<String>> = table
            .rows()
            .iter()
            .map(|r| r.cells().iter().map(|c| c.display().into_owned()).collect())
            .collect();
        assert_eq!(display, vec![vec!["a", "1"], vec!["c", "3"]]);
        assert!(table.has_rows());
    }

    #[test]
    fn test_remove_from_empty_table() {
        let mut table = Table::default();
        let log = recorded(&mut table);
        assert_eq!(table.remove([0]), 0);
        assert!(!table.has_rows());
        assert_eq!(*log.lock().unwrap(), vec![TableEvent::Updated { rows: 0 }]);
    }

    #[test]
    fn test_add_then_remove_everything() {
        let mut table = sample();
        table.add(["d", "4"]).unwrap();
        table.remove([0, 1, 2, 3]);
        assert!(table.is_empty());
        assert!(!table.has_rows());
    }

    #[test]
    fn test_remove_single_index() {
        let mut table = sample();
        table.remove(0);
        assert_eq!(table.find_row_index(0, "a"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_listener_sees_mutated_store() {
        let mut table = sample();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        table.subscribe(move |_, store| {
            sink.lock().unwrap().push((store.len(), store.has_rows()));
        });
        table.remove([0, 1, 2]);
        assert_eq!(*seen.lock().unwrap(), vec![(0, false)]);
    }

    #[test]
    fn test_listener_sees_store_after_add_and_update() {
        let mut table = Table::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        table.subscribe(move |_, store| {
            let first = store.get(0).map(|row| row.cells()[0].display().into_owned());
            sink.lock().unwrap().push((store.len(), store.has_rows(), first));
        });

        table.add(["a", "1"]).unwrap();
        table.add(["b", "2"]).unwrap();
        table.update_row(0, ["z", "9"]).unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (1, true, Some("a".to_string())),
                (2, true, Some("a".to_string())),
                (2, true, Some("z".to_string())),
            ]
        );
    }

    #[test]
    fn test_find_row_scenario() {
        let table = sample();
        assert_eq!(table.find_row_index(0, "B"), Some(1));
        let found = table.find_row(0, "c");
        assert_eq!(found.index, Some(2));
        assert_eq!(found.cols, vec![&CellData::from("c"), &CellData::from("3")]);
        assert_eq!(table.find_row(1, "9"), RowMatch::none());
    }

    #[test]
    fn test_update_row_replaces_only_target() {
        let mut table = sample();
        let before: Vec<Row> = table.rows().to_vec();
        table.update_row(1, ["B", "20"]).unwrap();

        assert_eq!(table.row(0), Some(&before[0]));
        assert_eq!(table.row(2), Some(&before[2]));
        assert_eq!(table.row(1).unwrap().get(0), Some(&Cell::new("B")));
    }

    #[test]
    fn test_update_row_out_of_range() {
        let mut table = sample();
        let log = recorded(&mut table);
        let err = table.update_row(3, ["d", "4"]).unwrap_err();
        assert_eq!(err, TableError::RowOutOfRange { index: 3, len: 3 });
        assert_eq!(table.len(), 3);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_update_cell() {
        let mut table = sample();
        table.update_cell(2, 1, "30").unwrap();
        assert_eq!(table.row(2).unwrap().get(1), Some(&Cell::new("30")));
        assert_eq!(
            table.update_cell(2, 5, "x"),
            Err(TableError::ColumnOutOfRange { column: 5, width: 2 })
        );
        assert_eq!(
            table.update_cell(9, 0, "x"),
            Err(TableError::RowOutOfRange { index: 9, len: 3 })
        );
    }

    #[test]
    fn test_set_cursor_twice_emits_once() {
        let mut table = sample();
        let log = recorded(&mut table);
        table.set_cursor(Some(1));
        table.set_cursor(Some(1));

        assert_eq!(
            cursor_moves(&log),
            vec![TableEvent::CursorMoved {
                cursor: Some(1),
                previous: None
            }]
        );
    }

    #[test]
    fn test_set_cursor_event_order() {
        let mut table = Table::new(TableOptions::new().scroll_y(true));
        table.add(["a"]).unwrap();
        let log = recorded(&mut table);

        table.set_cursor(Some(0));
        table.set_cursor(None);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                TableEvent::Render,
                TableEvent::ScrollIntoView { row: 0 },
                TableEvent::CursorMoved {
                    cursor: Some(0),
                    previous: None
                },
                TableEvent::Render,
                TableEvent::CursorMoved {
                    cursor: None,
                    previous: Some(0)
                },
            ]
        );
    }

    #[test]
    fn test_set_cursor_without_scroll_flag() {
        let mut table = sample();
        let log = recorded(&mut table);
        table.set_cursor(Some(2));
        assert!(!log
            .lock()
            .unwrap()
            .iter()
            .any(|e| matches!(e, TableEvent::ScrollIntoView { .. })));
    }

    #[test]
    fn test_remove_remaps_cursor() {
        let mut table = sample();
        table.set_cursor(Some(2));
        let log = recorded(&mut table);

        table.remove([0]);
        assert_eq!(table.cursor(), Some(1));
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                TableEvent::Updated { rows: 2 },
                TableEvent::CursorMoved {
                    cursor: Some(1),
                    previous: Some(2)
                },
            ]
        );
    }

    #[test]
    fn test_remove_clears_cursor_on_removed_row() {
        let mut table = sample();
        table.set_cursor(Some(1));
        table.remove([1]);
        assert_eq!(table.cursor(), None);
    }

    #[test]
    fn test_remove_clears_cursor_past_end() {
        let mut table = Table::default();
        table.add(["a"]).unwrap();
        table.set_cursor(Some(99));
        let log = recorded(&mut table);

        table.remove([0]);
        assert_eq!(table.cursor(), None);
        assert_eq!(
            cursor_moves(&log),
            vec![TableEvent::CursorMoved {
                cursor: None,
                previous: Some(99)
            }]
        );
    }

    #[test]
    fn test_remove_clears_cursor_left_past_end() {
        let mut table = sample();
        table.set_cursor(Some(5));
        table.remove([2]);
        assert_eq!(table.cursor(), None);
    }

    #[test]
    fn test_add_and_update_keep_cursor() {
        let mut table = sample();
        table.set_cursor(Some(0));
        table.add(["d", "4"]).unwrap();
        table.update_row(0, ["z", "9"]).unwrap();
        assert_eq!(table.cursor(), Some(0));
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut table = sample();
        let log: EventLog = Arc::default();
        let sink = Arc::clone(&log);
        let id = table.subscribe(move |event, _| sink.lock().unwrap().push(*event));
        assert!(table.unsubscribe(id));
        table.add(["d", "4"]).unwrap();
        assert!(log.lock().unwrap().is_empty());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_len_tracks_adds(n in 0usize..40) {
                let mut table = Table::default();
                for i in 0..n {
                    table.add([i.to_string()]).unwrap();
                }
                prop_assert_eq!(table.len(), n);
                prop_assert_eq!(table.has_rows(), n > 0);
            }

            #[test]
            fn prop_update_row_leaves_others(n in 1usize..20, target in 0usize..20, value in "[a-z]{1,5}") {
                let target = target % n;
                let mut table = Table::default();
                for i in 0..n {
                    table.add([i.to_string()]).unwrap();
                }
                let before = table.rows().to_vec();
                table.update_row(target, [value.clone()]).unwrap();

                for (i, row) in table.rows().iter().enumerate() {
                    if i == target {
                        prop_assert_eq!(row.get(0), Some(&Cell::new(value.clone())));
                    } else {
                        prop_assert_eq!(row, &before[i]);
                    }
                }
            }
        }
    }
}
