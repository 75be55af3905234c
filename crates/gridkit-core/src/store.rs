//! Ordered row storage and value lookup.

use crate::cell::{CellData, Row};
use crate::error::TableError;
use std::collections::BTreeSet;
use std::fmt;

/// Rows addressed by a removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSelector {
    /// A single row
    One(usize),
    /// A set of rows
    Many(BTreeSet<usize>),
}

impl RowSelector {
    /// Normalise into a set of indices.
    #[must_use]
    pub fn into_set(self) -> BTreeSet<usize> {
        match self {
            Self::One(index) => BTreeSet::from([index]),
            Self::Many(set) => set,
        }
    }
}

impl From<usize> for RowSelector {
    fn from(index: usize) -> Self {
        Self::One(index)
    }
}

impl From<BTreeSet<usize>> for RowSelector {
    fn from(set: BTreeSet<usize>) -> Self {
        Self::Many(set)
    }
}

impl From<Vec<usize>> for RowSelector {
    fn from(indices: Vec<usize>) -> Self {
        Self::Many(indices.into_iter().collect())
    }
}

impl From<&[usize]> for RowSelector {
    fn from(indices: &[usize]) -> Self {
        Self::Many(indices.iter().copied().collect())
    }
}

impl<const N: usize> From<[usize; N]> for RowSelector {
    fn from(indices: [usize; N]) -> Self {
        Self::Many(indices.into_iter().collect())
    }
}

/// Result of [`RowStore::find_row`].
#[derive(Debug, Clone, PartialEq)]
pub struct RowMatch<'a> {
    /// Index of the matched row
    pub index: Option<usize>,
    /// The matched row
    pub row: Option<&'a Row>,
    /// Canonical value of each cell of the matched row
    pub cols: Vec<&'a CellData>,
}

impl RowMatch<'_> {
    /// The empty match.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            index: None,
            row: None,
            cols: Vec::new(),
        }
    }

    /// Check if a row matched.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.index.is_some()
    }

    /// Signed index, `-1` when nothing matched.
    #[must_use]
    pub fn index_or_sentinel(&self) -> i64 {
        self.index
            .and_then(|i| i64::try_from(i).ok())
            .unwrap_or(-1)
    }
}

/// Ordered sequence of rows, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStore {
    rows: Vec<Row>,
    has_rows: bool,
}

impl RowStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            has_rows: false,
        }
    }

    /// Create a store holding `rows`.
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let has_rows = !rows.is_empty();
        Self { rows, has_rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the store has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Derived flag, recomputed after every structural mutation.
    #[must_use]
    pub const fn has_rows(&self) -> bool {
        self.has_rows
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Width shared by the stored rows, if any row exists.
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        self.rows.first().map(Row::len)
    }

    /// Index of the first row whose cell at `column` contains `value`.
    ///
    /// Matching compares the cell's display string with the string form of
    /// `value`, case-insensitively, as a substring. Rows without a cell at
    /// `column` never match.
    pub fn find_row_index(&self, column: usize, value: impl fmt::Display) -> Option<usize> {
        let needle = value.to_string().to_lowercase();
        self.rows.iter().position(|row| {
            row.get(column)
                .is_some_and(|cell| cell.display().to_lowercase().contains(&needle))
        })
    }

    /// Index, row and cell values of the first row matching `value` at `column`.
    pub fn find_row(&self, column: usize, value: impl fmt::Display) -> RowMatch<'_> {
        let Some(index) = self.find_row_index(column, value) else {
            return RowMatch::none();
        };
        let row = &self.rows[index];
        RowMatch {
            index: Some(index),
            row: Some(row),
            cols: row.data(),
        }
    }

    pub(crate) fn push(&mut self, row: Row) {
        self.rows.push(row);
        self.refresh();
    }

    /// Remove every row in `indices`, keeping survivors in order.
    pub(crate) fn remove_set(&mut self, indices: &BTreeSet<usize>) -> usize {
        let before = self.rows.len();
        let mut index = 0;
        self.rows.retain(|_| {
            let keep = !indices.contains(&index);
            index += 1;
            keep
        });
        self.refresh();
        before - self.rows.len()
    }

    pub(crate) fn replace(&mut self, index: usize, row: Row) -> Result<Row, TableError> {
        let len = self.rows.len();
        let slot = self
            .rows
            .get_mut(index)
            .ok_or(TableError::RowOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, row))
    }

    pub(crate) fn row_mut(&mut self, index: usize) -> Result<&mut Row, TableError> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(TableError::RowOutOfRange { index, len })
    }

    fn refresh(&mut self) {
        self.has_rows = !self.rows.is_empty();
    }
}
