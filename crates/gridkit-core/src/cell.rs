//! Cell value model.
//!
//! A [`Cell`] pairs the canonical typed value of one row/column intersection
//! with an optional precomputed display string.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Canonical value stored in a cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellData {
    /// Boolean value
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
    /// Empty cell
    #[default]
    Empty,
}

impl CellData {
    /// Check if this is the empty value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Borrow the text payload, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// String-cast of the value.
///
/// Numbers use the shortest decimal form (`1`, not `1.0`), booleans print as
/// `true`/`false` and the empty value prints as the empty string.
impl fmt::Display for CellData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellData {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellData {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellData {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellData {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for CellData {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for CellData {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Canonical value
    pub data: CellData,
    /// Display override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Cell {
    /// Create a cell with no display override.
    #[must_use]
    pub fn new(data: impl Into<CellData>) -> Self {
        Self {
            data: data.into(),
            text: None,
        }
    }

    /// Set the display override.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Resolve the display string: `text` if present, else the string-cast of `data`.
    #[must_use]
    pub fn display(&self) -> Cow<'_, str> {
        match (&self.text, &self.data) {
            (Some(text), _) => Cow::Borrowed(text),
            (None, CellData::Text(s)) => Cow::Borrowed(s),
            (None, data) => Cow::Owned(data.to_string()),
        }
    }
}

impl From<CellData> for Cell {
    fn from(data: CellData) -> Self {
        Self::new(data)
    }
}

/// Raw input for one cell of a row being written.
///
/// Presentation code either hands over a primitive value, which the column's
/// conversion hook normalises, or a cell it has already shaped itself.
#[derive(Debug, Clone, PartialEq)]
pub enum CellInput {
    /// Primitive value awaiting conversion
    Raw(CellData),
    /// Already-shaped cell, stored unchanged
    Cell(Cell),
}

impl CellInput {
    /// Turn the input into a cell without any type coercion.
    #[must_use]
    pub fn into_cell(self) -> Cell {
        match self {
            Self::Raw(data) => Cell::new(data),
            Self::Cell(cell) => cell,
        }
    }
}

impl From<Cell> for CellInput {
    fn from(cell: Cell) -> Self {
        Self::Cell(cell)
    }
}

impl From<CellData> for CellInput {
    fn from(data: CellData) -> Self {
        Self::Raw(data)
    }
}

impl From<&str> for CellInput {
    fn from(s: &str) -> Self {
        Self::Raw(s.into())
    }
}

impl From<String> for CellInput {
    fn from(s: String) -> Self {
        Self::Raw(s.into())
    }
}

impl From<f64> for CellInput {
    fn from(n: f64) -> Self {
        Self::Raw(n.into())
    }
}

impl From<i32> for CellInput {
    fn from(n: i32) -> Self {
        Self::Raw(n.into())
    }
}

impl From<i64> for CellInput {
    fn from(n: i64) -> Self {
        Self::Raw(n.into())
    }
}

impl From<bool> for CellInput {
    fn from(b: bool) -> Self {
        Self::Raw(b.into())
    }
}

/// One table record: an ordered sequence of cells, one per column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Create a row from its cells.
    #[must_use]
    pub const fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Get the cell at a column.
    #[must_use]
    pub fn get(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Get all cells.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Canonical value of every cell, in column order.
    #[must_use]
    pub fn data(&self) -> Vec<&CellData> {
        self.cells.iter().map(|c| &c.data).collect()
    }

    pub(crate) fn replace(&mut self, column: usize, cell: Cell) -> Option<Cell> {
        self.cells
            .get_mut(column)
            .map(|slot| std::mem::replace(slot, cell))
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Self::new(cells)
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefers_text_override() {
        let cell = Cell::new(42).with_text("forty-two");
        assert_eq!(cell.display(), "forty-two");
    }

    #[test]
    fn test_display_casts_data() {
        assert_eq!(Cell::new("abc").display(), "abc");
        assert_eq!(Cell::new(1).display(), "1");
        assert_eq!(Cell::new(1.5).display(), "1.5");
        assert_eq!(Cell::new(true).display(), "true");
        assert_eq!(Cell::new(CellData::Empty).display(), "");
    }

    #[test]
    fn test_display_borrows_text_data() {
        let cell = Cell::new("borrowed");
        assert!(matches!(cell.display(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_cell_input_into_cell_keeps_shaped_cell() {
        let shaped = Cell::new(3).with_text("three");
        let input = CellInput::from(shaped.clone());
        assert_eq!(input.into_cell(), shaped);
    }

    #[test]
    fn test_cell_input_raw_wraps_without_override() {
        let cell = CellInput::from("x").into_cell();
        assert_eq!(cell.data, CellData::Text("x".to_string()));
        assert!(cell.text.is_none());
    }

    #[test]
    fn test_row_data_in_column_order() {
        let row: Row = vec![Cell::new("a"), Cell::new(2)].into();
        assert_eq!(
            row.data(),
            vec![&CellData::Text("a".to_string()), &CellData::Number(2.0)]
        );
    }

    #[test]
    fn test_row_replace_out_of_range() {
        let mut row: Row = vec![Cell::new("a")].into();
        assert!(row.replace(3, Cell::new("b")).is_none());
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn test_cell_serde_shape() {
        let cell = Cell::new(5).with_text("five");
        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, r#"{"data":5.0,"text":"five"}"#);

        let plain: Cell = serde_json::from_str(r#"{"data":"hi"}"#).unwrap();
        assert_eq!(plain, Cell::new("hi"));
    }
}
