//! Per-column data conversion.
//!
//! When a table converts on write, every raw value is normalised into a
//! [`Cell`] by the [`ConversionHook`] registered for its column. Column
//! settings come from a [`ColumnRegistry`]; a column without settings gets
//! [`ColumnSettings::default`], which the default hook treats as identity.

use crate::cell::{Cell, CellData, CellInput};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// No declared type, values pass through unchanged
    #[default]
    Auto,
    /// Plain text
    String,
    /// Numeric
    Number,
    /// Boolean
    Boolean,
    /// HTML markup, displayed as its text content
    Html,
    /// Opaque values with no display text
    Other,
}

/// Settings for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSettings {
    /// Declared type
    #[serde(default, rename = "type")]
    pub column_type: ColumnType,
    /// Display heading
    #[serde(default)]
    pub heading: Option<String>,
    /// Whether the column is hidden from the rendered table
    #[serde(default)]
    pub hidden: bool,
    /// Whether the column accepts edits
    #[serde(default = "default_editable")]
    pub editable: bool,
}

const fn default_editable() -> bool {
    true
}

impl Default for ColumnSettings {
    fn default() -> Self {
        UNSET.clone()
    }
}

impl ColumnSettings {
    /// Create settings for a typed column.
    #[must_use]
    pub fn typed(column_type: ColumnType) -> Self {
        Self {
            column_type,
            ..Self::default()
        }
    }

    /// Set the heading.
    #[must_use]
    pub fn heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Mark the column hidden.
    #[must_use]
    pub const fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set whether the column accepts edits.
    #[must_use]
    pub const fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }
}

static UNSET: ColumnSettings = ColumnSettings {
    column_type: ColumnType::Auto,
    heading: None,
    hidden: false,
    editable: true,
};

/// Positional registry of column settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnRegistry {
    columns: Vec<ColumnSettings>,
}

impl ColumnRegistry {
    /// Create a registry from settings in column order.
    #[must_use]
    pub const fn new(columns: Vec<ColumnSettings>) -> Self {
        Self { columns }
    }

    /// Settings for a column, or the empty default when none are registered.
    #[must_use]
    pub fn get(&self, column: usize) -> &ColumnSettings {
        self.columns.get(column).unwrap_or(&UNSET)
    }

    /// Number of registered columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if no columns are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over registered settings.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnSettings> {
        self.columns.iter()
    }
}

/// Normalises one raw value into a cell.
pub trait ConversionHook: Send + Sync {
    /// Convert `input` using the settings of its column.
    fn convert(&self, input: CellInput, settings: &ColumnSettings) -> Cell;
}

impl<F> ConversionHook for F
where
    F: Fn(CellInput, &ColumnSettings) -> Cell + Send + Sync,
{
    fn convert(&self, input: CellInput, settings: &ColumnSettings) -> Cell {
        self(input, settings)
    }
}

/// Hook that wraps raw values without coercion.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConversion;

impl ConversionHook for IdentityConversion {
    fn convert(&self, input: CellInput, _settings: &ColumnSettings) -> Cell {
        input.into_cell()
    }
}

/// Hook that coerces values according to [`ColumnSettings::column_type`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedConversion;

impl ConversionHook for TypedConversion {
    fn convert(&self, input: CellInput, settings: &ColumnSettings) -> Cell {
        let data = match input {
            CellInput::Cell(cell) => return cell,
            CellInput::Raw(data) => data,
        };

        match settings.column_type {
            ColumnType::Auto => Cell::new(data),
            ColumnType::String => {
                if data.as_text().is_some() {
                    Cell::new(data)
                } else {
                    let text = data.to_string();
                    Cell::new(data).with_text(text)
                }
            }
            ColumnType::Number => {
                let text = data.to_string();
                Cell::new(to_number(&data)).with_text(text)
            }
            ColumnType::Boolean => {
                let value = to_bool(&data);
                Cell::new(value).with_text(value.to_string())
            }
            ColumnType::Html => {
                let text = strip_markup(&data.to_string());
                Cell::new(data).with_text(text)
            }
            ColumnType::Other => Cell::new(data).with_text(""),
        }
    }
}

fn to_number(data: &CellData) -> CellData {
    match data {
        CellData::Number(n) => CellData::Number(*n),
        CellData::Bool(b) => CellData::Number(if *b { 1.0 } else { 0.0 }),
        CellData::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_or(CellData::Empty, CellData::Number),
        CellData::Empty => CellData::Empty,
    }
}

fn to_bool(data: &CellData) -> bool {
    match data {
        CellData::Bool(b) => *b,
        CellData::Number(n) => *n != 0.0,
        CellData::Text(s) => {
            let s = s.trim().to_lowercase();
            !matches!(s.as_str(), "" | "false" | "0" | "null")
        }
        CellData::Empty => false,
    }
}

/// Text content of a markup fragment: tags removed, whitespace collapsed.
///
/// A `<` opens a tag only when followed by a letter, `/` or `!`; any other
/// `<` is literal text.
fn strip_markup(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    let mut chars = markup.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_tag {
            in_tag = ch != '>';
        } else if ch == '<'
            && chars
                .peek()
                .is_some_and(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!'))
        {
            in_tag = true;
            text.push(' ');
        } else {
            text.push(ch);
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Function table of conversion hooks keyed by column index.
#[derive(Clone)]
pub struct ConverterTable {
    default: Arc<dyn ConversionHook>,
    columns: HashMap<usize, Arc<dyn ConversionHook>>,
}

impl Default for ConverterTable {
    fn default() -> Self {
        Self::new(TypedConversion)
    }
}

impl fmt::Debug for ConverterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut columns: Vec<_> = self.columns.keys().copied().collect();
        columns.sort_unstable();
        f.debug_struct("ConverterTable")
            .field("columns", &columns)
            .finish_non_exhaustive()
    }
}

impl ConverterTable {
    /// Create a table whose every column uses `default`.
    #[must_use]
    pub fn new(default: impl ConversionHook + 'static) -> Self {
        Self {
            default: Arc::new(default),
            columns: HashMap::new(),
        }
    }

    /// Register a hook for one column.
    #[must_use]
    pub fn with_column(mut self, column: usize, hook: impl ConversionHook + 'static) -> Self {
        self.columns.insert(column, Arc::new(hook));
        self
    }

    /// Register a hook for one column in place.
    pub fn set_column(&mut self, column: usize, hook: impl ConversionHook + 'static) {
        self.columns.insert(column, Arc::new(hook));
    }

    /// Hook that applies to a column.
    #[must_use]
    pub fn hook(&self, column: usize) -> &dyn ConversionHook {
        match self.columns.get(&column) {
            Some(hook) => &**hook,
            None => &*self.default,
        }
    }

    /// Convert a whole row, looking each column's settings up by position.
    pub fn convert_row(&self, values: Vec<CellInput>, registry: &ColumnRegistry) -> Vec<Cell> {
        values
            .into_iter()
            .enumerate()
            .map(|(column, value)| {
                tracing::trace!(column, "converting cell");
                self.hook(column).convert(value, registry.get(column))
            })
            .collect()
    }
}
