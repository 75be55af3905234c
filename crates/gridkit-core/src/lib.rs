//! Row management and cell data layer for interactive tables.
//!
//! This crate owns the in-memory representation of a table and the
//! operations presentation code calls to mutate it:
//! - Cell value model: [`Cell`], [`CellData`], [`CellInput`], [`Row`]
//! - Per-column conversion: [`ConversionHook`], [`ConverterTable`], [`ColumnRegistry`]
//! - Row storage and lookup: [`RowStore`], [`RowSelector`], [`RowMatch`]
//! - The table itself, with its cursor and listeners: [`Table`], [`TableEvent`]

mod cell;
mod convert;
mod cursor;
mod error;
mod event;
mod options;
mod store;
mod table;

pub use cell::{Cell, CellData, CellInput, Row};
pub use convert::{
    ColumnRegistry, ColumnSettings, ColumnType, ConversionHook, ConverterTable,
    IdentityConversion, TypedConversion,
};
pub use cursor::{Cursor, CursorMove};
pub use error::TableError;
pub use event::{ListenerId, Listeners, TableEvent};
pub use options::TableOptions;
pub use store::{RowMatch, RowSelector, RowStore};
pub use table::Table;
