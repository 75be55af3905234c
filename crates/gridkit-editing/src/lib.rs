//! Editing surface for gridkit tables.
//!
//! Adds inline cell editing, whole-row forms and a configurable context menu
//! on top of [`gridkit_core::Table`]. Every change is committed through the
//! table's own mutation operations, so listeners see edits exactly as they
//! see programmatic updates.
//!
//! # Example
//!
//! ```
//! use gridkit_core::{Table, TableOptions};
//! use gridkit_editing::{EditTarget, Editor, EditorOptions, MenuOutcome};
//!
//! let mut table = Table::new(TableOptions::default());
//! table.add(["alice", "30"]).unwrap();
//!
//! let mut editor = Editor::new(EditorOptions::default());
//! editor.open_menu(EditTarget::cell(0, 1)).unwrap();
//! assert_eq!(editor.activate(&mut table, 0).unwrap(), MenuOutcome::Done);
//! editor.save_cell(&mut table, "31").unwrap();
//!
//! assert_eq!(table.row(0).unwrap().get(1).unwrap().display(), "31");
//! ```

mod editor;
mod error;
mod manifest;
mod menu;
mod options;

pub use editor::{CellEdit, EditState, EditTarget, Editor, RowEdit, RowInput};
pub use error::EditError;
pub use manifest::{ConfigError, EditorConfig, GridManifest, MenuAction, MenuItemConfig};
pub use menu::{default_menu, ActionFn, LabelFn, MenuEntry, MenuItem, MenuOutcome};
pub use options::{EditorClasses, EditorLabels, EditorOptions};
