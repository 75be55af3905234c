//! Editor configuration: CSS hooks, labels and feature toggles.

use crate::menu::{default_menu, MenuItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

fn class(hook: &str) -> String {
    format!("datatable-editor-{hook}")
}

/// CSS class names for the editor's sub-elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorClasses {
    pub row: String,
    pub form: String,
    pub item: String,
    pub menu: String,
    pub save: String,
    pub block: String,
    pub close: String,
    pub inner: String,
    pub input: String,
    pub label: String,
    pub modal: String,
    pub action: String,
    pub header: String,
    pub wrapper: String,
    pub editable: String,
    pub container: String,
    pub separator: String,
}

impl Default for EditorClasses {
    fn default() -> Self {
        Self {
            row: class("row"),
            form: class("form"),
            item: class("item"),
            menu: class("menu"),
            save: class("save"),
            block: class("block"),
            close: class("close"),
            inner: class("inner"),
            input: class("input"),
            label: class("label"),
            modal: class("modal"),
            action: class("action"),
            header: class("header"),
            wrapper: class("wrapper"),
            editable: class("editable"),
            container: class("container"),
            separator: class("separator"),
        }
    }
}

/// User-facing label strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorLabels {
    /// Menu label for editing one cell
    pub edit_cell: String,
    /// Menu label for editing a whole row
    pub edit_row: String,
    /// Menu label for removing a row
    pub remove_row: String,
    /// Removal confirmation prompt
    pub really_remove: String,
}

impl Default for EditorLabels {
    fn default() -> Self {
        Self {
            edit_cell: "Edit Cell".to_string(),
            edit_row: "Edit Row".to_string(),
            remove_row: "Remove Row".to_string(),
            really_remove: "Are you sure?".to_string(),
        }
    }
}

/// Complete editor configuration, read-only once the editor is built.
#[derive(Debug, Clone)]
pub struct EditorOptions {
    /// CSS hooks
    pub classes: EditorClasses,
    /// Label strings
    pub labels: EditorLabels,
    /// Include hidden columns in the editor surface
    pub hidden_columns: bool,
    /// Enable the contextual menu
    pub context_menu: bool,
    /// Interaction that starts editing
    pub click_event: String,
    /// Columns the editor refuses to edit
    pub exclude_columns: BTreeSet<usize>,
    /// Contextual menu content, in display order
    pub menu_items: Vec<MenuItem>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            classes: EditorClasses::default(),
            labels: EditorLabels::default(),
            hidden_columns: false,
            context_menu: true,
            click_event: "dblclick".to_string(),
            exclude_columns: BTreeSet::new(),
            menu_items: default_menu(),
        }
    }
}

impl EditorOptions {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude a column from editing.
    #[must_use]
    pub fn exclude_column(mut self, column: usize) -> Self {
        self.exclude_columns.insert(column);
        self
    }

    /// Include hidden columns in the editor.
    #[must_use]
    pub const fn hidden_columns(mut self, include: bool) -> Self {
        self.hidden_columns = include;
        self
    }

    /// Enable or disable the context menu.
    #[must_use]
    pub const fn context_menu(mut self, enabled: bool) -> Self {
        self.context_menu = enabled;
        self
    }

    /// Set the interaction that starts editing.
    #[must_use]
    pub fn click_event(mut self, event: impl Into<String>) -> Self {
        self.click_event = event.into();
        self
    }

    /// Replace the menu.
    #[must_use]
    pub fn menu_items(mut self, items: Vec<MenuItem>) -> Self {
        self.menu_items = items;
        self
    }

    /// Replace the labels.
    #[must_use]
    pub fn labels(mut self, labels: EditorLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Replace the CSS hooks.
    #[must_use]
    pub fn classes(mut self, classes: EditorClasses) -> Self {
        self.classes = classes;
        self
    }
}
