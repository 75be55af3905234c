//! Context menu descriptors.
//!
//! A menu is an ordered list of [`MenuItem`]s. Commands carry a label
//! function and an action; both receive the editor, and actions also receive
//! the table they operate on, so no item captures either implicitly.

use crate::editor::Editor;
use crate::error::EditError;
use gridkit_core::Table;
use std::fmt;
use std::sync::Arc;

/// Computes a command label from the editor configuration.
pub type LabelFn = Arc<dyn Fn(&Editor) -> String + Send + Sync>;

/// Runs a command against the editor and its table.
pub type ActionFn = Arc<dyn Fn(&mut Editor, &mut Table) -> Result<(), EditError> + Send + Sync>;

/// Menu item variant.
#[derive(Clone)]
pub enum MenuItem {
    /// Clickable command
    Command {
        /// Label function
        label: LabelFn,
        /// Action run on activation
        action: ActionFn,
    },
    /// Separator line
    Separator,
    /// Navigational link
    Link {
        /// Link target
        url: String,
        /// Display text, the URL itself when absent
        label: Option<String>,
    },
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command { .. } => f.write_str("Command"),
            Self::Separator => f.write_str("Separator"),
            Self::Link { url, label } => f
                .debug_struct("Link")
                .field("url", url)
                .field("label", label)
                .finish(),
        }
    }
}

impl MenuItem {
    /// Create a command item.
    pub fn command<L, A>(label: L, action: A) -> Self
    where
        L: Fn(&Editor) -> String + Send + Sync + 'static,
        A: Fn(&mut Editor, &mut Table) -> Result<(), EditError> + Send + Sync + 'static,
    {
        Self::Command {
            label: Arc::new(label),
            action: Arc::new(action),
        }
    }

    /// Create a separator.
    #[must_use]
    pub const fn separator() -> Self {
        Self::Separator
    }

    /// Create a link.
    #[must_use]
    pub fn link(url: impl Into<String>) -> Self {
        Self::Link {
            url: url.into(),
            label: None,
        }
    }

    /// Set the display text of a link.
    #[must_use]
    pub fn with_label(mut self, text: impl Into<String>) -> Self {
        if let Self::Link { label, .. } = &mut self {
            *label = Some(text.into());
        }
        self
    }

    /// Built-in command opening the cell editor on the menu target.
    #[must_use]
    pub fn edit_cell() -> Self {
        Self::command(
            |editor| editor.options().labels.edit_cell.clone(),
            |editor, table| {
                let target = editor.menu_target().ok_or(EditError::NoActiveEdit)?;
                let column = target.column.ok_or(EditError::NoColumnTarget)?;
                editor.edit_cell(table, target.row, column).map(|_| ())
            },
        )
    }

    /// Built-in command opening the row editor on the menu target.
    #[must_use]
    pub fn edit_row() -> Self {
        Self::command(
            |editor| editor.options().labels.edit_row.clone(),
            |editor, table| {
                let target = editor.menu_target().ok_or(EditError::NoActiveEdit)?;
                editor.edit_row(table, target.row).map(|_| ())
            },
        )
    }

    /// Built-in command staging removal of the menu target's row.
    #[must_use]
    pub fn remove_row() -> Self {
        Self::command(
            |editor| editor.options().labels.remove_row.clone(),
            |editor, table| {
                let target = editor.menu_target().ok_or(EditError::NoActiveEdit)?;
                editor.remove_row(table, target.row).map(|_| ())
            },
        )
    }

    /// Check if this item can be activated.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self, Self::Separator)
    }
}

/// The default menu: edit cell, edit row, separator, remove row.
#[must_use]
pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::edit_cell(),
        MenuItem::edit_row(),
        MenuItem::separator(),
        MenuItem::remove_row(),
    ]
}

/// A menu item resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// Command with its computed label
    Command {
        /// Position in the menu
        index: usize,
        /// Label text
        label: String,
    },
    /// Separator
    Separator {
        /// Position in the menu
        index: usize,
    },
    /// Link
    Link {
        /// Position in the menu
        index: usize,
        /// Display text
        label: String,
        /// Link target
        url: String,
    },
}

impl MenuEntry {
    /// Position of the entry in the menu.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Command { index, .. } | Self::Separator { index } | Self::Link { index, .. } => {
                *index
            }
        }
    }
}

/// Result of activating a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The command ran
    Done,
    /// The presentation layer should navigate to this URL
    Navigate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_menu_shape() {
        let menu = default_menu();
        assert_eq!(menu.len(), 4);
        assert!(menu[0].is_actionable());
        assert!(!menu[2].is_actionable());
    }

    #[test]
    fn test_link_label() {
        let item = MenuItem::link("https://example.com/help").with_label("Help");
        match item {
            MenuItem::Link { url, label } => {
                assert_eq!(url, "https://example.com/help");
                assert_eq!(label.as_deref(), Some("Help"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_with_label_ignored_on_separator() {
        assert!(matches!(
            MenuItem::separator().with_label("x"),
            MenuItem::Separator
        ));
    }

    #[test]
    fn test_entry_index() {
        assert_eq!(MenuEntry::Separator { index: 3 }.index(), 3);
    }
}
