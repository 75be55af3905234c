//! YAML grid manifests.
//!
//! A manifest declares the table options, the column settings, the editor
//! configuration and optional seed rows for one grid.

use crate::menu::{default_menu, MenuItem};
use crate::options::{EditorClasses, EditorLabels, EditorOptions};
use gridkit_core::{CellData, ColumnRegistry, ColumnSettings, Table, TableOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Error type for manifest loading.
#[derive(Debug)]
pub enum ConfigError {
    /// YAML parsing error
    Yaml(serde_yaml_ng::Error),
    /// Validation error
    Validation(String),
    /// Invalid value
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
    /// A seed row was rejected by the table
    Table(gridkit_core::TableError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml(e) => write!(f, "YAML error: {e}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::Table(e) => write!(f, "Table error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Yaml(e) => Some(e),
            Self::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_yaml_ng::Error> for ConfigError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        Self::Yaml(e)
    }
}

impl From<gridkit_core::TableError> for ConfigError {
    fn from(e: gridkit_core::TableError) -> Self {
        Self::Table(e)
    }
}

/// Built-in menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuAction {
    /// Open the cell editor
    EditCell,
    /// Open the row form
    EditRow,
    /// Stage a row removal
    RemoveRow,
}

/// Declarative menu item: exactly one of `action`, `separator` or `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemConfig {
    /// Built-in command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<MenuAction>,
    /// Separator marker
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub separator: bool,
    /// Link target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Link text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl MenuItemConfig {
    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let kinds = usize::from(self.action.is_some())
            + usize::from(self.separator)
            + usize::from(self.url.is_some());
        if kinds != 1 {
            return Err(ConfigError::InvalidValue {
                field: format!("editor.menu[{index}]"),
                message: "expected exactly one of action, separator or url".to_string(),
            });
        }
        if self.url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: format!("editor.menu[{index}].url"),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    fn to_item(&self) -> MenuItem {
        match (self.action, &self.url) {
            (Some(MenuAction::EditCell), _) => MenuItem::edit_cell(),
            (Some(MenuAction::EditRow), _) => MenuItem::edit_row(),
            (Some(MenuAction::RemoveRow), _) => MenuItem::remove_row(),
            (None, Some(url)) => {
                let link = MenuItem::link(url.clone());
                match &self.label {
                    Some(label) => link.with_label(label.clone()),
                    None => link,
                }
            }
            (None, None) => MenuItem::separator(),
        }
    }
}

/// Editor section of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Include hidden columns in the editor surface
    pub hidden_columns: bool,
    /// Enable the contextual menu
    pub context_menu: bool,
    /// Interaction that starts editing
    pub click_event: String,
    /// Columns the editor refuses to edit
    pub exclude_columns: BTreeSet<usize>,
    /// CSS hooks
    pub classes: EditorClasses,
    /// Label strings
    pub labels: EditorLabels,
    /// Menu content; the default menu when absent
    pub menu: Option<Vec<MenuItemConfig>>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let options = EditorOptions::default();
        Self {
            hidden_columns: options.hidden_columns,
            context_menu: options.context_menu,
            click_event: options.click_event,
            exclude_columns: options.exclude_columns,
            classes: options.classes,
            labels: options.labels,
            menu: None,
        }
    }
}

impl EditorConfig {
    /// Build the runtime editor options.
    #[must_use]
    pub fn to_options(&self) -> EditorOptions {
        let menu_items = self.menu.as_ref().map_or_else(default_menu, |items| {
            items.iter().map(MenuItemConfig::to_item).collect()
        });
        EditorOptions {
            classes: self.classes.clone(),
            labels: self.labels.clone(),
            hidden_columns: self.hidden_columns,
            context_menu: self.context_menu,
            click_event: self.click_event.clone(),
            exclude_columns: self.exclude_columns.clone(),
            menu_items,
        }
    }
}

/// Grid manifest loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridManifest {
    /// Table options
    #[serde(default)]
    pub table: TableOptions,
    /// Column settings in column order
    #[serde(default)]
    pub columns: Vec<ColumnSettings>,
    /// Editor configuration
    #[serde(default)]
    pub editor: EditorConfig,
    /// Seed rows
    #[serde(default)]
    pub rows: Vec<Vec<CellData>>,
}

impl GridManifest {
    /// Parse and validate a manifest from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or fails validation.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialize the manifest to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Width every row must have, if one is declared or implied.
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        self.table
            .column_count
            .or_else(|| (!self.columns.is_empty()).then_some(self.columns.len()))
    }

    /// Check the manifest for inconsistencies.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(count) = self.table.column_count {
            if !self.columns.is_empty() && self.columns.len() != count {
                return Err(ConfigError::InvalidValue {
                    field: "columns".to_string(),
                    message: format!(
                        "{} column settings declared, table.column_count is {count}",
                        self.columns.len()
                    ),
                });
            }
        }

        if let Some(width) = self.width() {
            if let Some(column) = self.editor.exclude_columns.iter().find(|&&c| c >= width) {
                return Err(ConfigError::InvalidValue {
                    field: "editor.exclude_columns".to_string(),
                    message: format!("column {column} does not exist (table has {width})"),
                });
            }
        }

        if let Some(menu) = &self.editor.menu {
            for (index, item) in menu.iter().enumerate() {
                item.validate(index)?;
            }
        }

        let expected = self.width().or_else(|| self.rows.first().map(Vec::len));
        if let Some(expected) = expected {
            if let Some((index, row)) = self
                .rows
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != expected)
            {
                return Err(ConfigError::Validation(format!(
                    "row {index} has {} cells, expected {expected}",
                    row.len()
                )));
            }
        }

        Ok(())
    }

    /// Build a populated table and the editor options.
    ///
    /// # Errors
    ///
    /// Returns an error if a seed row is rejected.
    pub fn build(&self) -> Result<(Table, EditorOptions), ConfigError> {
        let mut options = self.table.clone();
        options.column_count = self.width();

        let mut table =
            Table::new(options).with_columns(ColumnRegistry::new(self.columns.clone()));
        for row in &self.rows {
            table.add(row.iter().cloned())?;
        }
        tracing::debug!(rows = table.len(), columns = self.columns.len(), "grid built");
        Ok((table, self.editor.to_options()))
    }
}
