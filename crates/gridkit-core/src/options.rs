//! Table-level feature flags.

use serde::{Deserialize, Serialize};

/// Options fixed when a table is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Pass written values through the column conversion hooks
    pub convert_on_write: bool,
    /// Ask the renderer to scroll the cursor row into view
    pub scroll_y: bool,
    /// Declared column count, checked on every write
    pub column_count: Option<usize>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            convert_on_write: true,
            scroll_y: false,
            column_count: None,
        }
    }
}

impl TableOptions {
    /// Create default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable conversion on write.
    #[must_use]
    pub const fn convert_on_write(mut self, enabled: bool) -> Self {
        self.convert_on_write = enabled;
        self
    }

    /// Enable or disable scroll-into-view hints.
    #[must_use]
    pub const fn scroll_y(mut self, enabled: bool) -> Self {
        self.scroll_y = enabled;
        self
    }

    /// Declare the column count.
    #[must_use]
    pub const fn column_count(mut self, count: usize) -> Self {
        self.column_count = Some(count);
        self
    }
}
