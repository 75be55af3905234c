//! Table notifications and listener registration.
//!
//! Every mutation finishes before its event is delivered, and listeners get a
//! shared view of the store as it stands after the mutation.

use crate::store::RowStore;
use std::fmt;

/// Notification emitted by a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    /// Rows were added, removed or replaced
    Updated {
        /// Row count after the mutation
        rows: usize,
    },
    /// The table needs repainting without a structural change
    Render,
    /// The row at `row` should be scrolled to the nearest visible position
    ScrollIntoView {
        /// Row holding the cursor
        row: usize,
    },
    /// The cursor changed
    CursorMoved {
        /// New cursor
        cursor: Option<usize>,
        /// Previous cursor
        previous: Option<usize>,
    },
}

impl TableEvent {
    /// Stable event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Updated { .. } => "datatable.update",
            Self::Render => "datatable.render",
            Self::ScrollIntoView { .. } => "datatable.scroll",
            Self::CursorMoved { .. } => "datatable.cursormove",
        }
    }
}

impl fmt::Display for TableEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle returned by [`Listeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Type alias for table listeners.
type Listener = Box<dyn Fn(&TableEvent, &RowStore) + Send + Sync>;

/// Registry of table listeners, called in subscription order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl Listeners {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&TableEvent, &RowStore) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver an event to every listener.
    pub fn emit(&self, event: &TableEvent, store: &RowStore) {
        tracing::trace!(event = event.name(), listeners = self.entries.len(), "emit");
        for (_, listener) in &self.entries {
            listener(event, store);
        }
    }
}
