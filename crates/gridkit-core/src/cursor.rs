//! Single-row cursor.

use std::collections::BTreeSet;

/// A cursor transition: `(new, previous)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorMove {
    /// Cursor after the move
    pub cursor: Option<usize>,
    /// Cursor before the move
    pub previous: Option<usize>,
}

/// Index of the focused row, or none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: Option<usize>,
}

impl Cursor {
    /// Create a cursor pointing nowhere.
    #[must_use]
    pub const fn new() -> Self {
        Self { index: None }
    }

    /// Current index.
    #[must_use]
    pub const fn get(&self) -> Option<usize> {
        self.index
    }

    /// Move the cursor. Returns `None` when `index` equals the current value.
    pub fn set(&mut self, index: Option<usize>) -> Option<CursorMove> {
        if index == self.index {
            return None;
        }
        let previous = std::mem::replace(&mut self.index, index);
        Some(CursorMove {
            cursor: index,
            previous,
        })
    }

    /// Keep the cursor on the same logical row after `removed` rows are deleted.
    ///
    /// The index shifts down by the number of removed rows before it. If the
    /// cursor's own row was removed, or the shifted index is not below `len`
    /// (the row count after removal), the cursor is cleared.
    pub fn remap_after_remove(
        &mut self,
        removed: &BTreeSet<usize>,
        len: usize,
    ) -> Option<CursorMove> {
        let current = self.index?;
        let next = if removed.contains(&current) {
            None
        } else {
            Some(current - removed.range(..current).count()).filter(|&index| index < len)
        };
        self.set(next)
    }
}
