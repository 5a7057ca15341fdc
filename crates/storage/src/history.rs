//! Bounded calculation history with snapshot-based undo/redo.
//!
//! # Design
//!
//! - The live sequence is an `Arc<Vec<Calculation>>`, oldest first.
//! - A [`Snapshot`] is a clone of that `Arc`. Mutation goes through
//!   `Arc::make_mut`, which copies the vector whenever a snapshot still
//!   shares it, so a stored snapshot can never observe a later edit.
//! - Every mutation (`add`, `clear`) pushes the pre-mutation state onto the
//!   undo stack and empties the redo stack.
//! - `undo`/`redo` swap whole states between the stacks; they are restores,
//!   not inverses of the last edit.
//! - Only the live sequence is bounded by `max_size`. The stacks are not.
//!
//! # Eviction
//!
//! `add` snapshots *before* appending and evicting, so undoing an add that
//! evicted the oldest record brings that record back.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tally_core::Calculation;
use tracing::debug;

/// Frozen copy of a history sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot(Arc<Vec<Calculation>>);

impl Snapshot {
    /// Records in insertion order.
    pub fn items(&self) -> &[Calculation] {
        &self.0
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ordered, size-bounded calculation history.
#[derive(Debug, Clone)]
pub struct History {
    items: Arc<Vec<Calculation>>,
    max_size: NonZeroUsize,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl History {
    /// Create an empty history holding at most `max_size` records.
    pub fn new(max_size: NonZeroUsize) -> Self {
        Self {
            items: Arc::new(Vec::new()),
            max_size,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Create a history directly from records, bypassing [`History::add`].
    ///
    /// No undo snapshots are recorded. If `items` is longer than `max_size`
    /// only the newest `max_size` records are kept.
    pub fn from_items(mut items: Vec<Calculation>, max_size: NonZeroUsize) -> Self {
        let excess = items.len().saturating_sub(max_size.get());
        if excess > 0 {
            items.drain(..excess);
        }
        Self {
            items: Arc::new(items),
            ..Self::new(max_size)
        }
    }

    /// Append a calculation, evicting the oldest record if over the bound.
    pub fn add(&mut self, calculation: Calculation) {
        self.push_undo();
        let max_size = self.max_size.get();
        let items = Arc::make_mut(&mut self.items);
        items.push(calculation);
        if items.len() > max_size {
            let evicted = items.remove(0);
            debug!(operation = evicted.operation(), "evicted oldest calculation");
        }
        debug!(len = self.items.len(), "calculation added to history");
    }

    /// Restore the state before the most recent mutation.
    ///
    /// Returns `false` (and changes nothing) when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(self.snapshot());
        self.items = previous.0;
        debug!(len = self.items.len(), "history undo");
        true
    }

    /// Re-apply the most recently undone state.
    ///
    /// Returns `false` (and changes nothing) when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(self.snapshot());
        self.items = next.0;
        debug!(len = self.items.len(), "history redo");
        true
    }

    /// Remove every record. Undoable.
    pub fn clear(&mut self) {
        self.push_undo();
        self.items = Arc::new(Vec::new());
        debug!("history cleared");
    }

    /// Records in insertion order, oldest first.
    pub fn items(&self) -> &[Calculation] {
        &self.items
    }

    /// Owned copy of the records.
    pub fn to_vec(&self) -> Vec<Calculation> {
        self.items.as_ref().clone()
    }

    /// Frozen copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(Arc::clone(&self.items))
    }

    /// Most recent record, if any.
    pub fn last(&self) -> Option<&Calculation> {
        self.items.last()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no live records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of live records.
    pub fn max_size(&self) -> NonZeroUsize {
        self.max_size
    }

    /// Check if `undo` would change anything.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if `redo` would change anything.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of states on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of states on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    fn push_undo(&mut self) {
        self.undo_stack.push(self.snapshot());
        self.redo_stack.clear();
    }
}
