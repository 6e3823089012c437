//! Per-slot navigation history
//!
//! Every slot that has held a tab owns a `TabHistory`: the ordered list of
//! things that were current in that slot plus a cursor, which backs the
//! back/forward buttons. The `HistoryMap` is keyed by slot id and loses an
//! entry when its slot closes.

use crate::tab::{SlotId, Tab, TabInput};
use std::collections::HashMap;

/// Slot id → history of that slot.
pub type HistoryMap = HashMap<SlotId, TabHistory>;

/// Back/forward stack for one slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabHistory {
    entries: Vec<TabInput>,
    cursor: usize,
}

impl TabHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `entry` as current, dropping anything ahead of the cursor.
    ///
    /// Re-pushing the entry that is already current only refreshes its
    /// stored view state and keeps the forward entries. At most `limit`
    /// entries are kept; the oldest go first.
    pub fn push(&mut self, entry: TabInput, limit: usize) {
        if let Some(current) = self.entries.get_mut(self.cursor)
            && current.identity == entry.identity
        {
            *current = entry;
            return;
        }

        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);

        let limit = limit.max(1);
        if self.entries.len() > limit {
            let excess = self.entries.len() - limit;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back and return the entry that becomes current.
    pub fn back(&mut self) -> Option<&TabInput> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward and return the entry that becomes current.
    pub fn forward(&mut self) -> Option<&TabInput> {
        if !self.can_go_next() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn current(&self) -> Option<&TabInput> {
        self.entries.get(self.cursor)
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TabInput] {
        &self.entries
    }
}

/// Return `history` with `tab` recorded as current in its slot.
pub fn push_history(mut history: HistoryMap, tab: &Tab, limit: usize) -> HistoryMap {
    history
        .entry(tab.slot_id)
        .or_default()
        .push(tab.to_input(), limit);
    history
}
