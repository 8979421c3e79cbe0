// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Undo/redo log of tree mutations.

use graph::{Person, Relationship};

/// A completed mutation, holding what is needed to issue its inverse.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntry {
    /// A person was created, optionally linked to an existing person.
    AddPerson {
        person: Person,
        relationship: Option<Relationship>,
    },
    /// A person was deleted together with all of their relationships.
    DeletePerson {
        person: Person,
        relationships: Vec<Relationship>,
    },
}

impl HistoryEntry {
    pub fn person(&self) -> &Person {
        match self {
            HistoryEntry::AddPerson { person, .. } | HistoryEntry::DeletePerson { person, .. } => {
                person
            }
        }
    }
}

/// Manages the undo/redo log, similar to an editor's undo stack.
///
/// Entries before the cursor can be undone; entries from the cursor on can be redone.
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Every recorded entry, oldest first
    entries: Vec<HistoryEntry>,
    /// Number of entries currently applied
    cursor: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed mutation.
    /// Truncates the redo side, since it no longer follows from the current state
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.cursor);
        self.entries.push(entry);
        self.cursor += 1;
    }

    /// The entry an undo would revert, without moving the cursor
    pub fn undo_candidate(&self) -> Option<&HistoryEntry> {
        self.cursor.checked_sub(1).and_then(|index| self.entries.get(index))
    }

    /// Moves the most recent entry to the redo side, after its inverse succeeded
    pub fn mark_undone(&mut self) {
        if self.can_undo() {
            self.cursor -= 1;
        }
    }

    /// The entry a redo would re-apply, without moving the cursor
    pub fn redo_candidate(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    /// Moves the next entry back to the undo side.
    ///
    /// `updated` replaces it, since a redone creation gets fresh server ids.
    pub fn mark_redone(&mut self, updated: HistoryEntry) {
        if let Some(slot) = self.entries.get_mut(self.cursor) {
            *slot = updated;
            self.cursor += 1;
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn undo_len(&self) -> usize {
        self.cursor
    }

    pub fn redo_len(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Drops the most recent entry without moving it to the redo side, for mutations that
    /// cannot be reverted
    pub fn discard_undo_candidate(&mut self) -> Option<HistoryEntry> {
        let index = self.cursor.checked_sub(1)?;
        self.cursor = index;
        Some(self.entries.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(id: &str) -> HistoryEntry {
        HistoryEntry::AddPerson {
            person: Person::new(id, id),
            relationship: None,
        }
    }

    #[test]
    fn undo_and_redo_move_the_cursor() {
        let mut history = CommandHistory::new();
        assert!(!history.can_undo());

        history.record(add("a"));
        history.record(add("b"));
        assert_eq!(history.undo_candidate().map(|e| e.person().id.as_str()), Some("b"));

        history.mark_undone();
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 1);
        assert_eq!(history.redo_candidate().map(|e| e.person().id.as_str()), Some("b"));

        history.mark_redone(add("b2"));
        assert!(!history.can_redo());
        assert_eq!(history.undo_candidate().map(|e| e.person().id.as_str()), Some("b2"));
    }

    #[test]
    fn recording_clears_the_redo_side() {
        let mut history = CommandHistory::new();
        history.record(add("a"));
        history.mark_undone();
        assert!(history.can_redo());

        history.record(add("c"));
        assert!(!history.can_redo());
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn discarding_keeps_older_entries_undoable_and_redo_intact() {
        let mut history = CommandHistory::new();
        history.record(add("a"));
        history.record(add("b"));
        history.record(add("c"));
        history.mark_undone();

        let dropped = history.discard_undo_candidate();
        assert_eq!(dropped.map(|e| e.person().id.clone()), Some("b".to_string()));
        assert_eq!(history.undo_candidate().map(|e| e.person().id.as_str()), Some("a"));
        assert_eq!(history.redo_candidate().map(|e| e.person().id.as_str()), Some("c"));

        history.discard_undo_candidate();
        assert!(history.discard_undo_candidate().is_none());
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn marking_on_an_empty_side_is_a_no_op() {
        let mut history = CommandHistory::new();
        history.mark_undone();
        history.mark_redone(add("x"));
        assert_eq!(history.undo_len(), 0);
        assert_eq!(history.redo_len(), 0);
    }
}

// End of File
