use std::collections::VecDeque;

use ropey::Rope;

/// Edits kept before the oldest ones are dropped
pub const HISTORY_LIMIT: usize = 1000;

/// A single reversible change: at char `at`, `removed` was replaced by `inserted`
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    at: usize,
    removed: String,
    inserted: String,
}

impl Edit {
    fn apply(&self, text: &mut Rope) {
        let end = self.at + self.removed.chars().count();
        text.remove(self.at..end);
        text.insert(self.at, &self.inserted);
    }

    fn revert(&self, text: &mut Rope) {
        let end = self.at + self.inserted.chars().count();
        text.remove(self.at..end);
        text.insert(self.at, &self.removed);
    }
}

/// Undo/redo log for one document
#[derive(Debug, Default)]
pub struct History {
    /// Oldest edit at the front so the limit drops it cheaply
    undo: VecDeque<Edit>,
    redo: Vec<Edit>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, at: usize, removed: String, inserted: String) {
        if removed == inserted {
            return;
        }
        self.redo.clear();
        self.undo.push_back(Edit {
            at,
            removed,
            inserted,
        });
        if self.undo.len() > HISTORY_LIMIT {
            self.undo.pop_front();
        }
    }

    /// Revert the most recent edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self, text: &mut Rope) -> bool {
        match self.undo.pop_back() {
            Some(edit) => {
                edit.revert(text);
                self.redo.push(edit);
                true
            }
            None => false,
        }
    }

    /// Reapply the most recently undone edit
    pub fn redo(&mut self, text: &mut Rope) -> bool {
        match self.redo.pop() {
            Some(edit) => {
                edit.apply(text);
                self.undo.push_back(edit);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
