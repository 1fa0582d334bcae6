use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

use ropey::{Rope, RopeSlice};
use serde::Serialize;

use super::history::History;
use crate::error::{Result, ScribeError};
use crate::search::{self, Match};

/// Stable identifier of a document within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DocumentId(pub(crate) u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a UI reads back after each operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub id: DocumentId,
    pub display_name: String,
    pub path: Option<PathBuf>,
    pub modified: bool,
    pub line_count: usize,
}

/// One open text buffer
#[derive(Debug)]
pub struct Document {
    id: DocumentId,
    text: Rope,
    filepath: Option<PathBuf>,
    modified: bool,
    untitled: Option<u32>,
    history: History,
}

impl Document {
    /// A fresh document. `untitled` is the number shown while it has no path.
    pub(crate) fn new(
        id: DocumentId,
        filepath: Option<PathBuf>,
        content: &str,
        untitled: Option<u32>,
    ) -> Self {
        Self {
            id,
            text: Rope::from_str(content),
            filepath,
            modified: false,
            untitled,
            history: History::new(),
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn path(&self) -> Option<&Path> {
        self.filepath.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// File name when backed by a file, otherwise "Untitled N"
    pub fn display_name(&self) -> String {
        if let Some(name) = self.filepath.as_ref().and_then(|p| p.file_name()) {
            return name.to_string_lossy().to_string();
        }
        format!("Untitled {}", self.untitled.unwrap_or_default())
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.len_chars() == 0
    }

    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    /// Replace the whole content. Always marks the document modified.
    pub fn set_content(&mut self, content: &str) {
        let removed = self.text.to_string();
        self.text = Rope::from_str(content);
        self.history.record(0, removed, content.to_string());
        self.modified = true;
    }

    /// Insert `text` at a char index, clamped to the end of the document
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let at = char_idx.min(self.text.len_chars());
        self.text.insert(at, text);
        self.history.record(at, String::new(), text.to_string());
        self.modified = true;
    }

    /// Remove a char range, clamped to the document
    pub fn remove(&mut self, range: Range<usize>) {
        let Range { start, end } = self.clamp(range);
        if start == end {
            return;
        }
        let removed = self.text.slice(start..end).to_string();
        self.text.remove(start..end);
        self.history.record(start, removed, String::new());
        self.modified = true;
    }

    /// Clamp a char range to the document
    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.text.len_chars();
        let start = range.start.min(len);
        start..range.end.clamp(start, len)
    }

    /// The whole document as a char range
    pub fn select_all(&self) -> Range<usize> {
        0..self.text.len_chars()
    }

    /// Text in a char range, clamped to the document
    pub fn copy(&self, range: Range<usize>) -> String {
        self.text.slice(self.clamp(range)).to_string()
    }

    /// Remove a char range and return what was removed. Undoable like `remove`.
    pub fn cut(&mut self, range: Range<usize>) -> String {
        let range = self.clamp(range);
        let taken = self.copy(range.clone());
        self.remove(range);
        taken
    }

    /// Insert clipboard text at a char index. Undoable like `insert`.
    pub fn paste(&mut self, char_idx: usize, text: &str) {
        self.insert(char_idx, text);
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo(&mut self.text);
        if changed {
            self.modified = true;
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo(&mut self.text);
        if changed {
            self.modified = true;
        }
        changed
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Clear the modified flag after a successful write, adopting `new_path` if given
    pub fn mark_saved(&mut self, new_path: Option<PathBuf>) {
        if let Some(path) = new_path {
            self.filepath = Some(path);
        }
        self.modified = false;
    }

    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    pub fn line(&self, idx: usize) -> RopeSlice<'_> {
        self.text.line(idx)
    }

    /// Char offset where `line_number` (1-indexed) begins
    pub fn line_start(&self, line_number: usize) -> Result<usize> {
        let total = self.line_count();
        if line_number < 1 || line_number > total {
            return Err(ScribeError::LineOutOfRange {
                line: line_number,
                total,
            });
        }
        Ok(self.text.line_to_char(line_number - 1))
    }

    /// Char range covering lines `first..=last` (1-indexed), including the last line's newline
    pub fn line_range(&self, first: usize, last: usize) -> Result<Range<usize>> {
        let start = self.line_start(first)?;
        let end = match last.checked_add(1).filter(|&next| next <= self.line_count()) {
            Some(next) => self.line_start(next)?,
            None => {
                self.line_start(last)?;
                self.text.len_chars()
            }
        };
        Ok(start..end.max(start))
    }

    pub fn find_all(&self, query: &str, case_insensitive: bool) -> Vec<Match> {
        search::find_all(&self.text(), query, case_insensitive)
    }

    /// Replace every occurrence of `find`. Content is only touched when something matched.
    pub fn replace_all(&mut self, find: &str, replace: &str) -> usize {
        let (content, count) = search::replace_all(&self.text(), find, replace);
        if count > 0 {
            self.set_content(&content);
        }
        count
    }

    pub fn info(&self) -> DocumentInfo {
        DocumentInfo {
            id: self.id,
            display_name: self.display_name(),
            path: self.filepath.clone(),
            modified: self.modified,
            line_count: self.line_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn untitled(content: &str) -> Document {
        Document::new(DocumentId(1), None, content, Some(1))
    }

    #[test]
    fn new_document_is_clean() {
        let doc = untitled("");
        assert!(!doc.is_modified());
        assert!(doc.path().is_none());
        assert_eq!(doc.line_count(), 1); // empty rope has 1 line
        assert_eq!(doc.display_name(), "Untitled 1");
    }

    #[test]
    fn display_name_uses_file_name() {
        let doc = Document::new(DocumentId(2), Some(PathBuf::from("/tmp/notes.txt")), "", None);
        assert_eq!(doc.display_name(), "notes.txt");
    }

    #[test]
    fn set_content_marks_modified_even_when_identical() {
        let mut doc = untitled("same");
        doc.set_content("same");
        assert!(doc.is_modified());
        assert_eq!(doc.text(), "same");
    }

    #[test]
    fn mark_saved_clears_modified_and_adopts_path() {
        let mut doc = untitled("");
        doc.set_content("text");
        doc.mark_saved(Some(PathBuf::from("/tmp/a.txt")));
        assert!(!doc.is_modified());
        assert_eq!(doc.path(), Some(Path::new("/tmp/a.txt")));

        doc.set_content("more");
        doc.mark_saved(None);
        assert_eq!(doc.path(), Some(Path::new("/tmp/a.txt")));
    }

    #[test]
    fn line_count_counts_lines() {
        assert_eq!(untitled("a\nb\nc").line_count(), 3);
        assert_eq!(untitled("hello\nworld\ntest\n").line_count(), 4); // trailing newline starts a line
    }

    #[test]
    fn line_count_ignores_carriage_returns() {
        assert_eq!(untitled("a\rb\r\nc").line_count(), 2);
    }

    #[test]
    fn line_start_matches_search_goto_line() {
        let doc = untitled("a\nbb\nccc");
        for line in 1..=3 {
            assert_eq!(
                doc.line_start(line).unwrap(),
                search::goto_line(&doc.text(), line).unwrap()
            );
        }
        assert!(matches!(
            doc.line_start(4),
            Err(ScribeError::LineOutOfRange { line: 4, total: 3 })
        ));
    }

    #[test]
    fn insert_and_remove_are_clamped() {
        let mut doc = untitled("abc");
        doc.insert(100, "d");
        assert_eq!(doc.text(), "abcd");
        doc.remove(2..100);
        assert_eq!(doc.text(), "ab");
        assert!(doc.is_modified());
    }

    #[test]
    fn undo_redo_round_trip() {
        let mut doc = untitled("hello");
        doc.insert(5, " world");
        doc.set_content("replaced");

        assert!(doc.undo());
        assert_eq!(doc.text(), "hello world");
        assert!(doc.undo());
        assert_eq!(doc.text(), "hello");
        assert!(!doc.undo());

        assert!(doc.redo());
        assert_eq!(doc.text(), "hello world");
    }

    #[test]
    fn can_undo_and_can_redo_track_history() {
        let mut doc = untitled("abc");
        assert!(!doc.can_undo());
        assert!(!doc.can_redo());

        doc.insert(3, "d");
        assert!(doc.can_undo());
        doc.undo();
        assert!(!doc.can_undo());
        assert!(doc.can_redo());

        doc.insert(0, "z");
        assert!(!doc.can_redo());
    }

    #[test]
    fn copy_leaves_document_untouched() {
        let doc = untitled("hello world");
        assert_eq!(doc.copy(6..11), "world");
        assert_eq!(doc.copy(6..100), "world");
        assert_eq!(doc.copy(doc.select_all()), "hello world");
        assert!(!doc.is_modified());
        assert!(!doc.can_undo());
    }

    #[test]
    fn cut_removes_and_is_undoable() {
        let mut doc = untitled("hello world");
        assert_eq!(doc.cut(5..11), " world");
        assert_eq!(doc.text(), "hello");
        assert!(doc.is_modified());

        assert!(doc.undo());
        assert_eq!(doc.text(), "hello world");
        assert_eq!(doc.cut(20..30), "");
    }

    #[test]
    fn paste_inserts_and_is_undoable() {
        let mut doc = untitled("ac");
        doc.paste(1, "b");
        assert_eq!(doc.text(), "abc");
        doc.paste(99, "d");
        assert_eq!(doc.text(), "abcd");
        assert!(doc.undo());
        assert_eq!(doc.text(), "abc");
    }

    #[test]
    fn cut_all_then_paste_restores_text() {
        let mut doc = untitled("one\ntwo");
        let taken = doc.cut(doc.select_all());
        assert!(doc.is_empty());
        doc.paste(0, &taken);
        assert_eq!(doc.text(), "one\ntwo");
    }

    #[test]
    fn line_range_spans_whole_lines() {
        let doc = untitled("a\nbb\nccc");
        assert_eq!(doc.copy(doc.line_range(2, 2).unwrap()), "bb\n");
        assert_eq!(doc.copy(doc.line_range(2, 3).unwrap()), "bb\nccc");
        assert_eq!(doc.copy(doc.line_range(1, 3).unwrap()), "a\nbb\nccc");
        assert!(matches!(
            doc.line_range(2, 5),
            Err(ScribeError::LineOutOfRange { line: 5, total: 3 })
        ));
        assert!(doc.line_range(0, 1).is_err());
    }

    #[test]
    fn undo_after_save_marks_modified_again() {
        let mut doc = untitled("");
        doc.insert(0, "x");
        doc.mark_saved(Some(PathBuf::from("/tmp/x.txt")));
        assert!(doc.undo());
        assert!(doc.is_modified());
    }

    #[test]
    fn replace_all_only_mutates_on_match() {
        let mut doc = untitled("foo bar foo");
        assert_eq!(doc.replace_all("zzz", "y"), 0);
        assert!(!doc.is_modified());

        assert_eq!(doc.replace_all("foo", "baz"), 2);
        assert_eq!(doc.text(), "baz bar baz");
        assert!(doc.is_modified());
    }

    #[test]
    fn info_reflects_state() {
        let mut doc = untitled("a\nb");
        doc.insert(0, "z");
        let info = doc.info();
        assert_eq!(info.display_name, "Untitled 1");
        assert!(info.modified);
        assert_eq!(info.line_count, 2);
    }
}
