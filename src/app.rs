use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::debug;

use scribe::config::Settings;
use scribe::editor::{Document, DocumentId, Session};
use scribe::error::{Result, ScribeError};
use scribe::fs::FileAccess;
use scribe::search::{self, Match};
use scribe::theme::{Theme, ThemeMode};

/// Everything the console shows, plus the files it reads and writes
pub struct App<F: FileAccess> {
    pub session: Session,
    pub settings: Settings,
    pub theme: Theme,
    files: F,
    /// Find results for one document
    pub highlights: Option<(DocumentId, Vec<Match>)>,
    /// Caret as a char offset in one document
    pub cursor: Option<(DocumentId, usize)>,
    /// Selected char range in one document
    pub selection: Option<(DocumentId, Range<usize>)>,
    pub clipboard: String,
    pub message: Option<String>,
    /// Set when the document view should be printed again
    pub redraw: bool,
    pub running: bool,
}

impl<F: FileAccess> App<F> {
    pub fn new(settings: Settings, files: F) -> Self {
        Self {
            session: Session::new(),
            theme: Theme::for_mode(settings.theme),
            settings,
            files,
            highlights: None,
            cursor: None,
            selection: None,
            clipboard: String::new(),
            message: None,
            redraw: true,
            running: true,
        }
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    fn report(&mut self, result: Result<()>) {
        if let Err(err) = result {
            self.set_message(err.to_string());
        }
    }

    /// Drop view state that no longer matches the active document's text
    fn content_changed(&mut self) {
        self.highlights = None;
        self.cursor = None;
        self.selection = None;
        self.redraw = true;
    }

    pub fn active(&self) -> Result<&Document> {
        self.session.active_document()
    }

    fn active_id(&self) -> Result<DocumentId> {
        Ok(self.active()?.id())
    }

    /// Line and column of the caret in the active document
    pub fn cursor_position(&self) -> (usize, usize) {
        match (self.cursor, self.active()) {
            (Some((id, offset)), Ok(doc)) if doc.id() == id => search::position(&doc.text(), offset),
            _ => (1, 1),
        }
    }

    // Tabs

    pub fn new_tab(&mut self) {
        self.session.new_document();
        self.content_changed();
    }

    pub fn open(&mut self, path: impl AsRef<Path>) {
        match self.session.open_file(path, &self.files) {
            Ok(_) => self.content_changed(),
            Err(err) => self.set_message(err.to_string()),
        }
    }

    pub fn switch_tab(&mut self, number: usize) {
        let id = number
            .checked_sub(1)
            .and_then(|idx| self.session.documents().get(idx))
            .map(Document::id);
        match id {
            Some(id) => {
                let activated = self.session.set_active(id);
                self.report(activated);
                self.redraw = true;
            }
            None => self.set_message(format!("No tab {number}")),
        }
    }

    pub fn next_tab(&mut self) {
        self.session.next_tab();
        self.redraw = true;
    }

    pub fn previous_tab(&mut self) {
        self.session.previous_tab();
        self.redraw = true;
    }

    /// Close the active tab. Unsaved changes need `force`.
    pub fn close(&mut self, force: bool) {
        let result = self.active().map(|doc| (doc.id(), doc.is_modified(), doc.display_name()));
        match result {
            Ok((_, true, name)) if !force => {
                self.set_message(format!(
                    "{name} has unsaved changes (save first, or use close! to discard)"
                ));
            }
            Ok((id, _, _)) => {
                debug!(%id, force, "closing tab");
                let closed = self.session.close_document(id);
                self.report(closed);
                self.content_changed();
            }
            Err(err) => self.set_message(err.to_string()),
        }
    }

    // Files

    pub fn save(&mut self) {
        let saved = self
            .active_id()
            .and_then(|id| self.session.save(id, &self.files));
        match saved {
            Ok(_) => self.set_message("File saved successfully!"),
            Err(ScribeError::Untitled(_)) => {
                self.set_message("No file name yet; use saveas <path>")
            }
            Err(err) => self.set_message(err.to_string()),
        }
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) {
        let path: PathBuf = self.settings.with_default_extension(path);
        let saved = self
            .active_id()
            .and_then(|id| self.session.save_as(id, path, &self.files));
        match saved {
            Ok(()) => self.set_message("File saved successfully!"),
            Err(err) => self.set_message(err.to_string()),
        }
    }

    // Editing

    /// Append a line of text to the active document
    pub fn append(&mut self, text: &str) {
        let result = self.session.active_document_mut().map(|doc| {
            let mut line = String::new();
            if !doc.is_empty() && !doc.text().ends_with('\n') {
                line.push('\n');
            }
            line.push_str(text);
            doc.insert(doc.len_chars(), &line);
        });
        self.report(result);
        self.content_changed();
    }

    pub fn undo(&mut self) {
        let undone = self
            .session
            .active_document_mut()
            .map(|doc| doc.can_undo() && doc.undo());
        match undone {
            Ok(true) => self.content_changed(),
            Ok(false) => self.set_message("Nothing to undo"),
            Err(err) => self.set_message(err.to_string()),
        }
    }

    pub fn redo(&mut self) {
        let redone = self
            .session
            .active_document_mut()
            .map(|doc| doc.can_redo() && doc.redo());
        match redone {
            Ok(true) => self.content_changed(),
            Ok(false) => self.set_message("Nothing to redo"),
            Err(err) => self.set_message(err.to_string()),
        }
    }

    // Clipboard

    fn select(&mut self, id: DocumentId, range: Range<usize>) {
        self.highlights = Some((
            id,
            vec![Match {
                start: range.start,
                end: range.end,
            }],
        ));
        self.selection = Some((id, range));
        self.redraw = true;
    }

    /// Select whole lines `first..=last` of the active document
    pub fn select_lines(&mut self, first: usize, last: usize) {
        let target = self
            .active()
            .and_then(|doc| Ok((doc.id(), doc.line_range(first, last)?)));
        match target {
            Ok((id, range)) => self.select(id, range),
            Err(err) => self.set_message(err.to_string()),
        }
    }

    pub fn select_all(&mut self) {
        match self.active().map(|doc| (doc.id(), doc.select_all())) {
            Ok((id, range)) => self.select(id, range),
            Err(err) => self.set_message(err.to_string()),
        }
    }

    /// The selection, if it belongs to the active document
    fn active_selection(&self) -> Option<Range<usize>> {
        let active = self.session.active_id()?;
        match &self.selection {
            Some((id, range)) if *id == active => Some(range.clone()),
            _ => None,
        }
    }

    pub fn copy(&mut self) {
        let Some(range) = self.active_selection() else {
            self.set_message("Nothing selected");
            return;
        };
        match self.active().map(|doc| doc.copy(range)) {
            Ok(text) => {
                self.set_message(format!("Copied {} char(s).", text.chars().count()));
                self.clipboard = text;
            }
            Err(err) => self.set_message(err.to_string()),
        }
    }

    pub fn cut(&mut self) {
        let Some(range) = self.active_selection() else {
            self.set_message("Nothing selected");
            return;
        };
        match self.session.active_document_mut().map(|doc| doc.cut(range)) {
            Ok(text) => {
                self.content_changed();
                self.set_message(format!("Cut {} char(s).", text.chars().count()));
                self.clipboard = text;
            }
            Err(err) => self.set_message(err.to_string()),
        }
    }

    /// Insert the clipboard at the caret, or at the end when there is no caret
    pub fn paste(&mut self) {
        if self.clipboard.is_empty() {
            self.set_message("Clipboard is empty");
            return;
        }
        let caret = self.cursor;
        let clipboard = self.clipboard.clone();
        let result = self.session.active_document_mut().map(|doc| {
            let at = match caret {
                Some((id, offset)) if id == doc.id() => offset,
                _ => doc.len_chars(),
            };
            doc.paste(at, &clipboard);
        });
        self.report(result);
        self.content_changed();
    }

    // Search

    pub fn find(&mut self, query: &str) {
        let case_insensitive = self.settings.case_insensitive_search;
        let found = self
            .active()
            .map(|doc| (doc.id(), doc.find_all(query, case_insensitive)));
        match found {
            Ok((_, matches)) if matches.is_empty() => {
                self.highlights = None;
                self.set_message("No matches found.");
            }
            Ok((id, matches)) => {
                self.set_message(format!("Found {} match(es).", matches.len()));
                self.highlights = Some((id, matches));
                self.redraw = true;
            }
            Err(err) => self.set_message(err.to_string()),
        }
    }

    pub fn replace(&mut self, find: &str, with: &str) {
        match self
            .session
            .active_document_mut()
            .map(|doc| doc.replace_all(find, with))
        {
            Ok(0) => self.set_message(format!("Text '{find}' not found.")),
            Ok(count) => {
                self.content_changed();
                self.set_message(format!("Replaced {count} occurrence(s) of '{find}'."));
            }
            Err(err) => self.set_message(err.to_string()),
        }
    }

    pub fn goto(&mut self, line: usize) {
        let target = self
            .active()
            .and_then(|doc| Ok((doc.id(), doc.line_start(line)?)));
        match target {
            Ok((id, offset)) => {
                self.cursor = Some((id, offset));
                self.redraw = true;
            }
            Err(err) => self.set_message(err.to_string()),
        }
    }

    // View

    pub fn zoom_in(&mut self) {
        if self.settings.zoom_in() {
            self.set_message(format!("Font size {}", self.settings.font_size));
        }
    }

    pub fn zoom_out(&mut self) {
        if self.settings.zoom_out() {
            self.set_message(format!("Font size {}", self.settings.font_size));
        }
    }

    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.settings.theme = mode;
        self.theme = Theme::for_mode(mode);
        self.redraw = true;
    }

    pub fn toggle_line_numbers(&mut self) {
        self.settings.toggle_line_numbers();
        self.redraw = true;
    }

    /// Session state as JSON
    pub fn info(&mut self) {
        match serde_json::to_string_pretty(&self.session.snapshot()) {
            Ok(json) => self.set_message(json),
            Err(err) => self.set_message(format!("Could not describe session: {err}")),
        }
    }

    /// Stop unless some document still has unsaved changes
    pub fn request_quit(&mut self, force: bool) {
        if force || !self.session.has_unsaved_changes() {
            self.quit();
            return;
        }
        let names: Vec<String> = self
            .session
            .unsaved()
            .into_iter()
            .filter_map(|id| self.session.document(id).ok())
            .map(Document::display_name)
            .collect();
        self.set_message(format!(
            "Unsaved changes in {} (use quit! to discard)",
            names.join(", ")
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe::fs::DiskFiles;

    fn app() -> App<DiskFiles> {
        App::new(Settings::default(), DiskFiles)
    }

    #[test]
    fn close_refuses_unsaved_without_force() {
        let mut app = app();
        app.append("draft");
        app.close(false);
        assert_eq!(app.active().unwrap().text(), "draft");
        assert!(app.message.as_deref().unwrap().contains("unsaved"));

        app.close(true);
        assert!(app.active().unwrap().is_empty());
        assert_eq!(app.session.len(), 1);
    }

    #[test]
    fn save_as_adds_default_extension_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.append("hello");
        app.save_as(dir.path().join("note"));

        let saved = dir.path().join("note.txt");
        assert_eq!(std::fs::read_to_string(&saved).unwrap(), "hello");
        assert_eq!(app.active().unwrap().display_name(), "note.txt");
        assert!(!app.active().unwrap().is_modified());
    }

    #[test]
    fn save_without_path_asks_for_one() {
        let mut app = app();
        app.save();
        assert!(app.message.as_deref().unwrap().contains("saveas"));
    }

    #[test]
    fn open_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.open(dir.path().join("missing.txt"));
        assert!(app.message.as_deref().unwrap().starts_with("could not open"));
        assert_eq!(app.session.len(), 1);
    }

    #[test]
    fn find_and_replace_report_counts() {
        let mut app = app();
        app.append("foo bar Foo");

        app.find("foo");
        assert_eq!(app.message.as_deref(), Some("Found 2 match(es)."));
        assert_eq!(app.highlights.as_ref().unwrap().1.len(), 2);

        app.replace("foo", "baz");
        assert_eq!(app.message.as_deref(), Some("Replaced 1 occurrence(s) of 'foo'."));
        assert!(app.highlights.is_none());
        assert_eq!(app.active().unwrap().text(), "baz bar Foo");

        app.replace("zzz", "y");
        assert_eq!(app.message.as_deref(), Some("Text 'zzz' not found."));
    }

    #[test]
    fn goto_moves_cursor_or_reports() {
        let mut app = app();
        app.append("a");
        app.append("b");
        app.goto(2);
        assert_eq!(app.cursor_position(), (2, 1));

        app.goto(9);
        assert!(app.message.as_deref().unwrap().contains("line 9 does not exist"));
    }

    #[test]
    fn quit_waits_for_unsaved_changes() {
        let mut app = app();
        app.append("x");
        app.request_quit(false);
        assert!(app.running);
        app.request_quit(true);
        assert!(!app.running);
    }

    #[test]
    fn undo_redo_through_app() {
        let mut app = app();
        app.append("one");
        app.undo();
        assert!(app.active().unwrap().is_empty());
        app.undo();
        assert_eq!(app.message.as_deref(), Some("Nothing to undo"));
        app.redo();
        assert_eq!(app.active().unwrap().text(), "one");
    }

    #[test]
    fn redo_without_history_reports() {
        let mut app = app();
        app.redo();
        assert_eq!(app.message.as_deref(), Some("Nothing to redo"));
        app.append("one");
        app.undo();
        app.redo();
        assert_eq!(app.active().unwrap().text(), "one");
        app.redo();
        assert_eq!(app.message.as_deref(), Some("Nothing to redo"));
    }

    #[test]
    fn copy_needs_a_selection() {
        let mut app = app();
        app.append("text");
        app.copy();
        assert_eq!(app.message.as_deref(), Some("Nothing selected"));
        app.paste();
        assert_eq!(app.message.as_deref(), Some("Clipboard is empty"));
    }

    #[test]
    fn select_all_copy_paste_at_caret() {
        let mut app = app();
        app.append("ab");
        app.select_all();
        assert_eq!(app.highlights.as_ref().unwrap().1, vec![Match { start: 0, end: 2 }]);
        app.copy();
        assert_eq!(app.clipboard, "ab");
        assert_eq!(app.message.as_deref(), Some("Copied 2 char(s)."));
        assert_eq!(app.active().unwrap().text(), "ab");

        app.goto(1);
        app.paste();
        assert_eq!(app.active().unwrap().text(), "abab");
        assert!(app.selection.is_none());
    }

    #[test]
    fn selection_does_not_follow_tab_switch() {
        let mut app = app();
        app.append("keep");
        app.select_all();
        app.new_tab();
        app.append("other");
        app.cut();
        assert_eq!(app.message.as_deref(), Some("Nothing selected"));
        assert_eq!(app.active().unwrap().text(), "other");
    }

    #[test]
    fn select_lines_out_of_range_is_reported() {
        let mut app = app();
        app.append("a");
        app.select_lines(1, 3);
        assert!(app.message.as_deref().unwrap().contains("line 3 does not exist"));
        assert!(app.selection.is_none());
    }

    #[test]
    fn switch_tab_by_number() {
        let mut app = app();
        app.new_tab();
        app.switch_tab(1);
        assert_eq!(app.active().unwrap().display_name(), "Untitled 1");
        app.switch_tab(5);
        assert_eq!(app.message.as_deref(), Some("No tab 5"));
    }
}
