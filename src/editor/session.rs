use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::document::{Document, DocumentId, DocumentInfo};
use crate::error::{Result, ScribeError};
use crate::fs::FileAccess;

/// Make `path` absolute against the working directory without touching the filesystem.
/// Falls back to the path as given when there is no working directory to join.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// All open documents in tab order, plus which one is active.
///
/// A session is never empty: closing the last document opens a blank one.
pub struct Session {
    documents: Vec<Document>,
    active: Option<DocumentId>,
    next_id: u64,
    untitled_counter: u32,
}

impl Session {
    /// Start a session with a single blank document
    pub fn new() -> Self {
        let mut session = Self {
            documents: Vec::new(),
            active: None,
            next_id: 0,
            untitled_counter: 0,
        };
        session.new_document();
        session
    }

    fn allocate_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Untitled numbers are never reused within a session
    fn next_untitled(&mut self) -> u32 {
        self.untitled_counter += 1;
        self.untitled_counter
    }

    fn push_active(&mut self, document: Document) -> DocumentId {
        let id = document.id();
        self.documents.push(document);
        self.active = Some(id);
        id
    }

    /// Append a blank document and make it active
    pub fn new_document(&mut self) -> DocumentId {
        let id = self.allocate_id();
        let number = self.next_untitled();
        debug!(%id, number, "new untitled document");
        self.push_active(Document::new(id, None, "", Some(number)))
    }

    /// Append a document for content already read from `path` and make it active
    pub fn open_document(&mut self, path: impl Into<PathBuf>, content: &str) -> DocumentId {
        let id = self.allocate_id();
        let path = absolute(&path.into());
        debug!(%id, path = %path.display(), "open document");
        self.push_active(Document::new(id, Some(path), content, None))
    }

    /// Read `path` and open it. A path that is already open just gets activated.
    /// On failure the session is left untouched.
    pub fn open_file(&mut self, path: impl AsRef<Path>, files: &impl FileAccess) -> Result<DocumentId> {
        let path = absolute(path.as_ref());
        if let Some(id) = self.find_by_path(&path) {
            self.active = Some(id);
            return Ok(id);
        }

        let content = files.read(&path).inspect_err(|err| warn!("{err}"))?;
        let id = self.open_document(&path, &content);
        info!(%id, path = %path.display(), "opened");
        Ok(id)
    }

    /// Write a document to its own path
    pub fn save(&mut self, id: DocumentId, files: &impl FileAccess) -> Result<PathBuf> {
        let document = self.document(id)?;
        let path = document
            .path()
            .map(Path::to_path_buf)
            .ok_or(ScribeError::Untitled(id))?;

        files
            .write(&path, &document.text())
            .inspect_err(|err| warn!("{err}"))?;

        self.document_mut(id)?.mark_saved(None);
        info!(%id, path = %path.display(), "saved");
        Ok(path)
    }

    /// Write a document to `path` and adopt it as the document's path.
    /// Refuses a path that another open document already owns.
    pub fn save_as(
        &mut self,
        id: DocumentId,
        path: impl Into<PathBuf>,
        files: &impl FileAccess,
    ) -> Result<()> {
        let path = absolute(&path.into());
        let document = self.document(id)?;
        if let Some(owner) = self.find_by_path(&path).filter(|&owner| owner != id) {
            return Err(ScribeError::AlreadyOpen { path, id: owner });
        }

        files
            .write(&path, &document.text())
            .inspect_err(|err| warn!("{err}"))?;

        info!(%id, path = %path.display(), "saved as");
        self.document_mut(id)?.mark_saved(Some(path));
        Ok(())
    }

    /// Remove a document. Does not prompt or save; callers resolve unsaved changes first.
    pub fn close_document(&mut self, id: DocumentId) -> Result<()> {
        let pos = self.position(id).ok_or(ScribeError::NotFound(id))?;
        self.documents.remove(pos);
        debug!(%id, "closed document");

        if self.documents.is_empty() {
            self.active = None;
            self.new_document();
            return Ok(());
        }

        if self.active == Some(id) {
            // The tab that slid into the closed slot, or the new last tab
            let next = pos.min(self.documents.len() - 1);
            self.active = Some(self.documents[next].id());
        }
        Ok(())
    }

    pub fn set_active(&mut self, id: DocumentId) -> Result<()> {
        if self.position(id).is_none() {
            return Err(ScribeError::NotFound(id));
        }
        self.active = Some(id);
        debug!(%id, "activated");
        Ok(())
    }

    pub fn active_id(&self) -> Option<DocumentId> {
        self.active
    }

    pub fn active_document(&self) -> Result<&Document> {
        let id = self.active.ok_or(ScribeError::NotFound(DocumentId(self.next_id)))?;
        self.document(id)
    }

    pub fn active_document_mut(&mut self) -> Result<&mut Document> {
        let id = self.active.ok_or(ScribeError::NotFound(DocumentId(self.next_id)))?;
        self.document_mut(id)
    }

    pub fn document(&self, id: DocumentId) -> Result<&Document> {
        self.documents
            .iter()
            .find(|d| d.id() == id)
            .ok_or(ScribeError::NotFound(id))
    }

    pub fn document_mut(&mut self, id: DocumentId) -> Result<&mut Document> {
        self.documents
            .iter_mut()
            .find(|d| d.id() == id)
            .ok_or(ScribeError::NotFound(id))
    }

    /// Documents in tab order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Tab index of a document
    pub fn position(&self, id: DocumentId) -> Option<usize> {
        self.documents.iter().position(|d| d.id() == id)
    }

    /// The document backed by `path`, compared after making it absolute
    pub fn find_by_path(&self, path: &Path) -> Option<DocumentId> {
        let path = absolute(path);
        self.documents
            .iter()
            .find(|d| d.path() == Some(path.as_path()))
            .map(Document::id)
    }

    /// Cycle activation to the next tab
    pub fn next_tab(&mut self) {
        self.step_active(1);
    }

    /// Cycle activation to the previous tab
    pub fn previous_tab(&mut self) {
        self.step_active(self.documents.len().saturating_sub(1));
    }

    fn step_active(&mut self, step: usize) {
        let len = self.documents.len();
        if len == 0 {
            return;
        }
        let current = self.active.and_then(|id| self.position(id)).unwrap_or(0);
        self.active = Some(self.documents[(current + step) % len].id());
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.documents.iter().any(Document::is_modified)
    }

    /// Documents with unsaved changes, in tab order
    pub fn unsaved(&self) -> Vec<DocumentId> {
        self.documents
            .iter()
            .filter(|d| d.is_modified())
            .map(Document::id)
            .collect()
    }

    pub fn snapshot(&self) -> Vec<DocumentInfo> {
        self.documents.iter().map(Document::info).collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
