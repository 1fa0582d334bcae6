//! Scribe: the document session core of a plain-text editor.
//!
//! A [`Session`](editor::Session) owns the open documents in tab order and
//! tracks which one is active. Each [`Document`](editor::Document) carries
//! its text, backing path, modified flag and undo history. [`search`] holds
//! the stateless find/replace/go-to-line functions, and [`fs::FileAccess`]
//! is the seam through which documents are read and written.
//!
//! Painting, dialogs and key bindings belong to whatever UI drives the core.

pub mod config;
pub mod editor;
pub mod error;
pub mod fs;
pub mod scripting;
pub mod search;
pub mod theme;

pub use editor::{Document, DocumentId, DocumentInfo, Session};
pub use error::{Result, ScribeError};
