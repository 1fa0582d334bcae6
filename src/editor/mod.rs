mod document;
pub mod gutter;
mod history;
mod session;

pub use document::{Document, DocumentId, DocumentInfo};
pub use history::{HISTORY_LIMIT, History};
pub use session::Session;
