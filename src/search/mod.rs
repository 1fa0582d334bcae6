//! Stateless text search over document content.
//!
//! Offsets are char indices, matching how the editor addresses text.

mod lines;
mod matcher;

pub use lines::{goto_line, line_count, position};
pub use matcher::{Match, find_all, replace_all};
