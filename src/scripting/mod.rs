//! Rhai runtime for the user config file
//!
//! Editor functions live under the `scribe` namespace:
//! - `scribe::config::*` - theme, font size, gutter, find and save defaults

mod api;
mod engine;

pub use engine::{ConfigError, ScriptEngine};
