//! API modules for the `scribe` namespace
//!
//! Each submodule provides functions under `scribe::<module>::*`

pub mod config;
