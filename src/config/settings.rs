use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::theme::ThemeMode;

pub const DEFAULT_FONT_SIZE: u16 = 12;
pub const MIN_FONT_SIZE: u16 = 6;
pub const MAX_FONT_SIZE: u16 = 72;

/// Editor settings that can be customized via the Rhai config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Display
    pub theme: ThemeMode,
    pub font_size: u16,
    pub show_line_numbers: bool,
    /// Break long lines at the terminal width
    pub word_wrap: bool,

    // Find
    pub case_insensitive_search: bool,

    // Files
    /// Appended by save-as when the chosen name has no extension
    pub default_extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Light,
            font_size: DEFAULT_FONT_SIZE,
            show_line_numbers: true,
            word_wrap: true,

            case_insensitive_search: true,

            default_extension: "txt".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_size(&mut self, size: i64) {
        self.font_size = size.clamp(MIN_FONT_SIZE as i64, MAX_FONT_SIZE as i64) as u16;
    }

    /// Returns false when already at the largest size
    pub fn zoom_in(&mut self) -> bool {
        if self.font_size < MAX_FONT_SIZE {
            self.font_size += 1;
            true
        } else {
            false
        }
    }

    /// Returns false when already at the smallest size
    pub fn zoom_out(&mut self) -> bool {
        if self.font_size > MIN_FONT_SIZE {
            self.font_size -= 1;
            true
        } else {
            false
        }
    }

    pub fn toggle_line_numbers(&mut self) -> bool {
        self.show_line_numbers = !self.show_line_numbers;
        self.show_line_numbers
    }

    /// Add the default extension to a save-as target that has none
    pub fn with_default_extension(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        let ext = self.default_extension.trim_start_matches('.');
        if path.extension().is_some() || ext.is_empty() {
            path.to_path_buf()
        } else {
            path.with_extension(ext)
        }
    }
}
