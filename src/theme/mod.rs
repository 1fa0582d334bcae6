mod colors;
mod theme;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use colors::Color;
pub use theme::Theme;

/// Which palette the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    /// Follow the host's dark-mode preference
    Auto,
}

impl ThemeMode {
    /// Turn `Auto` into `Light` or `Dark` using the host preference.
    /// Hosts that cannot report one get `Light`.
    pub fn resolve(self) -> Self {
        match self {
            Self::Auto => match dark_light::detect() {
                Ok(dark_light::Mode::Dark) => Self::Dark,
                _ => Self::Light,
            },
            mode => mode,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" | "system" => Ok(Self::Auto),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

pub fn list_builtin_themes() -> Vec<&'static str> {
    vec!["light", "dark", "auto"]
}
