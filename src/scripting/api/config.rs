//! scribe::config - theme, zoom, gutter and file defaults
//!
//! Usage in Rhai:
//! ```rhai
//! scribe::config::set_theme("dark");
//! scribe::config::set_font_size(14);
//! scribe::config::set_show_line_numbers(false);
//! ```

use std::sync::{Arc, RwLock};

use rhai::{Array, Dynamic, EvalAltResult, Module};

use crate::config::Settings;
use crate::theme::ThemeMode;

type FnResult<T> = Result<T, Box<EvalAltResult>>;

/// Create the config module with access to settings
pub fn create_module(settings: Arc<RwLock<Settings>>) -> Module {
    let mut module = Module::new();

    // set_theme(name: &str)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn("set_theme", move |name: &str| -> FnResult<()> {
            let mode: ThemeMode = name.parse()?;
            if let Ok(mut settings) = s.write() {
                settings.theme = mode;
            }
            Ok(())
        });
    }

    // get_theme() -> String
    {
        let s = Arc::clone(&settings);
        module.set_native_fn("get_theme", move || -> FnResult<String> {
            Ok(s.read().map(|s| s.theme.to_string()).unwrap_or_default())
        });
    }

    // set_font_size(size: i64), clamped to the zoom range
    {
        let s = Arc::clone(&settings);
        module.set_native_fn("set_font_size", move |size: i64| -> FnResult<()> {
            if let Ok(mut settings) = s.write() {
                settings.set_font_size(size);
            }
            Ok(())
        });
    }

    // get_font_size() -> i64
    {
        let s = Arc::clone(&settings);
        module.set_native_fn("get_font_size", move || -> FnResult<i64> {
            Ok(s.read()
                .map(|s| s.font_size as i64)
                .unwrap_or(crate::config::DEFAULT_FONT_SIZE as i64))
        });
    }

    // set_show_line_numbers(enabled: bool)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn("set_show_line_numbers", move |enabled: bool| -> FnResult<()> {
            if let Ok(mut settings) = s.write() {
                settings.show_line_numbers = enabled;
            }
            Ok(())
        });
    }

    // set_word_wrap(enabled: bool)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn("set_word_wrap", move |enabled: bool| -> FnResult<()> {
            if let Ok(mut settings) = s.write() {
                settings.word_wrap = enabled;
            }
            Ok(())
        });
    }

    // set_case_insensitive_search(enabled: bool)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn(
            "set_case_insensitive_search",
            move |enabled: bool| -> FnResult<()> {
                if let Ok(mut settings) = s.write() {
                    settings.case_insensitive_search = enabled;
                }
                Ok(())
            },
        );
    }

    // set_default_extension(ext: &str)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn("set_default_extension", move |ext: &str| -> FnResult<()> {
            if let Ok(mut settings) = s.write() {
                settings.default_extension = ext.trim_start_matches('.').to_string();
            }
            Ok(())
        });
    }

    // list_themes() -> Array
    module.set_native_fn("list_themes", || -> FnResult<Array> {
        Ok(crate::theme::list_builtin_themes()
            .into_iter()
            .map(|s| Dynamic::from(s.to_string()))
            .collect())
    });

    module
}
