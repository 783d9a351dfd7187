//! Yew bindings for true-theme: a `ThemeProvider` that keeps the current theme
//! in sync with the document root and localStorage or a cookie.

pub mod browser;
pub mod logging;
pub mod theme;

pub use browser::browser_ports;
pub use logging::init_logging;
pub use theme::{try_use_theme, use_theme, ThemeContext, ThemeProvider, ThemeProviderProps};
pub use true_theme_core::{Theme, ThemeConfig, ThemeError, ThemeResult, ThemeUpdate};
