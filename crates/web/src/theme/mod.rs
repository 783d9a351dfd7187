//! Theme context, provider and hooks

mod context;
mod provider;

pub use context::{try_use_theme, use_theme, ThemeContext};
pub use provider::{ThemeProvider, ThemeProviderProps};
