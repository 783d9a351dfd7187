//! System color-scheme preference

use crate::ports::SystemPreference;
use crate::types::{ColorScheme, Theme};

/// Media query whose match result is the "prefers dark" signal
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Read the preferred scheme. An unreadable signal counts as light.
pub fn read_color_scheme(preference: &dyn SystemPreference) -> ColorScheme {
    match preference.prefers_dark() {
        Ok(prefers_dark) => ColorScheme::from_prefers_dark(prefers_dark),
        Err(err) => {
            tracing::warn!(error = %err, "color scheme preference unavailable, assuming light");
            ColorScheme::Light
        }
    }
}

/// `"dark"` when the signal is affirmatively true, `"light"` otherwise
pub fn read_system_theme(preference: &dyn SystemPreference) -> Theme {
    read_color_scheme(preference).into()
}
