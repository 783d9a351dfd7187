//! Initial theme resolution

use crate::persistence::PersistenceAdapter;
use crate::ports::SystemPreference;
use crate::preference::read_system_theme;
use crate::types::Theme;

/// Where the initial theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    Persisted,
    Default,
    System,
}

/// Pick the initial theme: persisted value, then `default_theme`, then the
/// system preference. A failed persistence read counts as no value.
pub fn resolve_initial(
    default_theme: Option<&Theme>,
    storage_key: &str,
    persistence: &PersistenceAdapter,
    preference: &dyn SystemPreference,
) -> Theme {
    resolve_initial_with_source(default_theme, storage_key, persistence, preference).0
}

pub fn resolve_initial_with_source(
    default_theme: Option<&Theme>,
    storage_key: &str,
    persistence: &PersistenceAdapter,
    preference: &dyn SystemPreference,
) -> (Theme, ThemeSource) {
    let persisted = persistence.get(storage_key).unwrap_or_else(|err| {
        tracing::warn!(
            key = storage_key,
            cookie = persistence.uses_cookies(),
            error = %err,
            "persisted theme unavailable"
        );
        None
    });

    let (theme, source) = if let Some(theme) = persisted {
        (theme, ThemeSource::Persisted)
    } else if let Some(theme) = default_theme {
        (theme.clone(), ThemeSource::Default)
    } else {
        (read_system_theme(preference), ThemeSource::System)
    };

    tracing::debug!(%theme, ?source, key = storage_key, "resolved initial theme");
    (theme, source)
}
