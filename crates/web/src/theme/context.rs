//! Theme context definition

use true_theme_core::scope::ACCESSOR;
use true_theme_core::{Theme, ThemeError, ThemeResult, ThemeScope, ThemeStore, ThemeUpdate};
use yew::prelude::*;

/// Value exposed to components below a `ThemeProvider`.
///
/// Holds a snapshot of the theme taken at render time; updates go through
/// the shared store and re-render the provider.
#[derive(Clone)]
pub struct ThemeContext {
    scope: ThemeScope,
    store: ThemeStore,
    theme: Option<Theme>,
    revision: u64,
}

impl ThemeContext {
    pub(crate) fn new(scope: ThemeScope, store: ThemeStore) -> Self {
        Self {
            theme: store.theme(),
            revision: store.revision(),
            scope,
            store,
        }
    }

    /// Current theme, `None` until the initial resolution has run
    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    pub fn set_theme(&self, update: impl Into<ThemeUpdate>) -> ThemeResult<()> {
        self.store.set_theme(update)
    }

    pub fn update_theme_with<F>(&self, updater: F) -> ThemeResult<()>
    where
        F: FnOnce(Option<&Theme>) -> Theme + 'static,
    {
        self.store.update_theme_with(updater)
    }

    pub fn toggle(&self) -> ThemeResult<()> {
        self.store.toggle()
    }

    /// Callback that sets the theme it is emitted with
    pub fn set_theme_callback(&self) -> Callback<Theme> {
        let store = self.store.clone();
        Callback::from(move |theme: Theme| {
            if let Err(err) = store.set_theme(theme) {
                tracing::warn!(error = %err, "theme update rejected");
            }
        })
    }

    pub const fn store(&self) -> &ThemeStore {
        &self.store
    }

    pub const fn scope(&self) -> &ThemeScope {
        &self.scope
    }
}

impl PartialEq for ThemeContext {
    fn eq(&self, other: &Self) -> bool {
        self.store.ptr_eq(&other.store)
            && self.revision == other.revision
            && self.theme == other.theme
    }
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("theme", &self.theme)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

/// Hook to use the theme context, or the error explaining why there is none
#[hook]
pub fn try_use_theme() -> ThemeResult<ThemeContext> {
    use_context::<ThemeContext>().ok_or(ThemeError::missing_provider(ACCESSOR))
}

/// Hook to use the theme context.
///
/// # Panics
///
/// When no `ThemeProvider` encloses the calling component.
#[hook]
pub fn use_theme() -> ThemeContext {
    try_use_theme().unwrap_or_else(|err| panic!("{err}"))
}
