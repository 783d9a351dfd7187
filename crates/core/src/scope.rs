//! Provider scopes
//!
//! A scope is one link in a chain from the application root down to a
//! consumer. At most one store exists per chain: providing into a scope that
//! already has a store passes the existing one through, so nested providers
//! never write to the document root or the storage key a second time.

use crate::config::ThemeConfig;
use crate::ports::ThemePorts;
use crate::store::ThemeStore;
use crate::{ThemeError, ThemeResult};
use std::rc::Rc;

/// Accessor name reported when no provider is found
pub const ACCESSOR: &str = "use_theme";

#[derive(Clone, Default)]
pub struct ThemeScope {
    store: Option<ThemeStore>,
    parent: Option<Rc<ThemeScope>>,
}

impl ThemeScope {
    /// A scope with no provider above it
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether a store is active here or in any ancestor
    pub fn is_provided(&self) -> bool {
        self.nearest_store().is_some()
    }

    /// The active store, or the configuration error a consumer outside any
    /// provider gets
    pub fn store(&self) -> ThemeResult<ThemeStore> {
        self.nearest_store()
            .cloned()
            .ok_or(ThemeError::missing_provider(ACCESSOR))
    }

    /// Child scope for a provider. Creates an uninitialized store unless an
    /// ancestor already provides one, in which case that one is passed through.
    pub fn provide(&self, config: ThemeConfig, ports: ThemePorts) -> Self {
        self.provide_with_store(config, ports).0
    }

    /// [`provide`](Self::provide), also returning the store the child exposes
    pub fn provide_with_store(
        &self,
        config: ThemeConfig,
        ports: ThemePorts,
    ) -> (Self, ThemeStore) {
        let parent = Some(Rc::new(self.clone()));
        if let Some(existing) = self.nearest_store() {
            tracing::debug!("theme store already provided by an ancestor, passing through");
            let existing = existing.clone();
            return (
                Self {
                    store: None,
                    parent,
                },
                existing,
            );
        }

        let store = ThemeStore::new(config, ports);
        let scope = Self {
            store: Some(store.clone()),
            parent,
        };
        (scope, store)
    }

    /// [`provide`](Self::provide), then resolve and sync the initial theme
    pub fn mount(&self, config: ThemeConfig, ports: ThemePorts) -> ThemeResult<Self> {
        let (scope, store) = self.provide_with_store(config, ports);
        store.initialize();
        store.flush()?;
        Ok(scope)
    }

    /// Whether this scope created the store it exposes
    pub const fn owns_store(&self) -> bool {
        self.store.is_some()
    }

    fn nearest_store(&self) -> Option<&ThemeStore> {
        let mut scope = self;
        loop {
            if let Some(store) = &scope.store {
                return Some(store);
            }
            scope = scope.parent.as_deref()?;
        }
    }
}
