//! Collaborator interfaces
//!
//! The document root, browser storage and the color-scheme media query are
//! process-wide globals in a browser. They are reached only through these traits
//! so the same store logic runs against the real DOM or against in-memory fakes.

use crate::ThemeResult;
use chrono::{DateTime, Utc};
use std::rc::Rc;

/// Origin-scoped key-value storage with no expiry (`localStorage`)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ThemeResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ThemeResult<()>;
}

/// Cookie storage with expiry support
pub trait CookieJar {
    fn get(&self, name: &str) -> ThemeResult<Option<String>>;
    fn set(&self, name: &str, value: &str, expires: DateTime<Utc>) -> ThemeResult<()>;
}

/// The single top-level document element
pub trait DocumentRoot {
    fn add_class(&self, class: &str) -> ThemeResult<()>;
    fn remove_class(&self, class: &str) -> ThemeResult<()>;
    fn set_attribute(&self, name: &str, value: &str) -> ThemeResult<()>;
    fn remove_attribute(&self, name: &str) -> ThemeResult<()>;
}

/// The environment's "prefers dark color scheme" signal
pub trait SystemPreference {
    fn prefers_dark(&self) -> ThemeResult<bool>;
}

/// Every collaborator a store needs
#[derive(Clone)]
pub struct ThemePorts {
    pub storage: Rc<dyn KeyValueStore>,
    pub cookies: Rc<dyn CookieJar>,
    pub root: Rc<dyn DocumentRoot>,
    pub preference: Rc<dyn SystemPreference>,
}

impl ThemePorts {
    pub fn new(
        storage: Rc<dyn KeyValueStore>,
        cookies: Rc<dyn CookieJar>,
        root: Rc<dyn DocumentRoot>,
        preference: Rc<dyn SystemPreference>,
    ) -> Self {
        Self {
            storage,
            cookies,
            root,
            preference,
        }
    }
}
