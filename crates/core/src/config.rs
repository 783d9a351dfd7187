//! Per-store configuration

use crate::types::Theme;
use serde::{Deserialize, Serialize};

/// Attribute value that selects class-list reflection
pub const CLASS_ATTRIBUTE: &str = "class";

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "theme-mode";

/// Months a theme cookie stays valid after it is written
pub const COOKIE_EXPIRY_MONTHS: u32 = 6;

/// Settings resolved once when a store is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Fallback used when nothing is persisted
    #[serde(alias = "defaultTheme")]
    pub default_theme: Option<Theme>,
    /// `"class"` for class-list reflection, otherwise an attribute name
    pub attribute: String,
    /// Key under which the theme is persisted
    #[serde(alias = "storageKey")]
    pub storage_key: String,
    /// Persist in a cookie instead of local storage
    #[serde(alias = "isCookieStorage")]
    pub is_cookie_storage: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_theme: None,
            attribute: CLASS_ATTRIBUTE.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            is_cookie_storage: false,
        }
    }
}

impl ThemeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_theme(mut self, theme: impl Into<Theme>) -> Self {
        self.default_theme = Some(theme.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    #[must_use]
    pub const fn with_cookie_storage(mut self, enabled: bool) -> Self {
        self.is_cookie_storage = enabled;
        self
    }

    /// Reflection mode derived from `attribute`
    pub fn reflection(&self) -> Reflection {
        Reflection::from_attribute(&self.attribute)
    }
}

/// How the active theme is represented on the document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reflection {
    /// The theme label is a member of the root's class list
    Class,
    /// The theme label is the value of the named attribute
    Attribute(String),
}

impl Reflection {
    pub fn from_attribute(attribute: &str) -> Self {
        if attribute == CLASS_ATTRIBUTE {
            Self::Class
        } else {
            Self::Attribute(attribute.to_string())
        }
    }
}
