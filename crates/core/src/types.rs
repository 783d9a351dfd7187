//! Theme value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label persisted and reflected for the dark color scheme
pub const DARK: &str = "dark";

/// Label persisted and reflected for the light color scheme
pub const LIGHT: &str = "light";

/// An application-defined theme label.
///
/// Any string is accepted verbatim; `"light"` and `"dark"` are only conventions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(String);

impl Theme {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn dark() -> Self {
        Self::new(DARK)
    }

    pub fn light() -> Self {
        Self::new(LIGHT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The empty label stands for "no theme": it is never reflected or persisted
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// `"dark"` becomes `"light"`, everything else becomes `"dark"`
    pub fn toggled(&self) -> Self {
        if self.0 == DARK {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Theme {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Theme {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Theme {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl PartialEq<str> for Theme {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Theme {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The OS/browser color scheme preference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Map the "prefers dark" boolean onto a scheme
    pub const fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => LIGHT,
            Self::Dark => DARK,
        }
    }
}

impl From<ColorScheme> for Theme {
    fn from(scheme: ColorScheme) -> Self {
        Self::new(scheme.label())
    }
}

type Updater = Box<dyn FnOnce(Option<&Theme>) -> Theme>;

/// Argument to a store update: a literal value or a function of the previous value
pub enum ThemeUpdate {
    Value(Theme),
    With(Updater),
}

impl ThemeUpdate {
    pub fn with<F>(updater: F) -> Self
    where
        F: FnOnce(Option<&Theme>) -> Theme + 'static,
    {
        Self::With(Box::new(updater))
    }

    /// Compute the next theme from the previous one
    pub fn apply(self, previous: Option<&Theme>) -> Theme {
        match self {
            Self::Value(theme) => theme,
            Self::With(updater) => updater(previous),
        }
    }
}

impl fmt::Debug for ThemeUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(theme) => f.debug_tuple("Value").field(theme).finish(),
            Self::With(_) => f.write_str("With(..)"),
        }
    }
}

impl From<Theme> for ThemeUpdate {
    fn from(theme: Theme) -> Self {
        Self::Value(theme)
    }
}

impl From<&str> for ThemeUpdate {
    fn from(label: &str) -> Self {
        Self::Value(Theme::from(label))
    }
}

impl From<String> for ThemeUpdate {
    fn from(label: String) -> Self {
        Self::Value(Theme::from(label))
    }
}
