//! Error types shared by the core and frontend crates

/// Standard result type for theme operations
pub type ThemeResult<T> = std::result::Result<T, ThemeError>;

/// Errors raised while resolving, updating or synchronising a theme
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    /// The accessor was used with no enclosing provider
    #[error("{accessor} must be used within a ThemeProvider")]
    MissingProvider { accessor: &'static str },

    /// A collaborator (storage, cookies, document, media query) failed
    #[error("{backend} unavailable: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    /// The owning scope has been torn down
    #[error("theme store has been disposed")]
    Disposed,
}

impl ThemeError {
    /// Create a missing provider error for the named accessor
    pub const fn missing_provider(accessor: &'static str) -> Self {
        Self::MissingProvider { accessor }
    }

    /// Create a backend error
    pub fn backend(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            backend,
            message: message.into(),
        }
    }

    /// Whether this error came from a collaborator rather than from misuse
    pub const fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }
}
