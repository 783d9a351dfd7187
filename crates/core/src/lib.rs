//! Theme resolution and synchronisation, independent of any UI host

pub mod config;
pub mod cookie;
pub mod error;
pub mod persistence;
pub mod ports;
pub mod preference;
pub mod reflect;
pub mod resolver;
pub mod scope;
pub mod store;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;

pub use config::{Reflection, ThemeConfig, CLASS_ATTRIBUTE, DEFAULT_STORAGE_KEY};
pub use error::{ThemeError, ThemeResult};
pub use persistence::PersistenceAdapter;
pub use ports::{CookieJar, DocumentRoot, KeyValueStore, SystemPreference, ThemePorts};
pub use preference::{read_system_theme, PREFERS_DARK_QUERY};
pub use reflect::RootReflector;
pub use resolver::{resolve_initial, ThemeSource};
pub use scope::ThemeScope;
pub use store::{ListenerId, StorePhase, ThemeStore};
pub use types::{ColorScheme, Theme, ThemeUpdate};
