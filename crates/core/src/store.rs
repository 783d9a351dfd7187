//! Reactive theme store
//!
//! The store owns the current theme and is the only writer to the document
//! root and the persistence key. Updates commit state immediately; the side
//! effects run later in [`ThemeStore::flush`], which the host calls once the
//! commit has been observed (after render, before paint). Several updates
//! between two flushes collapse into one sync of the latest state.

use crate::config::ThemeConfig;
use crate::persistence::PersistenceAdapter;
use crate::ports::{SystemPreference, ThemePorts};
use crate::reflect::RootReflector;
use crate::resolver::resolve_initial;
use crate::types::{Theme, ThemeUpdate};
use crate::{ThemeError, ThemeResult};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`ThemeStore::subscribe`]
pub type ListenerId = u64;

type Listener = Rc<dyn Fn(&Theme)>;

/// Lifecycle of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    /// No theme resolved yet
    Uninitialized,
    /// Holds a theme
    Ready,
    /// Torn down; updates are rejected
    Disposed,
}

#[derive(Debug)]
struct StoreState {
    theme: Option<Theme>,
    phase: StorePhase,
    revision: u64,
    synced_revision: u64,
}

struct StoreInner {
    config: ThemeConfig,
    persistence: PersistenceAdapter,
    reflector: RootReflector,
    preference: Rc<dyn SystemPreference>,
    state: RefCell<StoreState>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<ListenerId>,
}

/// Shared handle to one store; clones refer to the same state
#[derive(Clone)]
pub struct ThemeStore {
    inner: Rc<StoreInner>,
}

impl ThemeStore {
    /// Create an uninitialized store
    pub fn new(config: ThemeConfig, ports: ThemePorts) -> Self {
        let persistence =
            PersistenceAdapter::new(ports.storage, ports.cookies, config.is_cookie_storage);
        let reflector = RootReflector::new(ports.root, config.reflection());

        Self {
            inner: Rc::new(StoreInner {
                config,
                persistence,
                reflector,
                preference: ports.preference,
                state: RefCell::new(StoreState {
                    theme: None,
                    phase: StorePhase::Uninitialized,
                    revision: 0,
                    synced_revision: 0,
                }),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.inner.config
    }

    /// Current theme, `None` until initialized
    pub fn theme(&self) -> Option<Theme> {
        self.inner.state.borrow().theme.clone()
    }

    pub fn phase(&self) -> StorePhase {
        self.inner.state.borrow().phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == StorePhase::Ready
    }

    /// Incremented on every commit, including same-value updates
    pub fn revision(&self) -> u64 {
        self.inner.state.borrow().revision
    }

    /// Whether the latest commit has not been reflected and persisted yet
    pub fn has_pending_sync(&self) -> bool {
        let state = self.inner.state.borrow();
        state.phase == StorePhase::Ready && state.synced_revision != state.revision
    }

    /// Whether both handles refer to the same store
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Resolve and commit the initial theme. Runs at most once; returns
    /// `false` when the store already holds a theme or was disposed.
    pub fn initialize(&self) -> bool {
        if self.phase() != StorePhase::Uninitialized {
            return false;
        }

        let config = &self.inner.config;
        let theme = resolve_initial(
            config.default_theme.as_ref(),
            &config.storage_key,
            &self.inner.persistence,
            self.inner.preference.as_ref(),
        );
        self.commit(theme);
        true
    }

    /// Remove the previous reflection and commit the next theme
    pub fn set_theme(&self, update: impl Into<ThemeUpdate>) -> ThemeResult<()> {
        if self.phase() == StorePhase::Disposed {
            tracing::warn!("theme update on a disposed store ignored");
            return Err(ThemeError::Disposed);
        }

        let previous = self.theme();
        if let Some(previous) = previous.as_ref().filter(|theme| !theme.is_empty()) {
            if let Err(err) = self.inner.reflector.remove(previous) {
                tracing::warn!(theme = %previous, error = %err, "failed to remove root theme");
            }
        }

        let next = update.into().apply(previous.as_ref());
        self.commit(next);
        Ok(())
    }

    pub fn set_theme_value(&self, theme: impl Into<Theme>) -> ThemeResult<()> {
        self.set_theme(ThemeUpdate::Value(theme.into()))
    }

    pub fn update_theme_with<F>(&self, updater: F) -> ThemeResult<()>
    where
        F: FnOnce(Option<&Theme>) -> Theme + 'static,
    {
        self.set_theme(ThemeUpdate::with(updater))
    }

    /// Switch between `"dark"` and `"light"`
    pub fn toggle(&self) -> ThemeResult<()> {
        self.update_theme_with(|prev| prev.map_or_else(Theme::dark, Theme::toggled))
    }

    /// Reflect and persist the latest committed theme if it has not been yet.
    /// Returns whether a sync ran. An empty theme is never synced.
    pub fn flush(&self) -> ThemeResult<bool> {
        let (theme, revision) = {
            let mut state = self.inner.state.borrow_mut();
            if state.phase != StorePhase::Ready || state.synced_revision == state.revision {
                return Ok(false);
            }
            let revision = state.revision;
            let Some(theme) = state.theme.clone().filter(|theme| !theme.is_empty()) else {
                state.synced_revision = revision;
                tracing::debug!(revision, "empty theme, sync skipped");
                return Ok(false);
            };
            (theme, revision)
        };

        self.inner.reflector.apply(&theme)?;
        self.inner
            .persistence
            .set(&self.inner.config.storage_key, &theme)?;

        self.inner.state.borrow_mut().synced_revision = revision;
        tracing::debug!(%theme, revision, key = %self.inner.config.storage_key, "theme synced");
        Ok(true)
    }

    /// Tear the store down, removing its root reflection. Persisted state is kept.
    pub fn dispose(&self) -> ThemeResult<()> {
        let theme = {
            let mut state = self.inner.state.borrow_mut();
            if state.phase == StorePhase::Disposed {
                return Ok(());
            }
            state.phase = StorePhase::Disposed;
            state.theme.take()
        };
        self.inner.listeners.borrow_mut().clear();

        match theme {
            Some(theme) if !theme.is_empty() => self.inner.reflector.remove(&theme),
            _ => Ok(()),
        }
    }

    /// Register a listener called with the new theme after every commit
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Theme) + 'static,
    {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    fn commit(&self, theme: Theme) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.theme = Some(theme.clone());
            state.phase = StorePhase::Ready;
            state.revision += 1;
        }

        // Listeners may read or update the store
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&theme);
        }
    }
}

impl PartialEq for ThemeStore {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("config", &self.inner.config)
            .field("state", &self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryEnv, RootOp};
    use chrono::{Duration, Utc};

    fn ready_store(env: &MemoryEnv, config: ThemeConfig) -> ThemeStore {
        let store = ThemeStore::new(config, env.ports());
        assert!(store.initialize());
        store.flush().unwrap();
        store
    }

    #[test]
    fn test_starts_uninitialized() {
        let env = MemoryEnv::new();
        let store = ThemeStore::new(ThemeConfig::default(), env.ports());
        assert_eq!(store.theme(), None);
        assert_eq!(store.phase(), StorePhase::Uninitialized);
        assert!(!store.flush().unwrap());
        assert_eq!(env.root.op_count(), 0);
    }

    #[test]
    fn test_initialize_runs_once() {
        let env = MemoryEnv::new().prefers_dark(true);
        let store = ThemeStore::new(ThemeConfig::default(), env.ports());
        assert!(store.initialize());
        env.preference.prefers_dark.set(false);
        assert!(!store.initialize());
        assert_eq!(store.theme(), Some(Theme::dark()));
    }

    #[test]
    fn test_attribute_scenario() {
        let env = MemoryEnv::new().prefers_dark(true);
        let store = ready_store(
            &env,
            ThemeConfig::new()
                .with_attribute("theme")
                .with_storage_key("t1"),
        );

        assert_eq!(store.theme(), Some(Theme::dark()));
        assert_eq!(env.root.attribute("theme").as_deref(), Some("dark"));
        assert_eq!(env.storage.value("t1").as_deref(), Some("dark"));
    }

    #[test]
    fn test_theme_is_stable_between_updates() {
        let env = MemoryEnv::new();
        let store = ready_store(&env, ThemeConfig::default());
        assert_eq!(store.theme(), store.theme());
    }

    #[test]
    fn test_double_toggle_syncs_final_value_once() {
        let env = MemoryEnv::new().prefers_dark(true);
        let store = ready_store(&env, ThemeConfig::default());
        env.storage.writes.borrow_mut().clear();

        let toggle = |prev: Option<&Theme>| {
            if prev.is_some_and(|t| t == "dark") {
                Theme::light()
            } else {
                Theme::dark()
            }
        };
        store.update_theme_with(toggle).unwrap();
        store.update_theme_with(toggle).unwrap();
        assert!(store.flush().unwrap());

        assert_eq!(store.theme(), Some(Theme::dark()));
        assert!(env.root.has_class("dark"));
        assert!(!env.root.has_class("light"));
        assert_eq!(
            *env.storage.writes.borrow(),
            vec![("theme-mode".to_string(), "dark".to_string())]
        );
    }

    #[test]
    fn test_set_theme_removes_previous_class() {
        let env = MemoryEnv::new();
        let store = ready_store(&env, ThemeConfig::default().with_default_theme("light"));

        store.set_theme("dark").unwrap();
        assert!(!env.root.has_class("light"));
        store.flush().unwrap();

        assert_eq!(*env.root.classes.borrow(), vec!["dark".to_string()]);
    }

    #[test]
    fn test_same_value_update_resyncs() {
        let env = MemoryEnv::new();
        let store = ready_store(&env, ThemeConfig::default().with_default_theme("dark"));

        store.set_theme("dark").unwrap();
        assert!(!env.root.has_class("dark"));
        assert!(store.has_pending_sync());
        store.flush().unwrap();
        assert!(env.root.has_class("dark"));
    }

    #[test]
    fn test_flush_without_changes_is_noop() {
        let env = MemoryEnv::new();
        let store = ready_store(&env, ThemeConfig::default());
        let ops = env.root.op_count();
        assert!(!store.flush().unwrap());
        assert_eq!(env.root.op_count(), ops);
    }

    #[test]
    fn test_reflects_before_persisting() {
        let env = MemoryEnv::new();
        env.storage.unavailable.set(true);
        let store = ThemeStore::new(ThemeConfig::default().with_default_theme("dark"), env.ports());
        store.initialize();

        assert!(store.flush().unwrap_err().is_backend());
        assert!(env.root.has_class("dark"));
        assert!(store.has_pending_sync());

        env.storage.unavailable.set(false);
        assert!(store.flush().unwrap());
        assert_eq!(env.storage.value("theme-mode").as_deref(), Some("dark"));
    }

    #[test]
    fn test_reload_restores_persisted_theme() {
        let env = MemoryEnv::new().prefers_dark(false);
        let store = ready_store(&env, ThemeConfig::default());
        store.set_theme("dark").unwrap();
        store.flush().unwrap();

        let reloaded = ThemeStore::new(ThemeConfig::default(), env.ports());
        reloaded.initialize();
        assert_eq!(reloaded.theme(), Some(Theme::dark()));
    }

    #[test]
    fn test_cookie_storage_expiry() {
        let env = MemoryEnv::new();
        let store = ready_store(&env, ThemeConfig::default().with_cookie_storage(true));

        store.set_theme("light").unwrap();
        store.flush().unwrap();

        let (value, expires) = env.cookies.cookie("theme-mode").unwrap();
        assert_eq!(value, "light");
        let expected = Utc::now() + Duration::days(183);
        assert!((expires - expected).num_days().abs() <= 3);
        assert_eq!(env.storage.value("theme-mode"), None);
    }

    #[test]
    fn test_set_before_initialize_wins() {
        let env = MemoryEnv::new().prefers_dark(true);
        let store = ThemeStore::new(ThemeConfig::default(), env.ports());
        store.set_theme("sepia").unwrap();
        assert!(!store.initialize());
        store.flush().unwrap();
        assert_eq!(env.storage.value("theme-mode").as_deref(), Some("sepia"));
    }

    #[test]
    fn test_listeners_see_commits() {
        let env = MemoryEnv::new();
        let store = ThemeStore::new(ThemeConfig::default(), env.ports());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let id = {
            let seen = seen.clone();
            store.subscribe(move |theme| seen.borrow_mut().push(theme.clone()))
        };
        store.initialize();
        store.set_theme("dark").unwrap();
        assert!(store.unsubscribe(id));
        store.set_theme("light").unwrap();

        assert_eq!(*seen.borrow(), vec![Theme::light(), Theme::dark()]);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn test_listener_can_read_store() {
        let env = MemoryEnv::new();
        let store = ThemeStore::new(ThemeConfig::default(), env.ports());
        let observed = Rc::new(RefCell::new(None));
        {
            let observed = observed.clone();
            let reader = store.clone();
            store.subscribe(move |_| *observed.borrow_mut() = reader.theme());
        }
        store.set_theme("dark").unwrap();
        assert_eq!(*observed.borrow(), Some(Theme::dark()));
    }

    #[test]
    fn test_toggle() {
        let env = MemoryEnv::new();
        let store = ThemeStore::new(ThemeConfig::default(), env.ports());
        store.toggle().unwrap();
        assert_eq!(store.theme(), Some(Theme::dark()));
        store.toggle().unwrap();
        assert_eq!(store.theme(), Some(Theme::light()));
    }

    #[test]
    fn test_dispose_removes_reflection() {
        let env = MemoryEnv::new();
        let store = ready_store(&env, ThemeConfig::default().with_attribute("data-theme"));
        store.dispose().unwrap();

        assert_eq!(store.phase(), StorePhase::Disposed);
        assert_eq!(store.theme(), None);
        assert_eq!(
            env.root.ops.borrow().last(),
            Some(&RootOp::RemoveAttribute("data-theme".to_string()))
        );
        assert_eq!(store.set_theme("dark"), Err(ThemeError::Disposed));
        assert!(!store.initialize());
        assert_eq!(env.storage.value("theme-mode").as_deref(), Some("light"));
    }

    #[test]
    fn test_empty_theme_is_not_synced() {
        let env = MemoryEnv::new();
        env.storage.insert("t-empty", "dark");
        let store = ready_store(
            &env,
            ThemeConfig::new()
                .with_attribute("data-theme")
                .with_storage_key("t-empty"),
        );
        env.storage.writes.borrow_mut().clear();
        let ops = env.root.op_count();

        store.set_theme("").unwrap();
        assert!(!store.flush().unwrap());
        assert!(!store.has_pending_sync());

        assert_eq!(store.theme(), Some(Theme::new("")));
        assert_eq!(env.storage.value("t-empty").as_deref(), Some("dark"));
        assert!(env.storage.writes.borrow().is_empty());
        assert_eq!(env.root.attribute("data-theme"), None);
        assert_eq!(
            env.root.ops.borrow()[ops..],
            [RootOp::RemoveAttribute("data-theme".to_string())]
        );
    }

    #[test]
    fn test_leaving_empty_theme_skips_removal() {
        let env = MemoryEnv::new();
        let store = ready_store(&env, ThemeConfig::default().with_default_theme(""));
        assert_eq!(env.root.op_count(), 0);
        assert!(env.storage.writes.borrow().is_empty());

        store.set_theme("dark").unwrap();
        assert_eq!(env.root.op_count(), 0);
        assert!(store.flush().unwrap());
        assert_eq!(
            *env.root.ops.borrow(),
            vec![RootOp::AddClass("dark".to_string())]
        );

        store.set_theme("").unwrap();
        store.flush().unwrap();
        store.dispose().unwrap();
        assert_eq!(
            env.root.ops.borrow().last(),
            Some(&RootOp::RemoveClass("dark".to_string()))
        );
        assert!(!env.root.has_class(""));
    }

    #[test]
    fn test_updater_after_initialize_sees_persisted_theme() {
        let env = MemoryEnv::new().prefers_dark(false);
        env.storage.insert("theme-mode", "dark");
        let store = ThemeStore::new(ThemeConfig::default(), env.ports());
        store.initialize();

        let seen = Rc::new(RefCell::new(None));
        let record = seen.clone();
        store
            .update_theme_with(move |prev| {
                *record.borrow_mut() = prev.cloned();
                Theme::new("sepia")
            })
            .unwrap();
        store.flush().unwrap();

        assert_eq!(*seen.borrow(), Some(Theme::dark()));
        // A later initialize must not overwrite the update
        assert!(!store.initialize());
        assert_eq!(env.storage.value("theme-mode").as_deref(), Some("sepia"));
    }
}
