//! In-memory implementations of the collaborator ports for tests

use crate::ports::{CookieJar, DocumentRoot, KeyValueStore, SystemPreference, ThemePorts};
use crate::{ThemeError, ThemeResult};
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// A mutation observed on a [`MemoryDocumentRoot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootOp {
    AddClass(String),
    RemoveClass(String),
    SetAttribute(String, String),
    RemoveAttribute(String),
}

/// `localStorage` stand-in
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pub entries: RefCell<HashMap<String, String>>,
    pub writes: RefCell<Vec<(String, String)>>,
    pub unavailable: Cell<bool>,
}

impl MemoryStorage {
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> ThemeResult<Option<String>> {
        if self.unavailable.get() {
            return Err(ThemeError::backend("memory storage", "disabled"));
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> ThemeResult<()> {
        if self.unavailable.get() {
            return Err(ThemeError::backend("memory storage", "disabled"));
        }
        self.insert(key, value);
        self.writes
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}

/// Cookie store stand-in that keeps each cookie's expiry
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    pub cookies: RefCell<HashMap<String, (String, DateTime<Utc>)>>,
}

impl MemoryCookieJar {
    pub fn cookie(&self, name: &str) -> Option<(String, DateTime<Utc>)> {
        self.cookies.borrow().get(name).cloned()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> ThemeResult<Option<String>> {
        Ok(self.cookie(name).map(|(value, _)| value))
    }

    fn set(&self, name: &str, value: &str, expires: DateTime<Utc>) -> ThemeResult<()> {
        self.cookies
            .borrow_mut()
            .insert(name.to_string(), (value.to_string(), expires));
        Ok(())
    }
}

/// Document root stand-in recording every mutation
#[derive(Debug, Default)]
pub struct MemoryDocumentRoot {
    pub classes: RefCell<Vec<String>>,
    pub attributes: RefCell<HashMap<String, String>>,
    pub ops: RefCell<Vec<RootOp>>,
}

impl MemoryDocumentRoot {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    pub fn op_count(&self) -> usize {
        self.ops.borrow().len()
    }
}

impl DocumentRoot for MemoryDocumentRoot {
    fn add_class(&self, class: &str) -> ThemeResult<()> {
        if !self.has_class(class) {
            self.classes.borrow_mut().push(class.to_string());
        }
        self.ops.borrow_mut().push(RootOp::AddClass(class.to_string()));
        Ok(())
    }

    fn remove_class(&self, class: &str) -> ThemeResult<()> {
        self.classes.borrow_mut().retain(|c| c != class);
        self.ops
            .borrow_mut()
            .push(RootOp::RemoveClass(class.to_string()));
        Ok(())
    }

    fn set_attribute(&self, name: &str, value: &str) -> ThemeResult<()> {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self.ops
            .borrow_mut()
            .push(RootOp::SetAttribute(name.to_string(), value.to_string()));
        Ok(())
    }

    fn remove_attribute(&self, name: &str) -> ThemeResult<()> {
        self.attributes.borrow_mut().remove(name);
        self.ops
            .borrow_mut()
            .push(RootOp::RemoveAttribute(name.to_string()));
        Ok(())
    }
}

/// Color-scheme signal fixed by the test
#[derive(Debug, Default)]
pub struct FixedPreference {
    pub prefers_dark: Cell<bool>,
    pub unavailable: Cell<bool>,
}

impl SystemPreference for FixedPreference {
    fn prefers_dark(&self) -> ThemeResult<bool> {
        if self.unavailable.get() {
            return Err(ThemeError::backend("matchMedia", "not supported"));
        }
        Ok(self.prefers_dark.get())
    }
}

/// One browser-like environment; stores built from it share its state
#[derive(Clone, Default)]
pub struct MemoryEnv {
    pub storage: Rc<MemoryStorage>,
    pub cookies: Rc<MemoryCookieJar>,
    pub root: Rc<MemoryDocumentRoot>,
    pub preference: Rc<FixedPreference>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefers_dark(self, prefers_dark: bool) -> Self {
        self.preference.prefers_dark.set(prefers_dark);
        self
    }

    pub fn ports(&self) -> ThemePorts {
        ThemePorts::new(
            self.storage.clone(),
            self.cookies.clone(),
            self.root.clone(),
            self.preference.clone(),
        )
    }
}
