//! Reflection of the active theme onto the document root

use crate::config::Reflection;
use crate::ports::DocumentRoot;
use crate::types::Theme;
use crate::ThemeResult;
use std::rc::Rc;

/// Applies and removes a theme as a root class or a root attribute
#[derive(Clone)]
pub struct RootReflector {
    root: Rc<dyn DocumentRoot>,
    reflection: Reflection,
}

impl RootReflector {
    pub fn new(root: Rc<dyn DocumentRoot>, reflection: Reflection) -> Self {
        Self { root, reflection }
    }

    pub const fn reflection(&self) -> &Reflection {
        &self.reflection
    }

    pub fn apply(&self, theme: &Theme) -> ThemeResult<()> {
        match &self.reflection {
            Reflection::Class => self.root.add_class(theme.as_str()),
            Reflection::Attribute(name) => self.root.set_attribute(name, theme.as_str()),
        }
    }

    /// In attribute mode the attribute is deleted whatever `theme` is.
    /// A value that predates the store is not restored.
    pub fn remove(&self, theme: &Theme) -> ThemeResult<()> {
        match &self.reflection {
            Reflection::Class => self.root.remove_class(theme.as_str()),
            Reflection::Attribute(name) => self.root.remove_attribute(name),
        }
    }
}
