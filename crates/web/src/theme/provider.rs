//! Theme provider component

use super::context::ThemeContext;
use crate::browser::browser_ports;
use true_theme_core::{ThemeConfig, ThemeScope, ThemeStore, CLASS_ATTRIBUTE, DEFAULT_STORAGE_KEY};
use yew::prelude::*;

/// Theme provider props
#[derive(Properties, PartialEq, Clone)]
pub struct ThemeProviderProps {
    /// Fallback used when nothing is persisted
    #[prop_or_default]
    pub default_theme: Option<AttrValue>,
    /// `"class"` for class-list reflection, otherwise an attribute name
    #[prop_or(AttrValue::Static(CLASS_ATTRIBUTE))]
    pub attribute: AttrValue,
    #[prop_or(AttrValue::Static(DEFAULT_STORAGE_KEY))]
    pub storage_key: AttrValue,
    /// Persist in a cookie instead of localStorage
    #[prop_or_default]
    pub is_cookie_storage: bool,
    /// Remove the root reflection when the provider unmounts
    #[prop_or_default]
    pub clear_on_unmount: bool,
    pub children: Children,
}

impl ThemeProviderProps {
    pub fn config(&self) -> ThemeConfig {
        let mut config = ThemeConfig::new()
            .with_attribute(self.attribute.as_str())
            .with_storage_key(self.storage_key.as_str())
            .with_cookie_storage(self.is_cookie_storage);
        if let Some(theme) = &self.default_theme {
            config = config.with_default_theme(theme.as_str());
        }
        config
    }
}

fn sync(store: &ThemeStore) {
    if let Err(err) = store.flush() {
        tracing::error!(error = %err, "failed to sync theme");
    }
}

/// Theme provider component.
///
/// Renders its children unchanged when an enclosing provider already owns a
/// store, so the document root and storage key have a single writer.
#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let enclosing: ThemeScope = use_context::<ThemeContext>()
        .map(|ctx| ctx.scope().clone())
        .unwrap_or_default();

    // Resolve during the first render: descendants run their mount effects
    // before ours and must already see the initial theme.
    let provided = use_memo((), |_| {
        let (scope, store) = enclosing.provide_with_store(props.config(), browser_ports());
        store.initialize();
        (scope, store)
    });
    let (scope, store) = (*provided).clone();
    let owner = scope.owns_store();
    let rendered = store.revision();
    let trigger = use_force_update();

    // Sync on mount. Effects run right after the DOM commit, before the
    // browser paints.
    {
        let store = store.clone();
        let clear_on_unmount = props.clear_on_unmount;
        use_effect_with((), move |_| {
            let listener = owner.then(|| {
                let trigger = trigger.clone();
                store.subscribe(move |_| trigger.force_update())
            });
            if owner {
                // Commits made by descendants' mount effects
                if store.revision() != rendered {
                    trigger.force_update();
                }
                sync(&store);
            }

            move || {
                if let Some(listener) = listener {
                    store.unsubscribe(listener);
                }
                if owner && clear_on_unmount {
                    if let Err(err) = store.dispose() {
                        tracing::warn!(error = %err, "failed to clear root theme");
                    }
                }
            }
        });
    }

    // Resync after every later commit
    {
        let store = store.clone();
        use_effect_with(store.revision(), move |_| {
            if owner {
                sync(&store);
            }
        });
    }

    if !owner {
        return html! { <>{ props.children.clone() }</> };
    }

    let context = ThemeContext::new(scope, store);
    html! {
        <ContextProvider<ThemeContext> context={context}>
            {props.children.clone()}
        </ContextProvider<ThemeContext>>
    }
}
