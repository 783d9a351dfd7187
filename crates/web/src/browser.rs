//! Browser implementations of the theme ports

use chrono::{DateTime, Utc};
use std::rc::Rc;
use true_theme_core::cookie::{find_cookie, set_cookie_string};
use true_theme_core::{
    CookieJar, DocumentRoot, KeyValueStore, SystemPreference, ThemeError, ThemePorts,
    ThemeResult, PREFERS_DARK_QUERY,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlDocument, Storage, Window};

fn js_error(backend: &'static str, err: &JsValue) -> ThemeError {
    ThemeError::backend(
        backend,
        err.as_string().unwrap_or_else(|| format!("{err:?}")),
    )
}

fn window(backend: &'static str) -> ThemeResult<Window> {
    web_sys::window().ok_or_else(|| ThemeError::backend(backend, "no window"))
}

fn document(backend: &'static str) -> ThemeResult<web_sys::Document> {
    window(backend)?
        .document()
        .ok_or_else(|| ThemeError::backend(backend, "no document"))
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    const BACKEND: &'static str = "localStorage";

    fn storage() -> ThemeResult<Storage> {
        window(Self::BACKEND)?
            .local_storage()
            .map_err(|err| js_error(Self::BACKEND, &err))?
            .ok_or_else(|| ThemeError::backend(Self::BACKEND, "storage disabled"))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> ThemeResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| js_error(Self::BACKEND, &err))
    }

    fn set(&self, key: &str, value: &str) -> ThemeResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| js_error(Self::BACKEND, &err))
    }
}

/// `document.cookie`, with names and values URI-component encoded
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCookies;

impl DocumentCookies {
    const BACKEND: &'static str = "document.cookie";

    fn html_document() -> ThemeResult<HtmlDocument> {
        document(Self::BACKEND)?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| ThemeError::backend(Self::BACKEND, "not an HTML document"))
    }
}

impl CookieJar for DocumentCookies {
    fn get(&self, name: &str) -> ThemeResult<Option<String>> {
        let cookies = Self::html_document()?
            .cookie()
            .map_err(|err| js_error(Self::BACKEND, &err))?;
        let name = String::from(js_sys::encode_uri_component(name));

        find_cookie(&cookies, &name)
            .map(|value| {
                js_sys::decode_uri_component(value)
                    .map(String::from)
                    .map_err(|err| js_error(Self::BACKEND, &err))
            })
            .transpose()
    }

    fn set(&self, name: &str, value: &str, expires: DateTime<Utc>) -> ThemeResult<()> {
        let cookie = set_cookie_string(
            &String::from(js_sys::encode_uri_component(name)),
            &String::from(js_sys::encode_uri_component(value)),
            expires,
        );
        Self::html_document()?
            .set_cookie(&cookie)
            .map_err(|err| js_error(Self::BACKEND, &err))
    }
}

/// `document.documentElement`
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentElement;

impl DocumentElement {
    const BACKEND: &'static str = "documentElement";

    fn element() -> ThemeResult<Element> {
        document(Self::BACKEND)?
            .document_element()
            .ok_or_else(|| ThemeError::backend(Self::BACKEND, "no root element"))
    }
}

impl DocumentRoot for DocumentElement {
    fn add_class(&self, class: &str) -> ThemeResult<()> {
        Self::element()?
            .class_list()
            .add_1(class)
            .map_err(|err| js_error(Self::BACKEND, &err))
    }

    fn remove_class(&self, class: &str) -> ThemeResult<()> {
        Self::element()?
            .class_list()
            .remove_1(class)
            .map_err(|err| js_error(Self::BACKEND, &err))
    }

    fn set_attribute(&self, name: &str, value: &str) -> ThemeResult<()> {
        Self::element()?
            .set_attribute(name, value)
            .map_err(|err| js_error(Self::BACKEND, &err))
    }

    fn remove_attribute(&self, name: &str) -> ThemeResult<()> {
        Self::element()?
            .remove_attribute(name)
            .map_err(|err| js_error(Self::BACKEND, &err))
    }
}

/// `window.matchMedia("(prefers-color-scheme: dark)")`
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaPreference;

impl SystemPreference for MediaPreference {
    fn prefers_dark(&self) -> ThemeResult<bool> {
        const BACKEND: &str = "matchMedia";

        let query = window(BACKEND)?
            .match_media(PREFERS_DARK_QUERY)
            .map_err(|err| js_error(BACKEND, &err))?;
        // A returned MediaQueryList says nothing by itself; only `matches` does
        Ok(query.is_some_and(|query| query.matches()))
    }
}

/// Ports bound to the current page
pub fn browser_ports() -> ThemePorts {
    ThemePorts::new(
        Rc::new(LocalStorage),
        Rc::new(DocumentCookies),
        Rc::new(DocumentElement),
        Rc::new(MediaPreference),
    )
}
