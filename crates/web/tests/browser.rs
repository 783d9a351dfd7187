//! Browser port tests; run with `wasm-pack test --headless --firefox crates/web`

use chrono::{Duration, Utc};
use true_theme_core::{
    CookieJar, DocumentRoot, KeyValueStore, SystemPreference, Theme, ThemeConfig, ThemeScope,
};
use true_theme_web::browser::{
    browser_ports, DocumentCookies, DocumentElement, LocalStorage, MediaPreference,
};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn root() -> web_sys::Element {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .document_element()
        .unwrap()
}

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    LocalStorage.set("true-theme-test", "dark").unwrap();
    assert_eq!(
        LocalStorage.get("true-theme-test").unwrap().as_deref(),
        Some("dark")
    );
    assert_eq!(LocalStorage.get("true-theme-missing").unwrap(), None);
}

#[wasm_bindgen_test]
fn cookie_round_trip_encodes_value() {
    let expires = Utc::now() + Duration::days(1);
    DocumentCookies
        .set("true-theme-cookie", "dark; high contrast", expires)
        .unwrap();
    assert_eq!(
        DocumentCookies.get("true-theme-cookie").unwrap().as_deref(),
        Some("dark; high contrast")
    );
}

#[wasm_bindgen_test]
fn expired_cookie_is_absent() {
    let past = Utc::now() - Duration::days(1);
    DocumentCookies.set("true-theme-expired", "dark", past).unwrap();
    assert_eq!(DocumentCookies.get("true-theme-expired").unwrap(), None);
}

#[wasm_bindgen_test]
fn document_element_class_and_attribute() {
    DocumentElement.add_class("tt-dark").unwrap();
    assert!(root().class_list().contains("tt-dark"));
    DocumentElement.remove_class("tt-dark").unwrap();
    assert!(!root().class_list().contains("tt-dark"));

    DocumentElement.set_attribute("data-tt", "light").unwrap();
    assert_eq!(root().get_attribute("data-tt").as_deref(), Some("light"));
    DocumentElement.remove_attribute("data-tt").unwrap();
    assert!(!root().has_attribute("data-tt"));
}

#[wasm_bindgen_test]
fn media_preference_reads_match_result() {
    let expected = web_sys::window()
        .unwrap()
        .match_media("(prefers-color-scheme: dark)")
        .unwrap()
        .is_some_and(|query| query.matches());
    assert_eq!(MediaPreference.prefers_dark().unwrap(), expected);
}

#[wasm_bindgen_test]
fn mounted_scope_reflects_and_persists() {
    let config = ThemeConfig::default()
        .with_attribute("data-tt-mode")
        .with_storage_key("true-theme-scope")
        .with_default_theme("sepia");
    LocalStorage.set("true-theme-scope", "dark").unwrap();

    let scope = ThemeScope::root().mount(config, browser_ports()).unwrap();
    let store = scope.store().unwrap();
    assert_eq!(store.theme(), Some(Theme::dark()));
    assert_eq!(root().get_attribute("data-tt-mode").as_deref(), Some("dark"));

    store.set_theme("light").unwrap();
    assert!(!root().has_attribute("data-tt-mode"));
    store.flush().unwrap();
    assert_eq!(root().get_attribute("data-tt-mode").as_deref(), Some("light"));
    assert_eq!(
        LocalStorage.get("true-theme-scope").unwrap().as_deref(),
        Some("light")
    );

    store.dispose().unwrap();
    assert!(!root().has_attribute("data-tt-mode"));
}
