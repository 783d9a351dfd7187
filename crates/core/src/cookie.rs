//! `document.cookie` string helpers

use chrono::{DateTime, Utc};

/// HTTP date format used by the `expires` cookie attribute
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Build the assignment written to `document.cookie`.
///
/// `name` and `value` are written as given; callers encode them first.
pub fn set_cookie_string(name: &str, value: &str, expires: DateTime<Utc>) -> String {
    format!(
        "{name}={value}; expires={}; path=/",
        expires.format(EXPIRES_FORMAT)
    )
}

/// Find `name` in a `document.cookie` read (`a=1; b=2`). First match wins.
pub fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        let pair = pair.trim();
        let (key, value) = pair.split_once('=').unwrap_or(("", pair));
        (key == name).then_some(value)
    })
}
