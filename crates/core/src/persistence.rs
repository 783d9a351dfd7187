//! Persistence adapter over local storage or an expiring cookie

use crate::config::COOKIE_EXPIRY_MONTHS;
use crate::ports::{CookieJar, KeyValueStore};
use crate::types::Theme;
use crate::ThemeResult;
use chrono::{DateTime, Months, Utc};
use std::rc::Rc;

/// Expiry for a cookie written at `now`: six calendar months later.
///
/// A day missing from the target month is clamped to that month's last day,
/// so Aug 31 expires on Feb 28. A JS `Date` bumped with `setMonth(m + 6)`
/// rolls over into the next month instead (Mar 3). Either way the cookie
/// lives about six months; only month-end writes differ by a few days.
pub fn cookie_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_add_months(Months::new(COOKIE_EXPIRY_MONTHS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Reads and writes the theme under a key, through the backend chosen at construction
#[derive(Clone)]
pub struct PersistenceAdapter {
    storage: Rc<dyn KeyValueStore>,
    cookies: Rc<dyn CookieJar>,
    use_cookies: bool,
}

impl PersistenceAdapter {
    pub fn new(
        storage: Rc<dyn KeyValueStore>,
        cookies: Rc<dyn CookieJar>,
        use_cookies: bool,
    ) -> Self {
        Self {
            storage,
            cookies,
            use_cookies,
        }
    }

    pub const fn uses_cookies(&self) -> bool {
        self.use_cookies
    }

    pub fn get(&self, key: &str) -> ThemeResult<Option<Theme>> {
        let raw = if self.use_cookies {
            self.cookies.get(key)?
        } else {
            self.storage.get(key)?
        };
        Ok(raw.map(Theme::from))
    }

    pub fn set(&self, key: &str, theme: &Theme) -> ThemeResult<()> {
        self.set_at(key, theme, Utc::now())
    }

    /// Like [`set`](Self::set) with an explicit write instant
    pub fn set_at(&self, key: &str, theme: &Theme, now: DateTime<Utc>) -> ThemeResult<()> {
        if self.use_cookies {
            self.cookies.set(key, theme.as_str(), cookie_expiry(now))
        } else {
            self.storage.set(key, theme.as_str())
        }
    }
}
