//! Session state carried in private cookies.
//!
//! The overview stores the active display window so later requests keep the
//! period the user navigated to, the delete flow stores the URI to return to
//! afterwards, and mutation endpoints leave a one-shot notification for the
//! next page render.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// The session token under which the delete flow records the prior URI.
pub const BUDGET_DELETE_TOKEN: &str = "budgets.delete";

const WINDOW_COOKIE: &str = "display_window";
const FLASH_COOKIE: &str = "flash_message";

/// The display window carried between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    /// The first day of the window.
    pub start: Date,
    /// The last day of the window.
    pub end: Date,
}

fn session_cookie(name: String, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
        .path("/")
        .build()
}

/// The display window saved by an earlier request, if any.
///
/// A cookie that fails to parse is treated as absent.
pub fn get_session_window(jar: &PrivateCookieJar) -> Option<SessionWindow> {
    let cookie = jar.get(WINDOW_COOKIE)?;

    match serde_json::from_str(cookie.value()) {
        Ok(window) => Some(window),
        Err(error) => {
            tracing::debug!("ignoring invalid display window cookie: {error}");
            None
        }
    }
}

/// Save the display window for later requests.
pub fn put_session_window(
    jar: PrivateCookieJar,
    window: SessionWindow,
) -> Result<PrivateCookieJar, Error> {
    let value = serde_json::to_string(&window)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    Ok(jar.add(session_cookie(WINDOW_COOKIE.to_owned(), value)))
}

fn previous_uri_cookie_name(token: &str) -> String {
    format!("previous_uri.{token}")
}

/// Record the URI to return to after the flow identified by `token`.
pub fn remember_previous_uri(jar: PrivateCookieJar, token: &str, uri: &str) -> PrivateCookieJar {
    jar.add(session_cookie(
        previous_uri_cookie_name(token),
        uri.to_owned(),
    ))
}

/// The URI recorded for the flow identified by `token`, if any.
pub fn previous_uri(jar: &PrivateCookieJar, token: &str) -> Option<String> {
    jar.get(&previous_uri_cookie_name(token))
        .map(|cookie| cookie.value().to_owned())
}

/// Leave a one-shot notification for the next page render.
pub fn put_flash_message(jar: PrivateCookieJar, message: &str) -> PrivateCookieJar {
    jar.add(session_cookie(FLASH_COOKIE.to_owned(), message.to_owned()))
}

/// Take the pending notification, clearing it from the session.
pub fn take_flash_message(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<String>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let message = cookie.value().to_owned();
            let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));

            (jar, Some(message))
        }
        None => (jar, None),
    }
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use time::macros::date;

    use super::{
        BUDGET_DELETE_TOKEN, SessionWindow, get_session_window, previous_uri, put_flash_message,
        put_session_window, remember_previous_uri, take_flash_message,
    };

    fn get_test_jar() -> PrivateCookieJar {
        PrivateCookieJar::new(Key::generate())
    }

    #[test]
    fn session_window_round_trips() {
        let jar = get_test_jar();
        let window = SessionWindow {
            start: date!(2026 - 08 - 01),
            end: date!(2026 - 08 - 31),
        };

        let jar = put_session_window(jar, window).unwrap();

        assert_eq!(get_session_window(&jar), Some(window));
    }

    #[test]
    fn missing_window_is_none() {
        let jar = get_test_jar();

        assert_eq!(get_session_window(&jar), None);
    }

    #[test]
    fn previous_uri_is_stored_per_token() {
        let jar = get_test_jar();

        let jar = remember_previous_uri(jar, BUDGET_DELETE_TOKEN, "/budgets?page=2");

        assert_eq!(
            previous_uri(&jar, BUDGET_DELETE_TOKEN),
            Some("/budgets?page=2".to_owned())
        );
        assert_eq!(previous_uri(&jar, "another.flow"), None);
    }

    #[test]
    fn flash_message_is_taken_once() {
        let jar = get_test_jar();

        let jar = put_flash_message(jar, "Deleted budget \"Groceries\"");

        let (jar, message) = take_flash_message(jar);
        assert_eq!(message, Some("Deleted budget \"Groceries\"".to_owned()));

        let (_, message) = take_flash_message(jar);
        assert_eq!(message, None);
    }
}
