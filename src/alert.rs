//! One-shot alert fragments for notifying the user of an action's outcome.
//!
//! Alerts render into the fixed alert container in the base layout; htmx
//! endpoints return them as the whole response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

const SUCCESS_ALERT_STYLE: &str = "p-4 mb-4 text-sm text-green-800 rounded-lg \
    bg-green-50 dark:bg-gray-800 dark:text-green-400";

const ERROR_ALERT_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg \
    bg-red-50 dark:bg-gray-800 dark:text-red-400";

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An action completed as requested.
    Success {
        /// The message shown to the user.
        message: String,
    },
    /// An action failed in a way the user can act on.
    Error {
        /// A short name for what went wrong.
        title: String,
        /// What the user can do about it.
        message: String,
    },
}

impl Alert {
    pub fn success(message: &str) -> Self {
        Self::Success {
            message: message.to_owned(),
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self::Error {
            title: title.to_owned(),
            message: message.to_owned(),
        }
    }

    pub fn into_markup(self) -> Markup {
        match self {
            Self::Success { message } => html!(
                div class=(SUCCESS_ALERT_STYLE) role="alert"
                {
                    p { (message) }
                }
            ),
            Self::Error { title, message } => html!(
                div class=(ERROR_ALERT_STYLE) role="alert"
                {
                    p class="font-medium" { (title) }
                    p { (message) }
                }
            ),
        }
    }

    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, self.into_markup()).into_response()
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_response_with_status(StatusCode::OK)
    }
}

#[cfg(test)]
mod alert_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::test_utils::{assert_valid_html, parse_html_fragment};

    use super::Alert;

    #[tokio::test]
    async fn success_alert_renders_the_message() {
        let response = Alert::success("Budget deleted successfully").into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let paragraph = Selector::parse("p").unwrap();
        let text: String = html
            .select(&paragraph)
            .next()
            .expect("No message paragraph found")
            .text()
            .collect();
        assert_eq!(text.trim(), "Budget deleted successfully");
    }

    #[tokio::test]
    async fn error_alert_carries_the_status_code() {
        let response = Alert::error("Could not delete budget", "The budget could not be found.")
            .into_response_with_status(StatusCode::NOT_FOUND);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        let paragraph = Selector::parse("p").unwrap();
        let title: String = html
            .select(&paragraph)
            .next()
            .expect("No title paragraph found")
            .text()
            .collect();
        assert_eq!(title.trim(), "Could not delete budget");
    }
}
