//! Defines the endpoint for deleting a budget.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    budget::{
        core::BudgetId,
        db::{destroy_budget, get_budget},
    },
    endpoints,
    session::{BUDGET_DELETE_TOKEN, previous_uri, put_flash_message},
};

/// The state needed to delete a budget.
#[derive(Debug, Clone)]
pub struct DeleteBudgetState {
    /// The database connection for managing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a budget.
///
/// On success the client is sent back to the URI recorded when the
/// confirmation page was shown, or to the budgets overview when none was
/// recorded. Allocations and recorded spending cascade with the budget.
pub async fn delete_budget_endpoint(
    State(state): State<DeleteBudgetState>,
    Path(budget_id): Path<BudgetId>,
    jar: PrivateCookieJar,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let budget = match get_budget(budget_id, &connection) {
        Ok(budget) => budget,
        Err(Error::NotFound) => return Error::DeleteMissingBudget.into_alert_response(),
        Err(error) => {
            tracing::error!("could not get budget {budget_id}: {error}");
            return error.into_alert_response();
        }
    };

    match destroy_budget(budget_id, &connection) {
        Ok(()) => {
            let redirect_to = previous_uri(&jar, BUDGET_DELETE_TOKEN)
                .unwrap_or_else(|| endpoints::BUDGETS_VIEW.to_owned());
            let jar = put_flash_message(jar, &format!("Deleted budget \"{}\"", budget.name));

            (jar, HxRedirect(redirect_to), StatusCode::OK).into_response()
        }
        Err(error) => {
            tracing::error!("Could not delete budget {budget_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_budget_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{
        Error,
        budget::db::{create_budget, get_budget},
        db::initialize,
        endpoints,
        session::{BUDGET_DELETE_TOKEN, remember_previous_uri},
        test_utils::{assert_hx_redirect, assert_valid_html, parse_html_fragment},
    };

    use super::{DeleteBudgetState, delete_budget_endpoint};

    fn get_test_state() -> DeleteBudgetState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        DeleteBudgetState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn get_test_jar() -> PrivateCookieJar {
        PrivateCookieJar::new(Key::generate())
    }

    #[tokio::test]
    async fn deletes_the_budget_and_redirects_to_the_overview_by_default() {
        let state = get_test_state();
        let budget = {
            let connection = state.db_connection.lock().unwrap();
            create_budget("Groceries", &connection).unwrap()
        };

        let response =
            delete_budget_endpoint(State(state.clone()), Path(budget.id), get_test_jar()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_hx_redirect(&response, endpoints::BUDGETS_VIEW);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_budget(budget.id, &connection), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn redirects_to_the_recorded_previous_uri() {
        let state = get_test_state();
        let budget = {
            let connection = state.db_connection.lock().unwrap();
            create_budget("Groceries", &connection).unwrap()
        };
        let jar = remember_previous_uri(
            get_test_jar(),
            BUDGET_DELETE_TOKEN,
            "/budgets/period/2026-05-01?page=2",
        );

        let response = delete_budget_endpoint(State(state), Path(budget.id), jar).await;

        assert_hx_redirect(&response, "/budgets/period/2026-05-01?page=2");
    }

    #[tokio::test]
    async fn missing_budget_returns_error_html() {
        let state = get_test_state();

        let response = delete_budget_endpoint(State(state), Path(999), get_test_jar()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_error_content(&html, "Could not delete budget");
    }

    #[track_caller]
    fn assert_error_content(html: &Html, want_error_message: &str) {
        let p = Selector::parse("p").unwrap();
        let error_message = html
            .select(&p)
            .next()
            .expect("No error message found")
            .text()
            .collect::<Vec<_>>()
            .join("");

        assert_eq!(want_error_message, error_message.trim());
    }
}
