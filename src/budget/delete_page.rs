//! The confirmation page for deleting a budget.
//!
//! Rendering this page records the URI the user came from so the delete
//! endpoint can send them back afterwards.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::{HeaderMap, header::REFERER},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    budget::{
        core::{Budget, BudgetId},
        db::get_budget,
    },
    endpoints::{self, format_endpoint},
    html::{BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    session::{BUDGET_DELETE_TOKEN, remember_previous_uri},
};

/// The state needed for the delete confirmation page.
#[derive(Debug, Clone)]
pub struct DeleteBudgetPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteBudgetPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the delete confirmation page for a budget.
pub async fn get_delete_budget_page(
    State(state): State<DeleteBudgetPageState>,
    Path(budget_id): Path<BudgetId>,
    headers: HeaderMap,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    let budget = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_budget(budget_id, &connection)
            .inspect_err(|error| tracing::error!("could not get budget {budget_id}: {error}"))?
    };

    let jar = match headers.get(REFERER).and_then(|value| value.to_str().ok()) {
        Some(referer) => remember_previous_uri(jar, BUDGET_DELETE_TOKEN, referer),
        None => jar,
    };

    Ok((jar, delete_budget_view(&budget)).into_response())
}

fn delete_budget_view(budget: &Budget) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGETS_VIEW).into_html();
    let delete_url = format_endpoint(endpoints::DELETE_BUDGET, budget.id);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { "Delete budget \"" (budget.name) "\"?" }

                p
                {
                    "This removes the budget along with its allocations and recorded \
                    spending. This cannot be undone."
                }

                form hx-delete=(delete_url)
                {
                    button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
                }

                a href=(endpoints::BUDGETS_VIEW) class=(LINK_STYLE) { "Cancel" }
            }
        }
    );

    base("Delete Budget", &content)
}

#[cfg(test)]
mod delete_budget_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::{HeaderMap, StatusCode, header::REFERER},
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        Error,
        budget::db::create_budget,
        db::initialize,
        endpoints::{self, format_endpoint},
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{DeleteBudgetPageState, get_delete_budget_page};

    fn get_test_state() -> DeleteBudgetPageState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        DeleteBudgetPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn renders_the_confirmation_form() {
        let state = get_test_state();
        let budget = {
            let connection = state.db_connection.lock().unwrap();
            create_budget("Groceries", &connection).unwrap()
        };
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, "/budgets?page=2".parse().unwrap());

        let response = get_delete_budget_page(
            State(state),
            Path(budget.id),
            headers,
            PrivateCookieJar::new(Key::generate()),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers().contains_key("set-cookie"),
            "the referer should be recorded in the session"
        );
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form_selector = Selector::parse("form").unwrap();
        let form = html
            .select(&form_selector)
            .next()
            .expect("Could not find confirmation form");
        assert_eq!(
            form.attr("hx-delete"),
            Some(format_endpoint(endpoints::DELETE_BUDGET, budget.id).as_str())
        );

        let heading_selector = Selector::parse("h1").unwrap();
        let heading: String = html
            .select(&heading_selector)
            .next()
            .expect("Could not find heading")
            .text()
            .collect();
        assert!(heading.contains("Groceries"));
    }

    #[tokio::test]
    async fn missing_budget_is_not_found() {
        let state = get_test_state();

        let result = get_delete_budget_page(
            State(state),
            Path(999),
            HeaderMap::new(),
            PrivateCookieJar::new(Key::generate()),
        )
        .await;

        assert_eq!(result.err(), Some(Error::NotFound));
    }
}
