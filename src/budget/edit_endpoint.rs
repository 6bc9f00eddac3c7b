//! Defines the endpoint for updating a budget.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    budget::{core::BudgetId, db::update_budget},
    endpoints,
    session::put_flash_message,
};

/// The state needed to update a budget.
#[derive(Debug, Clone)]
pub struct UpdateBudgetState {
    /// The database connection for managing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for editing a budget.
#[derive(Debug, Deserialize)]
pub struct EditBudgetForm {
    /// The new display name.
    pub name: String,
    /// Present when the budget should keep tracking spending. Checkboxes
    /// only submit a value while checked.
    pub active: Option<String>,
}

/// A route handler for updating a budget, redirects to the overview on
/// success.
pub async fn update_budget_endpoint(
    State(state): State<UpdateBudgetState>,
    Path(budget_id): Path<BudgetId>,
    jar: PrivateCookieJar,
    Form(form): Form<EditBudgetForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_budget(budget_id, &form.name, form.active.is_some(), &connection) {
        Ok(()) => {
            let jar = put_flash_message(jar, &format!("Updated budget \"{}\"", form.name.trim()));

            (
                jar,
                HxRedirect(endpoints::BUDGETS_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response()
        }
        Err(error @ (Error::EmptyBudgetName | Error::UpdateMissingBudget)) => {
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!("Could not update budget {budget_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod update_budget_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use rusqlite::Connection;

    use crate::{
        budget::db::{create_budget, get_budget},
        db::initialize,
        endpoints,
        test_utils::assert_hx_redirect,
    };

    use super::{EditBudgetForm, UpdateBudgetState, update_budget_endpoint};

    fn get_test_state() -> UpdateBudgetState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        UpdateBudgetState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn updates_the_budget_and_redirects() {
        let state = get_test_state();
        let budget = {
            let connection = state.db_connection.lock().unwrap();
            create_budget("Groceries", &connection).unwrap()
        };

        let response = update_budget_endpoint(
            State(state.clone()),
            Path(budget.id),
            PrivateCookieJar::new(Key::generate()),
            Form(EditBudgetForm {
                name: "Food".to_owned(),
                active: None,
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_hx_redirect(&response, endpoints::BUDGETS_VIEW);

        let connection = state.db_connection.lock().unwrap();
        let updated = get_budget(budget.id, &connection).unwrap();
        assert_eq!(updated.name, "Food");
        assert!(!updated.active);
    }

    #[tokio::test]
    async fn checkbox_value_marks_the_budget_active() {
        let state = get_test_state();
        let budget = {
            let connection = state.db_connection.lock().unwrap();
            create_budget("Groceries", &connection).unwrap()
        };

        update_budget_endpoint(
            State(state.clone()),
            Path(budget.id),
            PrivateCookieJar::new(Key::generate()),
            Form(EditBudgetForm {
                name: "Groceries".to_owned(),
                active: Some("on".to_owned()),
            }),
        )
        .await;

        let connection = state.db_connection.lock().unwrap();
        assert!(get_budget(budget.id, &connection).unwrap().active);
    }

    #[tokio::test]
    async fn missing_budget_returns_not_found() {
        let state = get_test_state();

        let response = update_budget_endpoint(
            State(state),
            Path(999),
            PrivateCookieJar::new(Key::generate()),
            Form(EditBudgetForm {
                name: "Ghost".to_owned(),
                active: None,
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
