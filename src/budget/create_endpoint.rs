//! Defines the endpoint for creating a budget.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{AppState, Error, budget::db::create_budget, endpoints, session::put_flash_message};

/// The state needed to create a budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetState {
    /// The database connection for managing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating a budget.
#[derive(Debug, Deserialize)]
pub struct BudgetForm {
    /// The display name for the new budget.
    pub name: String,
}

/// A route handler for creating a budget, redirects to the overview on
/// success.
pub async fn create_budget_endpoint(
    State(state): State<CreateBudgetState>,
    jar: PrivateCookieJar,
    Form(form): Form<BudgetForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_budget(&form.name, &connection) {
        Ok(budget) => {
            let jar = put_flash_message(jar, &format!("Created budget \"{}\"", budget.name));

            (
                jar,
                HxRedirect(endpoints::BUDGETS_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response()
        }
        Err(Error::EmptyBudgetName) => Error::EmptyBudgetName.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not create budget: {error}");
            error.into_alert_response()
        }
    }
}
