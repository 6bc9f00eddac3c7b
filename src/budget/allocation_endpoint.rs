//! Defines the endpoint that sets a budget's allocation for the displayed
//! window.

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
    budget::{
        core::BudgetId,
        db::{get_budget, set_allocation},
    },
    endpoints,
    html::format_currency,
    period::Period,
    preferences::get_view_range,
    session::{get_session_window, put_flash_message},
    timezone::current_local_date,
};

/// The state needed to set an allocation.
#[derive(Debug, Clone)]
pub struct AllocationState {
    /// The database connection for managing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for AllocationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for setting an allocation.
#[derive(Debug, Deserialize)]
pub struct AllocationForm {
    /// The amount to budget for the displayed window.
    pub amount: f64,
}

/// A route handler that sets the budgeted amount for a budget and the
/// window currently shown in the overview, then redirects back to it.
pub async fn set_allocation_endpoint(
    State(state): State<AllocationState>,
    Path(budget_id): Path<BudgetId>,
    jar: PrivateCookieJar,
    Form(form): Form<AllocationForm>,
) -> Response {
    let today = match current_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let budget = match get_budget(budget_id, &connection) {
        Ok(budget) => budget,
        Err(Error::NotFound) => return Error::NotFound.into_alert_response(),
        Err(error) => {
            tracing::error!("could not get budget {budget_id}: {error}");
            return error.into_alert_response();
        }
    };

    let granularity = match get_view_range(&connection) {
        Ok(granularity) => granularity,
        Err(error) => {
            tracing::error!("could not get view range preference: {error}");
            return error.into_alert_response();
        }
    };

    let window = match get_session_window(&jar) {
        Some(window) => Period {
            start: window.start,
            end: window.end,
            granularity,
        },
        None => Period::around(today, granularity),
    };

    match set_allocation(budget_id, form.amount, window, &connection) {
        Ok(()) => {
            let jar = put_flash_message(
                jar,
                &format!(
                    "Budgeted {} for \"{}\"",
                    format_currency(form.amount),
                    budget.name
                ),
            );

            (
                jar,
                HxRedirect(endpoints::BUDGETS_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not set allocation for budget {budget_id}: {error}");
            error.into_alert_response()
        }
    }
}
