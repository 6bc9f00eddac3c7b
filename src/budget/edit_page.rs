//! The page with the form for editing a budget.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    budget::{
        core::{Budget, BudgetId},
        db::get_budget,
    },
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        base},
    navigation::NavBar,
};

/// The state needed for the edit budget page.
#[derive(Debug, Clone)]
pub struct EditBudgetPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditBudgetPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page for editing an existing budget.
pub async fn get_edit_budget_page(
    State(state): State<EditBudgetPageState>,
    Path(budget_id): Path<BudgetId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let budget = get_budget(budget_id, &connection)
        .inspect_err(|error| tracing::error!("could not get budget {budget_id}: {error}"))?;

    Ok(edit_budget_view(&budget).into_response())
}

fn edit_budget_view(budget: &Budget) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGETS_VIEW).into_html();
    let update_url = format_endpoint(endpoints::PUT_BUDGET, budget.id);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { "Edit Budget" }

                form hx-put=(update_url) hx-target="#alert-container" class="space-y-4"
                {
                    div
                    {
                        label for="name" class=(FORM_LABEL_STYLE) { "Name" }
                        input
                            type="text"
                            name="name"
                            id="name"
                            value=(budget.name)
                            class=(FORM_TEXT_INPUT_STYLE)
                            required
                            autofocus;
                    }

                    div class="flex items-center gap-2"
                    {
                        input
                            type="checkbox"
                            name="active"
                            id="active"
                            checked[budget.active];
                        label for="active" class=(FORM_LABEL_STYLE) { "Track spending" }
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
                }
            }
        }
    );

    base("Edit Budget", &content)
}
