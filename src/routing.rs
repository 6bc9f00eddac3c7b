//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    budget::{
        create_budget_endpoint, delete_budget_endpoint, get_budgets_page,
        get_budgets_page_for_date, get_delete_budget_page, get_edit_budget_page,
        get_new_budget_page, set_allocation_endpoint, update_budget_endpoint,
    },
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::BUDGETS_VIEW, get(get_budgets_page))
        .route(
            endpoints::BUDGETS_PERIOD_VIEW,
            get(get_budgets_page_for_date),
        )
        .route(endpoints::NEW_BUDGET_VIEW, get(get_new_budget_page))
        .route(endpoints::EDIT_BUDGET_VIEW, get(get_edit_budget_page))
        .route(endpoints::DELETE_BUDGET_VIEW, get(get_delete_budget_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::BUDGETS_API, post(create_budget_endpoint))
        .route(endpoints::PUT_BUDGET, put(update_budget_endpoint))
        .route(endpoints::DELETE_BUDGET, delete(delete_budget_endpoint))
        .route(endpoints::BUDGET_ALLOCATION, post(set_allocation_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the budgets overview.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::BUDGETS_VIEW)
}
