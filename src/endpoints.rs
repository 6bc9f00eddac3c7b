//! The application's endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/budgets/{budget_id}/edit',
//! use [format_endpoint].

use time::Date;

/// The root route which redirects to the budgets overview.
pub const ROOT: &str = "/";
/// The budgets overview for the current display window.
pub const BUDGETS_VIEW: &str = "/budgets";
/// The budgets overview for the window starting at a given date.
pub const BUDGETS_PERIOD_VIEW: &str = "/budgets/period/{date}";
/// The page for creating a new budget.
pub const NEW_BUDGET_VIEW: &str = "/budgets/new";
/// The page for editing an existing budget.
pub const EDIT_BUDGET_VIEW: &str = "/budgets/{budget_id}/edit";
/// The confirmation page for deleting a budget.
pub const DELETE_BUDGET_VIEW: &str = "/budgets/{budget_id}/delete";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a budget.
pub const BUDGETS_API: &str = "/api/budgets";
/// The route to update a budget.
pub const PUT_BUDGET: &str = "/api/budgets/{budget_id}";
/// The route to delete a budget.
pub const DELETE_BUDGET: &str = "/api/budgets/{budget_id}";
/// The route to set a budget's allocation for the displayed window.
pub const BUDGET_ALLOCATION: &str = "/api/budgets/{budget_id}/allocation";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/budgets/{budget_id}/edit',
/// '{budget_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter. If no parameter is found, the original path is
/// returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

/// The overview URI for the window starting at `date`.
pub fn period_endpoint(date: Date) -> String {
    format!("{BUDGETS_VIEW}/period/{date}")
}
