//! Budget management for the application.
//!
//! This module contains everything related to budgets:
//! - The `Budget` model and its derived per-period figures
//! - Store functions for budgets, allocations, expenses, and available amounts
//! - The aggregation of per-budget figures into overview totals
//! - View handlers for the budget pages and mutation endpoints

mod aggregation;
mod allocation_endpoint;
mod budgets_page;
mod core;
mod create_endpoint;
mod create_page;
mod db;
mod delete_endpoint;
mod delete_page;
mod edit_endpoint;
mod edit_page;

pub use allocation_endpoint::set_allocation_endpoint;
pub use budgets_page::{get_budgets_page, get_budgets_page_for_date};
pub use core::{
    create_allocation_table, create_available_amount_table, create_budget_table,
    create_expense_table,
};
pub use create_endpoint::create_budget_endpoint;
pub use create_page::get_new_budget_page;
pub use delete_endpoint::delete_budget_endpoint;
pub use delete_page::get_delete_budget_page;
pub use edit_endpoint::update_budget_endpoint;
pub use edit_page::get_edit_budget_page;
