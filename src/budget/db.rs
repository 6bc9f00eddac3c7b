//! Store functions for budgets, allocations, expenses, and available amounts.

use rusqlite::{Connection, params};

use crate::{
    Error,
    budget::core::{Budget, BudgetId, BudgetInformation, map_row_to_budget},
    period::Period,
};

/// Create a budget with the given name. New budgets start active.
///
/// # Errors
/// Returns [Error::EmptyBudgetName] if `name` is empty after trimming.
pub fn create_budget(name: &str, connection: &Connection) -> Result<Budget, Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::EmptyBudgetName);
    }

    connection.execute(
        "INSERT INTO budget (name, active) VALUES (?1, 1)",
        params![name],
    )?;

    Ok(Budget {
        id: connection.last_insert_rowid(),
        name: name.to_owned(),
        active: true,
    })
}

/// Look up a budget by id.
///
/// # Errors
/// Returns [Error::NotFound] if no budget has the given id.
pub fn get_budget(id: BudgetId, connection: &Connection) -> Result<Budget, Error> {
    connection
        .query_one(
            "SELECT id, name, active FROM budget WHERE id = ?1",
            params![id],
            map_row_to_budget,
        )
        .map_err(Error::from)
}

/// Rename a budget and set its active flag.
///
/// # Errors
/// Returns [Error::EmptyBudgetName] for an empty name and
/// [Error::UpdateMissingBudget] if the budget does not exist.
pub fn update_budget(
    id: BudgetId,
    name: &str,
    active: bool,
    connection: &Connection,
) -> Result<(), Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::EmptyBudgetName);
    }

    let rows_affected = connection.execute(
        "UPDATE budget SET name = ?1, active = ?2 WHERE id = ?3",
        params![name, active, id],
    )?;

    if rows_affected == 0 {
        Err(Error::UpdateMissingBudget)
    } else {
        Ok(())
    }
}

/// Delete a budget. Allocations and expenses cascade via foreign keys.
///
/// # Errors
/// Returns [Error::DeleteMissingBudget] if the budget does not exist.
pub fn destroy_budget(id: BudgetId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM budget WHERE id = ?1", params![id])?;

    if rows_affected == 0 {
        Err(Error::DeleteMissingBudget)
    } else {
        Ok(())
    }
}

/// All budgets that take part in spend tracking, ordered by name.
pub fn get_active_budgets(connection: &Connection) -> Result<Vec<Budget>, Error> {
    connection
        .prepare("SELECT id, name, active FROM budget WHERE active = 1 ORDER BY name ASC")?
        .query_map([], map_row_to_budget)?
        .map(|budget_result| budget_result.map_err(Error::from))
        .collect()
}

/// All budgets excluded from spend tracking, ordered by name.
pub fn get_inactive_budgets(connection: &Connection) -> Result<Vec<Budget>, Error> {
    connection
        .prepare("SELECT id, name, active FROM budget WHERE active = 0 ORDER BY name ASC")?
        .query_map([], map_row_to_budget)?
        .map(|budget_result| budget_result.map_err(Error::from))
        .collect()
}

/// Remove allocations that no longer carry information: zero amounts and
/// rows whose budget is gone.
///
/// Runs before every overview fetch.
pub fn cleanup_budgets(connection: &Connection) -> Result<(), Error> {
    connection.execute("DELETE FROM budget_allocation WHERE amount = 0", [])?;
    connection.execute(
        "DELETE FROM budget_allocation WHERE budget_id NOT IN (SELECT id FROM budget)",
        [],
    )?;

    Ok(())
}

/// Collect the spent and budgeted figures for each budget in `period`.
///
/// Spending sums expenses dated inside the window; the budgeted figure sums
/// allocations that overlap it.
pub fn collect_budget_information(
    budgets: &[Budget],
    period: Period,
    connection: &Connection,
) -> Result<Vec<BudgetInformation>, Error> {
    let mut spent_stmt = connection.prepare(
        "SELECT COALESCE(SUM(amount), 0) FROM expense
            WHERE budget_id = ?1 AND date BETWEEN ?2 AND ?3",
    )?;
    let mut budgeted_stmt = connection.prepare(
        "SELECT COALESCE(SUM(amount), 0) FROM budget_allocation
            WHERE budget_id = ?1 AND start_date <= ?3 AND end_date >= ?2",
    )?;

    let mut information = Vec::with_capacity(budgets.len());

    for budget in budgets {
        let spent: f64 =
            spent_stmt.query_row(params![budget.id, period.start, period.end], |row| {
                row.get(0)
            })?;
        let budgeted: f64 =
            budgeted_stmt.query_row(params![budget.id, period.start, period.end], |row| {
                row.get(0)
            })?;

        information.push(BudgetInformation {
            budget_id: budget.id,
            spent,
            budgeted,
        });
    }

    Ok(information)
}

/// The amount marked as available to budget for exactly this window.
///
/// Returns 0 when no amount was recorded for the window.
pub fn get_available_amount(period: Period, connection: &Connection) -> Result<f64, Error> {
    let mut stmt = connection.prepare(
        "SELECT COALESCE(SUM(amount), 0) FROM available_amount
            WHERE start_date = ?1 AND end_date = ?2",
    )?;

    let amount: f64 = stmt.query_row(params![period.start, period.end], |row| row.get(0))?;

    Ok(amount)
}

/// Record the amount available to budget for exactly this window, replacing
/// any previously recorded amount.
pub fn set_available_amount(
    amount: f64,
    period: Period,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE available_amount SET amount = ?1 WHERE start_date = ?2 AND end_date = ?3",
        params![amount, period.start, period.end],
    )?;

    if rows_affected == 0 {
        connection.execute(
            "INSERT INTO available_amount (amount, start_date, end_date) VALUES (?1, ?2, ?3)",
            params![amount, period.start, period.end],
        )?;
    }

    Ok(())
}

/// Set the allocated amount for a budget and window, replacing any existing
/// allocation for exactly that window.
pub fn set_allocation(
    budget_id: BudgetId,
    amount: f64,
    period: Period,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE budget_allocation SET amount = ?1
            WHERE budget_id = ?2 AND start_date = ?3 AND end_date = ?4",
        params![amount, budget_id, period.start, period.end],
    )?;

    if rows_affected == 0 {
        connection.execute(
            "INSERT INTO budget_allocation (budget_id, amount, start_date, end_date)
                VALUES (?1, ?2, ?3, ?4)",
            params![budget_id, amount, period.start, period.end],
        )?;
    }

    Ok(())
}

/// Record a spending entry against a budget.
pub fn record_expense(
    budget_id: BudgetId,
    amount: f64,
    date: time::Date,
    description: &str,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO expense (budget_id, amount, date, description) VALUES (?1, ?2, ?3, ?4)",
        params![budget_id, amount, date, description],
    )?;

    Ok(())
}



#[cfg(test)]
mod cleanup_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::db::initialize;
    use crate::period::{Granularity, Period};

    use super::{cleanup_budgets, create_budget, set_allocation};

    #[test]
    fn cleanup_removes_zero_amount_allocations() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let budget = create_budget("Groceries", &conn).unwrap();
        let window = Period::around(date!(2026 - 08 - 07), Granularity::Month);
        set_allocation(budget.id, 0.0, window, &conn).unwrap();

        cleanup_budgets(&conn).unwrap();

        let count: i64 = conn
            .query_one("SELECT COUNT(*) FROM budget_allocation", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn cleanup_keeps_allocations_that_carry_amounts() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let budget = create_budget("Groceries", &conn).unwrap();
        let window = Period::around(date!(2026 - 08 - 07), Granularity::Month);
        set_allocation(budget.id, 400.0, window, &conn).unwrap();

        cleanup_budgets(&conn).unwrap();

        let count: i64 = conn
            .query_one("SELECT COUNT(*) FROM budget_allocation", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }
}
