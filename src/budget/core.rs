use rusqlite::Connection;

pub type BudgetId = i64;

/// A spending envelope the user plans against.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    /// The id for the budget.
    pub id: BudgetId,
    /// The display name.
    pub name: String,
    /// Whether the budget takes part in spend tracking.
    pub active: bool,
}

/// Derived spent/budgeted figures for one budget in one period.
///
/// Produced for the overview and discarded after rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetInformation {
    pub budget_id: BudgetId,
    pub spent: f64,
    pub budgeted: f64,
}

pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1
        )",
        (),
    )?;

    Ok(())
}

pub fn create_allocation_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget_allocation (
            id INTEGER PRIMARY KEY,
            budget_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            FOREIGN KEY(budget_id) REFERENCES budget(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    Ok(())
}

pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            budget_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            FOREIGN KEY(budget_id) REFERENCES budget(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    Ok(())
}

pub fn create_available_amount_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS available_amount (
            id INTEGER PRIMARY KEY,
            amount REAL NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_budget(row: &rusqlite::Row) -> Result<Budget, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let active = row.get(2)?;

    Ok(Budget { id, name, active })
}

#[cfg(test)]
mod create_table_tests {
    use rusqlite::Connection;

    use super::{
        create_allocation_table, create_available_amount_table, create_budget_table,
        create_expense_table,
    };

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_budget_table(&connection));
        assert_eq!(Ok(()), create_allocation_table(&connection));
        assert_eq!(Ok(()), create_expense_table(&connection));
        assert_eq!(Ok(()), create_available_amount_table(&connection));
    }
}
