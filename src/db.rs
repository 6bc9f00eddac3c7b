//! Database initialization.

use rusqlite::Connection;

use crate::{budget, preferences};

/// Initialize the database: enable foreign key enforcement for this
/// connection and create the application tables if they do not exist.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    budget::create_budget_table(connection)?;
    budget::create_allocation_table(connection)?;
    budget::create_expense_table(connection)?;
    budget::create_available_amount_table(connection)?;
    preferences::create_preference_table(connection)?;

    Ok(())
}
