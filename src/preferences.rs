//! User preference storage shared across features.
//!
//! Preferences are plain key/value strings; typed accessors live here so
//! every caller applies the same defaults.

use rusqlite::{Connection, params};

use crate::{Error, period::Granularity};

/// The preference key for the display granularity of the budgets overview.
pub const VIEW_RANGE_KEY: &str = "view_range";
/// The preference key for how many budgets to list per page.
pub const PAGE_SIZE_KEY: &str = "list_page_size";

const DEFAULT_PAGE_SIZE: u64 = 50;

/// Create the preference table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_preference_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS preference (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Get the raw preference string stored for `key`, if any.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query preparation or execution fails.
pub fn get_preference(key: &str, connection: &Connection) -> Result<Option<String>, Error> {
    let mut stmt = connection.prepare("SELECT value FROM preference WHERE key = ?1")?;
    let mut rows = stmt.query(params![key])?;

    match rows.next()? {
        Some(row) => Ok(Some(row.get(0)?)),
        None => Ok(None),
    }
}

/// Store the preference string for `key`, replacing any previous value.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query preparation or execution fails.
pub fn save_preference(key: &str, value: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO preference (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;

    Ok(())
}

/// The granularity the budgets overview displays, defaulting to monthly.
///
/// Unknown stored tokens fall back to the default rather than failing the
/// request.
pub fn get_view_range(connection: &Connection) -> Result<Granularity, Error> {
    let granularity = get_preference(VIEW_RANGE_KEY, connection)?
        .and_then(|token| {
            let parsed = Granularity::parse_token(&token);
            if parsed.is_none() {
                tracing::warn!("unknown view range preference {token:?}, using the default");
            }
            parsed
        })
        .unwrap_or_default();

    Ok(granularity)
}

/// How many budgets to list per page, defaulting to 50.
pub fn get_page_size(connection: &Connection) -> Result<u64, Error> {
    let page_size = get_preference(PAGE_SIZE_KEY, connection)?
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE);

    Ok(page_size)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::period::Granularity;

    use super::{
        PAGE_SIZE_KEY, VIEW_RANGE_KEY, create_preference_table, get_page_size, get_preference,
        get_view_range, save_preference,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_preference_table(&conn).unwrap();
        conn
    }

    #[test]
    fn save_and_get_round_trips() {
        let conn = get_test_connection();

        save_preference("theme", "dark", &conn).unwrap();

        assert_eq!(
            get_preference("theme", &conn).unwrap(),
            Some("dark".to_owned())
        );
    }

    #[test]
    fn save_replaces_the_existing_value() {
        let conn = get_test_connection();

        save_preference("theme", "dark", &conn).unwrap();
        save_preference("theme", "light", &conn).unwrap();

        assert_eq!(
            get_preference("theme", &conn).unwrap(),
            Some("light".to_owned())
        );
    }

    #[test]
    fn missing_preference_is_none() {
        let conn = get_test_connection();

        assert_eq!(get_preference("theme", &conn).unwrap(), None);
    }

    #[test]
    fn view_range_defaults_to_month() {
        let conn = get_test_connection();

        assert_eq!(get_view_range(&conn).unwrap(), Granularity::Month);
    }

    #[test]
    fn view_range_reads_the_stored_token() {
        let conn = get_test_connection();

        save_preference(VIEW_RANGE_KEY, "quarter", &conn).unwrap();

        assert_eq!(get_view_range(&conn).unwrap(), Granularity::Quarter);
    }

    #[test]
    fn unknown_view_range_token_falls_back_to_the_default() {
        let conn = get_test_connection();

        save_preference(VIEW_RANGE_KEY, "fortnight", &conn).unwrap();

        assert_eq!(get_view_range(&conn).unwrap(), Granularity::Month);
    }

    #[test]
    fn page_size_defaults_to_fifty() {
        let conn = get_test_connection();

        assert_eq!(get_page_size(&conn).unwrap(), 50);
    }

    #[test]
    fn page_size_reads_the_stored_value() {
        let conn = get_test_connection();

        save_preference(PAGE_SIZE_KEY, "25", &conn).unwrap();

        assert_eq!(get_page_size(&conn).unwrap(), 25);
    }
}
