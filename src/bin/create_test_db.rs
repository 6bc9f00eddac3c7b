use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::OffsetDateTime;

use fiscus::initialize_db;

/// A utility for creating a test database for the fiscus server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test budgets...");

    let today = OffsetDateTime::now_utc().date();
    let month_start = today.replace_day(1)?;
    let last_day = time::util::days_in_year_month(month_start.year(), month_start.month());
    let month_end = month_start.replace_day(last_day)?;

    for (name, budgeted, spent) in [
        ("Groceries", 400.0, 181.55),
        ("Rent", 1800.0, 1800.0),
        ("Utilities", 150.0, 96.2),
        ("Eating Out", 120.0, 74.0),
    ] {
        conn.execute(
            "INSERT INTO budget (name, active) VALUES (?1, 1)",
            (name,),
        )?;
        let budget_id = conn.last_insert_rowid();

        conn.execute(
            "INSERT INTO budget_allocation (budget_id, amount, start_date, end_date)
                VALUES (?1, ?2, ?3, ?4)",
            (budget_id, budgeted, month_start, month_end),
        )?;
        conn.execute(
            "INSERT INTO expense (budget_id, amount, date, description)
                VALUES (?1, ?2, ?3, 'seeded expense')",
            (budget_id, spent, today),
        )?;
    }

    conn.execute("INSERT INTO budget (name, active) VALUES ('Old Hobby', 0)", [])?;

    conn.execute(
        "INSERT INTO available_amount (amount, start_date, end_date) VALUES (?1, ?2, ?3)",
        (2500.0, month_start, month_end),
    )?;

    println!("Success!");

    Ok(())
}
