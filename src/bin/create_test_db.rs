use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use budget_tracker::{Transaction, TransactionType, create_transaction, initialize_db};

/// A utility for creating a test database for the budget tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many days of sample transactions to create, ending today.
    #[arg(long, short, default_value_t = 31)]
    days: u16,
}

const SAMPLE_EXPENSES: [(&str, &str, f64); 5] = [
    ("Groceries", "Weekly shop", 84.20),
    ("Restaurant", "Lunch", 12.50),
    ("Gas", "Fuel", 55.00),
    ("Subscriptions", "Streaming", 15.99),
    ("Internet Bill", "Fibre", 79.00),
];

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

    println!("Creating sample transactions...");

    let today = OffsetDateTime::now_utc().date();
    let mut count = 0;

    for day in 0..args.days {
        let date = today - Duration::days(day.into());

        if date.day() == 1 || date.day() == 15 {
            create_transaction(
                Transaction::build(TransactionType::Income, 2500.0, date)
                    .category("Salary")
                    .description("Pay"),
                &conn,
            )?;
            count += 1;
        }

        let (category, description, amount) =
            SAMPLE_EXPENSES[usize::from(day) % SAMPLE_EXPENSES.len()];
        create_transaction(
            Transaction::build(TransactionType::Expense, amount, date)
                .category(category)
                .description(description),
            &conn,
        )?;
        count += 1;
    }

    println!("Created {count} transactions.");
    println!("Success!");

    Ok(())
}
