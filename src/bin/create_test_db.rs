use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use finance_tracker::{Category, Transaction, TransactionType, create_transaction, initialize_db};

/// A utility for creating a test database for the finance tracker server.
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

    if output_path
        .extension()
        .is_none_or(|extension| extension.is_empty())
    {
        eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample transactions...");

    let samples = [
        Transaction::build(
            "Alice",
            TransactionType::Income,
            "3200.00".parse()?,
            date!(2025 - 03 - 01),
            Category::Salary,
        )
        .description("March salary"),
        Transaction::build(
            "Alice",
            TransactionType::Expense,
            "1450.00".parse()?,
            date!(2025 - 03 - 02),
            Category::Rent,
        ),
        Transaction::build(
            "Bob",
            TransactionType::Expense,
            "45.90".parse()?,
            date!(2025 - 03 - 14),
            Category::Food,
        )
        .description("Groceries"),
        Transaction::build(
            "Bob",
            TransactionType::Income,
            "150.00".parse()?,
            date!(2025 - 03 - 20),
            Category::Gift,
        )
        .description("Birthday money"),
        Transaction::build(
            "Carol",
            TransactionType::Expense,
            "500.00".parse()?,
            date!(2025 - 03 - 28),
            Category::Savings,
        ),
    ];

    for builder in samples {
        create_transaction(builder, &conn)?;
    }

    println!("Success!");

    Ok(())
}
