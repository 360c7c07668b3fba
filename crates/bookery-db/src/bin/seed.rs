//! # Seed Data Generator
//!
//! Populates the database with a starter catalog and a demo account for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p bookery-db --bin seed
//!
//! # Specify database path
//! cargo run -p bookery-db --bin seed -- --db ./data/bookery.db
//! ```
//!
//! Creates a small catalog of well-known titles with realistic prices and
//! stock levels, plus one demo user (`demo@bookery.dev` / `bookshelf1`).

use chrono::Utc;
use std::env;

use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::Argon2;
use bookery_core::{Book, User};
use bookery_db::{generate_book_id, generate_user_id, Database, DbConfig};

/// Starter catalog: (title, author, price_cents, stock)
const CATALOG: &[(&str, &str, i64, i64)] = &[
    ("The Rust Programming Language", "Steve Klabnik", 3999, 25),
    ("Dune", "Frank Herbert", 1099, 40),
    ("Snow Crash", "Neal Stephenson", 999, 15),
    ("The Pragmatic Programmer", "Andrew Hunt", 4499, 12),
    ("Neuromancer", "William Gibson", 899, 30),
    ("A Fire Upon the Deep", "Vernor Vinge", 1299, 8),
    ("The Left Hand of Darkness", "Ursula K. Le Guin", 1199, 20),
    ("Designing Data-Intensive Applications", "Martin Kleppmann", 5499, 10),
    ("Foundation", "Isaac Asimov", 949, 35),
    ("The Dispossessed", "Ursula K. Le Guin", 1149, 18),
    ("Hyperion", "Dan Simmons", 1049, 22),
    ("Project Hail Mary", "Andy Weir", 1599, 5),
];

const DEMO_EMAIL: &str = "demo@bookery.dev";
const DEMO_PASSWORD: &str = "bookshelf1";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bookery_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bookery Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bookery_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bookery Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.books().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} books", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalog...");

    let now = Utc::now();
    let mut seeded = 0;

    for (title, author, price_cents, stock) in CATALOG {
        let book = Book {
            id: generate_book_id(),
            title: title.to_string(),
            author: author.to_string(),
            price_cents: *price_cents,
            stock_quantity: *stock,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.books().insert(&book).await {
            eprintln!("Failed to insert {}: {}", book.title, e);
            continue;
        }
        seeded += 1;
    }

    println!("✓ Seeded {} books", seeded);

    println!();
    println!("Creating demo user...");

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(DEMO_PASSWORD.as_bytes(), &salt)
        .map_err(|e| format!("password hashing failed: {e}"))?
        .to_string();

    let user = User {
        id: generate_user_id(),
        first_name: "Demo".to_string(),
        last_name: "Reader".to_string(),
        email: DEMO_EMAIL.to_string(),
        password_hash,
        created_at: now,
    };
    db.users().insert(&user).await?;

    println!("✓ Demo user: {} / {}", DEMO_EMAIL, DEMO_PASSWORD);

    println!();
    println!("Verifying title search...");
    let results = db.books().search_title("the").await?;
    println!("  Search 'the': {} results", results.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
