//! # Bookery Database Layer
//!
//! SQLite persistence for the Bookery backend, built on sqlx.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      bookery-db                             │
//! │                                                             │
//! │  ┌───────────┐   ┌─────────────┐   ┌───────────────────┐   │
//! │  │   pool    │──▶│ migrations  │   │    repository     │   │
//! │  │ (SQLite + │   │ (embedded,  │   │  book / user /    │   │
//! │  │  WAL)     │   │  versioned) │   │  purchase         │   │
//! │  └───────────┘   └─────────────┘   └───────────────────┘   │
//! │        │                                    │               │
//! │        └──────────────┬─────────────────────┘               │
//! │                       ▼                                     │
//! │                  bookery-core                               │
//! │            (domain types, no I/O)                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All repositories hand out owned clones of the connection pool, so the
//! [`Database`] handle is cheap to clone and share across tasks.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::book::{generate_book_id, BookRepository};
pub use repository::purchase::PurchaseRepository;
pub use repository::user::{generate_user_id, UserRepository};
