//! # Repository Module
//!
//! Database repository implementations for Bookery.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  API handler                                                           │
//! │       │                                                                 │
//! │       │  db.books().search_title("harry")                              │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  BookRepository                                                        │
//! │  ├── list_all(&self)                                                   │
//! │  ├── search_title(&self, term)                                         │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── set_stock(&self, id, stock)                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • The purchase invariant lives in exactly one method                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`book::BookRepository`] - Catalog reads and restocks
//! - [`user::UserRepository`] - Registration and login lookups
//! - [`purchase::PurchaseRepository`] - Atomic purchase and order history

pub mod book;
pub mod purchase;
pub mod user;
