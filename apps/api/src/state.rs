//! Shared application state.

use bookery_db::Database;

/// State handed to every request handler.
///
/// [`Database`] wraps a connection pool, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
