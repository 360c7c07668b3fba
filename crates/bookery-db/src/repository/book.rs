//! # Book Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - Catalog listing and title substring search
//! - Single-book lookup for the detail view
//! - Absolute restock (admin path; NOT the purchase path)
//!
//! ## Title Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Title Search Works                               │
//! │                                                                         │
//! │  User types: "harry"                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LOWER(title) LIKE '%' || LOWER('harry') || '%'                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ books                                   │                           │
//! │  │                                         │                           │
//! │  │ Harry Potter and the ... │ Rowling     │ ← MATCH!                  │
//! │  │ HARRY'S TRees            │ Wilson      │ ← MATCH!                  │
//! │  │ Dune                     │ Herbert     │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │                                                                         │
//! │  Exact case-insensitive containment only - no ranking, no pagination   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use bookery_core::Book;

/// Every book query selects the same column set so `FromRow` always sees
/// the full `Book` shape.
const BOOK_COLUMNS: &str =
    "id, title, author, price_cents, stock_quantity, created_at, updated_at";

/// Repository for catalog database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BookRepository::new(pool);
///
/// // Full catalog
/// let books = repo.list_all().await?;
///
/// // Substring search
/// let results = repo.search_title("harry").await?;
/// ```
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Lists the full catalog, sorted by title.
    pub async fn list_all(&self) -> DbResult<Vec<Book>> {
        let books: Vec<Book> = sqlx::query_as(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY title"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = books.len(), "Listed catalog");
        Ok(books)
    }

    /// Searches books whose title contains the term, case-insensitively.
    ///
    /// ## Semantics
    /// Exact substring containment only. An empty term returns the full
    /// catalog, matching `LIKE '%%'`.
    ///
    /// ## Arguments
    /// * `term` - Search term (already trimmed/validated by the caller)
    pub async fn search_title(&self, term: &str) -> DbResult<Vec<Book>> {
        debug!(term = %term, "Searching books by title");

        // LIKE treats % and _ as wildcards; escape them so a literal search
        // for "100%" doesn't match everything.
        let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");

        let books: Vec<Book> = sqlx::query_as(&format!(
            r#"
            SELECT {BOOK_COLUMNS}
            FROM books
            WHERE LOWER(title) LIKE '%' || LOWER(?1) || '%' ESCAPE '\'
            ORDER BY title
            "#
        ))
        .bind(escaped)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = books.len(), "Search returned books");
        Ok(books)
    }

    /// Gets a book by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Book))` - Book found
    /// * `Ok(None)` - Book not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Book>> {
        let book: Option<Book> = sqlx::query_as(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Inserts a new book.
    ///
    /// ## Arguments
    /// * `book` - Book to insert (id should be generated beforehand)
    pub async fn insert(&self, book: &Book) -> DbResult<Book> {
        debug!(id = %book.id, title = %book.title, "Inserting book");

        sqlx::query(
            r#"
            INSERT INTO books (
                id, title, author, price_cents, stock_quantity,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.price_cents)
        .bind(book.stock_quantity)
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(book.clone())
    }

    /// Sets a book's stock to an absolute level (restock).
    ///
    /// ## Not The Purchase Path
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  Restock vs Purchase                                                │
    /// │                                                                     │
    /// │  ❌ WRONG (the original client): compute stock client-side,        │
    /// │     then PUT the absolute value - two concurrent buyers race        │
    /// │     and oversell.                                                   │
    /// │                                                                     │
    /// │  ✅ set_stock is for the admin/restock flow only, where the        │
    /// │     caller IS the authority on the new level.                       │
    /// │     Purchases go through PurchaseRepository::purchase, which        │
    /// │     decrements conditionally inside a transaction.                  │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Arguments
    /// * `id` - Book ID
    /// * `stock_quantity` - New absolute stock level (>= 0, caller-validated)
    ///
    /// ## Returns
    /// The updated book.
    pub async fn set_stock(&self, id: &str, stock_quantity: i64) -> DbResult<Book> {
        debug!(id = %id, stock_quantity = %stock_quantity, "Setting stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE books
            SET stock_quantity = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(stock_quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Book", id))
    }

    /// Counts total books (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new book ID.
pub fn generate_book_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_book(title: &str, author: &str, price_cents: i64, stock: i64) -> Book {
        let now = Utc::now();
        Book {
            id: generate_book_id(),
            title: title.to_string(),
            author: author.to_string(),
            price_cents,
            stock_quantity: stock,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let book = sample_book("Dune", "Frank Herbert", 1299, 10);

        db.books().insert(&book).await.unwrap();

        let found = db.books().get_by_id(&book.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Dune");
        assert_eq!(found.price_cents, 1299);
        assert_eq!(found.stock_quantity, 10);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        let found = db.books().get_by_id("no-such-id").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_all_sorted_by_title() {
        let db = test_db().await;
        db.books()
            .insert(&sample_book("Snow Crash", "Neal Stephenson", 999, 3))
            .await
            .unwrap();
        db.books()
            .insert(&sample_book("Dune", "Frank Herbert", 1299, 10))
            .await
            .unwrap();

        let books = db.books().list_all().await.unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[1].title, "Snow Crash");
    }

    #[tokio::test]
    async fn test_title_search_case_insensitive_substring() {
        let db = test_db().await;
        db.books()
            .insert(&sample_book(
                "Harry Potter and the Philosopher's Stone",
                "J. K. Rowling",
                899,
                5,
            ))
            .await
            .unwrap();
        db.books()
            .insert(&sample_book("HARRY'S TREES", "Jon Cohen", 799, 2))
            .await
            .unwrap();
        db.books()
            .insert(&sample_book("Dune", "Frank Herbert", 1299, 10))
            .await
            .unwrap();

        let results = db.books().search_title("harry").await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|b| b.title.to_lowercase().contains("harry")));

        let none = db.books().search_title("tolkien").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_title_search_escapes_like_wildcards() {
        let db = test_db().await;
        db.books()
            .insert(&sample_book("100% Wolf", "Jayne Lyons", 699, 1))
            .await
            .unwrap();
        db.books()
            .insert(&sample_book("Dune", "Frank Herbert", 1299, 10))
            .await
            .unwrap();

        // A literal "%" must not act as a match-everything wildcard
        let results = db.books().search_title("100%").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "100% Wolf");
    }

    #[tokio::test]
    async fn test_set_stock() {
        let db = test_db().await;
        let book = sample_book("Dune", "Frank Herbert", 1299, 10);
        db.books().insert(&book).await.unwrap();

        let updated = db.books().set_stock(&book.id, 42).await.unwrap();
        assert_eq!(updated.stock_quantity, 42);

        let err = db.books().set_stock("no-such-id", 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
