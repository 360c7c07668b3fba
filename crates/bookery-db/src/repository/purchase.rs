//! # Purchase Repository
//!
//! The atomic purchase operation and the order-history read model.
//!
//! ## Purchase Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Atomic Purchase                                      │
//! │                                                                         │
//! │  purchase(book_id, user_id, qty)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN TRANSACTION                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UPDATE books SET stock_quantity = stock_quantity - qty                │
//! │  WHERE id = ? AND stock_quantity >= qty     ← check + decrement in     │
//! │       │                                       ONE statement            │
//! │       ├── 0 rows: book missing?  → NotFound, ROLLBACK                  │
//! │       │           book present?  → InsufficientStock, ROLLBACK         │
//! │       ▼                                                                 │
//! │  SELECT book (post-decrement) → total = price_cents × qty              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT INTO purchases (...)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT  ← decrement and order row land together or not at all         │
//! │                                                                         │
//! │  Two concurrent purchases whose quantities sum past available stock:   │
//! │  the conditional UPDATE serializes on the row, so at most one commits. │
//! │  No lost updates, no overselling, stock_quantity never goes negative.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use bookery_core::{Book, OrderSummary, Purchase, PurchaseReceipt};

const PURCHASE_COLUMNS: &str =
    "id, user_id, book_id, quantity, total_price_cents, purchase_date";

/// Repository for purchase database operations.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: SqlitePool,
}

impl PurchaseRepository {
    /// Creates a new PurchaseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseRepository { pool }
    }

    /// Atomically purchases `quantity` copies of a book for a user.
    ///
    /// The stock check, decrement, and order insertion are a single
    /// transaction. The request is fulfilled whole or rejected whole -
    /// never clamped, never partially fulfilled.
    ///
    /// ## Arguments
    /// * `book_id` - Must reference an existing book
    /// * `user_id` - Must reference an existing user
    /// * `quantity` - Positive number of copies
    ///
    /// ## Returns
    /// The created purchase plus the post-purchase stock level, so callers
    /// can show the server's authoritative count.
    ///
    /// ## Errors
    /// * `DbError::InvalidQuantity` - quantity <= 0
    /// * `DbError::NotFound` - unknown book or user
    /// * `DbError::InsufficientStock` - quantity exceeds available stock
    pub async fn purchase(
        &self,
        book_id: &str,
        user_id: &str,
        quantity: i64,
    ) -> DbResult<PurchaseReceipt> {
        // A non-positive quantity would pass `stock_quantity >= ?` and
        // increase stock; reject before touching the database.
        if quantity <= 0 {
            return Err(DbError::InvalidQuantity {
                requested: quantity,
            });
        }

        debug!(book_id = %book_id, user_id = %user_id, quantity = %quantity, "Starting purchase");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Conditional decrement: the availability check and the decrement
        // are one statement, so no interleaving can oversell.
        let result = sqlx::query(
            r#"
            UPDATE books
            SET stock_quantity = stock_quantity - ?2, updated_at = ?3
            WHERE id = ?1 AND stock_quantity >= ?2
            "#,
        )
        .bind(book_id)
        .bind(quantity)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Distinguish "no such book" from "not enough stock".
            // The transaction rolls back on drop either way.
            let book: Option<Book> = sqlx::query_as(
                "SELECT id, title, author, price_cents, stock_quantity, created_at, updated_at \
                 FROM books WHERE id = ?1",
            )
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?;

            return match book {
                None => Err(DbError::not_found("Book", book_id)),
                Some(b) => Err(DbError::InsufficientStock {
                    title: b.title,
                    available: b.stock_quantity,
                    requested: quantity,
                }),
            };
        }

        // The FK on purchases.user_id would also catch this, but checking
        // here yields a clean NotFound instead of a constraint message.
        let user_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
        if user_exists == 0 {
            return Err(DbError::not_found("User", user_id));
        }

        // Re-read inside the transaction: price for the frozen total,
        // stock_quantity for the post-decrement receipt value.
        let book: Book = sqlx::query_as(
            "SELECT id, title, author, price_cents, stock_quantity, created_at, updated_at \
             FROM books WHERE id = ?1",
        )
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        let total = book.total_for(quantity);

        let purchase = Purchase {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            quantity,
            total_price_cents: total.cents(),
            purchase_date: now,
        };

        sqlx::query(
            r#"
            INSERT INTO purchases (
                id, user_id, book_id, quantity, total_price_cents, purchase_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&purchase.id)
        .bind(&purchase.user_id)
        .bind(&purchase.book_id)
        .bind(purchase.quantity)
        .bind(purchase.total_price_cents)
        .bind(purchase.purchase_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            purchase_id = %purchase.id,
            book_id = %book_id,
            quantity = %quantity,
            total = %total,
            stock_remaining = %book.stock_quantity,
            "Purchase completed"
        );

        Ok(PurchaseReceipt {
            purchase,
            stock_quantity: book.stock_quantity,
        })
    }

    /// Gets a purchase by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Purchase>> {
        let purchase: Option<Purchase> = sqlx::query_as(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(purchase)
    }

    /// Lists a user's order history, newest first.
    ///
    /// Each row joins the purchase with the book's title and author. A user
    /// with no purchases gets an empty list, not an error.
    pub async fn orders_for_user(&self, user_id: &str) -> DbResult<Vec<OrderSummary>> {
        let orders: Vec<OrderSummary> = sqlx::query_as(
            r#"
            SELECT
                p.id AS purchase_id,
                b.title AS book_title,
                b.author AS book_author,
                p.quantity,
                p.total_price_cents,
                p.purchase_date
            FROM purchases p
            INNER JOIN books b ON b.id = p.book_id
            WHERE p.user_id = ?1
            ORDER BY p.purchase_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(user_id = %user_id, count = orders.len(), "Listed orders");
        Ok(orders)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
