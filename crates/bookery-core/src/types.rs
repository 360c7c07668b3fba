//! # Domain Types
//!
//! Core domain types used throughout Bookery.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │      User       │   │    Purchase     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  title, author  │   │  email (unique) │   │  user_id (FK)   │       │
//! │  │  price_cents    │   │  password_hash  │   │  book_id (FK)   │       │
//! │  │  stock_quantity │   │  first/last name│   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   │  total_price    │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  OrderSummary = Purchase ⋈ Book (read model for the history view)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `Book.stock_quantity >= 0` at all times, even under concurrent purchases.
//! - `Purchase` rows are immutable once written; `total_price_cents` freezes
//!   the price at purchase time and ignores later catalog price changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title shown in the catalog and on order summaries.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Number of unsold copies currently available. Never negative.
    pub stock_quantity: i64,

    /// When the book was created.
    pub created_at: DateTime<Utc>,

    /// When the book was last updated (restock or purchase).
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Total price for a given quantity at the current price.
    #[inline]
    pub fn total_for(&self, quantity: i64) -> Money {
        self.price().multiply_quantity(quantity)
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered customer.
///
/// Created at registration, read at login, never updated or deleted in scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub first_name: String,

    pub last_name: String,

    /// Unique login identifier.
    pub email: String,

    /// Argon2 PHC-format hash. Never the plain password.
    pub password_hash: String,

    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

/// The user fields safe to return over the wire.
///
/// `password_hash` stays server-side; this is what login and registration
/// responses carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for UserRef {
    fn from(user: User) -> Self {
        UserRef {
            user_id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// An immutable record of a completed transaction for one book by one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Purchase {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The buying user.
    pub user_id: String,

    /// The purchased book.
    pub book_id: String,

    /// Copies bought. Always positive.
    pub quantity: i64,

    /// quantity × book price at the moment of purchase (frozen).
    pub total_price_cents: i64,

    /// When the purchase completed.
    pub purchase_date: DateTime<Utc>,
}

impl Purchase {
    /// Returns the recorded total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// One row of a user's order history: a purchase joined with the book's
/// title and author. Read model only, never written directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub purchase_id: String,
    pub book_title: String,
    pub book_author: String,
    pub quantity: i64,
    pub total_price_cents: i64,
    pub purchase_date: DateTime<Utc>,
}

// =============================================================================
// Purchase Receipt
// =============================================================================

/// The result of a successful purchase.
///
/// Carries the post-purchase stock level so clients can reflect the server's
/// authoritative value instead of doing their own optimistic arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub purchase: Purchase,
    /// Stock remaining after the decrement committed.
    pub stock_quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_book(stock: i64, price_cents: i64) -> Book {
        let now = Utc::now();
        Book {
            id: "b-1".to_string(),
            title: "Harry Potter and the Philosopher's Stone".to_string(),
            author: "J. K. Rowling".to_string(),
            price_cents,
            stock_quantity: stock,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_total_for() {
        let book = sample_book(5, 1000);
        assert_eq!(book.total_for(3).cents(), 3000);
    }

    #[test]
    fn test_user_ref_strips_hash() {
        let user = User {
            id: "u-1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        };
        let user_ref = UserRef::from(user);
        let json = serde_json::to_string(&user_ref).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("ada@example.com"));
    }
}
