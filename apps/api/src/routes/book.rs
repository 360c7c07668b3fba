//! Catalog handlers: listing, search, detail, and restock.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use bookery_core::validation::{validate_search_term, validate_stock_quantity};
use bookery_core::Book;

use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub stock_quantity: i64,
}

/// `GET /book/all`
pub async fn all_books(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<Vec<Book>>>> {
    let books = state.db.books().list_all().await?;
    Ok(Json(Envelope::success("Books retrieved", books)))
}

/// `GET /book/title?title=...`
///
/// Case-insensitive substring match. `%` and `_` in the term match
/// literally. An empty (or all-whitespace) term returns the full catalog.
pub async fn search_by_title(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> ApiResult<Json<Envelope<Vec<Book>>>> {
    let term = validate_search_term(&query.title)?;
    let books = state.db.books().search_title(&term).await?;
    Ok(Json(Envelope::success("Books retrieved", books)))
}

/// `GET /book/{id}`
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Book>>> {
    let book = state
        .db
        .books()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| bookery_db::DbError::not_found("Book", &id))?;

    Ok(Json(Envelope::success("Book retrieved", book)))
}

/// `PUT /book/{id}`
///
/// Sets the stock level to an absolute value (restocking). Purchase-driven
/// decrements never go through here; they happen atomically in
/// `POST /purchase`.
pub async fn restock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RestockRequest>,
) -> ApiResult<Json<Envelope<Book>>> {
    validate_stock_quantity(req.stock_quantity)?;

    let book = state.db.books().set_stock(&id, req.stock_quantity).await?;

    info!(book_id = %id, stock = %req.stock_quantity, "Book restocked");
    Ok(Json(Envelope::success("Book updated", book)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use bookery_db::{generate_book_id, Database, DbConfig};
    use chrono::Utc;

    async fn test_state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::new(db)
    }

    async fn seed_book(state: &AppState, title: &str, stock: i64) -> Book {
        let now = Utc::now();
        let book = Book {
            id: generate_book_id(),
            title: title.to_string(),
            author: "Test Author".to_string(),
            price_cents: 1000,
            stock_quantity: stock,
            created_at: now,
            updated_at: now,
        };
        state.db.books().insert(&book).await.unwrap();
        book
    }

    #[tokio::test]
    async fn test_all_books_sorted_by_title() {
        let state = test_state().await;
        seed_book(&state, "Zen", 1).await;
        seed_book(&state, "Abacus", 1).await;

        let Json(env) = all_books(State(state)).await.unwrap();
        let books = env.data.unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Abacus");
        assert_eq!(books[1].title, "Zen");
    }

    #[tokio::test]
    async fn test_search_by_title() {
        let state = test_state().await;
        seed_book(&state, "Harry Potter", 1).await;
        seed_book(&state, "Dune", 1).await;

        let Json(env) = search_by_title(
            State(state.clone()),
            Query(TitleQuery {
                title: "harry".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(env.data.unwrap().len(), 1);

        // No matches is a success with an empty list
        let Json(env) = search_by_title(
            State(state.clone()),
            Query(TitleQuery {
                title: "nothing".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(env.status, "success");
        assert!(env.data.unwrap().is_empty());

        // Whitespace-only term trims to empty and returns the full catalog
        let Json(env) = search_by_title(
            State(state.clone()),
            Query(TitleQuery {
                title: "   ".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(env.data.unwrap().len(), 2);

        // Oversized term is rejected
        let err = search_by_title(
            State(state),
            Query(TitleQuery {
                title: "x".repeat(200),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_get_book() {
        let state = test_state().await;
        let book = seed_book(&state, "Dune", 5).await;

        let Json(env) = get_book(State(state.clone()), Path(book.id.clone()))
            .await
            .unwrap();
        assert_eq!(env.data.unwrap().title, "Dune");

        let err = get_book(State(state), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_restock() {
        let state = test_state().await;
        let book = seed_book(&state, "Dune", 2).await;

        let Json(env) = restock(
            State(state.clone()),
            Path(book.id.clone()),
            Json(RestockRequest { stock_quantity: 50 }),
        )
        .await
        .unwrap();
        assert_eq!(env.data.unwrap().stock_quantity, 50);

        let err = restock(
            State(state),
            Path(book.id),
            Json(RestockRequest {
                stock_quantity: -1,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
