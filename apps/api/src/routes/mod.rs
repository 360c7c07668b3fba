//! # HTTP Routes
//!
//! ## Route Map
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  POST /user/login                 authenticate               │
//! │  POST /user/register              create account             │
//! │  GET  /book/all                   full catalog               │
//! │  GET  /book/title?title=...       title substring search     │
//! │  GET  /book/{id}                  single book                │
//! │  PUT  /book/{id}                  restock (absolute)         │
//! │  POST /purchase                   atomic purchase            │
//! │  GET  /purchase/orders/{user_id}  order history              │
//! │  GET  /health                     liveness + db ping         │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod book;
pub mod purchase;
pub mod user;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::envelope::Envelope;
use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/user/login", post(user::login))
        .route("/user/register", post(user::register))
        .route("/book/all", get(book::all_books))
        .route("/book/title", get(book::search_by_title))
        .route("/book/{id}", get(book::get_book).put(book::restock))
        .route("/purchase", post(purchase::create_purchase))
        .route("/purchase/orders/{user_id}", get(purchase::list_orders))
        .with_state(state)
}

/// Liveness check that also pings the database.
async fn health(State(state): State<AppState>) -> ApiResult<Json<Envelope<Value>>> {
    if !state.db.health_check().await {
        return Err(ApiError::internal("database ping failed"));
    }

    Ok(Json(Envelope::success("OK", json!({ "database": "up" }))))
}
