//! Purchase handlers: the atomic buy operation and order history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use bookery_core::validation::validate_quantity;
use bookery_core::{OrderSummary, PurchaseReceipt};

use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub user_id: String,
    pub book_id: String,
    pub quantity: i64,
}

/// `POST /purchase`
///
/// Stock check, decrement, and order creation happen in one database
/// transaction; the response carries the server's post-purchase stock
/// count so clients display the authoritative number.
pub async fn create_purchase(
    State(state): State<AppState>,
    Json(req): Json<PurchaseRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<PurchaseReceipt>>)> {
    validate_quantity(req.quantity)?;

    let receipt = state
        .db
        .purchases()
        .purchase(&req.book_id, &req.user_id, req.quantity)
        .await?;

    info!(
        purchase_id = %receipt.purchase.id,
        user_id = %req.user_id,
        "Purchase created"
    );

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success("Purchase successful", receipt)),
    ))
}

/// `GET /purchase/orders/{user_id}`
///
/// Newest first. A user with no purchases gets an empty list.
pub async fn list_orders(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Envelope<Vec<OrderSummary>>>> {
    let orders = state.db.purchases().orders_for_user(&user_id).await?;
    Ok(Json(Envelope::success("Orders retrieved", orders)))
}
