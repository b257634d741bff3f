//! HTTP handlers for order placement, order history and seller dashboards.
//!
//! Every route requires an authenticated caller (`AuthUser`).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{
        OrderResponse, PlaceOrderRequest, PlaceOrderResponse, UpdateStatusRequest,
        UpdateStatusResponse,
    },
    middleware::AuthUser,
    services::SellerStats,
    utils::ValidatedJson,
    AppState,
};

/// Place a new order from the caller's cart.
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), AppError> {
    let order = state.orders.place_order(&user.id, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            order_number: order.order_number,
            order_id: order.id,
        }),
    ))
}

/// Orders placed by the caller, newest first.
pub async fn my_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = state.orders.buyer_orders(&user.id).await?;
    Ok(Json(orders))
}

/// One order the caller bought or sold into.
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<String>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state.orders.order_for_participant(&order_id, &user.id).await?;
    Ok(Json(order))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, AppError> {
    tracing::info!(
        order_id = %order_id,
        caller = %user.id,
        new_status = %payload.status,
        "Updating order status"
    );

    let order = state
        .orders
        .update_status(&order_id, payload.status, payload.note)
        .await?;

    Ok(Json(UpdateStatusResponse {
        message: "Order status updated successfully".to_string(),
        order: OrderResponse::from(order),
    }))
}

/// Order count and earnings across the caller's line items.
pub async fn seller_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<SellerStats>, AppError> {
    let stats = state.orders.seller_stats(&user.id).await?;
    Ok(Json(stats))
}

/// Orders that contain at least one of the caller's products.
pub async fn seller_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = state.orders.seller_orders(&user.id).await?;
    Ok(Json(orders))
}
