pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use axum::{
    body::Body,
    http::Request,
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{request_id_from_headers, request_id_middleware},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::{JwtService, OrderService, UserDirectory};

#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
    pub users: Arc<dyn UserDirectory>,
    pub jwt: JwtService,
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(handlers::orders::place_order))
        .route("/orders/my-orders", get(handlers::orders::my_orders))
        .route("/orders/seller/stats", get(handlers::orders::seller_stats))
        .route("/orders/seller/orders", get(handlers::orders::seller_orders))
        .route("/orders/:orderId", get(handlers::orders::get_order))
        .route(
            "/orders/:orderId/status",
            put(handlers::orders::update_order_status),
        )
}

/// Full HTTP surface. Order routes are served both at the root and under
/// `/api`, where the storefront client mounts them.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .merge(order_routes())
        .nest("/api", order_routes())
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    request_id = %request_id_from_headers(request.headers()),
                    method = %request.method(),
                    uri = %request.uri(),
                    user_id = tracing::field::Empty,
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
