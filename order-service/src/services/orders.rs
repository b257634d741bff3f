//! Order placement, retrieval and seller statistics.

use crate::dtos::{OrderResponse, PlaceOrderRequest, ProductSummary, UserSummary};
use crate::error::OrderError;
use crate::models::{Order, OrderStatus, StatusChange};
use crate::services::directory::{ProductCatalog, UserDirectory};
use crate::services::metrics;
use crate::services::stats::{seller_stats, SellerStats};
use crate::services::store::OrderStore;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    products: Arc<dyn ProductCatalog>,
    users: Arc<dyn UserDirectory>,
}

impl OrderService {
    pub fn new(
        store: Arc<dyn OrderStore>,
        products: Arc<dyn ProductCatalog>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            store,
            products,
            users,
        }
    }

    pub fn store(&self) -> &Arc<dyn OrderStore> {
        &self.store
    }

    /// Persist a new pending order for `user_id`.
    ///
    /// Line items and `total_amount` are stored exactly as submitted: prices
    /// and names are not checked against the catalog and the total is not
    /// recomputed.
    pub async fn place_order(
        &self,
        user_id: &str,
        request: PlaceOrderRequest,
    ) -> Result<Order, OrderError> {
        if request.items.is_empty() {
            return Err(OrderError::ValidationMissing(
                "Order must contain at least one item".to_string(),
            ));
        }

        let order = Order::place(
            user_id.to_string(),
            request.buyer,
            request.items,
            request.total_amount,
        );

        self.store.insert(&order).await.map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Failed to create order");
            e
        })?;

        metrics::record_order_placed(order.items.len(), order.total_amount);
        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            user_id = %user_id,
            items = order.items.len(),
            total_amount = order.total_amount,
            "Order placed"
        );

        Ok(order)
    }

    /// The buyer's own orders, newest first, with products resolved to
    /// name/price/category and sellers to name/shop name.
    pub async fn buyer_orders(&self, user_id: &str) -> Result<Vec<OrderResponse>, OrderError> {
        let orders = self.store.find_by_user(user_id).await?;
        tracing::debug!(user_id = %user_id, count = orders.len(), "Fetched buyer orders");
        self.populate_for_buyer(orders).await
    }

    /// Orders holding at least one of the seller's line items, newest first.
    /// Whole orders are returned, including other sellers' items.
    pub async fn seller_orders(&self, seller_id: &str) -> Result<Vec<OrderResponse>, OrderError> {
        let orders = self.store.find_by_seller(seller_id).await?;
        tracing::info!(seller_id = %seller_id, count = orders.len(), "Fetched seller orders");

        let product_ids = distinct(orders.iter().flat_map(|o| o.items.iter().map(|i| &i.product)));
        let user_ids = distinct(orders.iter().map(|o| &o.user));

        let products = self.products.find_products(&product_ids).await?;
        let users = self.users.find_users(&user_ids).await?;

        Ok(orders
            .into_iter()
            .map(|order| {
                OrderResponse::populate(
                    order,
                    |id| users.get(id).map(UserSummary::contact),
                    |id| products.get(id).map(ProductSummary::priced),
                    |_| None,
                )
            })
            .collect())
    }

    /// A single order, visible to its buyer and to any seller with an item
    /// in it. Anyone else gets not-found.
    pub async fn order_for_participant(
        &self,
        order_id: &str,
        caller_id: &str,
    ) -> Result<OrderResponse, OrderError> {
        let order = self
            .store
            .find_by_id(order_id)
            .await?
            .filter(|order| order.user == caller_id || order.has_seller(caller_id))
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        self.populate_for_buyer(vec![order])
            .await?
            .pop()
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }

    /// Record a status transition. Any authenticated caller may do this.
    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
        note: Option<String>,
    ) -> Result<Order, OrderError> {
        let change = StatusChange::new(status, note);

        let order = self
            .store
            .apply_status_change(order_id, change)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        metrics::record_status_update(status);
        tracing::info!(order_id = %order_id, status = %status, "Order status updated");

        Ok(order)
    }

    pub async fn seller_stats(&self, seller_id: &str) -> Result<SellerStats, OrderError> {
        let orders = self.store.find_by_seller(seller_id).await?;
        let stats = seller_stats(&orders, seller_id);

        metrics::record_seller_stats_request();
        tracing::info!(
            seller_id = %seller_id,
            total_orders = stats.total_orders,
            total_earnings = stats.total_earnings,
            "Computed seller stats"
        );

        Ok(stats)
    }

    async fn populate_for_buyer(
        &self,
        orders: Vec<Order>,
    ) -> Result<Vec<OrderResponse>, OrderError> {
        let product_ids = distinct(orders.iter().flat_map(|o| o.items.iter().map(|i| &i.product)));
        let seller_ids = distinct(orders.iter().flat_map(|o| o.items.iter().map(|i| &i.seller)));

        let products = self.products.find_products(&product_ids).await?;
        let sellers = self.users.find_users(&seller_ids).await?;

        Ok(orders
            .into_iter()
            .map(|order| {
                OrderResponse::populate(
                    order,
                    |_| None,
                    |id| products.get(id).map(ProductSummary::listing),
                    |id| sellers.get(id).map(UserSummary::storefront),
                )
            })
            .collect())
    }
}

fn distinct<'a>(ids: impl Iterator<Item = &'a String>) -> Vec<String> {
    ids.cloned().collect::<BTreeSet<_>>().into_iter().collect()
}
