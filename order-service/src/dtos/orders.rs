use crate::models::{
    BuyerInfo, LineItem, Order, OrderStatus, PaymentMethod, ProductRecord, StatusChange,
    UserRecord,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[validate(nested)]
    pub buyer: BuyerInfo,
    #[validate(length(min = 1, message = "Order must contain at least one item"))]
    #[validate(nested)]
    pub items: Vec<LineItem>,
    /// Trusted as submitted; never recomputed from `items`.
    #[validate(range(min = 0.0, message = "Total amount cannot be negative"))]
    pub total_amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order_number: String,
    pub order_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub message: String,
    pub order: OrderResponse,
}

/// A referenced document: always the id, plus the selected summary fields
/// when the reference resolved.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Reference<T> {
    pub id: String,
    #[serde(flatten)]
    pub details: Option<T>,
}

impl<T> Reference<T> {
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            details: None,
        }
    }

    pub fn resolved(id: impl Into<String>, details: Option<T>) -> Self {
        Self {
            id: id.into(),
            details,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ProductSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductSummary {
    /// Name, current price and category, as shown on the buyer's history.
    pub fn listing(record: &ProductRecord) -> Self {
        Self {
            name: Some(record.name.clone()),
            price: Some(record.price),
            category: Some(record.category.clone()),
        }
    }

    /// Name and current price, as shown on the seller's order board.
    pub fn priced(record: &ProductRecord) -> Self {
        Self {
            name: Some(record.name.clone()),
            price: Some(record.price),
            category: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
}

impl UserSummary {
    /// Name and shop name of a seller.
    pub fn storefront(record: &UserRecord) -> Self {
        Self {
            name: Some(record.name.clone()),
            email: None,
            shop_name: record.shop_name.clone(),
        }
    }

    /// Name and email of a buyer account.
    pub fn contact(record: &UserRecord) -> Self {
        Self {
            name: Some(record.name.clone()),
            email: Some(record.email.clone()),
            shop_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub product: Reference<ProductSummary>,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub image: String,
    pub seller: Reference<UserSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusChangeResponse {
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<StatusChange> for StatusChangeResponse {
    fn from(change: StatusChange) -> Self {
        Self {
            status: change.status,
            timestamp: change.timestamp,
            note: change.note,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub order_number: String,
    pub buyer: BuyerInfo,
    pub user: Reference<UserSummary>,
    pub items: Vec<LineItemResponse>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub status_history: Vec<StatusChangeResponse>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderResponse {
    /// Render `order`, resolving each reference through the given lookups.
    /// A lookup returning `None` leaves that reference as a bare id.
    pub fn populate<U, P, S>(order: Order, user: U, product: P, seller: S) -> Self
    where
        U: Fn(&str) -> Option<UserSummary>,
        P: Fn(&str) -> Option<ProductSummary>,
        S: Fn(&str) -> Option<UserSummary>,
    {
        let items = order
            .items
            .into_iter()
            .map(|item| LineItemResponse {
                product: Reference::resolved(item.product.clone(), product(&item.product)),
                seller: Reference::resolved(item.seller.clone(), seller(&item.seller)),
                name: item.name,
                price: item.price,
                quantity: item.quantity,
                image: item.image,
            })
            .collect();

        Self {
            user: Reference::resolved(order.user.clone(), user(&order.user)),
            id: order.id,
            order_number: order.order_number,
            buyer: order.buyer,
            items,
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            status: order.status,
            status_history: order
                .status_history
                .into_iter()
                .map(StatusChangeResponse::from)
                .collect(),
            delivered_at: order.delivered_at.map(|at| at.to_chrono()),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self::populate(order, |_| None, |_| None, |_| None)
    }
}
