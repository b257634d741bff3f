use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
}

/// Shipping contact captured at checkout. A copy, so later profile edits
/// leave past orders untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BuyerInfo {
    #[validate(length(min = 1, message = "Buyer name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid buyer email"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

/// A priced line item: name, unit price, image and seller are snapshots
/// taken when the order is placed and are never re-resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[validate(length(min = 1, message = "Product reference is required"))]
    pub product: String,
    #[serde(default)]
    pub name: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
    #[validate(length(min = 1, message = "Seller reference is required"))]
    pub seller: String,
}

impl LineItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusChange {
    pub status: OrderStatus,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl StatusChange {
    pub fn new(status: OrderStatus, note: Option<String>) -> Self {
        Self {
            status,
            timestamp: Utc::now(),
            note,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub order_number: String,
    pub buyer: BuyerInfo,
    pub user: String,
    pub items: Vec<LineItem>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub status_history: Vec<StatusChange>,
    #[serde(default)]
    pub delivered_at: Option<mongodb::bson::DateTime>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

pub const ORDER_PLACED_NOTE: &str = "Order placed";

impl Order {
    /// New pending order owned by `user`. The items and `total_amount` are
    /// kept exactly as submitted.
    pub fn place(user: String, buyer: BuyerInfo, items: Vec<LineItem>, total_amount: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            order_number: generate_order_number(now),
            buyer,
            user,
            items,
            total_amount,
            payment_method: PaymentMethod::CashOnDelivery,
            status: OrderStatus::Pending,
            status_history: vec![StatusChange {
                status: OrderStatus::Pending,
                timestamp: now,
                note: Some(ORDER_PLACED_NOTE.to_string()),
            }],
            delivered_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a status transition. Appends to the history and stamps
    /// `delivered_at` only for `Delivered`.
    pub fn apply_status_change(&mut self, change: StatusChange) {
        if change.status == OrderStatus::Delivered {
            self.delivered_at = Some(mongodb::bson::DateTime::from_chrono(change.timestamp));
        }
        self.status = change.status;
        self.updated_at = change.timestamp;
        self.status_history.push(change);
    }

    pub fn has_seller(&self, seller_id: &str) -> bool {
        self.items.iter().any(|item| item.seller == seller_id)
    }
}

/// `ORD-<YYYYMMDD>-<8 hex>`; the suffix comes from a v4 UUID so concurrent
/// checkouts never need a shared counter.
pub fn generate_order_number(at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "ORD-{}-{}",
        at.format("%Y%m%d"),
        suffix[..8].to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer() -> BuyerInfo {
        BuyerInfo {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "12 Lake Road".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            postal_code: "411001".to_string(),
            country: "India".to_string(),
        }
    }

    fn item(seller: &str, quantity: u32, price: f64) -> LineItem {
        LineItem {
            product: "prod-1".to_string(),
            name: "Kettle".to_string(),
            price,
            quantity,
            image: String::new(),
            seller: seller.to_string(),
        }
    }

    #[test]
    fn placed_order_starts_pending_with_one_history_entry() {
        let order = Order::place("buyer-1".into(), buyer(), vec![item("s1", 1, 5.0)], 5.0);

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_method, PaymentMethod::CashOnDelivery);
        assert_eq!(order.status_history.len(), 1);
        assert_eq!(order.status_history[0].status, OrderStatus::Pending);
        assert!(order.delivered_at.is_none());
        assert_eq!(order.created_at, order.updated_at);
    }

    #[test]
    fn total_amount_is_kept_as_submitted() {
        let order = Order::place("buyer-1".into(), buyer(), vec![item("s1", 2, 10.0)], 1.0);
        assert_eq!(order.total_amount, 1.0);
    }

    #[test]
    fn delivered_transition_sets_delivered_at() {
        let mut order = Order::place("buyer-1".into(), buyer(), vec![item("s1", 1, 5.0)], 5.0);
        order.apply_status_change(StatusChange::new(
            OrderStatus::Delivered,
            Some("left at door".into()),
        ));

        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.delivered_at.is_some());
        assert_eq!(order.status_history.len(), 2);
        assert_eq!(
            order.status_history.last().map(|c| c.status),
            Some(OrderStatus::Delivered)
        );
    }

    #[test]
    fn other_transitions_leave_delivered_at_unset() {
        let mut order = Order::place("buyer-1".into(), buyer(), vec![item("s1", 1, 5.0)], 5.0);
        order.apply_status_change(StatusChange::new(OrderStatus::Shipped, None));

        assert_eq!(order.status, OrderStatus::Shipped);
        assert!(order.delivered_at.is_none());
        assert_eq!(order.status_history.len(), 2);
    }

    #[test]
    fn order_number_has_date_and_hex_suffix() {
        let at = DateTime::parse_from_rfc3339("2024-03-05T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let number = generate_order_number(at);

        assert!(number.starts_with("ORD-20240305-"));
        let suffix = number.trim_start_matches("ORD-20240305-");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(number, generate_order_number(at));
    }

    #[test]
    fn status_serializes_with_display_names() {
        let json = serde_json::to_string(&OrderStatus::Delivered).unwrap();
        assert_eq!(json, "\"Delivered\"");
        let method = serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(method, "\"Cash on Delivery\"");
    }

    #[test]
    fn line_item_validation_rejects_zero_quantity() {
        assert!(item("s1", 0, 5.0).validate().is_err());
        assert!(item("s1", 1, 5.0).validate().is_ok());
    }
}
