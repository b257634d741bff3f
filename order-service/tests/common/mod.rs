#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use order_service::{
    build_router,
    models::{ProductRecord, UserRecord},
    services::{
        InMemoryOrderStore, InMemoryProductCatalog, InMemoryUserDirectory, JwtService,
        OrderService,
    },
    AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_JWT_SECRET: &str = "order-service-test-secret";

pub const BUYER_ID: &str = "buyer-1";
pub const OTHER_BUYER_ID: &str = "buyer-2";
pub const SELLER_ID: &str = "seller-1";
pub const OTHER_SELLER_ID: &str = "seller-2";
pub const OUTSIDER_ID: &str = "outsider-1";

pub const LAMP_ID: &str = "product-lamp";
pub const MUG_ID: &str = "product-mug";
pub const SCARF_ID: &str = "product-scarf";

/// Router wired to in-memory collaborators, seeded with two buyers, two
/// sellers, an unrelated account and three products.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryOrderStore>,
    pub products: Arc<InMemoryProductCatalog>,
    pub users: Arc<InMemoryUserDirectory>,
    pub jwt: JwtService,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let store = Arc::new(InMemoryOrderStore::new());
        let products = Arc::new(InMemoryProductCatalog::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let jwt = JwtService::new(TEST_JWT_SECRET);

        for (id, name, shop_name) in [
            (BUYER_ID, "Asha Buyer", None),
            (OTHER_BUYER_ID, "Ravi Buyer", None),
            (SELLER_ID, "Meera", Some("Meera Crafts")),
            (OTHER_SELLER_ID, "Kabir", Some("Kabir Textiles")),
            (OUTSIDER_ID, "Nobody", None),
        ] {
            users
                .insert(UserRecord {
                    id: id.to_string(),
                    name: name.to_string(),
                    email: format!("{}@example.com", id),
                    shop_name: shop_name.map(str::to_string),
                })
                .await;
        }

        for (id, name, price, category) in [
            (LAMP_ID, "Brass Lamp", 10.0, "Home"),
            (MUG_ID, "Clay Mug", 5.0, "Kitchen"),
            (SCARF_ID, "Silk Scarf", 30.0, "Apparel"),
        ] {
            products
                .insert(ProductRecord {
                    id: id.to_string(),
                    name: name.to_string(),
                    price,
                    category: category.to_string(),
                })
                .await;
        }

        let orders = OrderService::new(store.clone(), products.clone(), users.clone());
        let state = AppState {
            orders,
            users: users.clone(),
            jwt: jwt.clone(),
        };

        TestApp {
            router: build_router(state),
            store,
            products,
            users,
            jwt,
        }
    }

    pub fn token_for(&self, user_id: &str) -> String {
        self.jwt
            .issue_token(user_id, chrono::Duration::hours(1))
            .expect("Failed to issue test token")
    }

    pub async fn get(&self, uri: &str, user_id: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(user_id) = user_id {
            builder = builder.header("Authorization", format!("Bearer {}", self.token_for(user_id)));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        user_id: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(user_id) = user_id {
            builder = builder.header("Authorization", format!("Bearer {}", self.token_for(user_id)));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Place an order as `buyer_id` and return its id.
    pub async fn place_order(&self, buyer_id: &str, items: Value, total_amount: f64) -> String {
        let (status, body) = self
            .send_json(
                "POST",
                "/api/orders",
                Some(buyer_id),
                &order_payload(items, total_amount),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected response: {}", body);
        body["orderId"]
            .as_str()
            .expect("orderId missing")
            .to_string()
    }
}

pub fn line_item(product: &str, name: &str, price: f64, quantity: u32, seller: &str) -> Value {
    json!({
        "product": product,
        "name": name,
        "price": price,
        "quantity": quantity,
        "image": format!("/images/{}.jpg", product),
        "seller": seller,
    })
}

pub fn order_payload(items: Value, total_amount: f64) -> Value {
    json!({
        "buyer": {
            "name": "Asha Buyer",
            "email": "asha@example.com",
            "phone": "+91 98765 43210",
            "address": "12 Lake Road",
            "city": "Pune",
            "state": "MH",
            "postalCode": "411001",
            "country": "India"
        },
        "items": items,
        "totalAmount": total_amount,
    })
}
