mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_my_orders_lists_only_callers_orders_newest_first() {
    let app = TestApp::spawn().await;

    let first = app
        .place_order(
            BUYER_ID,
            json!([line_item(LAMP_ID, "Brass Lamp", 10.0, 1, SELLER_ID)]),
            10.0,
        )
        .await;
    app.place_order(
        OTHER_BUYER_ID,
        json!([line_item(MUG_ID, "Clay Mug", 5.0, 1, SELLER_ID)]),
        5.0,
    )
    .await;
    let second = app
        .place_order(
            BUYER_ID,
            json!([line_item(SCARF_ID, "Silk Scarf", 30.0, 1, OTHER_SELLER_ID)]),
            30.0,
        )
        .await;

    let (status, body) = app.get("/api/orders/my-orders", Some(BUYER_ID)).await;

    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["id"], second);
    assert_eq!(orders[1]["id"], first);
}

#[tokio::test]
async fn test_my_orders_populates_product_and_seller_details() {
    let app = TestApp::spawn().await;

    // Snapshot name and price differ from the current catalog entry
    app.place_order(
        BUYER_ID,
        json!([line_item(LAMP_ID, "Old Lamp Name", 8.0, 1, SELLER_ID)]),
        8.0,
    )
    .await;

    let (status, body) = app.get("/api/orders/my-orders", Some(BUYER_ID)).await;
    assert_eq!(status, StatusCode::OK);

    let item = &body[0]["items"][0];
    assert_eq!(item["name"], "Old Lamp Name");
    assert_eq!(item["price"], 8.0);

    assert_eq!(item["product"]["id"], LAMP_ID);
    assert_eq!(item["product"]["name"], "Brass Lamp");
    assert_eq!(item["product"]["price"], 10.0);
    assert_eq!(item["product"]["category"], "Home");

    assert_eq!(item["seller"]["id"], SELLER_ID);
    assert_eq!(item["seller"]["name"], "Meera");
    assert_eq!(item["seller"]["shopName"], "Meera Crafts");
    assert!(item["seller"].get("email").is_none());
}

#[tokio::test]
async fn test_deleted_product_is_left_as_bare_reference() {
    let app = TestApp::spawn().await;

    app.place_order(
        BUYER_ID,
        json!([line_item(MUG_ID, "Clay Mug", 5.0, 2, SELLER_ID)]),
        10.0,
    )
    .await;
    app.products.remove(MUG_ID).await;

    let (status, body) = app.get("/api/orders/my-orders", Some(BUYER_ID)).await;

    assert_eq!(status, StatusCode::OK);
    let item = &body[0]["items"][0];
    assert_eq!(item["product"], json!({ "id": MUG_ID }));
    assert_eq!(item["name"], "Clay Mug");
}

#[tokio::test]
async fn test_my_orders_is_empty_for_new_buyer() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/orders/my-orders", Some(BUYER_ID)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_seller_orders_returns_whole_orders_containing_sellers_items() {
    let app = TestApp::spawn().await;

    let mixed = app
        .place_order(
            BUYER_ID,
            json!([
                line_item(LAMP_ID, "Brass Lamp", 10.0, 1, SELLER_ID),
                line_item(SCARF_ID, "Silk Scarf", 30.0, 1, OTHER_SELLER_ID)
            ]),
            40.0,
        )
        .await;
    app.place_order(
        OTHER_BUYER_ID,
        json!([line_item(SCARF_ID, "Silk Scarf", 30.0, 2, OTHER_SELLER_ID)]),
        60.0,
    )
    .await;

    let (status, body) = app.get("/api/orders/seller/orders", Some(SELLER_ID)).await;

    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"], mixed);
    // The other seller's line item is still present
    assert_eq!(orders[0]["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_seller_orders_populates_buyer_contact_and_product_price() {
    let app = TestApp::spawn().await;

    app.place_order(
        BUYER_ID,
        json!([line_item(LAMP_ID, "Brass Lamp", 10.0, 1, SELLER_ID)]),
        10.0,
    )
    .await;

    let (status, body) = app.get("/api/orders/seller/orders", Some(SELLER_ID)).await;
    assert_eq!(status, StatusCode::OK);

    let order = &body[0];
    assert_eq!(order["user"]["id"], BUYER_ID);
    assert_eq!(order["user"]["name"], "Asha Buyer");
    assert_eq!(order["user"]["email"], "buyer-1@example.com");

    let item = &order["items"][0];
    assert_eq!(item["product"]["name"], "Brass Lamp");
    assert_eq!(item["product"]["price"], 10.0);
    assert!(item["product"].get("category").is_none());
    assert_eq!(item["seller"], json!({ "id": SELLER_ID }));
}

#[tokio::test]
async fn test_seller_orders_newest_first() {
    let app = TestApp::spawn().await;

    let older = app
        .place_order(
            BUYER_ID,
            json!([line_item(LAMP_ID, "Brass Lamp", 10.0, 1, SELLER_ID)]),
            10.0,
        )
        .await;
    let newer = app
        .place_order(
            OTHER_BUYER_ID,
            json!([line_item(MUG_ID, "Clay Mug", 5.0, 1, SELLER_ID)]),
            5.0,
        )
        .await;

    let (_, body) = app.get("/api/orders/seller/orders", Some(SELLER_ID)).await;

    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![newer.as_str(), older.as_str()]);
}

#[tokio::test]
async fn test_single_order_visible_to_buyer_and_seller_only() {
    let app = TestApp::spawn().await;

    let order_id = app
        .place_order(
            BUYER_ID,
            json!([line_item(LAMP_ID, "Brass Lamp", 10.0, 1, SELLER_ID)]),
            10.0,
        )
        .await;
    let uri = format!("/api/orders/{}", order_id);

    let (status, _) = app.get(&uri, Some(BUYER_ID)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&uri, Some(SELLER_ID)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], order_id);

    let (status, _) = app.get(&uri, Some(OUTSIDER_ID)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/api/orders/no-such-order", Some(BUYER_ID)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found: no-such-order");
}
