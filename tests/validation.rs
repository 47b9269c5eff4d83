use axum::extract::{Path, Query, State};
use axum::Json;
use mongodb::Client;
use mongodb::bson::{Bson, DateTime, doc, oid::ObjectId, to_bson, to_document};
use serde_json::json;

use myshop_api::{
    db::Store,
    dto::{bson_to_json, invoices::InvoiceResponse, reviews::coerce_rating},
    error::AppError,
    models::{CartItem, Invoice},
    response::UpdateOutcome,
    routes::params::EmailQuery,
    routes::{cart, invoices, orders, products, reviews, users},
};

// Validation rejects before any store call, so these run against a client
// that never connects.
async fn offline_store() -> Store {
    let client = Client::with_uri_str("mongodb://127.0.0.1:27017")
        .await
        .expect("parse client uri");
    Store::new(&client.database("myShop-validation"))
}

fn bad_request(result: Result<impl std::fmt::Debug, AppError>) -> String {
    match result {
        Err(AppError::BadRequest(message)) => message,
        other => panic!("expected a 400 rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn user_creation_requires_email() {
    let store = offline_store().await;

    let payload = serde_json::from_value(json!({ "name": "Asha" })).unwrap();
    let message = bad_request(users::create_user(State(store.clone()), Json(payload)).await);
    assert_eq!(message, "Email is required");

    // An empty string counts as missing.
    let payload = serde_json::from_value(json!({ "email": "" })).unwrap();
    let message = bad_request(users::create_user(State(store), Json(payload)).await);
    assert_eq!(message, "Email is required");
}

#[tokio::test]
async fn product_creation_requires_core_fields() {
    let store = offline_store().await;

    let payload = doc! { "itemName": "Desk", "images": ["desk.jpg"] };
    let message = bad_request(products::create_product(State(store.clone()), Json(payload)).await);
    assert_eq!(message, "Missing required fields");

    // Zero is treated as missing, matching the truthiness rule.
    let payload = doc! { "itemName": "Desk", "images": ["desk.jpg"], "sellPrice": 0 };
    let message = bad_request(products::create_product(State(store), Json(payload)).await);
    assert_eq!(message, "Missing required fields");
}

#[tokio::test]
async fn product_delete_rejects_malformed_id() {
    let store = offline_store().await;

    let result = products::delete_product(State(store), Path("not-an-id".to_string())).await;
    assert_eq!(bad_request(result), "Invalid id");
}

#[tokio::test]
async fn product_get_surfaces_malformed_id_as_internal() {
    let store = offline_store().await;

    let result = products::get_product(State(store), Path("not-an-id".to_string())).await;
    assert!(matches!(result, Err(AppError::MalformedId(_))));
}

#[tokio::test]
async fn review_creation_requires_every_field() {
    let store = offline_store().await;

    let payload = serde_json::from_value(json!({
        "productId": "66f0a1b2c3d4e5f6a7b8c9d0",
        "userEmail": "asha@example.com",
        "rating": 5
    }))
    .unwrap();
    let message = bad_request(reviews::create_review(State(store.clone()), Json(payload)).await);
    assert_eq!(message, "All fields are required");

    // A zero rating counts as missing.
    let payload = serde_json::from_value(json!({
        "productId": "66f0a1b2c3d4e5f6a7b8c9d0",
        "userEmail": "asha@example.com",
        "rating": 0,
        "comment": "fine"
    }))
    .unwrap();
    let message = bad_request(reviews::create_review(State(store.clone()), Json(payload)).await);
    assert_eq!(message, "All fields are required");

    let payload = serde_json::from_value(json!({
        "productId": "66f0a1b2c3d4e5f6a7b8c9d0",
        "userEmail": "asha@example.com",
        "rating": "great",
        "comment": "fine"
    }))
    .unwrap();
    let message = bad_request(reviews::create_review(State(store), Json(payload)).await);
    assert_eq!(message, "rating must be numeric");
}

#[tokio::test]
async fn cart_add_requires_guest_and_product() {
    let store = offline_store().await;

    let payload = serde_json::from_value(json!({ "guestId": "guest-1" })).unwrap();
    let message = bad_request(cart::add_to_cart(State(store), Json(payload)).await);
    assert_eq!(message, "guestId and productId required");
}

#[tokio::test]
async fn cart_quantity_update_is_validated() {
    let store = offline_store().await;

    let payload = serde_json::from_value(json!({ "quantity": 2 })).unwrap();
    let result =
        cart::update_quantity(State(store.clone()), Path("nope".to_string()), Json(payload)).await;
    assert_eq!(bad_request(result), "Invalid ID format");

    let id = ObjectId::new().to_hex();
    let payload = serde_json::from_value(json!({ "quantity": 0 })).unwrap();
    let result = cart::update_quantity(State(store.clone()), Path(id.clone()), Json(payload)).await;
    assert_eq!(bad_request(result), "Quantity must be at least 1");

    let payload = serde_json::from_value(json!({})).unwrap();
    let result = cart::update_quantity(State(store), Path(id), Json(payload)).await;
    assert_eq!(bad_request(result), "Quantity must be at least 1");
}

#[tokio::test]
async fn cart_removal_rejects_malformed_id() {
    let store = offline_store().await;

    let result = cart::remove_cart_item(State(store), Path("nope".to_string())).await;
    assert_eq!(bad_request(result), "Invalid id");
}

#[tokio::test]
async fn order_creation_requires_core_fields() {
    let store = offline_store().await;

    // An empty items array counts as missing.
    let payload = serde_json::from_value(json!({
        "guestId": "guest-1",
        "items": [],
        "customer": { "email": "asha@example.com" },
        "advancePayment": { "amount": 10 }
    }))
    .unwrap();
    let message = bad_request(orders::create_order(State(store.clone()), Json(payload)).await);
    assert_eq!(message, "Missing required fields");

    let payload = serde_json::from_value(json!({
        "guestId": "guest-1",
        "items": [{ "productId": "p1", "quantity": 1 }],
        "customer": { "email": "asha@example.com" }
    }))
    .unwrap();
    let message = bad_request(orders::create_order(State(store), Json(payload)).await);
    assert_eq!(message, "Missing required fields");
}

#[tokio::test]
async fn order_status_is_checked_before_the_id() {
    let store = offline_store().await;

    // Even a malformed id reports the status problem first.
    let payload = serde_json::from_value(json!({ "status": "shipped" })).unwrap();
    let result =
        orders::update_order_status(State(store.clone()), Path("nope".to_string()), Json(payload))
            .await;
    assert_eq!(bad_request(result), "Invalid status");

    // With a valid status the malformed id then surfaces as a store failure.
    let payload = serde_json::from_value(json!({ "status": "approved" })).unwrap();
    let result =
        orders::update_order_status(State(store), Path("nope".to_string()), Json(payload)).await;
    assert!(matches!(result, Err(AppError::MalformedId(_))));
}

#[tokio::test]
async fn order_delete_rejects_malformed_id() {
    let store = offline_store().await;

    let result = orders::delete_order(State(store), Path("nope".to_string())).await;
    assert_eq!(bad_request(result), "Invalid id");
}

#[tokio::test]
async fn order_listing_requires_email() {
    let store = offline_store().await;

    let query = Query(EmailQuery { email: None });
    let message = bad_request(orders::list_orders_by_email(State(store.clone()), query).await);
    assert_eq!(message, "Email required");

    let query = Query(EmailQuery {
        email: Some(String::new()),
    });
    let message = bad_request(orders::list_orders_by_email(State(store), query).await);
    assert_eq!(message, "Email required");
}

#[tokio::test]
async fn invoice_listing_requires_email() {
    let store = offline_store().await;

    let query = Query(EmailQuery { email: None });
    let message = bad_request(invoices::list_invoices_by_email(State(store), query).await);
    assert_eq!(message, "Email required");
}

#[tokio::test]
async fn invoice_creation_requires_every_field() {
    let store = offline_store().await;

    let payload = serde_json::from_value(json!({
        "orderId": "66f0a1b2c3d4e5f6a7b8c9d0",
        "userEmail": "asha@example.com",
        "items": [{ "itemName": "Desk" }],
        "totalAmount": 149.99
    }))
    .unwrap();
    let message = bad_request(invoices::create_invoice(State(store), Json(payload)).await);
    assert_eq!(message, "Required fields missing");
}

#[test]
fn rating_coercion_keeps_integers_integral() {
    assert_eq!(coerce_rating(&json!(5)), Some(Bson::Int64(5)));
    assert_eq!(coerce_rating(&json!(4.5)), Some(Bson::Double(4.5)));
    assert_eq!(coerce_rating(&json!("3")), Some(Bson::Int64(3)));
    assert_eq!(coerce_rating(&json!("4.5")), Some(Bson::Double(4.5)));
    assert_eq!(coerce_rating(&json!("great")), None);
    assert_eq!(coerce_rating(&json!("NaN")), None);
    assert_eq!(coerce_rating(&json!(true)), None);
}

#[test]
fn wire_rendering_flattens_ids_and_dates() {
    let oid = ObjectId::new();
    assert_eq!(bson_to_json(Bson::ObjectId(oid)), json!(oid.to_hex()));

    let rendered = bson_to_json(Bson::DateTime(DateTime::from_millis(1_700_000_000_000)));
    assert_eq!(rendered, json!("2023-11-14T22:13:20.000Z"));

    let nested = doc! { "_id": oid, "tags": ["a", "b"], "price": 12.5 };
    let rendered = bson_to_json(Bson::Document(nested));
    assert_eq!(
        rendered,
        json!({ "_id": oid.to_hex(), "tags": ["a", "b"], "price": 12.5 })
    );
}

#[test]
fn update_outcome_serializes_like_a_driver_result() {
    let outcome = UpdateOutcome {
        acknowledged: true,
        matched_count: 1,
        modified_count: 0,
        upserted_id: None,
        upserted_count: 0,
    };
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({
            "acknowledged": true,
            "matchedCount": 1,
            "modifiedCount": 0,
            "upsertedId": null,
            "upsertedCount": 0
        })
    );
}

#[test]
fn invoice_response_echoes_the_stored_id() {
    let oid = ObjectId::new();
    let invoice = Invoice {
        id: Some(oid),
        order_id: Bson::ObjectId(ObjectId::new()),
        user_email: "asha@example.com".into(),
        items: to_bson(&json!([{ "itemName": "Walnut Desk", "quantity": 1 }])).unwrap(),
        total_amount: Bson::Int64(12),
        customer: to_bson(&json!({ "email": "asha@example.com" })).unwrap(),
        created_at: DateTime::now(),
    };

    let body = serde_json::to_value(InvoiceResponse::from(invoice)).unwrap();
    assert_eq!(body["_id"], json!(oid.to_hex()));
    assert_eq!(body["totalAmount"], json!(12));
}

#[test]
fn omitted_optionals_stay_out_of_the_stored_document() {
    let item = CartItem {
        id: None,
        guest_id: "guest-7".into(),
        product_id: "prod-1".into(),
        quantity: None,
        image: None,
        item_name: None,
        sell_price: None,
        created_at: DateTime::now(),
    };

    let stored = to_document(&item).unwrap();
    assert!(!stored.contains_key("_id"));
    assert!(!stored.contains_key("quantity"));
    assert!(!stored.contains_key("image"));
    assert!(!stored.contains_key("itemName"));
    assert!(!stored.contains_key("sellPrice"));
    assert!(stored.contains_key("guestId"));
    assert!(stored.contains_key("createdAt"));
}

#[test]
fn bson_round_trips_plain_json() {
    let value = json!({ "amount": 10, "note": "advance" });
    let bson = to_bson(&value).unwrap();
    assert_eq!(bson_to_json(bson), value);
}
