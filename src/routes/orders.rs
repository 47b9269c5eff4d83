use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use futures::TryStreamExt;
use mongodb::bson::{DateTime, doc, oid::ObjectId, to_bson};

use crate::{
    db::Store,
    dto::{
        json_provided,
        orders::{CreateOrderRequest, OrderResponse, UpdateOrderStatusRequest},
    },
    error::{AppError, AppResult},
    models::Order,
    response::{ErrorBody, Success},
    routes::params::EmailQuery,
};

const ORDER_STATUSES: [&str; 3] = ["pending", "approved", "rejected"];

pub fn router() -> Router<Store> {
    Router::new()
        .route("/", get(list_orders_by_email).post(create_order))
        .route("/all", get(list_all_orders))
        .route("/{id}", put(update_order_status).delete(delete_order))
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order stored", body = OrderResponse),
        (status = 400, description = "Missing required fields", body = ErrorBody),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(store): State<Store>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    let (Some(guest_id), Some(items), Some(customer), Some(advance_payment)) = (
        payload.guest_id.filter(|guest| !guest.is_empty()),
        payload.items.filter(|items| !items.is_empty()),
        payload.customer.filter(|customer| json_provided(Some(customer))),
        payload
            .advance_payment
            .filter(|payment| json_provided(Some(payment))),
    ) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    let items = items.iter().map(to_bson).collect::<Result<Vec<_>, _>>()?;
    // Any status string is accepted on creation; only the update path
    // checks it against the known set.
    let status = payload
        .status
        .filter(|status| !status.is_empty())
        .unwrap_or_else(|| "pending".to_string());

    let mut order = Order {
        id: None,
        guest_id,
        items,
        total_price: payload.total_price.map(|price| to_bson(&price)).transpose()?,
        status,
        created_at: DateTime::now(),
        customer: to_bson(&customer)?,
        advance_payment: to_bson(&advance_payment)?,
        payment_proof: payload.payment_proof.unwrap_or_default(),
        transaction_id: payload.transaction_id.unwrap_or_default(),
    };
    let result = store.orders.insert_one(&order).await?;
    order.id = result.inserted_id.as_object_id();

    Ok((StatusCode::CREATED, Json(order.into())))
}

#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("email" = Option<String>, Query, description = "Customer email")
    ),
    responses(
        (status = 200, description = "Orders for the customer", body = Vec<OrderResponse>),
        (status = 400, description = "Email missing", body = ErrorBody),
    ),
    tag = "Orders"
)]
pub async fn list_orders_by_email(
    State(store): State<Store>,
    Query(query): Query<EmailQuery>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let Some(email) = query.email.filter(|email| !email.is_empty()) else {
        return Err(AppError::BadRequest("Email required".to_string()));
    };

    let orders: Vec<Order> = store
        .orders
        .find(doc! { "customer.email": &email })
        .await?
        .try_collect()
        .await?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/orders/all",
    responses(
        (status = 200, description = "Every stored order", body = Vec<OrderResponse>)
    ),
    tag = "Orders"
)]
pub async fn list_all_orders(State(store): State<Store>) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders: Vec<Order> = store.orders.find(doc! {}).await?.try_collect().await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order id")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Success),
        (status = 400, description = "Unknown status", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(store): State<Store>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<Success>> {
    // Status is checked before the id is parsed; any of the three values is
    // accepted unconditionally, including moves out of a terminal state.
    let status = match payload.status.as_deref() {
        Some(status) if ORDER_STATUSES.contains(&status) => status.to_string(),
        _ => return Err(AppError::BadRequest("Invalid status".to_string())),
    };

    let oid = ObjectId::parse_str(&id)?;
    let result = store
        .orders
        .update_one(doc! { "_id": oid }, doc! { "$set": { "status": status } })
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::NotFound("Order not found".to_string()));
    }

    Ok(Json(Success { success: true }))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order removed", body = Success),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
    ),
    tag = "Orders"
)]
pub async fn delete_order(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> AppResult<Json<Success>> {
    let Ok(oid) = ObjectId::parse_str(&id) else {
        return Err(AppError::BadRequest("Invalid id".to_string()));
    };

    let result = store.orders.delete_one(doc! { "_id": oid }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound("Item not found".to_string()));
    }

    Ok(Json(Success { success: true }))
}
