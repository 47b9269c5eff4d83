use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use futures::TryStreamExt;
use mongodb::bson::{Bson, DateTime, doc, oid::ObjectId, to_bson};
use serde_json::Value;

use crate::{
    db::Store,
    dto::{
        invoices::{CreateInvoiceRequest, InvoiceResponse},
        json_provided,
    },
    error::{AppError, AppResult},
    models::Invoice,
    response::ErrorBody,
    routes::params::EmailQuery,
};

pub fn router() -> Router<Store> {
    Router::new().route("/", get(list_invoices_by_email).post(create_invoice))
}

#[utoipa::path(
    get,
    path = "/invoices",
    params(
        ("email" = Option<String>, Query, description = "Customer email")
    ),
    responses(
        (status = 200, description = "Invoices for the customer", body = Vec<InvoiceResponse>),
        (status = 400, description = "Email missing", body = ErrorBody),
    ),
    tag = "Invoices"
)]
pub async fn list_invoices_by_email(
    State(store): State<Store>,
    Query(query): Query<EmailQuery>,
) -> AppResult<Json<Vec<InvoiceResponse>>> {
    let Some(email) = query.email.filter(|email| !email.is_empty()) else {
        return Err(AppError::BadRequest("Email required".to_string()));
    };

    // TODO: settle the canonical field name. Creation writes `userEmail` but
    // this filter reads `customerEmail`, so the lookup matches nothing today.
    let invoices: Vec<Invoice> = store
        .invoices
        .find(doc! { "customerEmail": &email })
        .await?
        .try_collect()
        .await?;

    Ok(Json(
        invoices.into_iter().map(InvoiceResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice stored", body = InvoiceResponse),
        (status = 400, description = "Missing required fields", body = ErrorBody),
    ),
    tag = "Invoices"
)]
pub async fn create_invoice(
    State(store): State<Store>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> AppResult<(StatusCode, Json<InvoiceResponse>)> {
    let (Some(order_id), Some(user_email), Some(items), Some(total_amount), Some(customer)) = (
        payload.order_id.filter(|id| json_provided(Some(id))),
        payload.user_email.filter(|email| !email.is_empty()),
        payload.items.filter(|items| json_provided(Some(items))),
        payload
            .total_amount
            .filter(|amount| json_provided(Some(amount))),
        payload.customer.filter(|customer| json_provided(Some(customer))),
    ) else {
        return Err(AppError::BadRequest("Required fields missing".to_string()));
    };

    // A well-formed 24-hex orderId becomes a real reference; anything else
    // is kept verbatim.
    let order_id = match &order_id {
        Value::String(id) => match ObjectId::parse_str(id) {
            Ok(oid) => Bson::ObjectId(oid),
            Err(_) => to_bson(&order_id)?,
        },
        other => to_bson(other)?,
    };

    let mut invoice = Invoice {
        id: None,
        order_id,
        user_email,
        items: to_bson(&items)?,
        total_amount: to_bson(&total_amount)?,
        customer: to_bson(&customer)?,
        created_at: DateTime::now(),
    };
    let result = store.invoices.insert_one(&invoice).await?;
    invoice.id = result.inserted_id.as_object_id();

    Ok((StatusCode::CREATED, Json(invoice.into())))
}
