use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
};
use futures::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId};
use serde_json::Value;

use crate::{
    db::Store,
    dto::{bson_provided, bson_to_json, document_to_json},
    error::{AppError, AppResult},
    response::{ErrorBody, Inserted, Success, UpdateOutcome},
};

pub fn router() -> Router<Store> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product))
        .route("/{id}", put(update_product))
        .route("/{id}", delete(delete_product))
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products", body = Vec<Value>)
    ),
    tag = "Products"
)]
pub async fn list_products(State(store): State<Store>) -> AppResult<Json<Vec<Value>>> {
    let products: Vec<Document> = store.products.find(doc! {}).await?.try_collect().await?;
    Ok(Json(products.into_iter().map(document_to_json).collect()))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product document", body = Value),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    // No well-formedness check on this route; a malformed id surfaces as a
    // 500 like any other store-level failure.
    let oid = ObjectId::parse_str(&id)?;
    let product = store
        .products
        .find_one(doc! { "_id": oid })
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(document_to_json(product)))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = Value,
    responses(
        (status = 201, description = "Product stored", body = Inserted),
        (status = 400, description = "Missing required fields", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(store): State<Store>,
    Json(product): Json<Document>,
) -> AppResult<(StatusCode, Json<Inserted>)> {
    let required = ["itemName", "images", "sellPrice"];
    if required.iter().any(|key| !bson_provided(product.get(*key))) {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    let result = store.products.insert_one(&product).await?;
    let body = Inserted {
        inserted_id: bson_to_json(result.inserted_id),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    request_body = Value,
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateOutcome)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(store): State<Store>,
    Path(id): Path<String>,
    Json(fields): Json<Document>,
) -> AppResult<Json<UpdateOutcome>> {
    let oid = ObjectId::parse_str(&id)?;
    // $set merges the supplied fields; omitted ones stay untouched, and a
    // zero-match update still reports success.
    let result = store
        .products
        .update_one(doc! { "_id": oid }, doc! { "$set": fields })
        .await?;

    Ok(Json(result.into()))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product removed", body = Success),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> AppResult<Json<Success>> {
    let Ok(oid) = ObjectId::parse_str(&id) else {
        return Err(AppError::BadRequest("Invalid id".to_string()));
    };

    let result = store.products.delete_one(doc! { "_id": oid }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound("Item not found".to_string()));
    }

    Ok(Json(Success { success: true }))
}
