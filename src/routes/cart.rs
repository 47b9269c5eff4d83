use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use futures::TryStreamExt;
use mongodb::bson::{DateTime, doc, oid::ObjectId, to_bson};

use crate::{
    db::Store,
    dto::cart::{AddToCartRequest, CartItemResponse, UpdateQuantityRequest},
    error::{AppError, AppResult},
    models::CartItem,
    response::{CartInserted, ErrorBody, Success, SuccessMessage},
};

pub fn router() -> Router<Store> {
    Router::new()
        .route("/", post(add_to_cart))
        .route("/guest/{guest_id}", get(list_guest_cart))
        .route("/{id}", put(update_quantity).delete(remove_cart_item))
}

#[utoipa::path(
    post,
    path = "/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Item added", body = CartInserted),
        (status = 400, description = "Missing fields or item already in cart", body = ErrorBody),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(store): State<Store>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<(StatusCode, Json<CartInserted>)> {
    let (Some(guest_id), Some(product_id)) = (
        payload.guest_id.filter(|guest| !guest.is_empty()),
        payload.product_id.filter(|product| !product.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "guestId and productId required".to_string(),
        ));
    };

    // Check-then-insert: not atomic, so two concurrent identical adds can
    // both pass the lookup.
    let existing = store
        .cart
        .find_one(doc! { "guestId": &guest_id, "productId": &product_id })
        .await?;
    if existing.is_some() {
        return Err(AppError::BadRequest("Item already in cart".to_string()));
    }

    let item = CartItem {
        id: None,
        guest_id,
        product_id,
        quantity: payload.quantity,
        image: payload.image,
        item_name: payload.item_name,
        sell_price: payload.sell_price.map(|price| to_bson(&price)).transpose()?,
        created_at: DateTime::now(),
    };
    let result = store.cart.insert_one(&item).await?;

    let body = CartInserted {
        success: true,
        inserted_id: result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .unwrap_or_default(),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    get,
    path = "/cart/guest/{guest_id}",
    params(
        ("guest_id" = String, Path, description = "Guest id")
    ),
    responses(
        (status = 200, description = "Cart items for the guest", body = Vec<CartItemResponse>)
    ),
    tag = "Cart"
)]
pub async fn list_guest_cart(
    State(store): State<Store>,
    Path(guest_id): Path<String>,
) -> AppResult<Json<Vec<CartItemResponse>>> {
    let items: Vec<CartItem> = store
        .cart
        .find(doc! { "guestId": &guest_id })
        .await?
        .try_collect()
        .await?;

    Ok(Json(items.into_iter().map(CartItemResponse::from).collect()))
}

#[utoipa::path(
    put,
    path = "/cart/{id}",
    params(
        ("id" = String, Path, description = "Cart item id")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated", body = SuccessMessage),
        (status = 400, description = "Malformed id or quantity below 1", body = ErrorBody),
        (status = 404, description = "Cart item not found", body = ErrorBody),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(store): State<Store>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<SuccessMessage>> {
    let Ok(oid) = ObjectId::parse_str(&id) else {
        return Err(AppError::BadRequest("Invalid ID format".to_string()));
    };
    let quantity = match payload.quantity {
        Some(quantity) if quantity >= 1 => quantity,
        _ => {
            return Err(AppError::BadRequest(
                "Quantity must be at least 1".to_string(),
            ));
        }
    };

    let result = store
        .cart
        .update_one(doc! { "_id": oid }, doc! { "$set": { "quantity": quantity } })
        .await?;
    // Modified, not matched: writing the quantity a row already holds
    // reports 404.
    if result.modified_count == 0 {
        return Err(AppError::NotFound("Cart item not found".to_string()));
    }

    Ok(Json(SuccessMessage {
        success: true,
        message: "Quantity updated successfully".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/cart/{id}",
    params(
        ("id" = String, Path, description = "Cart item id")
    ),
    responses(
        (status = 200, description = "Item removed", body = Success),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Cart item not found", body = ErrorBody),
    ),
    tag = "Cart"
)]
pub async fn remove_cart_item(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> AppResult<Json<Success>> {
    let Ok(oid) = ObjectId::parse_str(&id) else {
        return Err(AppError::BadRequest("Invalid id".to_string()));
    };

    let result = store.cart.delete_one(doc! { "_id": oid }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound("Item not found".to_string()));
    }

    Ok(Json(Success { success: true }))
}
