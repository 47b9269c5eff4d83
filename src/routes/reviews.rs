use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use futures::TryStreamExt;
use mongodb::bson::{DateTime, doc, oid::ObjectId};

use crate::{
    db::Store,
    dto::{
        json_provided,
        reviews::{CreateReviewRequest, ReviewResponse, coerce_rating},
    },
    error::{AppError, AppResult},
    models::Review,
    response::ErrorBody,
};

pub fn router() -> Router<Store> {
    Router::new()
        .route("/", post(create_review))
        .route("/{product_id}", get(list_reviews_for_product))
}

#[utoipa::path(
    post,
    path = "/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review stored", body = ReviewResponse),
        (status = 400, description = "Missing or non-numeric fields", body = ErrorBody),
    ),
    tag = "Reviews"
)]
pub async fn create_review(
    State(store): State<Store>,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ReviewResponse>)> {
    let (Some(product_id), Some(user_email), Some(rating), Some(comment)) = (
        payload.product_id.filter(|id| !id.is_empty()),
        payload.user_email.filter(|email| !email.is_empty()),
        payload.rating.filter(|rating| json_provided(Some(rating))),
        payload.comment.filter(|comment| !comment.is_empty()),
    ) else {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    };

    let rating = coerce_rating(&rating)
        .ok_or_else(|| AppError::BadRequest("rating must be numeric".to_string()))?;
    let product_id = ObjectId::parse_str(&product_id)?;

    let mut review = Review {
        id: None,
        product_id,
        user_email,
        rating,
        comment,
        created_at: DateTime::now(),
    };
    let result = store.reviews.insert_one(&review).await?;
    review.id = result.inserted_id.as_object_id();

    Ok((StatusCode::CREATED, Json(review.into())))
}

#[utoipa::path(
    get,
    path = "/reviews/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Reviews for the product, newest first", body = Vec<ReviewResponse>)
    ),
    tag = "Reviews"
)]
pub async fn list_reviews_for_product(
    State(store): State<Store>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Vec<ReviewResponse>>> {
    let oid = ObjectId::parse_str(&product_id)?;
    let reviews: Vec<Review> = store
        .reviews
        .find(doc! { "productId": oid })
        .sort(doc! { "createdAt": -1 })
        .await?
        .try_collect()
        .await?;

    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}
