use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use mongodb::bson::doc;

use crate::{
    db::Store,
    dto::users::{CreateUserRequest, RoleResponse, UserResponse},
    error::{AppError, AppResult},
    models::User,
    response::ErrorBody,
};

pub fn router() -> Router<Store> {
    Router::new()
        .route("/", post(create_user))
        .route("/{email}", get(get_role_by_email))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User stored, or already present", body = UserResponse),
        (status = 400, description = "Email missing", body = ErrorBody),
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(store): State<Store>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let Some(email) = payload.email.filter(|email| !email.is_empty()) else {
        return Err(AppError::BadRequest("Email is required".to_string()));
    };

    // Idempotent by email: a second POST returns the stored document unchanged.
    if let Some(existing) = store.users.find_one(doc! { "email": &email }).await? {
        return Ok(Json(existing.into()));
    }

    let mut user = User {
        id: None,
        name: payload.name,
        email,
        role: payload
            .role
            .filter(|role| !role.is_empty())
            .unwrap_or_else(|| "user".to_string()),
    };
    let result = store.users.insert_one(&user).await?;
    user.id = result.inserted_id.as_object_id();

    Ok(Json(user.into()))
}

#[utoipa::path(
    get,
    path = "/users/{email}",
    params(
        ("email" = String, Path, description = "User email")
    ),
    responses(
        (status = 200, description = "Role for the given email", body = RoleResponse),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "Users"
)]
pub async fn get_role_by_email(
    State(store): State<Store>,
    Path(email): Path<String>,
) -> AppResult<Json<RoleResponse>> {
    let user = store
        .users
        .find_one(doc! { "email": &email })
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(RoleResponse { role: user.role }))
}
