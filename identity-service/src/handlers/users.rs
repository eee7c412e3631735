use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;

use crate::{
    dtos::users::CreateUserRequest, middleware::AuthAdmin, models::ManagedUserResponse,
    utils::ValidatedJson, AppState,
};

/// Create a managed user in the caller's directory
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = ManagedUserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "User already exists for this administrator", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Directory",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    admin: AuthAdmin,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .directory_service
        .add_user(admin.id, &req.name, &req.email)
        .await?;

    Ok((StatusCode::CREATED, Json(ManagedUserResponse::from(user))))
}

/// List the caller's managed users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users owned by the caller", body = [ManagedUserResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Directory",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    admin: AuthAdmin,
) -> Result<impl IntoResponse, AppError> {
    let users = state.directory_service.list_users(admin.id).await?;
    let users: Vec<ManagedUserResponse> =
        users.into_iter().map(ManagedUserResponse::from).collect();

    Ok((StatusCode::OK, Json(users)))
}

/// Delete a managed user owned by the caller
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Managed user id")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "User belongs to a different administrator", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Directory",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.directory_service.delete_user(id, admin.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
