use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

use crate::{
    dtos::auth::{
        LoginRequest, LoginResponse, PasswordResetConfirm, PasswordResetRequest, RegisterRequest,
    },
    dtos::MessageResponse,
    utils::ValidatedJson,
    AppState,
};

/// Register a new administrator
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Administrator registered successfully", body = AdminResponse),
        (status = 400, description = "Password policy rejected", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = state
        .auth_service
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(admin.sanitized())))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = state.auth_service.login(&req.email, &req.password).await?;
    let token = state.token.issue(&admin.email)?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            email: admin.email,
            admin_id: admin.id,
        }),
    ))
}

/// Request a password reset code
#[utoipa::path(
    post,
    path = "/auth/password-reset/request",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Reset code sent", body = MessageResponse),
        (status = 404, description = "No account with this email", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn request_password_reset(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PasswordResetRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .auth_service
        .request_reset(&req.email)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to process password reset request");
            e
        })?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "A reset code has been sent to your email".to_string(),
        }),
    ))
}

/// Confirm password reset with the emailed code
#[utoipa::path(
    post,
    path = "/auth/password-reset/confirm",
    request_body = PasswordResetConfirm,
    responses(
        (status = 200, description = "Password reset successful", body = MessageResponse),
        (status = 400, description = "Invalid or expired code", body = ErrorResponse),
        (status = 404, description = "No account with this email", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PasswordResetConfirm>,
) -> Result<impl IntoResponse, AppError> {
    state
        .auth_service
        .complete_reset(&req.email, &req.code, &req.new_password)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to confirm password reset");
            e
        })?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Password has been reset. You can now login with your new password."
                .to_string(),
        }),
    ))
}
