mod common;

use axum::http::StatusCode;
use common::{json_request, read_json, send, spawn_app, spawn_app_with};
use serde_json::json;

#[tokio::test]
async fn register_then_login_round_trip() {
    let app = spawn_app().await;

    // 1. Register
    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/register",
            json!({
                "name": "Ann Admin",
                "email": "ann@example.com",
                "password": "Str0ng!Pass"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    assert_eq!(body["email"], "ann@example.com");
    assert_eq!(body["name"], "Ann Admin");
    assert!(body["id"].as_str().is_some());
    // Credential material never leaves the service.
    assert!(body.get("password_hash").is_none());
    assert!(body.get("otp_code").is_none());

    // 2. Login
    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/login",
            json!({ "email": "ann@example.com", "password": "Str0ng!Pass" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["email"], "ann@example.com");
    assert!(body["admin_id"].as_str().is_some());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn register_accepts_differently_cased_login() {
    let app = spawn_app().await;

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/register",
            json!({
                "name": "Ann",
                "email": " Ann@Example.COM ",
                "password": "Str0ng!Pass"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["email"], "ann@example.com");

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/login",
            json!({ "email": "ANN@example.com", "password": "Str0ng!Pass" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_registration_is_conflict() {
    let app = spawn_app().await;

    let payload = json!({
        "name": "Ann",
        "email": "ann@example.com",
        "password": "Str0ng!Pass"
    });
    let response = send(&app.router, json_request("POST", "/auth/register", payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same address with different casing must still collide.
    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/register",
            json!({
                "name": "Other",
                "email": "ANN@Example.com",
                "password": "0ther!Pass"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = read_json(response).await;
    assert_eq!(body["error"], "Email already registered");
}

#[tokio::test]
async fn weak_password_is_rejected() {
    let app = spawn_app().await;

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/register",
            json!({
                "name": "Ann",
                "email": "ann@example.com",
                "password": "alllowercase1!"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unparseable_body_is_bad_request() {
    let app = spawn_app().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = send(&app.router, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_email_is_unprocessable() {
    let app = spawn_app().await;

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/register",
            json!({
                "name": "Ann",
                "email": "not-an-email",
                "password": "Str0ng!Pass"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn login_failures_are_unauthorized() {
    let app = spawn_app().await;

    send(
        &app.router,
        json_request(
            "POST",
            "/auth/register",
            json!({
                "name": "Ann",
                "email": "ann@example.com",
                "password": "Str0ng!Pass"
            }),
        ),
    )
    .await;

    // Wrong password and unknown account produce the same answer.
    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/login",
            json!({ "email": "ann@example.com", "password": "Wr0ng!Pass" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = read_json(response).await;

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/login",
            json!({ "email": "nobody@example.com", "password": "Str0ng!Pass" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let unknown_account = read_json(response).await;

    assert_eq!(wrong_password["error"], unknown_account["error"]);
}

#[tokio::test]
async fn password_reset_flow_rotates_credentials() {
    let app = spawn_app().await;

    send(
        &app.router,
        json_request(
            "POST",
            "/auth/register",
            json!({
                "name": "Ann",
                "email": "ann@example.com",
                "password": "Str0ng!Pass"
            }),
        ),
    )
    .await;

    // 1. Request a reset code
    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/password-reset/request",
            json!({ "email": "ann@example.com" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (to, code) = app.mailer.last_send().expect("no reset email captured");
    assert_eq!(to, "ann@example.com");
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    // 2. Confirm with the delivered code
    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/password-reset/confirm",
            json!({
                "email": "ann@example.com",
                "code": code,
                "new_password": "N3wStr0ng!Pass"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // 3. Old password is dead, new one works
    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/login",
            json!({ "email": "ann@example.com", "password": "Str0ng!Pass" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/login",
            json!({ "email": "ann@example.com", "password": "N3wStr0ng!Pass" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn reset_request_for_unknown_email_is_not_found() {
    let app = spawn_app().await;

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/password-reset/request",
            json!({ "email": "nobody@example.com" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.mailer.send_count(), 0);
}

#[tokio::test]
async fn reset_confirm_with_wrong_code_is_bad_request() {
    let app = spawn_app().await;

    send(
        &app.router,
        json_request(
            "POST",
            "/auth/register",
            json!({
                "name": "Ann",
                "email": "ann@example.com",
                "password": "Str0ng!Pass"
            }),
        ),
    )
    .await;
    send(
        &app.router,
        json_request(
            "POST",
            "/auth/password-reset/request",
            json!({ "email": "ann@example.com" }),
        ),
    )
    .await;

    let (_, code) = app.mailer.last_send().expect("no reset email captured");
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/password-reset/confirm",
            json!({
                "email": "ann@example.com",
                "code": wrong,
                "new_password": "N3wStr0ng!Pass"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The real code still works after a failed guess.
    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/password-reset/confirm",
            json!({
                "email": "ann@example.com",
                "code": code,
                "new_password": "N3wStr0ng!Pass"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn reset_confirm_without_outstanding_code_is_bad_request() {
    let app = spawn_app().await;

    send(
        &app.router,
        json_request(
            "POST",
            "/auth/register",
            json!({
                "name": "Ann",
                "email": "ann@example.com",
                "password": "Str0ng!Pass"
            }),
        ),
    )
    .await;

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/password-reset/confirm",
            json!({
                "email": "ann@example.com",
                "code": "123456",
                "new_password": "N3wStr0ng!Pass"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn expired_reset_code_is_refused() {
    let app = spawn_app_with(24, -1).await;

    send(
        &app.router,
        json_request(
            "POST",
            "/auth/register",
            json!({
                "name": "Ann",
                "email": "ann@example.com",
                "password": "Str0ng!Pass"
            }),
        ),
    )
    .await;
    send(
        &app.router,
        json_request(
            "POST",
            "/auth/password-reset/request",
            json!({ "email": "ann@example.com" }),
        ),
    )
    .await;

    let (_, code) = app.mailer.last_send().expect("no reset email captured");

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/password-reset/confirm",
            json!({
                "email": "ann@example.com",
                "code": code,
                "new_password": "N3wStr0ng!Pass"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert_eq!(body["error"], "Reset code expired");
}
