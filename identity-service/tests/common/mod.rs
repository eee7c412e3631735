//! Shared helpers for identity-service integration tests.
//!
//! Every test runs the real router over in-memory stores with a mock
//! mailer, so no PostgreSQL or SMTP server is needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use identity_service::{
    build_router,
    config::{
        DatabaseConfig, Environment, IdentityConfig, OtpConfig, SecurityConfig, SmtpConfig,
        TokenConfig,
    },
    services::{AuthService, DirectoryService, MockEmailProvider, OtpEngine, TokenService},
    store::{AdminStore, ManagedUserStore, MemoryAdminStore, MemoryManagedUserStore},
    AppState,
};
use tower::util::ServiceExt;

pub const TEST_TOKEN_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub mailer: Arc<MockEmailProvider>,
}

pub fn test_config(token_ttl_hours: i64, otp_ttl_minutes: i64) -> IdentityConfig {
    IdentityConfig {
        common: service_core::config::Config { port: 0 },
        environment: Environment::Dev,
        service_name: "identity-service-test".to_string(),
        service_version: "0.0.0".to_string(),
        log_level: "error".to_string(),
        otlp_endpoint: None,
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        token: TokenConfig {
            secret: TEST_TOKEN_SECRET.to_string(),
            ttl_hours: token_ttl_hours,
        },
        otp: OtpConfig {
            ttl_minutes: otp_ttl_minutes,
        },
        smtp: SmtpConfig {
            enabled: false,
            host: "localhost".to_string(),
            port: 587,
            user: String::new(),
            password: String::new(),
            from_email: "no-reply@localhost".to_string(),
            from_name: "Identity Service".to_string(),
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(24, 5).await
}

/// Negative TTLs mint already-expired tokens and reset codes, which is how
/// the expiry paths are exercised without mocking the clock.
pub async fn spawn_app_with(token_ttl_hours: i64, otp_ttl_minutes: i64) -> TestApp {
    let config = test_config(token_ttl_hours, otp_ttl_minutes);

    let admins: Arc<dyn AdminStore> = Arc::new(MemoryAdminStore::new());
    let users: Arc<dyn ManagedUserStore> = Arc::new(MemoryManagedUserStore::new());
    let mailer = Arc::new(MockEmailProvider::new());

    let token = TokenService::new(&config.token);
    let otp = OtpEngine::new(admins.clone(), mailer.clone(), &config.otp);
    let auth_service = AuthService::new(admins.clone(), otp);
    let directory_service = DirectoryService::new(users);

    let state = AppState {
        config,
        admins,
        token,
        auth_service,
        directory_service,
    };

    let router = build_router(state.clone())
        .await
        .expect("Failed to build router");

    TestApp {
        router,
        state,
        mailer,
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("request failed")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&body).expect("body was not valid JSON")
}

/// Register an administrator and return the login token.
pub async fn register_and_login(app: &TestApp, name: &str, email: &str, password: &str) -> String {
    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "name": name, "email": email, "password": password }),
        ),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let response = send(
        &app.router,
        json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "email": email, "password": password }),
        ),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let body = read_json(response).await;
    body["token"]
        .as_str()
        .expect("login response had no token")
        .to_string()
}
