use identity_service::{
    build_router,
    config::IdentityConfig,
    db,
    services::{
        AuthService, DirectoryService, EmailProvider, OtpEngine, SmtpEmailer, TokenService,
    },
    store::{AdminStore, ManagedUserStore, PostgresAdminStore, PostgresManagedUserStore},
    AppState,
};
use service_core::error::AppError;
use service_core::observability::logging::init_tracing;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if invalid
    let config = IdentityConfig::from_env()?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        "Starting identity service"
    );

    let pool = db::create_pool(&config.database)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
    db::run_migrations(&pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
    tracing::info!("Database initialized");

    let admins: Arc<dyn AdminStore> = Arc::new(PostgresAdminStore::new(pool.clone()));
    let users: Arc<dyn ManagedUserStore> = Arc::new(PostgresManagedUserStore::new(pool));

    let email: Arc<dyn EmailProvider> = Arc::new(SmtpEmailer::new(config.smtp.clone())?);
    tracing::info!(enabled = config.smtp.enabled, "Email provider initialized");

    let token = TokenService::new(&config.token);
    let otp = OtpEngine::new(admins.clone(), email, &config.otp);
    let auth_service = AuthService::new(admins.clone(), otp);
    let directory_service = DirectoryService::new(users);

    let state = AppState {
        config: config.clone(),
        admins,
        token,
        auth_service,
        directory_service,
    };

    let app = build_router(state).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));

    let service_span = tracing::info_span!(
        "service",
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
    );
    let _guard = service_span.enter();

    tracing::info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
