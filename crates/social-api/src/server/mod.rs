//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use social_cache::{RedisPool, TokenDenylist};
use social_common::{AppConfig, AppError, GoogleIdentityProvider, JwtService};
use social_core::SnowflakeGenerator;
use social_db::{
    create_pool, run_migrations, PgCommentRepository, PgFileRepository, PgHashtagRepository,
    PgPostRepository, PgUserRepository, PoolConfig,
};
use social_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware.
///
/// Health probes sit outside the middleware stack so they are never rate
/// limited.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let api = apply_middleware(create_router(), state.config())?;
    Ok(api.merge(health_routes()).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("migrations failed: {e}")))?;
    }

    // Connections are opened lazily; readiness reports an unreachable Redis
    let redis_pool =
        RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;

    let identity_provider = Arc::new(GoogleIdentityProvider::new(&config.google)?);

    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.expires_in));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .hashtag_repo(Arc::new(PgHashtagRepository::new(pool.clone())))
        .file_repo(Arc::new(PgFileRepository::new(pool.clone())))
        .identity_provider(identity_provider)
        .token_denylist(TokenDenylist::new(redis_pool.clone()))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .storage(config.storage.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config)
        .with_db_pool(pool)
        .with_redis_pool(redis_pool))
}

/// Run the HTTP server until Ctrl+C or SIGTERM
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    // Peer addresses feed the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
