use std::str::FromStr;
use std::sync::Arc;

use auth_service::config::Config;
use auth_service::domain::identity::service::AuthService;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::outbound::repositories::SqliteCredentialStore;
use auth_service::proto::auth_server::AuthServer;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_CONNECTIONS: u32 = 5;

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "auth_service=debug,tonic=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_prod() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;
    init_tracing(&config);

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );
    tracing::info!(
        env = %config.env,
        storage_url = %config.storage.url,
        grpc_port = config.grpc.port,
        grpc_timeout_ms = config.grpc.timeout_ms,
        token_ttl_minutes = config.token.ttl_minutes,
        "Configuration loaded"
    );

    let connect_options =
        SqliteConnectOptions::from_str(&config.storage.url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(connect_options)
        .await?;
    tracing::info!(
        max_connections = MAX_CONNECTIONS,
        database = "sqlite",
        "Database connection pool created"
    );

    let store = Arc::new(SqliteCredentialStore::new(pool));
    store.migrate().await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        store,
        config.token_ttl(),
    ));

    let grpc_address = format!("0.0.0.0:{}", config.grpc.port).parse()?;
    let grpc_service = AuthGrpcService::new(auth_service);
    tracing::info!(
        address = %grpc_address,
        port = config.grpc.port,
        protocol = "grpc",
        "gRpc server listening"
    );

    Server::builder()
        .timeout(config.grpc_timeout())
        .add_service(AuthServer::new(grpc_service))
        .serve_with_shutdown(grpc_address, shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
