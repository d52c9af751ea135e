#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use auth::PasswordHasher;
use auth_service::domain::identity::ports::AuthServicePort;
use auth_service::domain::identity::service::AuthService;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::outbound::repositories::SqliteCredentialStore;
use auth_service::proto::auth_client::AuthClient;
use auth_service::proto::auth_server::AuthServer;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Server;

pub const APP_ID: i32 = 1;
pub const APP_SECRET: &[u8] = b"test-secret";
pub const OTHER_APP_ID: i32 = 2;
pub const OTHER_APP_SECRET: &[u8] = b"other-secret";
pub const TOKEN_TTL_MINUTES: i64 = 60;

/// Test application that spawns a real gRPC server
pub struct TestApp {
    pub address: String,
    pub db: TestDb,
    pub client: AuthClient<Channel>,
}

/// In-memory SQLite database with migrations applied and apps seeded
pub struct TestDb {
    pub pool: SqlitePool,
}

impl TestApp {
    /// Spawn the service over a fresh database and return a connected client
    pub async fn spawn() -> Self {
        let db = TestDb::new().await;
        let store = Arc::new(SqliteCredentialStore::new(db.pool.clone()));

        let service = Arc::new(
            AuthService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                store,
                chrono::Duration::minutes(TOKEN_TTL_MINUTES),
            )
            .with_password_hasher(
                PasswordHasher::with_cost(8, 1, 1).expect("Failed to build hasher"),
            ),
        );

        let (address, client) = spawn_server(service, None).await;
        Self {
            address,
            db,
            client,
        }
    }
}

/// Serve any service implementation on a random port
pub async fn spawn_server<S: AuthServicePort>(
    service: Arc<S>,
    timeout: Option<Duration>,
) -> (String, AuthClient<Channel>) {
    // Use random port (0 = OS assigns)
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut builder = Server::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let router = builder.add_service(AuthServer::new(AuthGrpcService::new(service)));

    tokio::spawn(async move {
        router
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .expect("Server error");
    });

    let client = AuthClient::connect(address.clone())
        .await
        .expect("Failed to connect to server");

    (address, client)
}

impl TestDb {
    pub async fn new() -> Self {
        // A single connection that never recycles keeps the in-memory database alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        SqliteCredentialStore::new(pool.clone())
            .migrate()
            .await
            .expect("Failed to run migrations");

        let db = Self { pool };
        db.seed_app(APP_ID, "test", APP_SECRET).await;
        db.seed_app(OTHER_APP_ID, "other", OTHER_APP_SECRET).await;
        db
    }

    pub async fn seed_app(&self, id: i32, name: &str, secret: &[u8]) {
        sqlx::query("INSERT INTO apps (id, name, secret) VALUES (?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(secret)
            .execute(&self.pool)
            .await
            .expect("Failed to seed application");
    }

    pub async fn promote_to_admin(&self, user_id: i64) {
        sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .expect("Failed to promote user");
    }

    pub fn store(&self) -> SqliteCredentialStore {
        SqliteCredentialStore::new(self.pool.clone())
    }
}

/// Resolve signing secrets the way a relying party would
pub fn secret_for(app_id: i32) -> Option<Vec<u8>> {
    match app_id {
        APP_ID => Some(APP_SECRET.to_vec()),
        OTHER_APP_ID => Some(OTHER_APP_SECRET.to_vec()),
        _ => None,
    }
}
