use rusty_library_catalog::{
    adapters::{
        memory::MemoryStore,
        postgres::{PostgresAuthorRepository, PostgresBookRepository},
    },
    api::{handlers::AppState, router::create_router},
    application::CatalogServices,
    config::{AppConfig, StorageBackend},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_library_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Initialize adapters
    let services = match config.storage {
        StorageBackend::Postgres => {
            tracing::info!("Database URL: {}", config.database_url);

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(&config.database_url)
                .await
                .expect("Failed to connect to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run migrations");

            CatalogServices::new(
                Arc::new(PostgresAuthorRepository::new(pool.clone())),
                Arc::new(PostgresBookRepository::new(pool)),
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");

            let store = MemoryStore::new();
            CatalogServices::new(
                Arc::new(store.author_repository()),
                Arc::new(store.book_repository()),
            )
        }
    };

    // Create application state
    let app_state = Arc::new(AppState { services });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = config.listen_addr().expect("Invalid listen address");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
