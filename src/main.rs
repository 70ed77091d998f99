use accessible_platform::{
    AppState, auth,
    config::{AppConfig, Env},
    create_router,
    repository::{Repository, RepositoryState, SqliteRepository},
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Default bootstrap credentials. Change the password immediately after the first
// deployment.
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// main
///
/// The asynchronous entry point for the application, responsible for initializing
/// all core components: Configuration, Logging, Database, Bootstrap, and the HTTP Server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    // AppConfig::load() implements the fail-fast principle for missing Production secrets.
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Sets the default log level. It prioritizes the RUST_LOG environment variable,
    // falling back to sensible defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "accessible_platform=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    // The structured logging format is dynamically selected based on the APP_ENV.
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability during local debugging.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by centralized log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Database Initialization (SQLite)
    // Creates a connection pool to the SQLite database defined in the configuration,
    // creating the database file on first run.
    let options = SqliteConnectOptions::from_str(&config.db_url)
        .expect("FATAL: Invalid DATABASE_URL.")
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("FATAL: Failed to open SQLite database. Check DATABASE_URL.");

    // Instantiate the Repository, wrapping it in an Arc for thread-safe sharing.
    let repo = Arc::new(SqliteRepository::new(pool)) as RepositoryState;

    // 5. Schema & Bootstrap
    // Tables are created idempotently on every start; the default admin is only
    // inserted when the admins table is empty (a single atomic statement, so two
    // racing processes cannot both insert).
    repo.init_schema()
        .await
        .expect("FATAL: Failed to initialize database schema.");

    let password_hash =
        auth::hash_password(DEFAULT_ADMIN_PASSWORD).expect("FATAL: Failed to hash bootstrap password.");
    let created = repo
        .create_admin_if_missing(DEFAULT_ADMIN_USERNAME, &password_hash, DEFAULT_ADMIN_EMAIL)
        .await
        .expect("FATAL: Failed to bootstrap default admin.");
    if created {
        tracing::warn!(
            username = DEFAULT_ADMIN_USERNAME,
            "default admin created; change the default password immediately"
        );
    }

    // 6. Unified State Assembly
    let port = config.port;
    let app_state = AppState { repo, config };

    // 7. Router and Server Startup
    let app = create_router(app_state);

    // Binds the TCP listener and initiates the HTTP server.
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("FATAL: Failed to bind HTTP port.");

    tracing::info!("Listening on 0.0.0.0:{}", port);
    tracing::info!(
        "API Documentation (Swagger UI) available at: http://localhost:{}/swagger-ui",
        port
    );

    // The long-running Axum server process.
    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}
