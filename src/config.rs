use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services.
/// It is pulled into the application state via FromRef, embodying the "immutable AppConfig"
/// part of the Unified State Pattern.
#[derive(Clone)]
pub struct AppConfig {
    // Database connection string (SQLite).
    pub db_url: String,
    // TCP port the HTTP server binds to.
    pub port: u16,
    // Runtime environment marker. Controls log formatting.
    pub env: Env,
    // Secret key used to sign and validate admin session tokens (JWT, HS256).
    pub jwt_secret: String,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (pretty logs, fallback secrets) and hardened production behaviour.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows tests to instantiate the configuration without needing to set
    /// environment variables.
    fn default() -> Self {
        Self {
            db_url: "sqlite::memory:".to_string(),
            port: 3000,
            env: Env::Local,
            jwt_secret: "super-secure-test-secret-value-local".to_string(),
        }
    }
}

impl AppConfig {
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the **fail-fast**
    /// principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime
    /// environment (especially Production) is not found. This prevents the application
    /// from starting with an incomplete or insecure configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        // Token Secret Resolution
        // Rotating this secret invalidates every outstanding session token, which is
        // acceptable: sessions are not required to survive a secret change.
        let jwt_secret = match env {
            Env::Production => {
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production.")
            }
            // In local, we provide a fallback, though the developer should ideally set one.
            _ => env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secure-test-secret-value-local".to_string()),
        };

        let db_url = match env {
            Env::Production => {
                env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod")
            }
            // The default local database lives next to the binary, mirroring the
            // single-file deployment the platform was designed for.
            Env::Local => env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://accessible_platform.db".to_string()),
        };

        Self {
            db_url,
            port,
            env,
            jwt_secret,
        }
    }
}
