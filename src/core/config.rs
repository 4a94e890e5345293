use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub customer_service: CustomerServiceConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Storage engine behind the repositories, chosen at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres,
    Sqlite,
}

impl FromStr for DatabaseBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" | "memory" => Ok(Self::Sqlite),
            other => Err(format!(
                "DATABASE_BACKEND must be 'postgres' or 'sqlite', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub retry: RetryPolicy,
}

/// Fixed-delay retry used while waiting for the database at startup
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

/// Client-lookup service queried before an order is accepted
#[derive(Debug, Clone)]
pub struct CustomerServiceConfig {
    /// Base URL, without trailing slash (e.g. "http://svc-cliente-app:80")
    pub base_url: String,
    /// Upper bound for a single lookup request
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            customer_service: CustomerServiceConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

/// Worker count for the Tokio runtime from `TOKIO_WORKER_THREADS`,
/// defaulting to the available parallelism
pub fn tokio_worker_threads() -> Result<usize, String> {
    parse_worker_threads(env::var("TOKIO_WORKER_THREADS").ok())
}

fn parse_worker_threads(raw: Option<String>) -> Result<usize, String> {
    match raw {
        None => Ok(std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4)),
        Some(value) => match value.trim().parse::<usize>() {
            Ok(threads) if threads > 0 => Ok(threads),
            _ => Err(format!(
                "TOKIO_WORKER_THREADS must be a positive number, got '{}'",
                value
            )),
        },
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3333".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes
    const DEFAULT_CONNECT_MAX_ATTEMPTS: u32 = 10;
    const DEFAULT_CONNECT_RETRY_DELAY_SECS: u64 = 2;
    const DEFAULT_SQLITE_URL: &'static str = "sqlite::memory:";

    pub fn from_env() -> Result<Self, String> {
        let backend = env::var("DATABASE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .parse::<DatabaseBackend>()?;

        let url = match backend {
            DatabaseBackend::Postgres => env::var("DATABASE_URL")
                .map_err(|_| "DATABASE_URL must be set for the postgres backend".to_string())?,
            DatabaseBackend::Sqlite => {
                env::var("DATABASE_URL").unwrap_or_else(|_| Self::DEFAULT_SQLITE_URL.to_string())
            }
        };

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        let max_attempts = env::var("DB_CONNECT_MAX_ATTEMPTS")
            .unwrap_or_else(|_| Self::DEFAULT_CONNECT_MAX_ATTEMPTS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_CONNECT_MAX_ATTEMPTS must be a valid number".to_string())?;

        let retry_delay_secs = env::var("DB_CONNECT_RETRY_DELAY_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_CONNECT_RETRY_DELAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_CONNECT_RETRY_DELAY_SECS must be a valid number".to_string())?;

        Ok(Self {
            backend,
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
            retry: RetryPolicy {
                max_attempts: max_attempts.max(1),
                delay: Duration::from_secs(retry_delay_secs),
            },
        })
    }

    /// An in-memory SQLite database only lives as long as its connection
    pub fn is_in_memory(&self) -> bool {
        self.backend == DatabaseBackend::Sqlite && self.url.contains(":memory:")
    }
}

impl CustomerServiceConfig {
    const DEFAULT_BASE_URL: &'static str = "http://svc-cliente-app:80";
    const DEFAULT_TIMEOUT_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("CUSTOMER_SERVICE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = env::var("CUSTOMER_SERVICE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "CUSTOMER_SERVICE_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Order Service API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Products and orders for the food-ordering platform".to_string());

        Ok(Self {
            title,
            version,
            description,
        })
    }
}
