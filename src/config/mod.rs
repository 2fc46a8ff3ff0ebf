use std::env;

/// Where documents are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    /// Process-local store; contents are lost on restart.
    Memory,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("unknown STORE_BACKEND '{0}' (expected 'postgres' or 'memory')")]
    UnknownBackend(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreBackend,
    pub host: String,
    pub port: u16,
    /// Base URL the client layer talks to.
    pub api_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = env::var("STORE_BACKEND").unwrap_or_else(|_| "postgres".to_string());
        let store = match backend.trim().to_ascii_lowercase().as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
            },
            "memory" => StoreBackend::Memory,
            _ => return Err(ConfigError::UnknownBackend(backend)),
        };

        Ok(Self {
            store,
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            api_base_url: api_base_url_from_env(),
        })
    }

    /// In-memory configuration on an ephemeral port, used by tests and demos.
    pub fn in_memory() -> Self {
        Self {
            store: StoreBackend::Memory,
            host: "127.0.0.1".to_string(),
            port: 0,
            api_base_url: default_api_base_url(),
        }
    }
}

/// `API_BASE_URL`, falling back to the local server default.
pub fn api_base_url_from_env() -> String {
    env::var("API_BASE_URL").unwrap_or_else(|_| default_api_base_url())
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}
