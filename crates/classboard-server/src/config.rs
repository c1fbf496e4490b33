//! Configuration management

use serde::{Deserialize, Serialize};

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/classboard";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default minimum database connections in the pool.
pub const DEFAULT_DATABASE_MIN_CONNECTIONS: u32 = 2;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default database idle timeout in seconds (10 minutes).
pub const DEFAULT_DATABASE_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

// ============================================================================
// Playlist Provider Constants
// ============================================================================

/// Base URL of the YouTube Data API.
pub const DEFAULT_YOUTUBE_API_BASE_URL: &str = "https://youtube.googleapis.com";

/// Largest page the YouTube Data API serves for `playlistItems`.
pub const YOUTUBE_MAX_PAGE_SIZE: u32 = 50;

/// Default provider request timeout in seconds.
pub const DEFAULT_YOUTUBE_TIMEOUT_SECS: u64 = 30;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreBackend,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub provider: ProviderConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Which [`crate::store::CourseStore`] implementation backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local store, lost on restart
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid store backend: {}", s)),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

/// Playlist provider (YouTube Data API) configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    /// Page size requested from `playlistItems`; a single page is fetched
    pub max_results: u32,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_results", &self.max_results)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_YOUTUBE_API_BASE_URL.to_string(),
            max_results: YOUTUBE_MAX_PAGE_SIZE,
            timeout_secs: DEFAULT_YOUTUBE_TIMEOUT_SECS,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let store = match std::env::var("CLASSBOARD_STORE") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::default(),
        };

        let config = Config {
            server: ServerConfig {
                host: std::env::var("CLASSBOARD_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: env_or("CLASSBOARD_PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_or(
                    "CLASSBOARD_SHUTDOWN_TIMEOUT",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                ),
            },
            store,
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: env_or(
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_DATABASE_MAX_CONNECTIONS,
                ),
                min_connections: env_or(
                    "DATABASE_MIN_CONNECTIONS",
                    DEFAULT_DATABASE_MIN_CONNECTIONS,
                ),
                connect_timeout_secs: env_or(
                    "DATABASE_CONNECT_TIMEOUT",
                    DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                ),
                idle_timeout_secs: env_or(
                    "DATABASE_IDLE_TIMEOUT",
                    DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
                ),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_or("CORS_ALLOW_CREDENTIALS", true),
            },
            provider: ProviderConfig {
                api_key: std::env::var("YOUTUBE_API_KEY").unwrap_or_default(),
                base_url: std::env::var("YOUTUBE_API_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_YOUTUBE_API_BASE_URL.to_string()),
                max_results: env_or("YOUTUBE_MAX_RESULTS", YOUTUBE_MAX_PAGE_SIZE)
                    .clamp(1, YOUTUBE_MAX_PAGE_SIZE),
                timeout_secs: env_or("YOUTUBE_TIMEOUT_SECS", DEFAULT_YOUTUBE_TIMEOUT_SECS),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.store == StoreBackend::Postgres {
            if self.database.url.is_empty() {
                anyhow::bail!("Database URL cannot be empty");
            }

            if self.database.max_connections == 0 {
                anyhow::bail!("Database max_connections must be greater than 0");
            }

            if self.database.min_connections > self.database.max_connections {
                anyhow::bail!(
                    "Database min_connections ({}) cannot be greater than max_connections ({})",
                    self.database.min_connections,
                    self.database.max_connections
                );
            }
        }

        if self.provider.api_key.trim().is_empty() {
            anyhow::bail!("YOUTUBE_API_KEY must be set to reach the playlist provider");
        }

        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            anyhow::bail!(
                "Provider base URL must start with http:// or https:// (got '{}')",
                self.provider.base_url
            );
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            store: StoreBackend::default(),
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                idle_timeout_secs: DEFAULT_DATABASE_IDLE_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: true,
            },
            provider: ProviderConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.provider.api_key = "test-key".to_string();
        config
    }

    #[test]
    fn test_default_config_requires_api_key() {
        let err = Config::default().validate().unwrap_err();
        assert!(err.to_string().contains("YOUTUBE_API_KEY"));
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_pool_bounds_only_for_postgres() {
        let mut config = valid_config();
        config.database.min_connections = 20;
        assert!(config.validate().is_err());

        config.store = StoreBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_http_provider_url() {
        let mut config = valid_config();
        config.provider.base_url = "youtube.googleapis.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_debug_redacts_key() {
        let config = valid_config();
        let printed = format!("{:?}", config.provider);
        assert!(!printed.contains("test-key"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_store_backend_from_str() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!("PostgreSQL".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert!("mongodb".parse::<StoreBackend>().is_err());
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        std::env::set_var("YOUTUBE_API_KEY", "env-key");
        std::env::set_var("YOUTUBE_MAX_RESULTS", "500");
        std::env::set_var("CLASSBOARD_STORE", "memory");
        std::env::set_var("CLASSBOARD_PORT", "9090");

        let config = Config::load().unwrap();
        assert_eq!(config.provider.api_key, "env-key");
        assert_eq!(config.provider.max_results, YOUTUBE_MAX_PAGE_SIZE);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.server.port, 9090);

        std::env::remove_var("YOUTUBE_API_KEY");
        std::env::remove_var("YOUTUBE_MAX_RESULTS");
        std::env::remove_var("CLASSBOARD_STORE");
        std::env::remove_var("CLASSBOARD_PORT");
    }

    #[test]
    #[serial]
    fn test_load_fails_without_api_key() {
        std::env::remove_var("YOUTUBE_API_KEY");
        assert!(Config::load().is_err());
    }
}
