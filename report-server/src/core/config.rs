//! Server Configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | DATABASE_URL | (unset) | Sales store endpoint; unset falls back to the in-memory store |
//! | DATABASE_NS | sales | Database namespace |
//! | DATABASE_DB | analytics | Database name |
//! | ORGANIZATION_ID | (unset) | Snapshot organization tag for the in-memory fallback |
//! | LOG_LEVEL | info | Tracing filter level |
//! | LOG_DIR | (unset) | Enables daily-rolling file logs when set |

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// Sales store endpoint; `None` selects the in-memory fallback
    pub database_url: Option<String>,
    pub database_ns: String,
    pub database_db: String,
    /// Organization tag used by the in-memory fallback store
    pub organization_id: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            database_url: std::env::var("DATABASE_URL").ok(),
            database_ns: std::env::var("DATABASE_NS").unwrap_or_else(|_| "sales".into()),
            database_db: std::env::var("DATABASE_DB").unwrap_or_else(|_| "analytics".into()),
            organization_id: std::env::var("ORGANIZATION_ID").ok(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
