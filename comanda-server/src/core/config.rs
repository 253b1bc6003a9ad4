use chrono_tz::Tz;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 8080 | HTTP API port |
/// | TIMEZONE | Europe/Madrid | Business timezone (today-checks, reports) |
/// | EVENT_CHANNEL_CAPACITY | 1024 | Broadcast bus channel capacity |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_DIR | (unset) | Optional rolling log file directory |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=9000 TIMEZONE=Europe/Lisbon cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Business timezone; "today" is always computed in this zone
    pub timezone: Tz,
    /// Capacity of the event broadcast channel
    pub event_capacity: usize,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Europe::Madrid),
            event_capacity: std::env::var("EVENT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(1024),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Override the port, keeping everything else from the environment
    ///
    /// Mostly used in tests
    pub fn with_port(http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config
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
